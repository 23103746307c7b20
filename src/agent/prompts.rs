//! Prompt Sequence Module
//! The fixed analysis pipeline sent to the agent, one section per prompt.
//! The partner summary and comparison text are embedded where needed; the
//! rest is static instruction text.

/// One prompt of the pipeline. `name` becomes the transcript heading.
pub struct PromptSection {
    pub name: &'static str,
    pub content: String,
}

const LANGUAGE_NOTE: &str =
    "[Response Language: German (just like mentioned in instructions)]";

/// Build the full prompt sequence for one partner.
pub fn analysis_sequence(summary: &str, comparison: &str) -> Vec<PromptSection> {
    vec![
        PromptSection {
            name: "Initial Summary",
            content: format!(
                "For this prompt, just consume the text. I need your output \
                 from the next prompt.\n{summary}"
            ),
        },
        PromptSection {
            name: "Strength Analysis",
            content: format!(
                "{LANGUAGE_NOTE}\n\
                 Based on the previous evaluation summary, generate a detailed \
                 analysis of the customer's strengths. Your response must \
                 include exactly 5-6 distinct strengths.\n\n\
                 For each strength:\n\
                 - Start with a bolded headline stating the name of the \
                 strength (Markdown: **Strength Name**)\n\
                 - Follow with a single, well-developed paragraph (5-7 \
                 sentences) explaining what this strength is, what having it \
                 means, what it enables the partner to do, how it impacts \
                 their customers or business performance, its market \
                 relevance, and how it is manifested in the partner's \
                 answers.\n\n\
                 Do not use bullet points, line breaks, or numbered lists \
                 within paragraphs. Each paragraph must cover a unique \
                 aspect without repeating ideas.\n\n\
                 Use the following format:\n\n\
                 **Strength #1 headline**:\n[Paragraph about this strength.]\n\n\
                 **Strength #2 headline**:\n[Paragraph about this strength.]\n\n\
                 (and so on until Strength #5)"
            ),
        },
        PromptSection {
            name: "Weakness Analysis",
            content: format!(
                "{LANGUAGE_NOTE}\n\
                 Based on the previous evaluation summary, generate a detailed \
                 analysis of the customer's weaknesses. Your response must \
                 include exactly 5-6 distinct weaknesses.\n\n\
                 For each weakness:\n\
                 - Start with a bolded headline stating the name of the \
                 weakness (Markdown: **Weakness Name**)\n\
                 - Follow with a single, well-developed paragraph (5-7 \
                 sentences) explaining what this weakness is, what having it \
                 means, what it limits the partner from doing, and how it \
                 impacts their customers or business performance.\n\n\
                 Do not use bullet points, line breaks, or numbered lists \
                 within paragraphs. Each paragraph must cover a unique \
                 aspect without repeating ideas.\n\n\
                 Use the following format:\n\n\
                 **Weakness #1 headline**:\n[Paragraph about this weakness.]\n\n\
                 **Weakness #2 headline**:\n[Paragraph about this weakness.]\n\n\
                 (and so on until Weakness #5)"
            ),
        },
        PromptSection {
            name: "Opportunity Assessment",
            content: format!(
                "{LANGUAGE_NOTE}\n\
                 Based on the previous evaluation summary, generate a detailed \
                 analysis of the business opportunities emerging from the \
                 identified strengths. Provide exactly as many distinct \
                 opportunities as strengths.\n\n\
                 For each opportunity:\n\
                 - Start with a bolded headline stating the name of the \
                 opportunity (Markdown: **Opportunity Name**)\n\
                 - Follow with a single, well-developed paragraph (5-7 \
                 sentences) explaining what opportunity arises from the \
                 corresponding strength, what exploiting it would let the \
                 partner achieve, and the impact on their customers or \
                 overall business performance.\n\n\
                 Do not use bullet points, line breaks, or numbered lists \
                 within paragraphs.\n\n\
                 Use the following format:\n\n\
                 **Opportunity #1 headline**:\n[Paragraph about this opportunity.]\n\n\
                 **Opportunity #2 headline**:\n[Paragraph about this opportunity.]\n\n\
                 (and so on until Opportunity #5)"
            ),
        },
        PromptSection {
            name: "Comparison to other partners",
            content: format!(
                "{LANGUAGE_NOTE}\n\
                 {comparison}\n\n\
                 Based on the summary statistics of all partner results and \
                 the selected partner, generate a detailed analysis of the \
                 partner's top 3 best-performing and bottom 3 \
                 worst-performing KPIs. Focus primarily on KPI_Strat, \
                 KPI_AI, KPI_Copilot, KPI_SEC, KPI_Scale, KPI_Data, \
                 AIDW_Index and AIDW_ready, Business_Capability, \
                 Technical_Capability. Avoid treating AIDW_AI_Index, \
                 AIDW_DB_Index and AIDW_Inno_Index as separate areas of \
                 focus. Keep the language simple, avoid statistics jargon, \
                 and prefer phrasing such as 'in the top x% of performers' \
                 over raw percentiles.\n\n\
                 First analyze the 3 strongest KPIs, then the 3 weakest. \
                 For each KPI start with a bolded headline (Markdown: \
                 **KPI Name - Strong/Weak Performance**) followed by a \
                 single paragraph (5-7 sentences) covering performance \
                 relative to other partners, what it means for the business, \
                 market-position impact, concrete recommendations, and the \
                 general maturity level in this area.\n\n\
                 Use the following format:\n\n\
                 ### Top 3 Strongest KPIs:\n\n\
                 **KPI #1 - Area of Excellence**:\n[Paragraph.]\n\n\
                 ### Top 3 Areas for Improvement:\n\n\
                 **KPI #1 - Development Area**:\n[Paragraph.]"
            ),
        },
        PromptSection {
            name: "Recommendation Assessment",
            content: format!(
                "{LANGUAGE_NOTE}\n\
                 Based on the previous evaluation summary, generate a \
                 detailed set of actionable recommendations, divided into \
                 two sections:\n\n\
                 1. **Recommendations for Weaknesses**\n\
                 2. **Recommendations for Opportunities**\n\n\
                 The number of recommendations in each section must match \
                 the number of weaknesses and opportunities identified \
                 earlier. For each recommendation, state which weakness or \
                 opportunity it addresses, start with a bolded headline \
                 (Markdown: **Recommendation Name**), and follow with a \
                 single paragraph (5-7 sentences) explaining what it \
                 involves, why it is relevant, how it addresses the \
                 weakness or exploits the opportunity, the expected \
                 business impact, an effort estimate (short-term: 1 month, \
                 mid-term: 3-6 months, long-term: 6-12 months), and its \
                 sales relevance (high, medium or low).\n\n\
                 Each recommendation must include at least one specific, \
                 concrete suggestion such as a relevant training program, \
                 certification course, workshop, internal process \
                 improvement, or strategic initiative from the connected \
                 knowledge base.\n\n\
                 Use the following format:\n\n\
                 ### Recommendations for Weaknesses:\n\n\
                 **Recommendation #1 headline**:\n[Paragraph.]\n\n\
                 ### Recommendations for Opportunities:\n\n\
                 **Recommendation #1 headline**:\n[Paragraph.]"
            ),
        },
        PromptSection {
            name: "Summary Assessment",
            content: format!(
                "{LANGUAGE_NOTE}\n\
                 Generate a detailed strategic assessment of the partner's \
                 current position and future potential within the partner \
                 ecosystem, titled 'Summary of [partner ID]', in precise \
                 and formal language. Cover:\n\n\
                 - A summary of current performance and positioning, \
                 highlighting strengths and unique differentiators.\n\
                 - Five strategic dimensions in separate paragraphs - \
                 People, AI, Innovation, Transformation, and Impact - as a \
                 framework for the necessary AI transformation, each with \
                 actionable recommendations and relevant programs, \
                 technologies, and opportunities.\n\
                 - Performance metrics: summarize the KPIs, compare them to \
                 the partner benchmark, and name where the company excels \
                 or falls short.\n\
                 - A concluding summary with a motivational call to action, \
                 acknowledging current achievements while giving a \
                 constructive, data-backed critique, closing with an \
                 optimistic outlook."
            ),
        },
    ]
}
