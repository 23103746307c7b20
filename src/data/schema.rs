//! Column Manifest Module
//! Declares the fixed KPI schema and the question-column naming conventions.

/// How a KPI column is typed and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiKind {
    /// Scored dimension, formatted with two decimals.
    Numeric,
    /// String classification, rendered raw.
    Categorical,
}

/// One entry of the fixed KPI schema.
#[derive(Debug, Clone, Copy)]
pub struct KpiColumn {
    pub name: &'static str,
    pub kind: KpiKind,
}

const fn numeric(name: &'static str) -> KpiColumn {
    KpiColumn {
        name,
        kind: KpiKind::Numeric,
    }
}

/// The twenty KPI columns every dataset row must carry.
/// `AIDW_ready` is the single categorical field.
pub const KPI_COLUMNS: [KpiColumn; 20] = [
    numeric("Sales_and_Marketing"),
    numeric("Cloud_Strategy"),
    numeric("Business_model"),
    numeric("Solution_Area_Focus"),
    numeric("Cloud_Services"),
    numeric("Cloud_Tooling"),
    numeric("KPI_Strat"),
    numeric("KPI_AI"),
    numeric("KPI_Copilot"),
    numeric("KPI_SEC"),
    numeric("KPI_Scale"),
    numeric("KPI_Data"),
    numeric("AIDW_AI_Index"),
    numeric("AIDW_DB_Index"),
    numeric("AIDW_Inno_Index"),
    numeric("Business_Capability"),
    numeric("Technical_Capability"),
    numeric("AIDW_Index"),
    numeric("Partner_PTI"),
    KpiColumn {
        name: "AIDW_ready",
        kind: KpiKind::Categorical,
    },
];

/// KPIs included in population comparison. Excludes `Cloud_Services`,
/// `KPI_SEC`, `Technical_Capability` and the categorical `AIDW_ready`.
pub const COMPARISON_KPIS: [&str; 16] = [
    "Sales_and_Marketing",
    "Cloud_Strategy",
    "Business_model",
    "Solution_Area_Focus",
    "Cloud_Tooling",
    "KPI_Strat",
    "KPI_AI",
    "KPI_Copilot",
    "KPI_Scale",
    "KPI_Data",
    "AIDW_AI_Index",
    "AIDW_DB_Index",
    "AIDW_Inno_Index",
    "Business_Capability",
    "AIDW_Index",
    "Partner_PTI",
];

/// Partner key column.
pub const PARTNER_ID: &str = "Partner_ID";

/// Secondary tenant identifier column.
pub const TPID: &str = "TPID";

/// Suffix of a scored-answer column.
pub const ANSWER_SUFFIX: &str = "_Answer";

/// Suffix of a supporting free-text column (excluded from the question view).
pub const ANSWER_TEXT_SUFFIX: &str = "_Answer_text";

/// Suffix of a human-readable question-label column.
pub const QUESTION_SUFFIX: &str = "_Answer_question";

/// Position of a KPI name in the manifest, if declared.
pub fn kpi_index(name: &str) -> Option<usize> {
    KPI_COLUMNS.iter().position(|c| c.name == name)
}

/// Whether a column name denotes a scored answer. The three suffix
/// conventions share the `_Answer` stem, so the longer two are rejected
/// explicitly.
pub fn is_scored_answer(name: &str) -> bool {
    name.ends_with(ANSWER_SUFFIX)
        && !name.ends_with(ANSWER_TEXT_SUFFIX)
        && !name.ends_with(QUESTION_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_kpis_are_declared_and_numeric() {
        for name in COMPARISON_KPIS {
            let idx = kpi_index(name).expect("comparison KPI must be declared");
            assert_eq!(KPI_COLUMNS[idx].kind, KpiKind::Numeric, "{name}");
        }
    }

    #[test]
    fn scored_answer_suffixes_are_disambiguated() {
        assert!(is_scored_answer("Q10_Answer"));
        assert!(!is_scored_answer("Q10_Answer_text"));
        assert!(!is_scored_answer("Q10_Answer_question"));
        assert!(!is_scored_answer("Q10_Notes"));
    }
}
