//! Partner Summary Module
//! Renders one partner's KPI scores and question replies as a text digest.

use crate::data::schema::{KpiKind, KPI_COLUMNS};
use crate::data::views::{KpiValue, Snapshot};
use crate::report::ReportError;
use std::fmt::Write;

/// Build the multi-line digest for one partner.
///
/// Numeric KPIs print with two decimals and are silently omitted when
/// missing; the categorical `AIDW_ready` always prints raw. Question
/// replies are numbered contiguously from 1 and use the resolved question
/// label, falling back to the raw code.
pub fn build_summary(snapshot: &Snapshot, partner_id: i64) -> Result<String, ReportError> {
    let kpis = snapshot
        .kpis(partner_id)
        .ok_or_else(|| ReportError::PartnerNotFound {
            id: partner_id,
            available: snapshot.partner_ids.clone(),
        })?;
    let questions = snapshot
        .questions(partner_id)
        .ok_or(ReportError::QuestionDataNotFound(partner_id))?;

    let mut text = format!(
        "Chosen Partner: {partner_id} with TPID: {tpid}\n\nKPI Scores:",
        tpid = questions.tpid
    );

    for (kpi, value) in KPI_COLUMNS.iter().zip(&kpis.values) {
        match (kpi.kind, value) {
            (_, KpiValue::Number(score)) => {
                let _ = write!(text, "\n{}: {score:.2}", kpi.name);
            }
            (KpiKind::Categorical, KpiValue::Text(raw)) => {
                let _ = write!(text, "\n{}: {raw}", kpi.name);
            }
            (KpiKind::Categorical, KpiValue::Missing) => {
                let _ = write!(text, "\n{}: N/A", kpi.name);
            }
            _ => {} // missing numeric score, omitted
        }
    }

    text.push_str("\n\nQuestion replies:");
    for (i, (code, answer)) in snapshot
        .question_columns
        .iter()
        .zip(&questions.answers)
        .enumerate()
    {
        let _ = write!(text, "\n{}. {}: {answer}", i + 1, snapshot.label_for(code));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::views::{self, tests::sample_df};

    #[test]
    fn digest_names_partner_and_tpid() {
        let snap = views::project(&sample_df()).unwrap();
        let text = build_summary(&snap, 1).unwrap();
        assert!(text.starts_with("Chosen Partner: 1 with TPID: T-100\n"));
        assert!(text.contains("KPI Scores:"));
        assert!(text.contains("Question replies:"));
    }

    #[test]
    fn numeric_kpis_print_two_decimals_and_missing_ones_are_omitted() {
        let snap = views::project(&sample_df()).unwrap();

        let text = build_summary(&snap, 1).unwrap();
        assert!(text.contains("\nKPI_AI: 80.00"));
        assert!(text.contains("\nKPI_Data: 55.00"));

        // partner 3 has no KPI_Data value
        let text = build_summary(&snap, 3).unwrap();
        assert!(!text.contains("KPI_Data"));
        assert!(!text.contains("NaN:"));
    }

    #[test]
    fn aidw_ready_always_prints_raw() {
        let snap = views::project(&sample_df()).unwrap();
        assert!(build_summary(&snap, 1).unwrap().contains("\nAIDW_ready: Yes"));
        assert!(build_summary(&snap, 3)
            .unwrap()
            .contains("\nAIDW_ready: Partial"));
    }

    #[test]
    fn question_replies_are_numbered_from_one_with_label_fallback() {
        let snap = views::project(&sample_df()).unwrap();
        let text = build_summary(&snap, 2).unwrap();
        assert!(text.contains("\n1. How mature is your cloud practice?: 2.0"));
        // Q2 has no label column; the code itself is the label
        assert!(text.contains("\n2. Q2_Answer: B"));
    }

    #[test]
    fn unknown_partner_reports_the_valid_ids() {
        let snap = views::project(&sample_df()).unwrap();
        let err = build_summary(&snap, 99).unwrap_err();
        assert!(err.is_not_found());
        let message = err.to_string();
        assert!(message.contains("99"));
        assert!(message.contains("[1, 2, 3]"));
    }

    #[test]
    fn missing_question_data_is_distinguished_from_missing_kpi_data() {
        let mut snap = views::project(&sample_df()).unwrap();
        snap.question_view.remove(&2);

        let err = build_summary(&snap, 2).unwrap_err();
        assert!(matches!(err, ReportError::QuestionDataNotFound(2)));
        assert!(err.to_string().contains("question scores"));
    }
}
