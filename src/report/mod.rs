//! Report module - partner digest and population comparison text

mod compare;
mod summary;

pub use compare::build_comparison;
pub use summary::build_summary;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Unknown partner key. Carries the valid ids for caller-side
    /// diagnostics, not for parsing.
    #[error("Partner ID {id} not found in KPI scores. Available partner IDs: {available:?}")]
    PartnerNotFound { id: i64, available: Vec<i64> },
    #[error("Partner ID {0} not found in question scores")]
    QuestionDataNotFound(i64),
}

impl ReportError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ReportError::PartnerNotFound { .. } | ReportError::QuestionDataNotFound(_)
        )
    }
}
