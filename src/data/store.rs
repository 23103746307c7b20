//! Dataset Store Module
//! Process-wide owner of the loaded dataset. One writer (reload), many
//! concurrent readers taking immutable snapshots.

use crate::data::loader::{self, DataSourceError};
use crate::data::views::{self, SchemaError, Snapshot};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Source(#[from] DataSourceError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Owns the current [`Snapshot`] behind an atomically swappable reference.
/// A failed reload never disturbs the published snapshot.
pub struct DataStore {
    path: PathBuf,
    current: RwLock<Arc<Snapshot>>,
}

impl DataStore {
    /// Load the source once and publish the initial snapshot.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = build_snapshot(&path)?;
        Ok(Self {
            path,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Rebuild table and views fully off to the side, then publish them in
    /// one swap. On failure the prior snapshot stays in place.
    pub fn reload(&self) -> Result<(), StoreError> {
        let snapshot = build_snapshot(&self.path)?;
        info!(
            partners = snapshot.partner_ids.len(),
            questions = snapshot.question_columns.len(),
            "dataset reloaded from {}",
            self.path.display()
        );
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Arc::new(snapshot);
        Ok(())
    }

    /// The currently published snapshot. Immutable for the caller; a later
    /// reload does not affect it.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn source_path(&self) -> &Path {
        &self.path
    }
}

fn build_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
    let df = loader::load_csv(path)?;
    Ok(views::project(&df)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{KpiKind, KPI_COLUMNS};
    use crate::report;
    use std::fs;
    use tempfile::tempdir;

    fn sample_csv() -> String {
        let mut header = String::from("Partner_ID,TPID");
        for kpi in &KPI_COLUMNS {
            header.push(',');
            header.push_str(kpi.name);
        }
        header.push_str(",Q1_Answer,Q1_Answer_question\n");

        let mut body = String::new();
        for (id, tpid, score, ready, answer) in [
            (1, "T-100", "80.0", "Yes", "3"),
            (2, "T-200", "60.0", "No", "2"),
        ] {
            body.push_str(&format!("{id},{tpid}"));
            for kpi in &KPI_COLUMNS {
                match kpi.kind {
                    KpiKind::Numeric => body.push_str(&format!(",{score}")),
                    KpiKind::Categorical => body.push_str(&format!(",{ready}")),
                }
            }
            body.push_str(&format!(",{answer},Readiness question\n"));
        }
        header + &body
    }

    #[test]
    fn failed_reload_preserves_the_previous_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partners.csv");
        fs::write(&path, sample_csv()).unwrap();

        let store = DataStore::open(&path).unwrap();
        let before = report::build_summary(&store.snapshot(), 1).unwrap();

        // Drop every expected column so projection fails
        fs::write(&path, "a,b\n1,2\n").unwrap();
        let err = store.reload().unwrap_err();
        assert!(matches!(err, StoreError::Schema(_)));

        let after = report::build_summary(&store.snapshot(), 1).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn successful_reload_swaps_in_new_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partners.csv");
        fs::write(&path, sample_csv()).unwrap();

        let store = DataStore::open(&path).unwrap();
        let held = store.snapshot();

        fs::write(&path, sample_csv().replace("T-100", "T-111")).unwrap();
        store.reload().unwrap();

        assert_eq!(store.snapshot().questions(1).unwrap().tpid, "T-111");
        // a snapshot taken before the reload is unaffected
        assert_eq!(held.questions(1).unwrap().tpid, "T-100");
    }
}
