//! Schema Projector Module
//! Derives the KPI view, question view and question-label map from the
//! loaded DataFrame. All three are rebuilt together on every load.

use crate::data::schema::{
    self, KpiKind, ANSWER_SUFFIX, KPI_COLUMNS, PARTNER_ID, QUESTION_SUFFIX, TPID,
};
use polars::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Required column '{0}' is missing from the dataset")]
    MissingColumn(String),
    #[error("Column '{col}' is not usable as {expected}: {source}")]
    BadColumn {
        col: String,
        expected: &'static str,
        #[source]
        source: PolarsError,
    },
}

/// One KPI cell, typed per the manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum KpiValue {
    Number(f64),
    Text(String),
    Missing,
}

impl KpiValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            KpiValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// A partner's KPI cells, parallel to [`KPI_COLUMNS`].
#[derive(Debug, Clone)]
pub struct KpiRecord {
    pub values: Vec<KpiValue>,
}

/// A partner's scored answers, parallel to `Snapshot::question_columns`.
/// Answers are kept as rendered text; missing cells render as `NaN`.
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    pub tpid: String,
    pub answers: Vec<String>,
}

/// Immutable projection of one loaded dataset. Readers hold it behind an
/// `Arc`; a reload publishes a whole new snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Partner ids in table row order, first occurrence wins.
    pub partner_ids: Vec<i64>,
    pub kpi_view: HashMap<i64, KpiRecord>,
    pub question_view: HashMap<i64, QuestionRecord>,
    /// Scored-answer column names in declared column order.
    pub question_columns: Vec<String>,
    pub question_labels: HashMap<String, String>,
}

impl Snapshot {
    pub fn kpis(&self, partner_id: i64) -> Option<&KpiRecord> {
        self.kpi_view.get(&partner_id)
    }

    pub fn questions(&self, partner_id: i64) -> Option<&QuestionRecord> {
        self.question_view.get(&partner_id)
    }

    /// Human-readable label for a question code, falling back to the code.
    pub fn label_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.question_labels
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }

    /// A partner's numeric value for the KPI at `kpi_idx`, if recorded.
    pub fn partner_value(&self, partner_id: i64, kpi_idx: usize) -> Option<f64> {
        self.kpi_view
            .get(&partner_id)
            .and_then(|r| r.values.get(kpi_idx))
            .and_then(KpiValue::as_number)
    }

    /// All recorded values for one KPI across the population, in partner
    /// order, missing values dropped.
    pub fn population(&self, kpi_idx: usize) -> Vec<f64> {
        self.partner_ids
            .iter()
            .filter_map(|id| self.partner_value(*id, kpi_idx))
            .collect()
    }
}

enum KpiCells<'a> {
    Num(&'a Float64Chunked),
    Cat(&'a Column),
}

fn require<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, SchemaError> {
    df.column(name)
        .map_err(|_| SchemaError::MissingColumn(name.to_string()))
}

fn bad_column(col: &str, expected: &'static str, source: PolarsError) -> SchemaError {
    SchemaError::BadColumn {
        col: col.to_string(),
        expected,
        source,
    }
}

/// Render a single cell as display text, `None` when missing.
fn render_cell(col: &Column, i: usize) -> Option<String> {
    let val = col.get(i).ok()?;
    if val.is_null() {
        None
    } else {
        Some(val.to_string().trim_matches('"').to_string())
    }
}

/// Build all three derived views from a loaded table.
pub fn project(df: &DataFrame) -> Result<Snapshot, SchemaError> {
    let ids_col = require(df, PARTNER_ID)?
        .cast(&DataType::Int64)
        .map_err(|e| bad_column(PARTNER_ID, "integer ids", e))?;
    let ids = ids_col
        .i64()
        .map_err(|e| bad_column(PARTNER_ID, "integer ids", e))?;

    // KPI columns, cast once per the manifest's type tags
    let mut kpi_cols: Vec<Column> = Vec::with_capacity(KPI_COLUMNS.len());
    for kpi in &KPI_COLUMNS {
        let col = require(df, kpi.name)?;
        match kpi.kind {
            KpiKind::Numeric => kpi_cols.push(
                col.cast(&DataType::Float64)
                    .map_err(|e| bad_column(kpi.name, "numeric scores", e))?,
            ),
            KpiKind::Categorical => kpi_cols.push(col.clone()),
        }
    }
    let kpi_cells: Vec<KpiCells> = KPI_COLUMNS
        .iter()
        .zip(&kpi_cols)
        .map(|(kpi, col)| match kpi.kind {
            KpiKind::Numeric => col
                .f64()
                .map(KpiCells::Num)
                .map_err(|e| bad_column(kpi.name, "numeric scores", e)),
            KpiKind::Categorical => Ok(KpiCells::Cat(col)),
        })
        .collect::<Result<_, _>>()?;

    let tpid_col = require(df, TPID)?;

    // Scored-answer columns, declared order
    let question_columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|name| schema::is_scored_answer(name))
        .collect();
    let answer_cols: Vec<&Column> = question_columns
        .iter()
        .map(|name| require(df, name))
        .collect::<Result<_, _>>()?;

    let mut partner_ids: Vec<i64> = Vec::new();
    let mut kpi_view: HashMap<i64, KpiRecord> = HashMap::new();
    let mut question_view: HashMap<i64, QuestionRecord> = HashMap::new();

    for i in 0..df.height() {
        let Some(id) = ids.get(i) else {
            continue; // row without a partner key
        };
        if kpi_view.contains_key(&id) {
            continue; // duplicate key, first row wins
        }

        let values = kpi_cells
            .iter()
            .map(|cells| match cells {
                KpiCells::Num(ca) => match ca.get(i) {
                    Some(v) if !v.is_nan() => KpiValue::Number(v),
                    _ => KpiValue::Missing,
                },
                KpiCells::Cat(col) => match render_cell(col, i) {
                    Some(text) => KpiValue::Text(text),
                    None => KpiValue::Missing,
                },
            })
            .collect();

        let tpid = render_cell(tpid_col, i).unwrap_or_else(|| "NaN".to_string());
        let answers = answer_cols
            .iter()
            .map(|col| render_cell(col, i).unwrap_or_else(|| "NaN".to_string()))
            .collect();

        partner_ids.push(id);
        kpi_view.insert(id, KpiRecord { values });
        question_view.insert(id, QuestionRecord { tpid, answers });
    }

    let question_labels = build_label_map(df)?;

    Ok(Snapshot {
        partner_ids,
        kpi_view,
        question_view,
        question_columns,
        question_labels,
    })
}

/// Scan every `_Answer_question` column; map the derived answer code to the
/// first non-missing label in stored row order, falling back to the code.
fn build_label_map(df: &DataFrame) -> Result<HashMap<String, String>, SchemaError> {
    let mut labels = HashMap::new();

    for name in df.get_column_names() {
        let name = name.to_string();
        let Some(stem) = name.strip_suffix(QUESTION_SUFFIX) else {
            continue;
        };
        let code = format!("{stem}{ANSWER_SUFFIX}");
        let col = require(df, &name)?;

        let label = (0..df.height())
            .find_map(|i| render_cell(col, i))
            .unwrap_or_else(|| code.clone());
        labels.insert(code, label);
    }

    Ok(labels)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Dataset with three partners. All numeric KPIs share a partner's base
    /// score except `KPI_AI` (80/60/40) and `KPI_Data`, which is missing for
    /// partner 3.
    pub(crate) fn sample_df() -> DataFrame {
        let mut cols: Vec<Column> = vec![
            Column::new(PARTNER_ID.into(), vec![1i64, 2, 3]),
            Column::new(TPID.into(), vec!["T-100", "T-200", "T-300"]),
        ];
        for kpi in &KPI_COLUMNS {
            let col = match (kpi.name, kpi.kind) {
                ("AIDW_ready", _) => Column::new(kpi.name.into(), vec!["Yes", "No", "Partial"]),
                ("KPI_AI", _) => Column::new(kpi.name.into(), vec![80.0f64, 60.0, 40.0]),
                ("KPI_Data", _) => Column::new(kpi.name.into(), vec![Some(55.0f64), Some(65.0), None]),
                (_, KpiKind::Numeric) => Column::new(kpi.name.into(), vec![50.0f64, 50.0, 50.0]),
                (_, KpiKind::Categorical) => unreachable!("single categorical KPI"),
            };
            cols.push(col);
        }
        cols.push(Column::new(
            "Q1_Answer".into(),
            vec![Some(3.0f64), Some(2.0), None],
        ));
        cols.push(Column::new(
            "Q1_Answer_text".into(),
            vec!["free text a", "free text b", "free text c"],
        ));
        cols.push(Column::new(
            "Q1_Answer_question".into(),
            vec![None, Some("How mature is your cloud practice?"), Some("ignored later text")],
        ));
        cols.push(Column::new("Q2_Answer".into(), vec!["A", "B", "C"]));
        // Q2 has no label column at all -> falls back to the code
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn kpi_view_is_keyed_by_partner_with_typed_cells() {
        let snap = project(&sample_df()).unwrap();
        assert_eq!(snap.partner_ids, vec![1, 2, 3]);

        let ai = schema::kpi_index("KPI_AI").unwrap();
        assert_eq!(snap.partner_value(1, ai), Some(80.0));
        assert_eq!(snap.partner_value(3, ai), Some(40.0));

        let data = schema::kpi_index("KPI_Data").unwrap();
        assert_eq!(snap.partner_value(3, data), None);
        assert_eq!(snap.kpis(3).unwrap().values[data], KpiValue::Missing);

        let ready = schema::kpi_index("AIDW_ready").unwrap();
        assert_eq!(
            snap.kpis(1).unwrap().values[ready],
            KpiValue::Text("Yes".to_string())
        );
    }

    #[test]
    fn question_view_keeps_only_scored_answer_columns() {
        let snap = project(&sample_df()).unwrap();
        assert_eq!(snap.question_columns, vec!["Q1_Answer", "Q2_Answer"]);

        let rec = snap.questions(2).unwrap();
        assert_eq!(rec.tpid, "T-200");
        assert_eq!(rec.answers, vec!["2.0", "B"]);

        // missing answer renders as NaN, the field is not dropped
        assert_eq!(snap.questions(3).unwrap().answers[0], "NaN");
    }

    #[test]
    fn label_map_takes_first_non_missing_in_row_order() {
        let snap = project(&sample_df()).unwrap();
        assert_eq!(
            snap.label_for("Q1_Answer"),
            "How mature is your cloud practice?"
        );
    }

    #[test]
    fn label_map_falls_back_to_the_code() {
        let snap = project(&sample_df()).unwrap();
        assert_eq!(snap.label_for("Q2_Answer"), "Q2_Answer");
    }

    #[test]
    fn missing_kpi_column_is_a_schema_error() {
        let df = sample_df().drop("KPI_Strat").unwrap();
        let err = project(&df).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn(name) if name == "KPI_Strat"));
    }

    #[test]
    fn duplicate_partner_rows_keep_the_first() {
        let mut cols: Vec<Column> = vec![
            Column::new(PARTNER_ID.into(), vec![7i64, 7]),
            Column::new(TPID.into(), vec!["T-700", "T-701"]),
        ];
        for kpi in &KPI_COLUMNS {
            let col = match kpi.kind {
                KpiKind::Numeric => Column::new(kpi.name.into(), vec![10.0f64, 99.0]),
                KpiKind::Categorical => Column::new(kpi.name.into(), vec!["Yes", "No"]),
            };
            cols.push(col);
        }
        let snap = project(&DataFrame::new(cols).unwrap()).unwrap();

        assert_eq!(snap.partner_ids, vec![7]);
        assert_eq!(snap.questions(7).unwrap().tpid, "T-700");
        let ai = schema::kpi_index("KPI_AI").unwrap();
        assert_eq!(snap.partner_value(7, ai), Some(10.0));
    }
}
