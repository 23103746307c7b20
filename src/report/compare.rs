//! Comparative Statistics Module
//! Population descriptive statistics plus the partner's percentile rank,
//! rendered as prompt-ready text. One KPI per line, computed in parallel.

use crate::data::schema::{self, COMPARISON_KPIS};
use crate::data::views::Snapshot;
use crate::report::ReportError;
use rayon::prelude::*;

/// Descriptive statistics for one KPI's non-missing population.
#[derive(Debug, Clone, Copy)]
struct KpiStats {
    mean: f64,
    std: f64,
    p25: f64,
    p75: f64,
}

/// Build the comparison block for one partner across the fixed KPI subset.
///
/// Population statistics ignore missing values. A partner with no recorded
/// value for a KPI still gets the population line, with the score rendered
/// as `N/A` instead of a number and percentile.
pub fn build_comparison(snapshot: &Snapshot, partner_id: i64) -> Result<String, ReportError> {
    if snapshot.kpis(partner_id).is_none() {
        return Err(ReportError::PartnerNotFound {
            id: partner_id,
            available: snapshot.partner_ids.clone(),
        });
    }

    let lines: Vec<String> = COMPARISON_KPIS
        .par_iter()
        .filter_map(|name| {
            let idx = schema::kpi_index(name)?;
            let population = snapshot.population(idx);
            if population.is_empty() {
                return None; // no recorded values anywhere for this KPI
            }
            let stats = descriptive_stats(&population);
            let score = match snapshot.partner_value(partner_id, idx) {
                Some(value) => {
                    let rank = percentile_rank(&population, value);
                    format!("{value:.2} (at {rank}th percentile)")
                }
                None => "N/A (no recorded value)".to_string(),
            };
            Some(format!(
                " {name}: Mean - {mean:.2}, Standard Deviation - {std:.2}, \
                 25th percentile - {p25:.2}, 75th percentile - {p75:.2}, \
                 Partner Score - {score}\n",
                mean = stats.mean,
                std = stats.std,
                p25 = stats.p25,
                p75 = stats.p75,
            ))
        })
        .collect();

    Ok(format!("Statistics of all partners:\n{}", lines.concat()))
}

fn descriptive_stats(values: &[f64]) -> KpiStats {
    let n = values.len();
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / n as f64;
    // sample variance (n - 1)
    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    KpiStats {
        mean,
        std: variance.sqrt(),
        p25: percentile(&sorted, 25.0),
        p75: percentile(&sorted, 75.0),
    }
}

/// Percentile by linear interpolation over a sorted slice.
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

/// Percentage-of-score rank, 0-100, truncated to an integer. Counts values
/// below and at-or-below the score, with a one-count bump when the score is
/// present, so the top value ranks 100.
fn percentile_rank(values: &[f64], score: f64) -> i64 {
    let below = values.iter().filter(|v| **v < score).count();
    let at_or_below = values.iter().filter(|v| **v <= score).count();
    let bump = usize::from(at_or_below > below);
    ((below + at_or_below + bump) as f64 * 50.0 / values.len() as f64) as i64
}
