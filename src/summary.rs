use crate::error::{CensusError, Result};
use crate::metrics::AnalysisMetrics;
use crate::rollup::{Rollup, RollupRow};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Descriptive statistics over every value of a rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; undefined for a single value.
    pub std: Option<f64>,
    pub min: u64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: u64,
    pub mode_value: u64,
    pub mode_frequency: usize,
    pub mode_percentage: f64,
}

impl SummaryStats {
    pub fn compute(values: &[u64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        });
        let (mode_value, mode_frequency) = mode(values)?;

        Some(Self {
            count,
            mean,
            std,
            min: *values.iter().min()?,
            q25: quantile(&sorted, 0.25)?,
            median: quantile(&sorted, 0.5)?,
            q75: quantile(&sorted, 0.75)?,
            max: *values.iter().max()?,
            mode_value,
            mode_frequency,
            mode_percentage: 100.0 * mode_frequency as f64 / count as f64,
        })
    }
}

/// Most frequent value and its frequency. Ties go to the smallest value.
pub fn mode(values: &[u64]) -> Option<(u64, usize)> {
    let mut freq: BTreeMap<u64, usize> = BTreeMap::new();
    for &v in values {
        *freq.entry(v).or_default() += 1;
    }
    freq.into_iter()
        .fold(None, |best: Option<(u64, usize)>, (value, n)| match best {
            Some((_, top)) if top >= n => best,
            _ => Some((value, n)),
        })
}

/// Linear-interpolated quantile over ascending values.
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * ((sorted.len() - 1) as f64);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] * (1.0 - frac) + sorted[hi] * frac)
}

/// Full-rollup statistics plus the leading `n` rows.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub label: String,
    pub index_label: String,
    pub stats: SummaryStats,
    pub top: Vec<RollupRow>,
}

/// Summarize `rollup` and keep its first `n` rows.
///
/// Statistics always cover the whole rollup; `n` only limits the rows handed on.
pub fn summarize(rollup: &Rollup, n: i64) -> Result<Summary> {
    let n = usize::try_from(n).map_err(|_| CensusError::InvalidTopN(n))?;
    let stats = SummaryStats::compute(&rollup.values())
        .ok_or_else(|| CensusError::EmptyRollup(rollup.label.clone()))?;
    let top = rollup.rows().iter().take(n).cloned().collect::<Vec<_>>();
    debug!(label = %rollup.label, rows = rollup.len(), kept = top.len(), "Summarized rollup");
    AnalysisMetrics::record_summary();
    Ok(Summary {
        label: rollup.label.clone(),
        index_label: rollup.index_label.clone(),
        stats,
        top,
    })
}
