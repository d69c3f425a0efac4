//! Quality metric computation and fixed pass/fail criteria.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::dataset::{DataTable, DataVariant};

/// Computed snapshot of dataset quality. Never persisted, always recomputed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub total_records: usize,
    pub total_columns: usize,
    pub missing_rates: BTreeMap<String, f64>,
    pub max_missing_rate: f64,
    pub duplicate_rate: f64,
    pub field_coverage: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_missing_rate: Option<f64>,
}

/// One acceptance criterion evaluated against the snapshot. Count-type
/// criteria carry integer values, rate-type criteria floats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Criterion {
    pub value: Value,
    pub threshold: Value,
    pub passed: bool,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetricsReport {
    #[serde(flatten)]
    pub metrics: QualityMetrics,
    pub criteria: BTreeMap<String, Criterion>,
    pub all_passed: bool,
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn compute_metrics(table: &DataTable, variant: DataVariant) -> QualityMetrics {
    let n = table.len();

    let mut missing_rates = BTreeMap::new();
    for (idx, col) in table.columns.iter().enumerate() {
        let missing = table.rows.iter().filter(|r| r[idx].is_none()).count();
        missing_rates.insert(col.clone(), pct(missing, n));
    }
    let max_missing_rate = missing_rates
        .values()
        .copied()
        .fold(0.0_f64, f64::max);

    // A row counts as duplicate when identical to an earlier row across all
    // columns, null cells included.
    let mut seen: HashSet<&Vec<Option<String>>> = HashSet::with_capacity(n);
    let duplicates = table.rows.iter().filter(|&r| !seen.insert(r)).count();
    let duplicate_rate = pct(duplicates, n);

    let mut field_coverage = BTreeMap::new();
    for field in variant.required_fields() {
        let coverage = match table.col_index(field) {
            Some(idx) => {
                let non_null = table.rows.iter().filter(|r| r[idx].is_some()).count();
                pct(non_null, n)
            }
            // Absent required column is zero coverage, not an error.
            None => 0.0,
        };
        field_coverage.insert(field.to_string(), coverage);
    }

    let mut metrics = QualityMetrics {
        total_records: n,
        total_columns: table.columns.len(),
        missing_rates,
        max_missing_rate,
        duplicate_rate,
        field_coverage,
        ad_count: None,
        fake_count: None,
        similar_count: None,
        label_missing_rate: None,
    };

    if variant == DataVariant::Labeled {
        metrics.ad_count = Some(count_true(table, "is_ad"));
        metrics.fake_count = Some(count_true(table, "is_fake"));
        metrics.similar_count = Some(count_present(table, "similar_id_1"));

        let missing_labels = count_missing(table, "is_ad") + count_missing(table, "is_fake");
        let rate = if n == 0 {
            0.0
        } else {
            round2(missing_labels as f64 / (n as f64 * 2.0) * 100.0)
        };
        metrics.label_missing_rate = Some(rate);
    }

    metrics
}

fn pct(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

fn count_true(table: &DataTable, col: &str) -> u64 {
    if table.col_index(col).is_none() {
        return 0;
    }
    (0..table.len())
        .filter(|&row| table.bool_cell(row, col) == Some(true))
        .count() as u64
}

fn count_present(table: &DataTable, col: &str) -> u64 {
    match table.col_index(col) {
        Some(idx) => table.rows.iter().filter(|r| r[idx].is_some()).count() as u64,
        None => 0,
    }
}

fn count_missing(table: &DataTable, col: &str) -> usize {
    match table.col_index(col) {
        Some(idx) => table.rows.iter().filter(|r| r[idx].is_none()).count(),
        None => 0,
    }
}

/// Evaluates the fixed acceptance thresholds for the variant.
pub fn evaluate_criteria(metrics: &QualityMetrics, variant: DataVariant) -> MetricsReport {
    let mut criteria = BTreeMap::new();

    match variant {
        DataVariant::Preprocessed => {
            criteria.insert(
                "record_count".to_string(),
                Criterion {
                    value: json!(metrics.total_records),
                    threshold: json!(100_000),
                    passed: metrics.total_records >= 100_000,
                    description: "record count >= 100,000".to_string(),
                },
            );
            criteria.insert(
                "missing_rate".to_string(),
                Criterion {
                    value: json!(metrics.max_missing_rate),
                    threshold: json!(5.0),
                    passed: metrics.max_missing_rate <= 5.0,
                    description: "missing rate <= 5%".to_string(),
                },
            );
            criteria.insert(
                "duplicate_rate".to_string(),
                Criterion {
                    value: json!(metrics.duplicate_rate),
                    threshold: json!(5.0),
                    passed: metrics.duplicate_rate <= 5.0,
                    description: "duplicate rate <= 5%".to_string(),
                },
            );
            let min_coverage = metrics
                .field_coverage
                .values()
                .copied()
                .fold(f64::INFINITY, f64::min);
            let min_coverage = if min_coverage.is_finite() {
                min_coverage
            } else {
                0.0
            };
            criteria.insert(
                "required_fields".to_string(),
                Criterion {
                    value: json!(min_coverage),
                    threshold: json!(100.0),
                    passed: metrics.field_coverage.values().all(|&v| v == 100.0),
                    description: "required field coverage 100%".to_string(),
                },
            );
        }
        DataVariant::Labeled => {
            criteria.insert(
                "record_count".to_string(),
                Criterion {
                    value: json!(metrics.total_records),
                    threshold: json!(10_000),
                    passed: metrics.total_records >= 10_000,
                    description: "labeled record count >= 10,000".to_string(),
                },
            );
            let label_missing = metrics.label_missing_rate.unwrap_or(0.0);
            criteria.insert(
                "label_missing_rate".to_string(),
                Criterion {
                    value: json!(label_missing),
                    threshold: json!(3.0),
                    passed: label_missing <= 3.0,
                    description: "label missing rate <= 3%".to_string(),
                },
            );
        }
    }

    let all_passed = criteria.values().all(|c| c.passed);
    MetricsReport {
        metrics: metrics.clone(),
        criteria,
        all_passed,
    }
}
