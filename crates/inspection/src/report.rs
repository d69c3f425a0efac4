//! Read-only rollup across datasets and all persisted results.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::label_mismatch_rate;
use crate::dataset::{DatasetStore, DataVariant};
use crate::metrics::compute_metrics;
use crate::store::InspectionStore;
use crate::Result;

/// One session line in the report, newest saves first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionReportRow {
    pub session_id: String,
    pub pass_rate: f64,
    pub inspected_count: usize,
    pub saved_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_mismatch_rate: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReportSummary {
    pub generated_at: String,
    pub preprocessed_data: Value,
    pub labeled_data: Value,
    pub inspection_sessions: Vec<SessionReportRow>,
}

/// Metrics per variant when its backing file exists (empty object otherwise)
/// plus every persisted result with its mismatch rate.
pub fn build_report(datasets: &DatasetStore, store: &InspectionStore) -> Result<ReportSummary> {
    let mut report = ReportSummary {
        generated_at: Utc::now().to_rfc3339(),
        preprocessed_data: Value::Object(Default::default()),
        labeled_data: Value::Object(Default::default()),
        inspection_sessions: Vec::new(),
    };

    for variant in [DataVariant::Preprocessed, DataVariant::Labeled] {
        if !datasets.exists(variant) {
            continue;
        }
        let table = datasets.load(variant)?;
        let metrics = serde_json::to_value(compute_metrics(&table, variant))?;
        match variant {
            DataVariant::Preprocessed => report.preprocessed_data = metrics,
            DataVariant::Labeled => report.labeled_data = metrics,
        }
    }

    for result in store.list_results()? {
        let mut row = SessionReportRow {
            session_id: result.session_id.clone(),
            pass_rate: result.pass_rate,
            inspected_count: result.inspected_count,
            saved_at: result.saved_at.clone(),
            label_mismatch_rate: None,
        };
        if result.data_type == DataVariant::Labeled {
            row.label_mismatch_rate = label_mismatch_rate(&result.inspections);
        }
        report.inspection_sessions.push(row);
    }
    report
        .inspection_sessions
        .sort_by(|a, b| b.saved_at.cmp(&a.saved_at));

    Ok(report)
}
