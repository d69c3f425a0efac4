//! Dataset inspection engine
//!
//! Computes quality metrics for QA dataset snapshots, draws reproducible
//! audit samples, and aggregates reviewer judgments into session results.

mod aggregate;
mod dataset;
mod metrics;
mod report;
mod sample;
mod simulate;
mod store;

pub use aggregate::{
    aggregate_items, label_mismatch_rate, InspectionItem, InspectionResult, ItemStatus,
    SimilarityCheck, SIMILARITY_TRUTH_THRESHOLD,
};
pub use dataset::{DataTable, DataVariant, DatasetStore, DatasetSummary, VariantSummary};
pub use metrics::{compute_metrics, evaluate_criteria, Criterion, MetricsReport, QualityMetrics};
pub use report::{build_report, ReportSummary, SessionReportRow};
pub use sample::{draw_sample, materialize, SampleSet, SessionInfo, SimilarLink, DEFAULT_SEED};
pub use simulate::auto_inspect;
pub use store::InspectionStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid data type: {0}")]
    InvalidVariant(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
