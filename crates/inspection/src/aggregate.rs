//! Judgment types and session-level aggregation arithmetic.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::dataset::DataVariant;
use crate::metrics::{round1, round2};
use crate::sample::SessionInfo;

/// A link judged truly similar when its precomputed score clears this bar.
pub const SIMILARITY_TRUTH_THRESHOLD: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Pass,
    Fail,
}

/// Reviewer's (or simulator's) verdict on one similarity link. The score is
/// inherited verbatim from the dataset, never recomputed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityCheck {
    pub similar_id: i64,
    pub similarity_score: f64,
    #[serde(default)]
    pub is_similar: Option<bool>,
}

/// One judgment for one sampled record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InspectionItem {
    pub id: i64,
    pub status: ItemStatus,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub inspector: Option<String>,
    #[serde(default)]
    pub similarity_checks: Vec<SimilarityCheck>,
    #[serde(default)]
    pub is_ad_checked: Option<bool>,
    #[serde(default)]
    pub is_fake_checked: Option<bool>,
    #[serde(default)]
    pub original_is_ad: Option<bool>,
    #[serde(default)]
    pub original_is_fake: Option<bool>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

/// Finalized outcome for a session. Saving overwrites any prior result for
/// the same session id, never merges.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InspectionResult {
    pub session_id: String,
    pub data_type: DataVariant,
    pub total_items: usize,
    pub inspected_count: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub pass_rate: f64,
    pub inspections: Vec<InspectionItem>,
    pub saved_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_similarity_checks: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_similarity_checks: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_accuracy: Option<f64>,
}

/// Reduces per-record judgments into the session result. Pending items count
/// toward `total_items` but are excluded from every rate.
pub fn aggregate_items(session: &SessionInfo, items: Vec<InspectionItem>) -> InspectionResult {
    let total_items = items.len();
    let inspected_count = items
        .iter()
        .filter(|i| i.status != ItemStatus::Pending)
        .count();
    let pass_count = items.iter().filter(|i| i.status == ItemStatus::Pass).count();
    let fail_count = items.iter().filter(|i| i.status == ItemStatus::Fail).count();

    let pass_rate = if inspected_count == 0 {
        0.0
    } else {
        round2(pass_count as f64 / inspected_count as f64 * 100.0)
    };

    let mut result = InspectionResult {
        session_id: session.session_id.clone(),
        data_type: session.data_type,
        total_items,
        inspected_count,
        pass_count,
        fail_count,
        pass_rate,
        inspections: items,
        saved_at: Utc::now().to_rfc3339(),
        total_similarity_checks: None,
        correct_similarity_checks: None,
        similarity_accuracy: None,
    };

    // Labeled-only: decided by the variant stored on the session, never by
    // inspecting the session id string.
    if session.data_type == DataVariant::Labeled {
        let mut total = 0usize;
        let mut correct = 0usize;
        for item in &result.inspections {
            for check in &item.similarity_checks {
                if let Some(judged) = check.is_similar {
                    total += 1;
                    let expected = check.similarity_score >= SIMILARITY_TRUTH_THRESHOLD;
                    if judged == expected {
                        correct += 1;
                    }
                }
            }
        }
        result.total_similarity_checks = Some(total);
        result.correct_similarity_checks = Some(correct);
        result.similarity_accuracy = Some(if total == 0 {
            0.0
        } else {
            round2(correct as f64 / total as f64 * 100.0)
        });
    }

    result
}

/// Share of items whose checked ad/fake labels disagree with the originals,
/// rounded to one decimal. `None` for an empty item list.
pub fn label_mismatch_rate(items: &[InspectionItem]) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    let mismatches = items
        .iter()
        .filter(|i| {
            i.original_is_ad != i.is_ad_checked || i.original_is_fake != i.is_fake_checked
        })
        .count();
    Some(round1(mismatches as f64 / items.len() as f64 * 100.0))
}
