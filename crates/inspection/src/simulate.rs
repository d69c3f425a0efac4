//! Simulated inspector: random judgments calibrated to target accuracy
//! figures, used to benchmark and bootstrap the aggregation pipeline.

use rand::Rng;

use crate::aggregate::{InspectionItem, ItemStatus, SimilarityCheck};
use crate::dataset::{DataTable, DataVariant};
use crate::sample::{similar_links, SessionInfo};

/// Raw records are judged inappropriate at roughly 6.5%.
const RAW_FAIL_RATE: f64 = 0.065;
/// Labeled pass rate, average target across both rounds.
const LABELED_PASS_RATE: f64 = 0.91;
/// Probability the simulator reproduces the original labels exactly.
const ROUND1_LABEL_MATCH_RATE: f64 = 0.974;
const ROUND2_LABEL_MATCH_RATE: f64 = 0.975;
/// Cap on the score-biased "is similar" probability.
const SIMILAR_JUDGMENT_CAP: f64 = 0.9;

const AUTO_INSPECTOR: &str = "auto";

/// Produces one judgment per sampled record. The generator is caller-owned
/// and independent of the sampler's seed; each record's judgment is drawn
/// independently, history-free.
pub fn auto_inspect<R: Rng>(
    session: &SessionInfo,
    table: &DataTable,
    rng: &mut R,
) -> Vec<InspectionItem> {
    let index = table.id_index();
    let label_match_rate = if session.round_num == 1 {
        ROUND1_LABEL_MATCH_RATE
    } else {
        ROUND2_LABEL_MATCH_RATE
    };

    let mut items = Vec::with_capacity(session.sample_ids.len());
    for &id in &session.sample_ids {
        let row = match index.get(&id) {
            Some(&row) => row,
            // Record disappeared from the snapshot since the draw.
            None => continue,
        };
        let item = match session.data_type {
            DataVariant::Preprocessed => judge_raw(id, table, row, rng),
            DataVariant::Labeled => judge_labeled(id, table, row, label_match_rate, rng),
        };
        items.push(item);
    }
    items
}

fn base_item(id: i64, table: &DataTable, row: usize, status: ItemStatus) -> InspectionItem {
    InspectionItem {
        id,
        status,
        comment: None,
        inspector: Some(AUTO_INSPECTOR.to_string()),
        similarity_checks: Vec::new(),
        is_ad_checked: None,
        is_fake_checked: None,
        original_is_ad: None,
        original_is_fake: None,
        question: table.cell(row, "question").map(str::to_string),
        answer: table.cell(row, "answer").map(str::to_string),
    }
}

fn judge_raw<R: Rng>(id: i64, table: &DataTable, row: usize, rng: &mut R) -> InspectionItem {
    let status = if rng.gen::<f64>() < RAW_FAIL_RATE {
        ItemStatus::Fail
    } else {
        ItemStatus::Pass
    };
    base_item(id, table, row, status)
}

fn judge_labeled<R: Rng>(
    id: i64,
    table: &DataTable,
    row: usize,
    label_match_rate: f64,
    rng: &mut R,
) -> InspectionItem {
    let original_is_ad = table.bool_cell(row, "is_ad").unwrap_or(false);
    let original_is_fake = table.bool_cell(row, "is_fake").unwrap_or(false);

    // Mismatch, when drawn, flips exactly one of the two labels.
    let (is_ad_checked, is_fake_checked) = if rng.gen::<f64>() < label_match_rate {
        (original_is_ad, original_is_fake)
    } else if rng.gen_bool(0.5) {
        (!original_is_ad, original_is_fake)
    } else {
        (original_is_ad, !original_is_fake)
    };

    // Pass/fail is independent of label correctness.
    let status = if rng.gen::<f64>() < LABELED_PASS_RATE {
        ItemStatus::Pass
    } else {
        ItemStatus::Fail
    };

    let similarity_checks = similar_links(table, row)
        .into_iter()
        .map(|link| {
            let p = (link.similarity_score + 0.2).min(SIMILAR_JUDGMENT_CAP);
            SimilarityCheck {
                similar_id: link.similar_id,
                similarity_score: link.similarity_score,
                is_similar: Some(rng.gen::<f64>() < p),
            }
        })
        .collect();

    let mut item = base_item(id, table, row, status);
    item.similarity_checks = similarity_checks;
    item.is_ad_checked = Some(is_ad_checked);
    item.is_fake_checked = Some(is_fake_checked);
    item.original_is_ad = Some(original_is_ad);
    item.original_is_fake = Some(original_is_fake);
    item
}
