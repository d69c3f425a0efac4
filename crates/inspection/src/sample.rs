//! Deterministic sample drawing and similarity cross-reference resolution.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::dataset::{DataTable, DataVariant};

pub const DEFAULT_SEED: u64 = 42;

/// The durable record of one sampling run. Immutable after creation; the
/// dataset itself remains the source of truth for record content, a session
/// only pins which ids were chosen.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub data_type: DataVariant,
    pub round_num: u32,
    pub sample_size: usize,
    pub total_size: usize,
    pub seed: u64,
    pub created_at: String,
    pub sample_ids: Vec<i64>,
}

/// One precomputed similarity link carried by a labeled record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarLink {
    pub similar_id: i64,
    pub similarity_score: f64,
}

/// Materialized sample: the records themselves plus, for labeled data, the
/// full linked records keyed by id so the client need not re-fetch them.
#[derive(Clone, Debug, Serialize)]
pub struct SampleSet {
    pub records: Vec<Value>,
    pub similar_items: BTreeMap<i64, Value>,
}

/// Draws `requested` records without replacement. The same
/// `(variant, seed, requested, snapshot)` tuple always yields the same
/// sample; the session id carries a random suffix so two draws within the
/// same second never collide.
pub fn draw_sample(
    table: &DataTable,
    variant: DataVariant,
    requested: usize,
    round_num: u32,
    seed: u64,
) -> (SessionInfo, SampleSet) {
    let n = requested.min(table.len());
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, table.len(), n).into_vec();

    let sample_ids: Vec<i64> = picked.iter().map(|&row| table.row_id(row)).collect();

    let now = Utc::now();
    let suffix = Uuid::new_v4().simple().to_string();
    let session_id = format!(
        "{}_round{}_{}_{}",
        variant.as_str(),
        round_num,
        now.format("%Y%m%d_%H%M%S"),
        &suffix[..8]
    );

    let session = SessionInfo {
        session_id,
        data_type: variant,
        round_num,
        sample_size: n,
        total_size: table.len(),
        seed,
        created_at: now.to_rfc3339(),
        sample_ids,
    };

    let sample = materialize_rows(table, variant, &picked);
    (session, sample)
}

/// Re-derives the materialized sample for a stored session by filtering the
/// current snapshot to the pinned ids. Ids no longer present are skipped.
pub fn materialize(table: &DataTable, session: &SessionInfo) -> SampleSet {
    let index = table.id_index();
    let rows: Vec<usize> = session
        .sample_ids
        .iter()
        .filter_map(|id| index.get(id).copied())
        .collect();
    materialize_rows(table, session.data_type, &rows)
}

fn materialize_rows(table: &DataTable, variant: DataVariant, rows: &[usize]) -> SampleSet {
    let mut records = Vec::with_capacity(rows.len());
    let mut similar_items = BTreeMap::new();

    // Linked records are looked up once per id within the request.
    let index: Option<HashMap<i64, usize>> = if variant == DataVariant::Labeled {
        Some(table.id_index())
    } else {
        None
    };

    for &row in rows {
        let mut record = table.record_json(row);
        if let Some(index) = &index {
            let links = similar_links(table, row);
            for link in &links {
                if !similar_items.contains_key(&link.similar_id) {
                    if let Some(&linked_row) = index.get(&link.similar_id) {
                        similar_items.insert(link.similar_id, table.record_json(linked_row));
                    }
                }
            }
            if let Value::Object(obj) = &mut record {
                obj.insert(
                    "similar_items_info".to_string(),
                    serde_json::to_value(&links).unwrap_or(Value::Null),
                );
            }
        }
        records.push(record);
    }

    SampleSet {
        records,
        similar_items,
    }
}

/// Up to three similarity links per record; a link exists when its id cell is
/// present. A missing score cell falls back to 0.0.
pub(crate) fn similar_links(table: &DataTable, row: usize) -> Vec<SimilarLink> {
    let mut links = Vec::new();
    for i in 1..=3 {
        let id_col = format!("similar_id_{i}");
        if let Some(similar_id) = table.int_cell(row, &id_col) {
            let score_col = format!("similar_id_{i}_score");
            let similarity_score = table.float_cell(row, &score_col).unwrap_or(0.0);
            links.push(SimilarLink {
                similar_id,
                similarity_score,
            });
        }
    }
    links
}
