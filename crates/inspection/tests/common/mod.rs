#![allow(dead_code)]

use inspection::{DataTable, DataVariant, SessionInfo};

pub fn cell(v: &str) -> Option<String> {
    Some(v.to_string())
}

/// Raw-variant table: id, question, answer plus one optional extra column.
pub fn raw_table(n: usize, extra_missing: usize) -> DataTable {
    let columns = vec![
        "id".to_string(),
        "question".to_string(),
        "answer".to_string(),
        "extra".to_string(),
    ];
    let rows = (0..n)
        .map(|i| {
            vec![
                cell(&i.to_string()),
                cell(&format!("question {i}")),
                cell(&format!("answer {i}")),
                if i < extra_missing { None } else { cell("x") },
            ]
        })
        .collect();
    DataTable { columns, rows }
}

/// Labeled-variant table. Every third record carries one similarity link
/// whose score cycles through 0.3 / 0.55 / 0.8.
pub fn labeled_table(n: usize) -> DataTable {
    let columns = vec![
        "id".to_string(),
        "question".to_string(),
        "answer".to_string(),
        "is_ad".to_string(),
        "is_fake".to_string(),
        "similar_id_1".to_string(),
        "similar_id_1_score".to_string(),
        "similar_id_2".to_string(),
        "similar_id_2_score".to_string(),
        "similar_id_3".to_string(),
        "similar_id_3_score".to_string(),
    ];
    let scores = ["0.3", "0.55", "0.8"];
    let rows = (0..n)
        .map(|i| {
            let linked = i % 3 == 0 && n > 1;
            let target = (i + 1) % n;
            vec![
                cell(&i.to_string()),
                cell(&format!("question {i}")),
                cell(&format!("answer {i}")),
                cell(if i % 4 == 0 { "true" } else { "false" }),
                cell(if i % 5 == 0 { "true" } else { "false" }),
                if linked { cell(&target.to_string()) } else { None },
                if linked { cell(scores[(i / 3) % 3]) } else { None },
                None,
                None,
                None,
                None,
            ]
        })
        .collect();
    DataTable { columns, rows }
}

pub fn session_for(table: &DataTable, variant: DataVariant, round_num: u32) -> SessionInfo {
    SessionInfo {
        session_id: format!("{}_round{}_test", variant.as_str(), round_num),
        data_type: variant,
        round_num,
        sample_size: table.len(),
        total_size: table.len(),
        seed: 42,
        created_at: "2026-01-01T00:00:00+00:00".to_string(),
        sample_ids: (0..table.len() as i64).collect(),
    }
}
