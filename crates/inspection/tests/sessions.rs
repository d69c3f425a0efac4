mod common;

use common::{labeled_table, raw_table};
use inspection::{draw_sample, materialize, DataVariant, EngineError, InspectionStore};

#[test]
fn sampling_is_deterministic_for_a_fixed_seed() {
    let table = raw_table(1_000, 0);
    let (a, _) = draw_sample(&table, DataVariant::Preprocessed, 50, 1, 42);
    let (b, _) = draw_sample(&table, DataVariant::Preprocessed, 50, 1, 42);

    assert_eq!(a.sample_ids, b.sample_ids);
    // Ids differ even within the same second.
    assert_ne!(a.session_id, b.session_id);

    let (c, _) = draw_sample(&table, DataVariant::Preprocessed, 50, 1, 43);
    assert_ne!(a.sample_ids, c.sample_ids);
}

#[test]
fn sample_size_is_clamped_to_available_rows() {
    let table = raw_table(10, 0);
    let (session, sample) = draw_sample(&table, DataVariant::Preprocessed, 500, 1, 42);

    assert_eq!(session.sample_size, 10);
    assert_eq!(session.total_size, 10);
    assert_eq!(sample.records.len(), 10);

    let mut ids = session.sample_ids.clone();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10, "sampling must be without replacement");
}

#[test]
fn session_id_encodes_variant_and_round() {
    let table = labeled_table(30);
    let (session, _) = draw_sample(&table, DataVariant::Labeled, 5, 2, 42);
    assert!(session.session_id.starts_with("labeled_round2_"));
    assert_eq!(session.data_type, DataVariant::Labeled);
}

#[test]
fn labeled_samples_resolve_similarity_links() {
    let table = labeled_table(30);
    let (session, sample) = draw_sample(&table, DataVariant::Labeled, 30, 1, 42);
    assert_eq!(session.sample_size, 30);

    let mut linked = 0;
    for record in &sample.records {
        let info = record
            .get("similar_items_info")
            .and_then(|v| v.as_array())
            .expect("labeled records carry similar_items_info");
        for link in info {
            linked += 1;
            let id = link["similar_id"].as_i64().unwrap();
            let full = sample
                .similar_items
                .get(&id)
                .expect("linked record materialized");
            assert_eq!(full["id"].as_i64(), Some(id));
        }
    }
    assert!(linked > 0, "fixture contains similarity links");
}

#[test]
fn raw_samples_carry_no_similarity_payload() {
    let table = raw_table(30, 0);
    let (_, sample) = draw_sample(&table, DataVariant::Preprocessed, 10, 1, 42);
    assert!(sample.similar_items.is_empty());
    assert!(sample.records[0].get("similar_items_info").is_none());
}

#[test]
fn materialize_reproduces_the_drawn_sample() {
    let table = labeled_table(100);
    let (session, drawn) = draw_sample(&table, DataVariant::Labeled, 20, 1, 42);
    let rebuilt = materialize(&table, &session);

    let drawn_ids: Vec<i64> = drawn
        .records
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    let rebuilt_ids: Vec<i64> = rebuilt
        .records
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(drawn_ids, rebuilt_ids);
    assert_eq!(drawn.similar_items.len(), rebuilt.similar_items.len());
}

#[test]
fn store_roundtrips_sessions_and_lists_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = InspectionStore::new(dir.path()).unwrap();
    let table = raw_table(50, 0);

    let (mut first, _) = draw_sample(&table, DataVariant::Preprocessed, 5, 1, 42);
    first.created_at = "2026-01-01T10:00:00+00:00".to_string();
    let (mut second, _) = draw_sample(&table, DataVariant::Preprocessed, 5, 2, 42);
    second.created_at = "2026-01-02T10:00:00+00:00".to_string();

    store.save_session(&first).unwrap();
    store.save_session(&second).unwrap();

    let loaded = store.load_session(&first.session_id).unwrap();
    assert_eq!(loaded.sample_ids, first.sample_ids);
    assert_eq!(loaded.data_type, DataVariant::Preprocessed);

    let sessions = store.list_sessions().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].session_id, second.session_id);
    assert_eq!(sessions[1].session_id, first.session_id);
}

#[test]
fn corrupt_session_document_fails_the_listing() {
    let dir = tempfile::tempdir().unwrap();
    let store = InspectionStore::new(dir.path()).unwrap();
    let table = raw_table(20, 0);

    let (session, _) = draw_sample(&table, DataVariant::Preprocessed, 5, 1, 42);
    store.save_session(&session).unwrap();
    std::fs::write(
        dir.path().join("session_labeled_round1_bad.json"),
        b"{ not json",
    )
    .unwrap();

    match store.list_sessions() {
        Err(EngineError::Json(_)) => {}
        other => panic!("expected Json error, got {other:?}"),
    }
}

#[test]
fn missing_session_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = InspectionStore::new(dir.path()).unwrap();
    match store.load_session("labeled_round1_nope") {
        Err(EngineError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}
