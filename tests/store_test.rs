//! Integration tests for the embedding record store

use simbench::store::{EmbeddingRecord, EmbeddingStore, MemoryStore};

#[test]
fn test_embedding_store_trait_exists() {
    fn assert_store<S: EmbeddingStore>() {}
    assert_store::<MemoryStore>();
}

#[test]
fn test_full_store_lifecycle() {
    let mut store = MemoryStore::new();

    // Index a batch of query embeddings with their class labels
    let ids = store.batch_add(
        (0..10)
            .map(|i| {
                EmbeddingRecord::new(vec![i as f32 * 0.1, 1.0 - i as f32 * 0.1])
                    .with_label(i % 3)
                    .with_data(serde_json::json!({ "example": i }))
            })
            .collect(),
    );
    assert_eq!(ids, (0..10).collect::<Vec<_>>());
    assert_eq!(store.len(), 10);

    // Individual retrieval
    let record = store.get(4).unwrap();
    assert_eq!(record.label, Some(1));
    assert_eq!(record.data, Some(serde_json::json!({ "example": 4 })));

    // Batch retrieval preserves request order
    let records = store.batch_get(&[9, 0, 5]).unwrap();
    assert_eq!(records[0].label, Some(0));
    assert_eq!(records[1].label, Some(0));
    assert_eq!(records[2].label, Some(2));

    // Persist and reload
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    store.save(&path).unwrap();

    let mut reloaded = MemoryStore::new();
    assert_eq!(reloaded.load(&path).unwrap(), 10);
    for id in ids {
        assert_eq!(reloaded.get(id).unwrap(), store.get(id).unwrap());
    }

    // Reset drops everything
    reloaded.reset();
    assert!(reloaded.is_empty());
    assert!(reloaded.get(0).is_err());
}

#[test]
fn test_ids_stay_stable_across_adds() {
    let mut store = MemoryStore::new();
    let first = store.add(vec![1.0], Some(1), None);
    let batch = store.batch_add(vec![
        EmbeddingRecord::new(vec![2.0]).with_label(2),
        EmbeddingRecord::new(vec![3.0]).with_label(3),
    ]);
    let last = store.add(vec![4.0], Some(4), None);

    assert_eq!(first, 0);
    assert_eq!(batch, vec![1, 2]);
    assert_eq!(last, 3);
    assert_eq!(store.get(2).unwrap().label, Some(3));
}
