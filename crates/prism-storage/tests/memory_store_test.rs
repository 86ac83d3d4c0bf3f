use prism_core::models::{Chunk, ChunkMetadata, ContentType, SearchFilters};
use prism_core::traits::IVectorStore;
use prism_storage::MemoryVectorStore;
use proptest::prelude::*;

fn chunk(id: &str, content_type: ContentType, tags: &[&str]) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: format!("text of {id}"),
        metadata: ChunkMetadata {
            content_type,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        },
    }
}

fn store() -> MemoryVectorStore {
    let store = MemoryVectorStore::new();
    store.upsert(chunk("a", ContentType::Markdown, &["db"]), vec![1.0, 0.0, 0.0]);
    store.upsert(chunk("b", ContentType::Pdf, &["db"]), vec![0.8, 0.6, 0.0]);
    store.upsert(chunk("c", ContentType::RasterImage, &[]), vec![0.0, 1.0, 0.0]);
    store.upsert(chunk("d", ContentType::Markdown, &["misc"]), vec![0.6, 0.8, 0.0]);
    store
}

#[tokio::test]
async fn results_are_sorted_by_similarity() {
    let results = store()
        .search(&[1.0, 0.0, 0.0], 10, &SearchFilters::default())
        .await
        .unwrap();
    let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "d"]);
    assert!(results.windows(2).all(|w| w[0].similarity >= w[1].similarity));
}

#[tokio::test]
async fn min_similarity_and_limit_apply() {
    let filters = SearchFilters::default().with_min_similarity(0.7);
    let results = store().search(&[1.0, 0.0, 0.0], 1, &filters).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "a");
}

#[tokio::test]
async fn file_type_filter_applies() {
    let filters = SearchFilters {
        file_types: vec![ContentType::Pdf, ContentType::RasterImage],
        ..Default::default()
    };
    let results = store().search(&[0.5, 0.5, 0.0], 10, &filters).await.unwrap();
    assert!(!results.is_empty());
    assert!(results
        .iter()
        .all(|r| matches!(r.metadata.content_type, ContentType::Pdf | ContentType::RasterImage)));
}

#[tokio::test]
async fn invalid_floor_is_rejected() {
    let filters = SearchFilters::default().with_min_similarity(1.5);
    assert!(store().search(&[1.0, 0.0, 0.0], 5, &filters).await.is_err());
}

#[tokio::test]
async fn zero_query_and_dimension_mismatch_return_nothing() {
    let s = store();
    assert!(s
        .search(&[0.0, 0.0, 0.0], 5, &SearchFilters::default())
        .await
        .unwrap()
        .is_empty());
    assert!(s
        .search(&[1.0, 0.0], 5, &SearchFilters::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn upsert_replaces_and_stats_count_types() {
    let s = store();
    s.upsert(chunk("a", ContentType::Code, &[]), vec![1.0, 0.0, 0.0]);
    assert_eq!(s.len(), 4);
    let stats = s.get_stats().await.unwrap();
    assert_eq!(stats.total_chunks, 4);
    assert_eq!(stats.by_content_type[&ContentType::Code], 1);
    assert_eq!(stats.by_content_type[&ContentType::Markdown], 1);
    assert_eq!(stats.dimension, Some(3));

    assert_eq!(
        s.get_chunk_by_id("a").await.unwrap().unwrap().metadata.content_type,
        ContentType::Code
    );
    assert!(s.remove("a"));
    assert!(s.get_chunk_by_id("a").await.unwrap().is_none());
}

#[tokio::test]
async fn golden_corpus_indexes() {
    let s = MemoryVectorStore::new();
    for (i, c) in test_fixtures::load_corpus().into_iter().enumerate() {
        let mut v = vec![0.0f32; 8];
        v[i % 8] = 1.0;
        s.upsert(c, v);
    }
    let stats = s.get_stats().await.unwrap();
    assert_eq!(stats.total_chunks, s.len());
    assert!(stats.by_content_type.contains_key(&ContentType::Video));
}

proptest! {
    #[test]
    fn search_never_returns_duplicates_or_exceeds_limit(
        query in prop::collection::vec(-1.0f32..1.0, 3),
        limit in 0usize..6,
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let results = rt
            .block_on(store().search(&query, limit, &SearchFilters::default()))
            .unwrap();
        prop_assert!(results.len() <= limit);
        let mut ids: Vec<_> = results.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), results.len());
        prop_assert!(results.iter().all(|r| r.similarity > 0.0 && r.similarity <= 1.0));
    }
}
