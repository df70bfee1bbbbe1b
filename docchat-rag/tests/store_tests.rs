//! Property tests for in-memory store search ordering and threshold filtering.

use std::collections::HashMap;

use docchat_rag::document::Chunk;
use docchat_rag::inmemory::InMemoryVectorStore;
use docchat_rag::vectorstore::VectorStore;
use proptest::prelude::*;

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a chunk with a normalized embedding.
fn arb_chunk(dim: usize) -> impl Strategy<Value = Chunk> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(id, text, embedding)| Chunk {
            id,
            text,
            embedding,
            metadata: HashMap::new(),
            document_id: "doc_1".to_string(),
        },
    )
}

const DIM: usize = 16;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Search results come back in descending score order, never more than
    /// `top_k` of them, and every returned score clears the threshold
    /// (a score exactly equal to the threshold is kept, not dropped).
    #[test]
    fn search_respects_order_bound_and_threshold(
        chunks in proptest::collection::vec(arb_chunk(DIM), 1..20),
        query in arb_normalized_embedding(DIM),
        top_k in 1usize..25,
        threshold in -1.0f32..1.0f32,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let results = rt.block_on(async {
            let store = InMemoryVectorStore::new();
            store.create_collection("test", DIM).await.unwrap();

            // Deduplicate chunks by id to avoid upsert overwriting
            let mut deduped: HashMap<String, Chunk> = HashMap::new();
            for chunk in &chunks {
                deduped.entry(chunk.id.clone()).or_insert_with(|| chunk.clone());
            }
            let unique_chunks: Vec<Chunk> = deduped.into_values().collect();
            let count = unique_chunks.len();

            store.upsert("test", &unique_chunks).await.unwrap();
            let results = store.search("test", &query, top_k, threshold).await.unwrap();
            (results, count)
        });

        let (results, unique_count) = results;

        prop_assert!(results.len() <= top_k);
        prop_assert!(results.len() <= unique_count);

        for result in &results {
            prop_assert!(
                result.score >= threshold,
                "score {} below threshold {}",
                result.score,
                threshold,
            );
        }

        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }
    }
}
