//! Integration tests for two-tier relevance ranking

mod common;

use common::{paper, ConstantEmbedder, DelayedScorer, FailingEmbedder, FixedIndex, TableScorer};
use paperrank_core::paper::{FALLBACK_EXPLANATION, NOT_RERANKED_EXPLANATION};
use paperrank_core::{
    Distance, IndexPoint, MemoryIndex, PaperRankError, ProjectContext, RankRequest,
    RankingPipeline, Retriever, SearchRequest, VectorIndex,
};
use std::collections::HashSet;
use std::sync::Arc;

const TEN_HITS: [(&str, f32); 10] = [
    ("2401.00001v1", 0.95),
    ("2401.00002v1", 0.93),
    ("2401.00003v1", 0.91),
    ("2401.00004v1", 0.70),
    ("2401.00005v1", 0.65),
    ("2401.00006v1", 0.60),
    ("2401.00007v1", 0.55),
    ("2401.00008v1", 0.50),
    ("2401.00009v1", 0.45),
    ("2401.00010v1", 0.40),
];

fn project() -> ProjectContext {
    ProjectContext {
        name: "Efficient Transformers".to_string(),
        context: "Reducing attention cost for long documents".to_string(),
        research_questions: vec!["Can attention be linear?".to_string()],
        keywords: vec!["attention".to_string(), "sparsity".to_string()],
    }
}

fn pipeline(index: Arc<dyn VectorIndex>, scorer: Arc<TableScorer>) -> RankingPipeline {
    let embedder = Arc::new(ConstantEmbedder {
        vector: vec![1.0, 0.0],
    });
    RankingPipeline::new(Retriever::new(embedder, index), scorer)
}

fn ids(results: &paperrank_core::RankedResults) -> Vec<&str> {
    results
        .ranked_papers
        .iter()
        .map(|p| p.paper.id.as_str())
        .collect()
}

#[tokio::test]
async fn test_ten_paper_example() {
    let scorer = Arc::new(TableScorer::new(&[
        ("2401.00001v1", 90.0),
        ("2401.00002v1", 80.0),
        ("2401.00003v1", 85.0),
    ]));
    let pipeline = pipeline(Arc::new(FixedIndex::new(&TEN_HITS)), scorer.clone());

    let request = RankRequest::new("transformer attention mechanisms", 10, 3);
    let results = pipeline
        .search_and_rank(&request, &project(), &HashSet::new())
        .await
        .unwrap();

    assert_eq!(results.total_results, 10);
    assert_eq!(results.query, "transformer attention mechanisms");
    assert_eq!(
        ids(&results),
        vec![
            "2401.00001v1",
            "2401.00003v1",
            "2401.00002v1",
            "2401.00004v1",
            "2401.00005v1",
            "2401.00006v1",
            "2401.00007v1",
            "2401.00008v1",
            "2401.00009v1",
            "2401.00010v1",
        ]
    );
    assert_eq!(scorer.calls(), 3);

    let first = &results.ranked_papers[0];
    assert_eq!(first.relevance_score, Some(90.0));
    assert_eq!(first.relevance_explanation.as_deref(), Some("stub score for 2401.00001v1"));

    for tail in &results.ranked_papers[3..] {
        assert_eq!(tail.relevance_explanation.as_deref(), Some(NOT_RERANKED_EXPLANATION));
        let expected = tail.vector_score as f64 * 100.0;
        assert!((tail.relevance_score.unwrap() - expected).abs() < 1e-9);
    }

    // Every scorer call sees the same rendered project context
    let contexts = scorer.contexts.lock().unwrap();
    assert!(contexts.iter().all(|c| c == &results.project_context));
    assert!(results.project_context.contains("Project: Efficient Transformers"));
}

#[tokio::test]
async fn test_scoring_failure_falls_back_to_vector_score() {
    // No score for the second paper: its call fails
    let scorer = Arc::new(TableScorer::new(&[
        ("2401.00001v1", 90.0),
        ("2401.00003v1", 85.0),
    ]));
    let pipeline = pipeline(Arc::new(FixedIndex::new(&TEN_HITS)), scorer);

    let request = RankRequest::new("transformer attention mechanisms", 10, 3);
    let results = pipeline
        .search_and_rank(&request, &project(), &HashSet::new())
        .await
        .unwrap();

    assert_eq!(results.total_results, 10);
    let failed = results
        .ranked_papers
        .iter()
        .find(|p| p.paper.id == "2401.00002v1")
        .unwrap();
    assert!((failed.relevance_score.unwrap() - 93.0).abs() < 1e-4);
    assert_eq!(failed.relevance_explanation.as_deref(), Some(FALLBACK_EXPLANATION));

    // 93 from the fallback outranks both stub scores
    assert_eq!(results.ranked_papers[0].paper.id, "2401.00002v1");
}

#[tokio::test]
async fn test_rerank_covers_whole_pool() {
    let all: Vec<(&str, f64)> = TEN_HITS[..4].iter().map(|(id, _)| (*id, 50.0)).collect();
    let scorer = Arc::new(TableScorer::new(&all));
    let pipeline = pipeline(Arc::new(FixedIndex::new(&TEN_HITS)), scorer.clone());

    let request = RankRequest::new("attention", 4, 20);
    let results = pipeline
        .search_and_rank(&request, &project(), &HashSet::new())
        .await
        .unwrap();

    assert_eq!(results.total_results, 4);
    assert_eq!(scorer.calls(), 4);
    assert!(results
        .ranked_papers
        .iter()
        .all(|p| p.relevance_explanation.as_deref() != Some(NOT_RERANKED_EXPLANATION)));

    // Equal scores keep retrieval order
    let order: Vec<&str> = results.ranked_papers.iter().map(|p| p.paper.id.as_str()).collect();
    assert_eq!(order, vec!["2401.00001v1", "2401.00002v1", "2401.00003v1", "2401.00004v1"]);
}

#[tokio::test]
async fn test_ranked_output_is_sorted() {
    let scorer = Arc::new(TableScorer::new(&[
        ("2401.00001v1", 10.0),
        ("2401.00002v1", 99.0),
        ("2401.00003v1", 55.0),
        ("2401.00004v1", 71.0),
        ("2401.00005v1", 3.0),
    ]));
    let pipeline = pipeline(Arc::new(FixedIndex::new(&TEN_HITS)), scorer)
        .with_scoring_concurrency(4);

    let request = RankRequest::new("attention", 10, 5);
    let results = pipeline
        .search_and_rank(&request, &project(), &HashSet::new())
        .await
        .unwrap();

    let scores: Vec<f64> = results
        .ranked_papers
        .iter()
        .map(|p| p.relevance_score.unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{:?}", scores);
    assert_eq!(results.ranked_papers[0].paper.id, "2401.00002v1");
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_scoring_keeps_pool_order() {
    // Slowest paper first; the middle one fails fast
    let scorer = Arc::new(DelayedScorer::new(&[
        ("a", 80, Some(50.0)),
        ("b", 5, None),
        ("c", 40, Some(50.0)),
    ]));
    let index = Arc::new(FixedIndex::new(&[
        ("a", 0.90),
        ("b", 0.50),
        ("c", 0.80),
        ("d", 0.30),
        ("e", 0.20),
    ]));
    let embedder = Arc::new(ConstantEmbedder {
        vector: vec![1.0, 0.0],
    });
    let pipeline = RankingPipeline::new(Retriever::new(embedder, index), scorer.clone())
        .with_scoring_concurrency(3);

    let results = pipeline
        .search_and_rank(&RankRequest::new("attention", 5, 3), &project(), &HashSet::new())
        .await
        .unwrap();

    // Calls really finished out of pool order, and none was cancelled
    assert_eq!(scorer.finished(), vec!["b", "c", "a"]);

    // Equal scores of 50 keep retrieval order regardless of completion order
    assert_eq!(ids(&results), vec!["a", "b", "c", "d", "e"]);

    let head = &results.ranked_papers[..3];
    assert!(head.iter().all(|p| p.relevance_score == Some(50.0)));
    assert_eq!(
        head[0].relevance_explanation.as_deref(),
        Some("scored after 80ms")
    );
    assert_eq!(
        head[1].relevance_explanation.as_deref(),
        Some(FALLBACK_EXPLANATION)
    );
    assert_eq!(
        head[2].relevance_explanation.as_deref(),
        Some("scored after 40ms")
    );
    assert!(results.ranked_papers[3..]
        .iter()
        .all(|p| p.relevance_explanation.as_deref() == Some(NOT_RERANKED_EXPLANATION)));
}

#[tokio::test]
async fn test_missing_collection_is_not_retryable() {
    let scorer = Arc::new(TableScorer::new(&[]));
    let pipeline = pipeline(Arc::new(MemoryIndex::new()), scorer.clone());

    let result = pipeline
        .search_and_rank(&RankRequest::new("attention", 10, 3), &project(), &HashSet::new())
        .await;
    match result {
        Err(e @ PaperRankError::Index(_)) => assert!(!e.is_retryable()),
        other => panic!("expected index error, got {:?}", other.map(|r| r.total_results)),
    }
    assert_eq!(scorer.calls(), 0);
}

#[tokio::test]
async fn test_query_dimension_mismatch_is_index_error() {
    let index = Arc::new(MemoryIndex::new());
    index.ensure_collection(3, Distance::Cosine).await.unwrap();
    let pipeline = pipeline(index, Arc::new(TableScorer::new(&[])));

    let result = pipeline
        .search(&SearchRequest::new("attention", 10), &HashSet::new())
        .await;
    assert!(matches!(result, Err(PaperRankError::Index(_))));
}

#[tokio::test]
async fn test_empty_pool() {
    let index = Arc::new(MemoryIndex::new());
    index.ensure_collection(2, Distance::Cosine).await.unwrap();
    let scorer = Arc::new(TableScorer::new(&[]));
    let pipeline = pipeline(index, scorer.clone());

    let found = pipeline
        .search(&SearchRequest::new("anything", 10), &HashSet::new())
        .await
        .unwrap();
    assert!(found.is_empty());

    let ranked = pipeline
        .search_and_rank(&RankRequest::new("anything", 10, 5), &project(), &HashSet::new())
        .await
        .unwrap();
    assert!(ranked.ranked_papers.is_empty());
    assert_eq!(ranked.total_results, 0);
    assert_eq!(scorer.calls(), 0);
}

#[tokio::test]
async fn test_retrieval_failure_fails_request() {
    let scorer = Arc::new(TableScorer::new(&[]));
    let pipeline = RankingPipeline::new(
        Retriever::new(Arc::new(FailingEmbedder), Arc::new(FixedIndex::new(&TEN_HITS))),
        scorer.clone(),
    );

    let result = pipeline
        .search_and_rank(&RankRequest::new("attention", 10, 3), &project(), &HashSet::new())
        .await;
    match result {
        Err(e @ PaperRankError::Retrieval(_)) => assert!(e.is_retryable()),
        other => panic!("expected retrieval failure, got {:?}", other.map(|r| r.total_results)),
    }
    assert_eq!(scorer.calls(), 0);
}

#[tokio::test]
async fn test_saved_papers_are_marked() {
    let scorer = Arc::new(TableScorer::new(&[("2401.00001v1", 60.0)]));
    let pipeline = pipeline(Arc::new(FixedIndex::new(&TEN_HITS)), scorer);
    let saved: HashSet<String> = ["2401.00004v1".to_string()].into_iter().collect();

    let found = pipeline
        .search(&SearchRequest::new("attention", 5), &saved)
        .await
        .unwrap();
    let marked: Vec<&str> = found
        .iter()
        .filter(|p| p.is_saved)
        .map(|p| p.paper.id.as_str())
        .collect();
    assert_eq!(marked, vec!["2401.00004v1"]);
    assert!(found.iter().all(|p| p.relevance_score.is_none()));
}

#[tokio::test]
async fn test_memory_index_end_to_end() {
    let index = Arc::new(MemoryIndex::new());
    index.ensure_collection(2, Distance::Cosine).await.unwrap();
    index
        .upsert(vec![
            IndexPoint::new(paper("near"), vec![1.0, 0.1]),
            IndexPoint::new(paper("far"), vec![0.0, 1.0]),
        ])
        .await
        .unwrap();

    let scorer = Arc::new(TableScorer::new(&[("far", 95.0), ("near", 20.0)]));
    let pipeline = pipeline(index, scorer);

    let found = pipeline
        .search(&SearchRequest::new("q", 10), &HashSet::new())
        .await
        .unwrap();
    assert_eq!(found[0].paper.id, "near");

    // Rerank the whole pool: the scorer promotes the far paper
    let ranked = pipeline
        .search_and_rank(&RankRequest::new("q", 10, 2), &project(), &HashSet::new())
        .await
        .unwrap();
    assert_eq!(ranked.ranked_papers[0].paper.id, "far");
    assert_eq!(ranked.ranked_papers[1].paper.id, "near");
    assert_eq!(ranked.ranked_papers[1].relevance_score, Some(20.0));
}
