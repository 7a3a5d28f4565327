//! Two-tier relevance ranking
//!
//! The candidate pool from vector search is split into a head, scored by the
//! relevance model, and a tail, scored from vector similarity alone. A head
//! paper whose scoring fails falls back to its vector score; the request as a
//! whole only fails when retrieval fails.

use super::{RankRequest, Retriever, SearchRequest};
use crate::db::ProjectStore;
use crate::error::Result;
use crate::llm::{Relevance, RelevanceScorer, ScoringFailure};
use crate::paper::{
    ProjectContext, RankedResults, ScoredPaper, FALLBACK_EXPLANATION, NOT_RERANKED_EXPLANATION,
};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;

/// Embed, retrieve, score, merge, sort
pub struct RankingPipeline {
    retriever: Retriever,
    scorer: Arc<dyn RelevanceScorer>,
    scoring_concurrency: usize,
}

impl RankingPipeline {
    /// Pipeline scoring head papers one at a time
    pub fn new(retriever: Retriever, scorer: Arc<dyn RelevanceScorer>) -> Self {
        Self {
            retriever,
            scorer,
            scoring_concurrency: 1,
        }
    }

    /// Allow up to `n` relevance calls in flight per request
    pub fn with_scoring_concurrency(mut self, n: usize) -> Self {
        self.scoring_concurrency = n.max(1);
        self
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Plain vector search; `is_saved` marks papers in `saved_ids`
    pub async fn search(
        &self,
        request: &SearchRequest,
        saved_ids: &HashSet<String>,
    ) -> Result<Vec<ScoredPaper>> {
        let mut papers = self.retriever.retrieve(&request.query, request.top_k).await?;
        mark_saved(&mut papers, saved_ids);
        Ok(papers)
    }

    /// Plain search annotated with an optional project's saved papers
    pub async fn search_for_project(
        &self,
        store: &dyn ProjectStore,
        project_id: Option<&str>,
        request: &SearchRequest,
    ) -> Result<Vec<ScoredPaper>> {
        let saved_ids = match project_id {
            Some(id) => store.saved_paper_ids(id)?,
            None => HashSet::new(),
        };
        self.search(request, &saved_ids).await
    }

    /// Search and rank against a project context
    pub async fn search_and_rank(
        &self,
        request: &RankRequest,
        project: &ProjectContext,
        saved_ids: &HashSet<String>,
    ) -> Result<RankedResults> {
        let project_context = project.render();

        let mut candidates = self.retriever.retrieve(&request.query, request.top_k).await?;
        mark_saved(&mut candidates, saved_ids);

        let split = request.rerank_top_n.min(candidates.len());
        let tail = candidates.split_off(split);
        let head = candidates;

        tracing::info!(
            "Re-ranking top {} of {} papers with {}",
            head.len(),
            head.len() + tail.len(),
            self.scorer.model_name()
        );

        let mut ranked = self.score_head(&project_context, head).await;
        ranked.extend(
            tail.into_iter()
                .map(|paper| paper.with_vector_relevance(NOT_RERANKED_EXPLANATION)),
        );
        sort_by_relevance(&mut ranked);

        Ok(RankedResults {
            query: request.query.clone(),
            project_context,
            total_results: ranked.len(),
            ranked_papers: ranked,
        })
    }

    /// Look up the project and its saved papers, then search and rank
    pub async fn search_and_rank_for_project(
        &self,
        store: &dyn ProjectStore,
        project_id: &str,
        request: &RankRequest,
    ) -> Result<RankedResults> {
        let project = store.project_context(project_id)?;
        let saved_ids = store.saved_paper_ids(project_id)?;
        self.search_and_rank(request, &project, &saved_ids).await
    }

    /// Score head papers in pool order, substituting the vector fallback for
    /// failures. Results come back in input order whatever the concurrency.
    async fn score_head(&self, project_context: &str, head: Vec<ScoredPaper>) -> Vec<ScoredPaper> {
        let scorer = self.scorer.as_ref();

        let outcomes: Vec<(ScoredPaper, std::result::Result<Relevance, ScoringFailure>)> =
            stream::iter(head)
                .map(|paper| async move {
                    let outcome = scorer.score(project_context, &paper.paper).await;
                    (paper, outcome)
                })
                .buffered(self.scoring_concurrency)
                .collect()
                .await;

        outcomes
            .into_iter()
            .map(|(paper, outcome)| apply_relevance(paper, outcome))
            .collect()
    }
}

fn mark_saved(papers: &mut [ScoredPaper], saved_ids: &HashSet<String>) {
    for paper in papers {
        paper.is_saved = saved_ids.contains(&paper.paper.id);
    }
}

fn apply_relevance(
    mut paper: ScoredPaper,
    outcome: std::result::Result<Relevance, ScoringFailure>,
) -> ScoredPaper {
    match outcome {
        Ok(relevance) => {
            tracing::debug!(paper = %paper.paper.id, score = relevance.score, "scored");
            paper.relevance_score = Some(relevance.score);
            paper.relevance_explanation = Some(relevance.explanation);
            paper
        }
        Err(failure) => {
            tracing::warn!("Error ranking paper {}: {}", paper.paper.id, failure);
            paper.with_vector_relevance(FALLBACK_EXPLANATION)
        }
    }
}

/// Stable sort, descending by relevance score (missing counts as 0)
fn sort_by_relevance(papers: &mut [ScoredPaper]) {
    papers.sort_by(|a, b| {
        let a = a.relevance_score.unwrap_or(0.0);
        let b = b.relevance_score.unwrap_or(0.0);
        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::Paper;

    fn scored(id: &str, vector_score: f32, relevance: Option<f64>) -> ScoredPaper {
        let mut p = ScoredPaper::new(
            Paper {
                id: id.to_string(),
                title: id.to_string(),
                abstract_text: String::new(),
                url: String::new(),
                authors: vec![],
                category: None,
            },
            vector_score,
        );
        p.relevance_score = relevance;
        p
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut papers = vec![
            scored("a", 0.5, Some(50.0)),
            scored("b", 0.9, Some(80.0)),
            scored("c", 0.4, Some(50.0)),
            scored("d", 0.3, None),
        ];
        sort_by_relevance(&mut papers);
        let ids: Vec<_> = papers.iter().map(|p| p.paper.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_apply_relevance_fallback() {
        let paper = apply_relevance(scored("a", 0.61, None), Err(ScoringFailure::EmptyResponse));
        assert!((paper.relevance_score.unwrap() - 61.0).abs() < 1e-4);
        assert_eq!(paper.relevance_explanation.as_deref(), Some(FALLBACK_EXPLANATION));

        let paper = apply_relevance(
            scored("b", 0.61, None),
            Ok(Relevance {
                score: 12.0,
                explanation: "Off topic.".to_string(),
            }),
        );
        assert_eq!(paper.relevance_score, Some(12.0));
        assert_eq!(paper.relevance_explanation.as_deref(), Some("Off topic."));
    }

    #[test]
    fn test_mark_saved() {
        let mut papers = vec![scored("a", 0.5, None), scored("b", 0.4, None)];
        let saved: HashSet<String> = ["b".to_string()].into_iter().collect();
        mark_saved(&mut papers, &saved);
        assert!(!papers[0].is_saved);
        assert!(papers[1].is_saved);
    }
}
