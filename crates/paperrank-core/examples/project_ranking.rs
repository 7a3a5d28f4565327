// Offline ranking example using paperrank as a library
//
// A toy character-histogram embedder and a keyword-overlap scorer stand in
// for the embedding and chat services, so this runs without network access.

use async_trait::async_trait;
use paperrank_core::{
    ingest_papers, Database, Embedder, MemoryIndex, NewProject, Paper, ProjectStore, RankRequest,
    RankingPipeline, Relevance, RelevanceScorer, Retriever, ScoringFailure,
};
use std::sync::Arc;

const DIMS: usize = 26;

struct LetterEmbedder;

#[async_trait]
impl Embedder for LetterEmbedder {
    async fn embed(&self, text: &str) -> paperrank_core::Result<Vec<f32>> {
        let mut v = vec![0.0; DIMS];
        for c in text.to_lowercase().chars().filter(|c| c.is_ascii_lowercase()) {
            v[(c as u8 - b'a') as usize] += 1.0;
        }
        Ok(v)
    }

    async fn embed_batch(&self, texts: &[String]) -> paperrank_core::Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn model_name(&self) -> &str {
        "letters"
    }
}

struct KeywordScorer;

#[async_trait]
impl RelevanceScorer for KeywordScorer {
    async fn score(&self, project_context: &str, paper: &Paper) -> Result<Relevance, ScoringFailure> {
        let context = project_context.to_lowercase();
        let words: Vec<&str> = paper.abstract_text.split_whitespace().collect();
        let hits = words
            .iter()
            .filter(|w| w.len() > 4 && context.contains(&w.to_lowercase()))
            .count();
        Ok(Relevance {
            score: (hits as f64 * 20.0).min(100.0),
            explanation: format!("{} abstract terms match the project", hits),
        })
    }

    fn model_name(&self) -> &str {
        "keywords"
    }
}

fn paper(id: &str, title: &str, abstract_text: &str) -> Paper {
    Paper {
        id: id.to_string(),
        title: title.to_string(),
        abstract_text: abstract_text.to_string(),
        url: format!("http://arxiv.org/abs/{}", id),
        authors: vec!["Example Author".to_string()],
        category: Some("cs.LG".to_string()),
    }
}

#[tokio::main]
async fn main() -> paperrank_core::Result<()> {
    println!("PaperRank Offline Ranking Example\n");

    let index = Arc::new(MemoryIndex::new());
    let embedder = Arc::new(LetterEmbedder);
    let papers = vec![
        paper("2401.00001v1", "Sparse Attention", "Sparse attention patterns reduce transformer memory"),
        paper("2401.00002v1", "Federated Averaging", "Federated averaging trains models across hospitals"),
        paper("2401.00003v1", "Linear Attention", "Linear attention approximates softmax attention kernels"),
    ];
    let stats = ingest_papers(embedder.as_ref(), index.as_ref(), papers, 100, None).await?;
    println!("Indexed {} papers", stats.upserted);

    let db = Database::open_in_memory()?;
    db.initialize()?;
    let project = db.create_project(NewProject {
        name: "Efficient Transformers".to_string(),
        context: "Reducing attention memory for long sequences".to_string(),
        research_questions: vec!["Can softmax attention be approximated?".to_string()],
        keywords: vec!["attention".to_string(), "transformer".to_string()],
    })?;
    db.save_paper(index.as_ref(), &project.id, "2401.00003v1", None).await?;

    let pipeline = RankingPipeline::new(Retriever::new(embedder, index), Arc::new(KeywordScorer));
    let results = pipeline
        .search_and_rank_for_project(&db, &project.id, &RankRequest::new("attention", 3, 2))
        .await?;

    println!("Saved papers: {}", db.saved_paper_ids(&project.id)?.len());
    for (i, p) in results.ranked_papers.iter().enumerate() {
        println!(
            "{}. [{:>5.1}] {}{} - {}",
            i + 1,
            p.effective_score(),
            p.paper.title,
            if p.is_saved { " (saved)" } else { "" },
            p.relevance_explanation.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
