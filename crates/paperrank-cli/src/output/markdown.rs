//! Markdown output formatter

use paperrank_core::{Answer, Project, RankedResults, SavedPaper, ScoredPaper, Summary};

fn paper_section(output: &mut String, rank: usize, paper: &ScoredPaper, score: f64) {
    output.push_str(&format!(
        "## {}. {} (Score: {:.1})\n\n",
        rank, paper.paper.title, score
    ));
    output.push_str(&format!("- **arXiv**: [{}]({})\n", paper.paper.id, paper.paper.url));
    output.push_str(&format!("- **Authors**: {}\n", paper.paper.short_authors()));
    if let Some(ref category) = paper.paper.category {
        output.push_str(&format!("- **Category**: {}\n", category));
    }
    if paper.is_saved {
        output.push_str("- **Saved**: yes\n");
    }
    if let Some(ref explanation) = paper.relevance_explanation {
        output.push_str(&format!("- **Relevance**: {}\n", explanation));
    }
    output.push_str("\n---\n\n");
}

pub fn format_papers(papers: &[ScoredPaper]) -> String {
    let mut output = String::from("# Search Results\n\n");

    for (i, paper) in papers.iter().enumerate() {
        paper_section(&mut output, i + 1, paper, paper.scaled_vector_score());
    }

    if papers.is_empty() {
        output.push_str("*No results found*\n");
    }

    output
}

pub fn format_ranked(results: &RankedResults) -> String {
    let mut output = format!("# Ranked Results: {}\n\n", results.query);

    for (i, paper) in results.ranked_papers.iter().enumerate() {
        paper_section(&mut output, i + 1, paper, paper.effective_score());
    }

    if results.ranked_papers.is_empty() {
        output.push_str("*No results found*\n");
    }

    output
}

pub fn format_answer(answer: &Answer) -> String {
    let mut output = format!("# {}\n\n{}\n\n## Sources\n\n", answer.question, answer.answer.trim_end());
    for (i, source) in answer.sources.iter().enumerate() {
        output.push_str(&format!(
            "{}. [{}]({}) {}\n",
            i + 1,
            source.paper.id,
            source.paper.url,
            source.paper.title
        ));
    }
    output
}

pub fn format_summary(summary: &Summary) -> String {
    let mut output = format!("# Summary\n\n{}\n\n## Papers\n\n", summary.summary.trim_end());
    for paper in &summary.papers_summarized {
        output.push_str(&format!(
            "- [{}]({}) {}\n",
            paper.paper.id, paper.paper.url, paper.paper.title
        ));
    }
    output
}

pub fn format_projects(projects: &[Project]) -> String {
    let mut output = String::from("# Projects\n\n");
    for p in projects {
        output.push_str(&format!("## {}\n\n", p.name));
        output.push_str(&format!("- **ID**: `{}`\n", p.id));
        output.push_str(&format!("- **Papers**: {}\n", p.paper_count));
        if !p.context.is_empty() {
            output.push_str(&format!("- **Context**: {}\n", p.context));
        }
        for question in &p.research_questions {
            output.push_str(&format!("- **Question**: {}\n", question));
        }
        output.push('\n');
    }

    if projects.is_empty() {
        output.push_str("*No projects*\n");
    }

    output
}

pub fn format_saved_papers(saved: &[SavedPaper]) -> String {
    let mut output = String::from("# Saved Papers\n\n");
    for s in saved {
        output.push_str(&format!(
            "- [{}]({}) {}",
            s.paper.id, s.paper.url, s.paper.title
        ));
        if let Some(ref notes) = s.notes {
            output.push_str(&format!(" - {}", notes));
        }
        output.push('\n');
    }

    if saved.is_empty() {
        output.push_str("*No saved papers*\n");
    }

    output
}
