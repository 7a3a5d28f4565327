//! Terminal output formatter

use paperrank_core::{Answer, Project, RankedResults, SavedPaper, ScoredPaper, Summary};

const ABSTRACT_PREVIEW_CHARS: usize = 200;

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > ABSTRACT_PREVIEW_CHARS {
        let cut: String = flat.chars().take(ABSTRACT_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

fn saved_marker(paper: &ScoredPaper) -> &'static str {
    if paper.is_saved {
        " [saved]"
    } else {
        ""
    }
}

pub fn format_papers(papers: &[ScoredPaper]) -> String {
    if papers.is_empty() {
        return "No papers found\n".to_string();
    }

    let mut output = String::new();
    for paper in papers {
        output.push_str(&format!(
            "{:>5.1} {} {}{}\n",
            paper.scaled_vector_score(),
            paper.paper.id,
            paper.paper.title,
            saved_marker(paper)
        ));
        output.push_str(&format!("      {}\n", paper.paper.short_authors()));
    }
    output
}

pub fn format_ranked(results: &RankedResults) -> String {
    if results.ranked_papers.is_empty() {
        return "No papers found\n".to_string();
    }

    let mut output = String::new();
    for (i, paper) in results.ranked_papers.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. [{:>5.1}] {} {}{}\n",
            i + 1,
            paper.effective_score(),
            paper.paper.id,
            paper.paper.title,
            saved_marker(paper)
        ));
        if let Some(ref explanation) = paper.relevance_explanation {
            output.push_str(&format!("           {}\n", explanation));
        }
    }
    output.push_str(&format!("\n{} results\n", results.total_results));
    output
}

pub fn format_answer(answer: &Answer) -> String {
    let mut output = format!("{}\n\nSources:\n", answer.answer.trim_end());
    for (i, source) in answer.sources.iter().enumerate() {
        output.push_str(&format!(
            "  [{}] {} {}\n",
            i + 1,
            source.paper.id,
            source.paper.title
        ));
    }
    output
}

pub fn format_summary(summary: &Summary) -> String {
    let mut output = format!(
        "{}\n\nPapers summarized: {}\n",
        summary.summary.trim_end(),
        summary.papers_summarized.len()
    );
    for paper in &summary.papers_summarized {
        output.push_str(&format!("  {} {}\n", paper.paper.id, paper.paper.title));
    }
    output
}

pub fn format_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects\n".to_string();
    }

    projects
        .iter()
        .map(|p| format!("{}  {} ({} papers)\n", p.id, p.name, p.paper_count))
        .collect()
}

pub fn format_project(project: &Project) -> String {
    let mut output = format!("Project:    {}\n", project.name);
    output.push_str(&format!("ID:         {}\n", project.id));
    output.push_str(&format!("Created:    {}\n", project.created_at));
    output.push_str(&format!("Papers:     {}\n", project.paper_count));
    if !project.context.is_empty() {
        output.push_str(&format!("Context:    {}\n", project.context));
    }
    if !project.keywords.is_empty() {
        output.push_str(&format!("Keywords:   {}\n", project.keywords.join(", ")));
    }
    if !project.research_questions.is_empty() {
        output.push_str("Questions:\n");
        for question in &project.research_questions {
            output.push_str(&format!("  - {}\n", question));
        }
    }
    output
}

pub fn format_saved_papers(saved: &[SavedPaper]) -> String {
    if saved.is_empty() {
        return "No saved papers\n".to_string();
    }

    let mut output = String::new();
    for s in saved {
        output.push_str(&format!("{} {}\n", s.paper.id, s.paper.title));
        output.push_str(&format!("      {}\n", preview(&s.paper.abstract_text)));
        if let Some(ref notes) = s.notes {
            output.push_str(&format!("      Notes: {}\n", notes));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates() {
        let long = "word ".repeat(100);
        let short = preview(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), ABSTRACT_PREVIEW_CHARS + 3);
        assert_eq!(preview("a\n  b"), "a b");
    }
}
