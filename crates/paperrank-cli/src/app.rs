//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paperrank")]
#[command(
    author,
    version,
    about = "Project-aware search and ranking of research papers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "PAPERRANK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage research projects and their saved papers
    Project(ProjectArgs),

    /// Vector search over the paper corpus
    Search(SearchArgs),

    /// Search and rank papers against a project
    Rank(RankArgs),

    /// Answer a question from the most relevant papers
    Ask(AskArgs),

    /// Summarize the papers saved to a project
    Summarize(SummarizeArgs),

    /// Load papers from a JSON or JSON Lines file into the index
    Ingest(IngestArgs),

    /// Write a default config file and create the index collection
    Init(InitArgs),

    /// Show configuration, project and index status
    Status,
}

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project
    Create {
        name: String,
        /// What the project is about
        #[arg(short, long, default_value = "")]
        context: String,
        /// Research question (repeatable)
        #[arg(short = 'q', long = "question")]
        questions: Vec<String>,
        /// Keyword (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,
    },
    /// List all projects
    #[command(alias = "ls")]
    List,
    /// Show one project
    Show { project_id: String },
    /// Delete a project and its saved papers
    #[command(alias = "rm")]
    Delete { project_id: String },
    /// List the papers saved to a project
    Papers { project_id: String },
    /// Save a paper from the index to a project
    Save {
        project_id: String,
        paper_id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a saved paper from a project
    Remove { project_id: String, paper_id: String },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: Vec<String>,

    /// Number of results
    #[arg(short = 'n', long = "top-k")]
    pub top_k: Option<usize>,

    /// Mark papers saved to this project
    #[arg(short, long)]
    pub project: Option<String>,
}

#[derive(Args)]
pub struct RankArgs {
    /// Search query
    pub query: Vec<String>,

    /// Project to rank against
    #[arg(short, long)]
    pub project: String,

    /// Size of the candidate pool
    #[arg(short = 'n', long = "top-k")]
    pub top_k: Option<usize>,

    /// How many candidates get LLM relevance scoring
    #[arg(short = 'r', long = "rerank-top-n")]
    pub rerank_top_n: Option<usize>,
}

#[derive(Args)]
pub struct AskArgs {
    /// Question to answer
    pub question: Vec<String>,

    /// Number of papers to ground the answer on
    #[arg(short = 'n', long = "num-papers")]
    pub num_papers: Option<usize>,

    /// Add this project's context to the prompt
    #[arg(short, long)]
    pub project: Option<String>,
}

#[derive(Args)]
pub struct SummarizeArgs {
    pub project_id: String,

    /// Topic to emphasise in the summary
    #[arg(long)]
    pub focus: Option<String>,
}

#[derive(Args)]
pub struct IngestArgs {
    /// JSON array or JSON Lines file of papers
    pub path: PathBuf,

    /// Papers per embedding and upsert batch
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Skip creating the vector index collection
    #[arg(long)]
    pub no_collection: bool,
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Cli,
    Json,
    Md,
}
