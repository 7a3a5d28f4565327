//! CLI command handlers

pub mod ask;
pub mod ingest;
pub mod init;
pub mod project;
pub mod search;
pub mod status;

/// Join positional words into one query string
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
