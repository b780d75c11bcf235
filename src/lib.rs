//! # Pagebrief
//!
//! Chunked webpage summarisation using LLMs.
//!
//! A page is fetched and split into ordered segments, each segment is
//! summarised with sliding-window context borrowed from its neighbours, and
//! the partial summaries are condensed into a single final summary with one
//! more model call.
//!
//! Nothing is cached or persisted between calls; errors from the page loader
//! or the model client propagate to the caller unchanged.

pub mod config;
pub mod llm;
pub mod loader;
pub mod summarizer;
pub mod tokens;

pub use config::Config;
pub use llm::{ChatModel, OpenAiChat};
pub use loader::{HttpPageLoader, PageLoader, Segment};
pub use summarizer::WebPageSummarizer;
