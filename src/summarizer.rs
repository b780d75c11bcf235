//! Two-pass webpage summarisation with sliding-window context.
//!
//! Each segment of a fetched page is summarised with a prompt that borrows a
//! fixed-size character overlap from its neighbours, so the model keeps
//! context across segment boundaries. The per-segment summaries are then
//! condensed into one final summary with a second pass.

use crate::config::{LlmConfig, SummarizerConfig, MAX_TOKENS_PLACEHOLDER};
use crate::llm::{ChatModel, LlmError};
use crate::loader::{LoaderError, PageLoader, Segment};
use crate::tokens::count_tokens;
use thiserror::Error;
use tracing::info;

/// Failures are the collaborators' own errors, passed through untranslated.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Summarises webpages through an injected page loader and chat model.
///
/// Holds no mutable state; every call is independent and nothing is cached
/// between invocations.
pub struct WebPageSummarizer<L, M> {
    loader: L,
    model: M,
    llm: LlmConfig,
    options: SummarizerConfig,
}

impl<L: PageLoader, M: ChatModel> WebPageSummarizer<L, M> {
    pub fn new(llm: LlmConfig, options: SummarizerConfig, loader: L, model: M) -> Self {
        Self {
            loader,
            model,
            llm,
            options,
        }
    }

    /// Summarise the page at `url`.
    ///
    /// Fetches the page as ordered segments, summarises each segment in order
    /// with sliding-window context, then condenses the concatenated partial
    /// summaries with one final model call. Calls are strictly sequential;
    /// any loader or model error aborts the whole run with no partial result.
    pub async fn summarize(&self, url: &str) -> Result<String, SummarizeError> {
        let segments = self.loader.load(url).await?;
        if segments.is_empty() {
            return Err(LoaderError::NoContent.into());
        }
        info!(segments = segments.len(), url, "page fetched");

        // Static budget split, fixed before any model call. The model is only
        // asked to stay within it; output length is never measured here.
        let max_output_tokens =
            per_segment_budget(self.options.token_budget, segments.len(), self.options.token_margin);
        let segment_role = self
            .options
            .segment_role
            .replace(MAX_TOKENS_PLACEHOLDER, &max_output_tokens.to_string());

        let mut full_summary = String::new();
        for i in 0..segments.len() {
            let prompt = window_prompt(&segments, i, self.options.overlap_chars);
            let partial = self.call_model(&segment_role, &prompt).await?;
            full_summary.push_str(&partial);
            info!(segment = i + 1, total = segments.len(), "segment summarised");
        }

        info!(
            tokens = count_tokens(&full_summary, &self.llm.model),
            "full summary assembled"
        );

        let final_summary = self.call_model(&self.options.final_role, &full_summary).await?;
        Ok(final_summary)
    }

    /// One (system role, prompt) exchange with the configured model
    async fn call_model(&self, system_role: &str, prompt: &str) -> Result<String, SummarizeError> {
        let text = self
            .model
            .complete(&self.llm.model, self.llm.temperature, system_role, prompt)
            .await?;
        Ok(text)
    }
}

/// Requested length for each partial summary: an even share of the global
/// budget, minus a safety margin. Saturates at zero.
fn per_segment_budget(token_budget: usize, segment_count: usize, token_margin: usize) -> usize {
    (token_budget / segment_count).saturating_sub(token_margin)
}

/// Build the prompt for segment `i` from its own text plus `overlap` leading
/// characters of the next segment and `overlap` trailing characters of the
/// previous one, where those neighbours exist.
fn window_prompt(segments: &[Segment], i: usize, overlap: usize) -> String {
    let mut prompt = String::new();
    if i == 0 {
        prompt.push_str(&segments[0].text);
        if let Some(next) = segments.get(1) {
            prompt.push_str(&head(&next.text, overlap));
        }
    } else {
        prompt.push_str(&tail(&segments[i - 1].text, overlap));
        prompt.push_str(&segments[i].text);
        if let Some(next) = segments.get(i + 1) {
            prompt.push_str(&head(&next.text, overlap));
        }
    }
    prompt
}

/// First `n` characters of `s` (character count, not bytes)
fn head(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Last `n` characters of `s` (character count, not bytes)
fn tail(s: &str, n: usize) -> String {
    let len = s.chars().count();
    s.chars().skip(len.saturating_sub(n)).collect()
}
