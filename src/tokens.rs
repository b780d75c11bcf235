//! Token counting for diagnostics.
//!
//! A character-based estimate is good enough here: the count is only ever
//! logged, never used to truncate or gate a request.

/// Estimate the number of tokens `text` occupies for `model`.
///
/// English prose averages roughly four characters per token on the GPT
/// tokenizers; older models pack slightly fewer characters per token.
pub fn count_tokens(text: &str, model: &str) -> usize {
    let chars_per_token = if model.starts_with("gpt-3.5") { 3 } else { 4 };
    text.chars().count() / chars_per_token + 1
}
