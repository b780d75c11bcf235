//! Page loading and segmentation.
//!
//! Uses reqwest for fetching and scraper for HTML parsing. A fetched page is
//! returned as an ordered sequence of [`Segment`]s so the summariser can walk
//! them with sliding-window context.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this fetcher
const USER_AGENT: &str = concat!("pagebrief/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("no content found at URL")]
    NoContent,
}

/// One ordered unit of page content. Order is significant: the summariser
/// builds each prompt from the neighbouring segments' text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
}

impl Segment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Capability that turns a URL into an ordered sequence of segments.
///
/// The summariser only depends on this trait, so tests can substitute fixed
/// fixtures for the network.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<Vec<Segment>, LoaderError>;
}

/// HTTP page loader backed by reqwest and the scraper crate.
pub struct HttpPageLoader {
    client: Client,
    /// Maximum characters per segment; blocks are grouped up to this size
    segment_chars: usize,
}

impl HttpPageLoader {
    pub fn new(segment_chars: usize) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            segment_chars,
        })
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &str) -> Result<Vec<Segment>, LoaderError> {
        let response = self.client.get(url).send().await?;
        let html = response.text().await?;

        let blocks = {
            let document = Html::parse_document(&html);
            extract_blocks(&document)
        };
        if blocks.is_empty() {
            return Err(LoaderError::NoContent);
        }

        Ok(group_into_segments(blocks, self.segment_chars))
    }
}

/// Extract readable text blocks from the page, in document order
fn extract_blocks(document: &Html) -> Vec<String> {
    // Try to find main content areas first
    let main_selectors = ["article", "main", "[role='main']", ".content", "#content"];

    for selector_str in main_selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let blocks = blocks_from_element(&Html::parse_fragment(&element.html()));
                if !blocks.is_empty() {
                    return blocks;
                }
            }
        }
    }

    // Fall back to extracting from body, excluding scripts/styles
    blocks_from_element(document)
}

/// Collect text from paragraphs and headings, excluding scripts and styles
fn blocks_from_element(document: &Html) -> Vec<String> {
    let content_selector = Selector::parse("p, h1, h2, h3, h4, h5, h6, li").unwrap();

    let mut blocks: Vec<String> = Vec::new();

    for element in document.select(&content_selector) {
        let text: String = element.text().collect::<Vec<_>>().join(" ");
        let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if !cleaned.is_empty() && cleaned.len() > 20 {
            blocks.push(cleaned);
        }
    }

    blocks
}

/// Group consecutive blocks into segments of at most `segment_chars`
/// characters, splitting only at block boundaries. A single oversized block
/// becomes its own segment rather than being cut mid-sentence.
fn group_into_segments(blocks: Vec<String>, segment_chars: usize) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for block in blocks {
        let added = if current.is_empty() {
            block.chars().count()
        } else {
            block.chars().count() + 2
        };
        if !current.is_empty() && current.chars().count() + added > segment_chars {
            segments.push(Segment::new(std::mem::take(&mut current)));
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(&block);
    }

    if !current.is_empty() {
        segments.push(Segment::new(current));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_page_yields_one_segment() {
        let blocks = vec![
            "The first paragraph of the page.".to_string(),
            "The second paragraph of the page.".to_string(),
        ];
        let segments = group_into_segments(blocks, 4000);
        assert_eq!(segments.len(), 1);
        assert!(segments[0].text.contains("first paragraph"));
        assert!(segments[0].text.contains("second paragraph"));
    }

    #[test]
    fn long_page_splits_at_block_boundaries() {
        let blocks = vec!["a".repeat(60), "b".repeat(60), "c".repeat(60)];
        let segments = group_into_segments(blocks, 100);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].text, "a".repeat(60));
        assert_eq!(segments[2].text, "c".repeat(60));
    }

    #[test]
    fn oversized_block_is_its_own_segment() {
        let blocks = vec!["x".repeat(500)];
        let segments = group_into_segments(blocks, 100);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text.len(), 500);
    }

    #[test]
    fn extracts_blocks_from_article_in_order() {
        let html = Html::parse_document(
            r#"
            <html><body>
              <article>
                <h1>A headline that is long enough</h1>
                <p>First paragraph with plenty of characters in it.</p>
                <p>Second paragraph with plenty of characters in it.</p>
              </article>
              <footer><p>Unrelated footer text that should not appear.</p></footer>
            </body></html>
        "#,
        );
        let blocks = extract_blocks(&html);
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].starts_with("A headline"));
        assert!(blocks[1].starts_with("First paragraph"));
        assert!(!blocks.iter().any(|b| b.contains("footer")));
    }

    #[test]
    fn empty_page_has_no_blocks() {
        let html = Html::parse_document("<html><body><script>var x;</script></body></html>");
        assert!(extract_blocks(&html).is_empty());
    }
}
