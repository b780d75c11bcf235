//! Pagebrief CLI - chunked webpage summarisation
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{Parser, Subcommand};
use pagebrief::loader::PageLoader;
use pagebrief::{Config, HttpPageLoader, OpenAiChat, WebPageSummarizer};

#[derive(Parser)]
#[command(name = "pagebrief")]
#[command(author, version, about = "Chunked webpage summarisation with LLMs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a webpage by URL
    Summarise {
        /// URL to summarise
        url: String,
        /// Show raw extracted segments instead of a summary
        #[arg(long)]
        raw: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pagebrief=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarise { url, raw } => {
            let config = Config::load()?;
            let loader = HttpPageLoader::new(config.summarizer.segment_chars)?;

            if raw {
                // Just show the extracted segments
                let segments = loader.load(&url).await?;
                for (i, segment) in segments.iter().enumerate() {
                    println!("=== Segment {} ===\n", i + 1);
                    println!("{}\n", segment.text);
                }
                println!(
                    "--- Extracted {} segments, {} characters ---",
                    segments.len(),
                    segments.iter().map(|s| s.text.chars().count()).sum::<usize>()
                );
            } else {
                let api_key = config.api_key()?.to_string();
                let mut model = OpenAiChat::new(api_key);
                if let Some(base_url) = &config.llm.base_url {
                    model = model.with_base_url(base_url.clone());
                }

                let summarizer = WebPageSummarizer::new(
                    config.llm.clone(),
                    config.summarizer.clone(),
                    loader,
                    model,
                );

                println!("Summarising: {}\n", url);
                let summary = summarizer.summarize(&url).await?;
                println!("{}", summary);
            }
        }
    }

    Ok(())
}
