//! CLI entry point for grounded.

use std::io::{self, Write};

use clap::Parser;

use crate::config::ClientConfig;
use crate::types::{GeneratedAnswer, Generation};

pub const DEFAULT_PROMPT: &str = "tell me todays temperature in singapore";

/// Ask Gemini a question with Google Search grounding.
#[derive(Parser, Debug)]
#[command(name = "grounded", version, about = "Search-grounded answers from Gemini")]
pub struct Cli {
    /// Model to use (overrides GEMINI_MODEL)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Endpoint base URL (overrides GEMINI_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Question to ask (positional)
    pub prompt: Option<String>,
}

impl Cli {
    /// Layer command-line overrides on top of `config`.
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(std::time::Duration::from_secs(secs));
        }
        config
    }

    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

/// Print the answer and its numbered sources, or a warning for no answer.
pub fn render(out: &mut impl Write, generation: &Generation) -> io::Result<()> {
    match generation {
        Generation::Answer(answer) => render_answer(out, answer),
        Generation::NoAnswer => {
            writeln!(out, "\nCould not retrieve a valid response from the model.")
        }
    }
}

fn render_answer(out: &mut impl Write, answer: &GeneratedAnswer) -> io::Result<()> {
    writeln!(out, "--- GENERATED RESPONSE ---\n")?;
    writeln!(out, "{}", answer.text)?;

    if !answer.citations.is_empty() {
        writeln!(out, "\n--- GROUNDING SOURCES (Cited) ---")?;
        for (i, citation) in answer.citations.iter().enumerate() {
            writeln!(
                out,
                "- Source {}: {}",
                i + 1,
                citation.title.as_deref().unwrap_or("(untitled)")
            )?;
            writeln!(out, "  URI: {}", citation.uri.as_deref().unwrap_or("(none)"))?;
        }
    }
    if !answer.search_queries.is_empty() {
        writeln!(out, "\nSearch queries: {}", answer.search_queries.join("; "))?;
    }

    writeln!(out, "\n----------------------------------")
}
