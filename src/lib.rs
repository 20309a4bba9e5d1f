//! grounded — resilient Gemini client for search-grounded answers.
//!
//! Sends a prompt to the Gemini `generateContent` endpoint with Google Search
//! grounding enabled, retries transient failures with exponential backoff,
//! and flattens the response into answer text plus web citations.
//!
//! # Quick Start
//!
//! ```no_run
//! use grounded::prelude::*;
//!
//! # async fn example() -> grounded::error::Result<()> {
//! let client = GoogleSearchClient::new(ClientConfig::from_env())?;
//! match client.generate("What is the temperature in Singapore today?").await? {
//!     Generation::Answer(answer) => {
//!         println!("{answer}");
//!         for citation in &answer.citations {
//!             println!("{:?} {:?}", citation.title, citation.uri);
//!         }
//!     }
//!     Generation::NoAnswer => eprintln!("no answer"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod prelude;
pub mod provider;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
