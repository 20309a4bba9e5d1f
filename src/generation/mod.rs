//! Grounded generation: response decoding, answer extraction, one-off calls.

pub mod convenience;
pub mod extract;

pub use convenience::{generate, generate_with};
pub use extract::{extract_answer, parse_response};
