//! Wire payloads and caller-facing results.

pub mod answer;
pub mod request;
pub mod response;

pub use answer::*;
pub use request::*;
pub use response::*;
