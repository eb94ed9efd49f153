//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, MutationOutput};
pub use text::TextFormatter;
