//! CLI argument parsing for the review form.

mod args;

pub use args::{parse_args, CliConfig, VERSION};
