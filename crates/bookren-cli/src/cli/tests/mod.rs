//! CLI parse tests.

use super::Cli;
use clap::Parser;

/// A path that exists wherever the tests run.
pub(super) fn manifest() -> String {
    concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml").to_string()
}

pub(super) fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}
