//! CLI for the bookren ebook renamer.

mod rename;

use anyhow::Result;
use bookren_core::config;
use bookren_core::process::ProcessOptions;
use bookren_core::rename::Companions;
use clap::Parser;
use std::path::PathBuf;

pub use rename::run_rename;

/// Rename `.azw3` books after their title, ASIN and authors.
#[derive(Debug, Parser)]
#[command(name = "bookren")]
#[command(about = "Rename Kindle AZW3 books from their embedded metadata", long_about = None)]
pub struct Cli {
    /// Prefix for author(s). Default: " - " (or `author_prefix` in config.toml).
    #[arg(short = 'p', long, value_name = "STR", allow_hyphen_values = true)]
    pub author_prefix: Option<String>,

    /// Also rename `.epub`.
    #[arg(short = 'e', long)]
    pub epub: bool,

    /// Also rename `.kepub` and `.kepub.epub`.
    #[arg(short = 'k', long)]
    pub kepub: bool,

    /// Also rename `.zip` and `.cbz`.
    #[arg(short = 'z', long)]
    pub zipfile: bool,

    /// Also rename `metadata.opf`.
    #[arg(short = 'o', long)]
    pub opf: bool,

    /// Rename `cover.jpg`, or fetch the cover image from Amazon.
    #[arg(short = 'g', long)]
    pub get_cover: bool,

    /// Books to rename. Files not ending in `.azw3` are skipped.
    #[arg(value_name = "PATH", value_parser = existing_path)]
    pub paths: Vec<PathBuf>,
}

fn existing_path(s: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{}' does not exist", s))
    }
}

impl Cli {
    /// Applies the flags on top of config values.
    pub fn options(&self, cfg: &config::BookrenConfig) -> ProcessOptions {
        let mut opts = ProcessOptions::from_config(cfg);
        if let Some(prefix) = &self.author_prefix {
            opts.author_prefix = prefix.clone();
        }
        opts.companions = Companions {
            zip: self.zipfile,
            kepub: self.kepub,
            epub: self.epub,
        };
        opts.rename_opf = self.opf;
        if self.get_cover {
            opts = opts.with_cover_from(cfg);
        }
        opts
    }
}

pub fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_or_default();
    tracing::debug!("loaded config: {:?}", cfg);

    let opts = cli.options(&cfg);
    run_rename(&cli.paths, &opts)
}

#[cfg(test)]
mod tests;
