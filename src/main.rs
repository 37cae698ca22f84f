//! Markpane - A split-pane terminal markdown editor with live preview.
//!
//! # Usage
//!
//! ```bash
//! markpane notes.md
//! markpane --split 30 notes.md
//! markpane --theme dark
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use markpane::app::App;
use markpane::config::{ThemeMode, load_config};
use markpane::highlight::{Background, set_background};

/// A split-pane terminal markdown editor with live preview
#[derive(Parser, Debug)]
#[command(name = "markpane", version, about, long_about = None)]
struct Cli {
    /// Markdown file to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Initial editor pane width as a percentage (20-80)
    #[arg(long, value_name = "PERCENT")]
    split: Option<u16>,

    /// Force preview theme background
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Directory exported files are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Pandoc binary used for DOCX export
    #[arg(long, value_name = "PATH")]
    pandoc: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config();

    // CLI flags take precedence over the config file.
    match cli.theme.unwrap_or(config.theme) {
        ThemeMode::Light => set_background(Background::Light),
        ThemeMode::Dark => set_background(Background::Dark),
        // Auto leaves detection to the COLORFGBG fallback.
        ThemeMode::Auto => {}
    }

    let split_percent = cli.split.unwrap_or(config.split_percent);
    let export_dir = cli
        .export_dir
        .or(config.export_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let pandoc_bin = cli.pandoc.or(config.pandoc_bin);

    if let Some(file) = &cli.file
        && !file.exists()
    {
        anyhow::bail!("File not found: {}", file.display());
    }

    let mut app = App::new()
        .with_file(cli.file)
        .with_split_percent(split_percent)
        .with_exporter(export_dir, pandoc_bin);

    app.run().context("Application error")
}
