//! Quillpad - a markdown notepad engine with a live, editable preview.
//!
//! # Usage
//!
//! ```bash
//! quillpad notes.md               # markdown -> markup
//! quillpad --serialize page.html  # markup -> markdown
//! quillpad --detect notes.txt     # export filename and MIME type
//! ```

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use quillpad::highlight::{SyntectHighlighter, ThemeMode};
use quillpad::markdown::{RenderConfig, detect, render, serialize};
use quillpad::perf;

/// A markdown notepad engine with a live, directly-editable preview
#[derive(Parser, Debug)]
#[command(name = "quillpad", version, about, long_about = None)]
struct Cli {
    /// Input file, stdin when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Convert markup back to markdown instead of rendering
    #[arg(long)]
    serialize: bool,

    /// Print the export filename and MIME type for the input
    #[arg(long)]
    detect: bool,

    /// Disable syntax highlighting in rendered output
    #[arg(long)]
    no_highlight: bool,

    /// Highlight with the dark half of the theme catalog
    #[arg(long)]
    dark: bool,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    if cli.perf {
        let directive = "perf=info"
            .parse()
            .context("Failed to parse perf log directive")?;
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    perf::set_enabled(cli.perf);

    let text = read_input(cli.file.as_ref())?;

    if cli.detect {
        let filename = cli
            .file
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (name, mime) = detect::export_disposition(&filename, &text);
        println!("{name}\t{mime}");
        return Ok(());
    }

    if cli.serialize {
        println!("{}", serialize(&text));
        return Ok(());
    }

    let mode = if cli.dark {
        ThemeMode::Dark
    } else {
        ThemeMode::Light
    };
    let highlighter = SyntectHighlighter::new(mode);
    let config = RenderConfig {
        syntax_highlighting: !cli.no_highlight,
        highlighter: Some(&highlighter),
    };
    println!("{}", render(&text, &config));
    Ok(())
}
