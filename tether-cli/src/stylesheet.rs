use crate::render::load_config;
use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tether_ui::style::{StyleSheet, style_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Compact,
}

pub struct StylesheetOptions {
    pub spec: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

pub fn run_stylesheet(options: StylesheetOptions) -> Result<()> {
    let sheet = distill(&options.spec, options.config.as_deref())?;
    let output = match options.format {
        OutputFormat::Pretty => serde_json::to_string_pretty(&sheet)?,
        OutputFormat::Compact => serde_json::to_string(&sheet)?,
    };
    println!("{}", output);
    Ok(())
}

/// Read `{ "name": { style }, ... }` and translate every entry.
pub fn distill(spec: &Path, config: Option<&Path>) -> Result<StyleSheet> {
    let config = load_config(config)?;
    let content = std::fs::read_to_string(spec)
        .with_context(|| format!("Failed to read style spec {}", spec.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", spec.display()))?;

    let serde_json::Value::Object(entries) = value else {
        bail!("style spec must be an object of named styles");
    };
    let spec = entries.into_iter().map(|(name, style)| (name, style_map(style)));
    Ok(StyleSheet::create_with(&config.translator(), spec))
}
