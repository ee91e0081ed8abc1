use crate::tree;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tether_ui::bridge::{Host, JsonLinesHost};
use tether_ui::config::{BridgeConfig, IdStrategy};
use tether_ui::events::read_events;
use tether_ui::node::{RenderReport, RenderRoot};

pub struct RenderOptions {
    pub tree: PathBuf,
    pub events: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub sequential_ids: bool,
    pub unmount: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub renders: usize,
    pub totals: RenderReport,
    pub events: usize,
    pub delivered: usize,
}

pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    match path {
        Some(path) => BridgeConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(BridgeConfig::default()),
    }
}

pub fn run_render(options: RenderOptions) -> Result<()> {
    let stdout = io::stdout();
    let summary = render_to(&options, JsonLinesHost::new(stdout.lock()))?;

    eprintln!(
        "{} {} render(s): {} mounted, {} updated, {} unmounted",
        "Tether:".bold().cyan(),
        summary.renders,
        summary.totals.mounted,
        summary.totals.updated,
        summary.totals.unmounted,
    );
    if options.events.is_some() {
        eprintln!(
            "{} {} of {} event(s) reached a handler",
            "Tether:".bold().cyan(),
            summary.delivered,
            summary.events
        );
    }
    Ok(())
}

/// Render every tree in `options.tree` against `host`, then replay host
/// events if given.
pub fn render_to<H: Host>(options: &RenderOptions, host: H) -> Result<RenderSummary> {
    let mut config = load_config(options.config.as_deref())?;
    if options.sequential_ids {
        config.id_strategy = IdStrategy::Sequential;
    }

    let content = std::fs::read_to_string(&options.tree)
        .with_context(|| format!("Failed to read tree {}", options.tree.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", options.tree.display()))?;
    let renders = tree::parse_renders(&value)?;

    let mut root = RenderRoot::new(host, config);
    let mut summary = RenderSummary::default();

    for element in &renders {
        let report = root.render(element);
        summary.renders += 1;
        summary.totals.mounted += report.mounted;
        summary.totals.updated += report.updated;
        summary.totals.unmounted += report.unmounted;
    }

    if let Some(path) = &options.events {
        let file = File::open(path)
            .with_context(|| format!("Failed to open events {}", path.display()))?;
        for event in read_events(BufReader::new(file)) {
            let event = event.with_context(|| format!("Bad event in {}", path.display()))?;
            summary.events += 1;
            if root.dispatch(&event) {
                summary.delivered += 1;
            }
        }
    }

    if options.unmount {
        summary.totals.unmounted += root.clear();
    }

    Ok(summary)
}
