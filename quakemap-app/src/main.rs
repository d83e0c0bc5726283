//! Command-line front end: builds the map, runs both loading stages against
//! the live feeds and prints what a map widget would show.

use anyhow::Context;
use clap::Parser;
use quakemap::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "quakemap")]
#[command(about = "Earthquake and tectonic plate map layers", long_about = None)]
struct Args {
    /// JSON config file; omitted fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// USGS summary feed window (hour, day, week, month)
    #[arg(long)]
    feed: Option<FeedPeriod>,

    /// Per-fetch timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print the full map snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => MapConfig::default(),
    };
    if let Some(feed) = args.feed {
        config = config.with_feed(feed);
    }
    if let Some(ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(ms));
    }

    let source = HttpFeatureSource::new(&config.fetch);
    let mut map = MapContext::new(config).context("building map")?;
    let report = run_pipeline(&mut map, &source).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&map.snapshot())?);
        return Ok(());
    }

    println!(
        "View: ({}, {}) zoom {}",
        map.center().lat,
        map.center().lng,
        map.zoom()
    );
    for stage in &report.stages {
        match (&stage.error, &stage.message) {
            (Some(kind), message) => println!(
                "  {:<16} unavailable ({}): {}",
                stage.overlay,
                kind,
                message.as_deref().unwrap_or("")
            ),
            (None, _) => println!(
                "  {:<16} {} feature(s), {} skipped",
                stage.overlay, stage.rendered, stage.skipped
            ),
        }
    }

    println!("Layers:");
    for entry in map.control_entries() {
        match entry {
            ControlEntry::Base { name, active } => {
                println!("  ({}) {}", if active { "x" } else { " " }, name)
            }
            ControlEntry::Overlay { name, checked, feature_count, .. } => {
                println!("  [{}] {} ({})", if checked { "x" } else { " " }, name, feature_count)
            }
        }
    }

    if let Some(legend) = map.legend() {
        println!("{}:", legend.title);
        for entry in &legend.entries {
            println!("  {} {}", entry.color, entry.label());
        }
    }

    if !report.all_ok() {
        log::warn!("one or more overlays could not be loaded");
    }
    Ok(())
}
