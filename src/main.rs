// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use global_temp_heatmap::api::{self, DatasetClient};
use global_temp_heatmap::config::{self, Config};
use global_temp_heatmap::models::RawDataset;
use global_temp_heatmap::palette::PALETTE_HEX;
use global_temp_heatmap::renderer::HeatmapRenderer;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, clap::Args)]
struct Source {
    /// Read the dataset from a local JSON file instead of fetching it
    #[arg(long, conflicts_with = "url")]
    input: Option<PathBuf>,
    /// Dataset URL (defaults to the configured URL)
    #[arg(long)]
    url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the heatmap to an SVG file
    Render {
        #[command(flatten)]
        source: Source,
        /// Output SVG path (defaults to the configured path)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the legend colours and boundary labels
    Legend {
        #[command(flatten)]
        source: Source,
    },
    /// Simulate hovering over one cell and print the tooltip
    Tooltip {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Pointer x position in pixels
        #[arg(long, default_value = "0")]
        x: f64,
        /// Pointer y position in pixels
        #[arg(long, default_value = "0")]
        y: f64,
    },
    /// Write the default configuration to a file
    InitConfig {
        #[arg(long, default_value = "config.toml")]
        path: PathBuf,
    },
}

async fn load_source(source: &Source, config: &Config) -> Result<RawDataset> {
    match (&source.input, &source.url) {
        (Some(path), _) => api::read_dataset(path),
        (None, Some(url)) => DatasetClient::new().fetch(url).await,
        (None, None) => DatasetClient::new().fetch(&config.dataset_url).await,
    }
}

async fn render(source: &Source, output: &Path, config: &Config) -> Result<()> {
    let raw = load_source(source, config).await?;
    let view = HeatmapRenderer::default()
        .with_title(config.title.as_str())
        .prepare(&raw)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    view.save_svg(output)?;

    let summary = view.summary();
    println!(
        "✅ Generated heatmap with {} cells: {}",
        summary.cells,
        output.display()
    );
    if summary.skipped_count() > 0 {
        println!("⚠️  Skipped {} malformed records:", summary.skipped_count());
        for err in &summary.skipped {
            println!("  {}", err);
        }
    }
    for warning in &summary.warnings {
        println!("⚠️  {}", warning);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "global_temp_heatmap=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_config();

    match cli.command {
        Some(Commands::Render { source, output }) => {
            let output = output.unwrap_or_else(|| config.output_path.clone());
            render(&source, &output, &config).await?;
        }
        Some(Commands::Legend { source }) => {
            let raw = load_source(&source, &config).await?;
            let view = HeatmapRenderer::default().prepare(&raw)?;
            let scales = &view.scene().scales;
            println!(
                "Variance range: {:.3} ℃ to {:.3} ℃",
                scales.min_variance, scales.max_variance
            );
            for swatch in &view.scene().legend {
                println!("  {:<5} {} ℃", PALETTE_HEX[swatch.color_index], swatch.label);
            }
        }
        Some(Commands::Tooltip {
            source,
            year,
            month,
            x,
            y,
        }) => {
            let raw = load_source(&source, &config).await?;
            let mut view = HeatmapRenderer::default().prepare(&raw)?;
            let index = view
                .scene()
                .cells
                .iter()
                .position(|c| c.observation.year == year && c.observation.month == month)
                .ok_or_else(|| anyhow::anyhow!("No observation for {}-{:02}", year, month))?;
            view.pointer_enter(index, x, y);
            println!("{}", serde_json::to_string_pretty(&view.tooltip())?);
        }
        Some(Commands::InitConfig { path }) => {
            config::save_config(&Config::default(), &path)?;
            println!("✅ Wrote default configuration: {}", path.display());
        }
        None => {
            let source = Source {
                input: None,
                url: None,
            };
            let output = config.output_path.clone();
            render(&source, &output, &config).await?;
        }
    }

    Ok(())
}
