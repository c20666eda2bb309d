use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

use tg_coding_dashboard::aggregate;
use tg_coding_dashboard::config::AppConfig;
use tg_coding_dashboard::demo::DemoSource;
use tg_coding_dashboard::filter::RecordFilter;
use tg_coding_dashboard::logging::{init_logging, OperationTimer};
use tg_coding_dashboard::metrics::MetricsCollector;
use tg_coding_dashboard::models::{
    Category, CategoryShare, EngagementSummary, Granularity, MediaBreakdown, MessageRecord,
    Overview, TemporalBucket, ViewsBin,
};
use tg_coding_dashboard::source::{ResultsDirSource, SourceChain};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the analysis results and print every aggregate view as JSON
    Summarize {
        /// Explicit CSV path (overrides the configured fallback chain)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Explicit JSON summary path (used together with --csv)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Temporal bucket granularity (day or week)
        #[arg(short, long, default_value = "day")]
        granularity: String,

        /// Restrict aggregates to records coded as relevant
        #[arg(long)]
        relevant_only: bool,
    },
    /// Filter records and print the highest-reach matches
    Explore {
        /// Filter by top-level category (display name)
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by intensity score (1-5)
        #[arg(short, long)]
        intensity: Option<u8>,

        /// Minimum view count
        #[arg(short, long)]
        min_views: Option<u64>,

        /// Maximum number of messages to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Force demo mode and print its aggregate views
    Demo {
        /// RNG seed for the synthetic dataset
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

/// Everything the dashboard's chart pages consume, in one document
#[derive(Serialize)]
struct SummaryReport {
    source: String,
    skipped_rows: usize,
    overview: Overview,
    category_distribution: BTreeMap<Category, CategoryShare>,
    top_subcategories: Vec<(String, u64)>,
    intensity_histogram: [u64; 5],
    engagement: EngagementSummary,
    top_linguistic_markers: Vec<(String, u64)>,
    media: MediaBreakdown,
    views_histogram: Vec<ViewsBin>,
    temporal: Vec<TemporalBucket>,
}

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let _guard = init_logging(
        Some(&config.get_log_level()),
        config.logging.file_path.as_deref().map(std::path::Path::new),
    )?;

    let cli = Cli::parse();
    let collector = MetricsCollector::default();

    match cli.command {
        Commands::Summarize {
            csv,
            json,
            granularity,
            relevant_only,
        } => {
            let granularity = parse_granularity(&granularity)?;
            let chain = build_chain(&config, csv, json);
            summarize(&config, &collector, &chain, granularity, relevant_only)
        }
        Commands::Explore {
            category,
            intensity,
            min_views,
            limit,
        } => {
            let filter = RecordFilter {
                category: category
                    .map(|name| {
                        name.parse::<Category>()
                            .map_err(|e| anyhow::anyhow!("Unknown category name: {e}"))
                    })
                    .transpose()?,
                intensity,
                min_views,
            };
            let chain = build_chain(&config, None, None);
            explore(&collector, &chain, filter, limit)
        }
        Commands::Demo { seed } => {
            let source = seed.map_or_else(
                || DemoSource::with_seed_and_count(config.demo.seed, config.demo.record_count),
                DemoSource::with_seed,
            );
            let chain = SourceChain::new().with(Box::new(source));
            summarize(&config, &collector, &chain, Granularity::Day, false)
        }
    }
}

/// Build the source chain, putting explicitly supplied files first
fn build_chain(config: &AppConfig, csv: Option<PathBuf>, json: Option<PathBuf>) -> SourceChain {
    let mut chain = SourceChain::new();

    if let Some(csv_path) = csv {
        let json_path = json.unwrap_or_else(|| {
            csv_path
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."))
                .join(ResultsDirSource::JSON_FILE)
        });
        chain = chain.with(Box::new(ResultsDirSource::from_files(
            "upload", csv_path, json_path,
        )));
    }

    chain
        .with(Box::new(ResultsDirSource::new(
            "combined",
            &config.combined_dir(),
        )))
        .with(Box::new(ResultsDirSource::new(
            "single",
            &config.single_dir(),
        )))
        .with(Box::new(DemoSource::with_seed_and_count(
            config.demo.seed,
            config.demo.record_count,
        )))
}

fn summarize(
    config: &AppConfig,
    collector: &MetricsCollector,
    chain: &SourceChain,
    granularity: Granularity,
    relevant_only: bool,
) -> Result<()> {
    let timer = OperationTimer::new("summarize");

    let load_start = std::time::Instant::now();
    let resolved = chain.resolve()?;
    collector.record_source_resolution(&resolved.source);
    collector.record_load(
        resolved.dataset.records.len(),
        resolved.dataset.skipped,
        load_start.elapsed(),
    );

    let dataset = resolved.dataset;
    let records: Vec<MessageRecord> = if relevant_only {
        dataset
            .records
            .iter()
            .filter(|record| record.relevant)
            .cloned()
            .collect()
    } else {
        dataset.records
    };

    info!(
        source = resolved.source,
        records = records.len(),
        skipped = dataset.skipped,
        "Computing aggregate views"
    );

    let aggregation_start = std::time::Instant::now();
    let report = SummaryReport {
        source: resolved.source,
        skipped_rows: dataset.skipped,
        overview: aggregate::overview(&records, dataset.summary.as_ref()),
        category_distribution: aggregate::category_distribution(&records),
        top_subcategories: aggregate::top_subcategories(
            &records,
            config.aggregation.top_subcategories,
        ),
        intensity_histogram: aggregate::intensity_histogram(&records),
        engagement: aggregate::engagement_summary(&records),
        top_linguistic_markers: aggregate::linguistic_marker_frequency(
            &records,
            config.aggregation.top_markers,
        ),
        media: aggregate::media_breakdown(&records),
        views_histogram: aggregate::views_histogram(&records, config.aggregation.views_bins),
        temporal: aggregate::temporal_buckets(&records, granularity),
    };

    collector.record_aggregation("summarize", aggregation_start.elapsed());

    emit(&serde_json::to_string_pretty(&report)?);
    timer.finish();
    Ok(())
}

fn explore(
    collector: &MetricsCollector,
    chain: &SourceChain,
    filter: RecordFilter,
    limit: usize,
) -> Result<()> {
    let resolved = chain.resolve()?;
    collector.record_source_resolution(&resolved.source);

    let matched = filter.apply(&resolved.dataset.records, Some(limit));
    info!(
        source = resolved.source,
        matched = matched.len(),
        "Explorer filter applied"
    );

    emit(&serde_json::to_string_pretty(&matched)?);
    Ok(())
}

fn parse_granularity(raw: &str) -> Result<Granularity> {
    match raw.to_ascii_lowercase().as_str() {
        "day" | "daily" => Ok(Granularity::Day),
        "week" | "weekly" => Ok(Granularity::Week),
        other => Err(anyhow::anyhow!(
            "Invalid granularity: {other}. Must be day or week"
        )),
    }
}

/// Reports go to stdout by design; logs stay on stderr.
#[allow(clippy::print_stdout)]
fn emit(document: &str) {
    println!("{document}");
}
