use std::fs;
use std::path::{Path, PathBuf};

use analytics::{AnalyticsEngine, analyze_trend, detect_anomalies, ewma, rolling_average};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::settings::Config;
use core_types::{DataPoint, DemandLevel, MarketConditions, PerformanceMetrics, PricingStrategy};
use ledger::writer::format_decimal;
use ledger::{
    CsvOptions, ParseOptions, StatementSummary, export_statement_summary_to_csv,
    generate_monthly_statement, generate_statement_summary, parse_csv_to_records,
};
use pricing::{CurrentMetrics, PricingEngine, PricingTargets};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Nodeyield analytics tool.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging.level)?;

    match cli.command {
        Commands::Statement(args) => handle_statement(args, &config),
        Commands::Price(args) => handle_price(args, &config),
        Commands::Roadmap(args) => handle_roadmap(args, &config),
        Commands::Revenue(args) => handle_revenue(args, &config),
        Commands::Trend(args) => handle_trend(args, &config),
        Commands::Report(args) => handle_report(args, &config),
    }
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so stdout stays machine-readable.
fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log level '{default_level}'"))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Earnings, pricing and payout statements for distributed hardware nodes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Missing files fall back to defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a CSV statement ledger and optionally export the summary.
    Statement(StatementArgs),
    /// Recommend a price adjustment for one node.
    Price(PriceArgs),
    /// Build an immediate, short-term and long-term pricing roadmap.
    Roadmap(RoadmapArgs),
    /// Project monthly revenue and the gap to a revenue target.
    Revenue(RevenueArgs),
    /// Analyze a JSON series of data points.
    Trend(TrendArgs),
    /// Summarize a JSON window of node performance samples.
    Report(ReportArgs),
}

#[derive(Args)]
struct StatementArgs {
    /// The ledger CSV to read.
    #[arg(long, short)]
    input: PathBuf,

    /// Restrict the statement to one calendar month (1-12).
    #[arg(long, requires = "year")]
    month: Option<u32>,

    #[arg(long, requires = "month")]
    year: Option<i32>,

    /// Write the summary export (preamble plus ledger) to this file.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print a table instead of JSON.
    #[arg(long)]
    table: bool,
}

/// The node's current position, shared by the pricing commands.
#[derive(Args)]
struct NodeArgs {
    /// Current utilization in [0, 1].
    #[arg(long)]
    utilization: f64,

    /// Target utilization in [0, 1].
    #[arg(long)]
    target: f64,

    /// Current price per hour.
    #[arg(long)]
    price: f64,

    #[arg(long, default_value_t = 0)]
    queue_depth: u32,
}

impl NodeArgs {
    fn current(&self) -> CurrentMetrics {
        CurrentMetrics {
            utilization: self.utilization,
            price: self.price,
            queue_depth: self.queue_depth,
        }
    }
}

#[derive(Args)]
struct PriceArgs {
    #[command(flatten)]
    node: NodeArgs,

    /// Defaults to `pricing.default_strategy` from the configuration.
    #[arg(long, value_enum)]
    strategy: Option<PricingStrategy>,

    #[arg(long, value_enum)]
    demand: Option<DemandLevel>,

    /// Seasonal demand factor in [0, 1].
    #[arg(long)]
    seasonality: Option<f64>,

    /// Network congestion in [0, 1].
    #[arg(long)]
    congestion: Option<f64>,
}

impl PriceArgs {
    fn market_conditions(&self) -> Option<MarketConditions> {
        if self.demand.is_none() && self.seasonality.is_none() && self.congestion.is_none() {
            return None;
        }
        Some(MarketConditions {
            demand_level: self.demand.unwrap_or_default(),
            competitor_pricing: None,
            seasonality: self.seasonality,
            network_congestion: self.congestion,
        })
    }
}

#[derive(Args)]
struct RoadmapArgs {
    #[command(flatten)]
    node: NodeArgs,

    /// Monthly gross revenue goal for the long-term projection.
    #[arg(long)]
    monthly_target: Option<f64>,
}

#[derive(Args)]
struct RevenueArgs {
    /// Utilization in [0, 1].
    #[arg(long)]
    utilization: f64,

    /// Price per hour.
    #[arg(long)]
    price: f64,

    /// Monthly gross revenue goal.
    #[arg(long)]
    target_gross: Option<f64>,

    /// Operator revenue share in [0, 1], applied to the projected gross.
    #[arg(long)]
    rev_share: Option<f64>,

    /// Defaults to `pricing.days_in_month` from the configuration.
    #[arg(long)]
    days: Option<u32>,
}

#[derive(Args)]
struct TrendArgs {
    /// JSON array of `{ "timestamp", "value" }` points.
    #[arg(long, short)]
    input: PathBuf,

    /// Label for the analyzed period.
    #[arg(long)]
    period: Option<String>,
}

#[derive(Args)]
struct ReportArgs {
    /// JSON array of performance metrics samples.
    #[arg(long, short)]
    input: PathBuf,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_statement(args: StatementArgs, config: &Config) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read ledger {}", args.input.display()))?;

    let parsed = parse_csv_to_records(&text, &ParseOptions::from(&config.statement))?;
    tracing::info!(
        records = parsed.records.len(),
        skipped = parsed.warnings.len(),
        "Ledger parsed"
    );

    let summary = match (args.month, args.year) {
        (Some(month), Some(year)) => generate_monthly_statement(&parsed.records, month, year)?,
        _ => generate_statement_summary(&parsed.records)?,
    };

    let options = CsvOptions::from(&config.statement);
    if let Some(output) = &args.output {
        let csv = export_statement_summary_to_csv(&summary, &options)?;
        fs::write(output, csv)
            .with_context(|| format!("Failed to write statement {}", output.display()))?;
        tracing::info!(path = %output.display(), "Statement exported");
    }

    if args.table {
        print_statement_table(&summary, &options);
        Ok(())
    } else {
        print_json(&summary)
    }
}

fn handle_price(args: PriceArgs, config: &Config) -> Result<()> {
    let engine = PricingEngine::new(config.pricing.clone());
    let conditions = args.market_conditions();
    let suggestion = engine.suggest(
        &args.node.current(),
        args.node.target,
        args.strategy,
        conditions.as_ref(),
    )?;
    print_json(&suggestion)
}

fn handle_roadmap(args: RoadmapArgs, config: &Config) -> Result<()> {
    let engine = PricingEngine::new(config.pricing.clone());
    let targets = PricingTargets {
        target_utilization: args.node.target,
        target_monthly_gross: args.monthly_target,
    };
    let roadmap = engine.roadmap(&args.node.current(), &targets)?;
    print_json(&roadmap)
}

fn handle_revenue(args: RevenueArgs, config: &Config) -> Result<()> {
    let days = args.days.unwrap_or(config.pricing.days_in_month);
    let monthly_gross = revenue::calculate_monthly_gross(args.utilization, args.price, days)?;

    let mut output = json!({
        "daysInMonth": days,
        "monthlyGross": monthly_gross,
    });
    if let Some(pct) = args.rev_share {
        output["revShare"] = serde_json::to_value(revenue::compute_rev_share(monthly_gross, pct)?)?;
    }
    if let Some(target) = args.target_gross {
        let gap = revenue::calculate_revenue_gap(target, args.utilization, args.price, days)?;
        let needed = revenue::calculate_target_utilization(target, args.price, days)?;
        output["revenueGap"] = serde_json::to_value(gap)?;
        output["targetUtilization"] = serde_json::to_value(needed)?;
    }
    print_json(&output)
}

fn handle_trend(args: TrendArgs, config: &Config) -> Result<()> {
    let mut points: Vec<DataPoint> = read_json(&args.input)?;
    points.sort_by_key(|p| p.timestamp);

    let settings = &config.analytics;
    let trend = analyze_trend(&points, args.period.as_deref())?;
    let anomalies = detect_anomalies(&points, settings.anomaly_std_dev_threshold)?;
    let rolling = rolling_average(&points, settings.rolling_window)?;
    let smoothed = ewma(&points, settings.ewma_alpha)?;

    print_json(&json!({
        "trend": trend,
        "anomalies": anomalies,
        "rollingAverage": rolling,
        "ewma": smoothed,
    }))
}

fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let metrics: Vec<PerformanceMetrics> = read_json(&args.input)?;
    let report = AnalyticsEngine::new(config.scoring).calculate(&metrics)?;
    print_json(&report)
}

// ==============================================================================
// Helpers
// ==============================================================================

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_statement_table(summary: &StatementSummary, options: &CsvOptions) {
    let dp = options.decimal_places;
    let currency = &options.currency;

    println!(
        "Statement {} to {} | {} nodes | gross {} {currency} | owner {} {currency}",
        summary.period_start,
        summary.period_end,
        summary.total_nodes,
        format_decimal(summary.total_gross_revenue_usd, dp),
        format_decimal(summary.total_owner_cut_usd, dp),
    );
    if let Some(node) = &summary.top_performing_node {
        println!("Top performing node: {node}");
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Date".to_string(),
        "Node ID".to_string(),
        "Node Name".to_string(),
        "Utilization %".to_string(),
        format!("Gross ({currency})"),
        format!("Operator Cut ({currency})"),
        format!("Owner Cut ({currency})"),
        "Uptime %".to_string(),
    ]);
    for record in &summary.records {
        table.add_row(vec![
            record.date.to_string(),
            record.node_id.clone(),
            record.node_name.clone(),
            format_decimal(record.utilization_percent, dp),
            format_decimal(record.gross_revenue_usd, dp),
            format_decimal(record.operator_cut_usd, dp),
            format_decimal(record.owner_cut_usd, dp),
            format_decimal(record.uptime, dp),
        ]);
    }
    println!("{table}");
}
