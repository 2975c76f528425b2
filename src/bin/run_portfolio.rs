//! Run one scenario across every product row in the master
//!
//! Writes per-lane metrics to CSV and prints volume-weighted totals.
//!
//! Usage: cargo run --bin run_portfolio -- --fx-rate 84 --pass-through 70

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tariff_scenario_planner::engine::Metric;
use tariff_scenario_planner::scenario::PortfolioSummary;
use tariff_scenario_planner::{OverrideSet, PlannerConfig, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(about = "Apply one scenario to the whole product master")]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(long, default_value = "portfolio_output.csv")]
    output: PathBuf,

    #[arg(long)]
    pass_through: Option<f64>,

    #[arg(long)]
    fx_rate: Option<f64>,

    #[arg(long)]
    bcd: Option<f64>,

    #[arg(long)]
    igst: Option<f64>,

    #[arg(long)]
    freight: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    let start = Instant::now();
    let runner = ScenarioRunner::load(&config)
        .with_context(|| format!("loading tables from {}", config.data_dir.display()))?;
    println!(
        "Loaded {} products and {} tariffs in {:?}",
        runner.tables().product.len(),
        runner.tables().tariff.len(),
        start.elapsed()
    );

    let overrides = OverrideSet {
        fx_rate: cli.fx_rate,
        bcd_percent: cli.bcd,
        igst_percent: cli.igst,
        freight_usd: cli.freight,
        ..OverrideSet::with_pass_through(cli.pass_through.unwrap_or(config.pass_through_rate))
    };

    let run_start = Instant::now();
    let entries = runner.run_portfolio(&overrides);
    println!("Computed {} rows in {:?}", entries.len(), run_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;

    let mut header = vec!["hs_code", "importing_country", "exporting_country", "status"];
    header.extend(Metric::ALL.iter().map(|m| m.key()));
    writer.write_record(&header)?;

    for entry in &entries {
        let mut record = vec![
            entry.lane.hs_code.clone(),
            entry.lane.importing_country.clone(),
            entry.lane.exporting_country.clone(),
        ];
        match &entry.result {
            Ok(result) => {
                record.push("ok".to_string());
                record.extend(Metric::ALL.iter().map(|m| format!("{:.6}", result.get(*m))));
            }
            Err(err) => {
                record.push(err.to_string());
                record.extend(Metric::ALL.iter().map(|_| String::new()));
            }
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    println!("Output written to {}", cli.output.display());

    let summary = PortfolioSummary::from_entries(&entries);
    println!("\nPortfolio Summary:");
    println!("  Lanes computed: {} (skipped {})", summary.computed, summary.skipped);
    println!("  Total landed cost (INR):   {:.2}", summary.total_landed_cost_inr);
    println!("  Total profit (INR):        {:.2}", summary.total_profit_inr);
    println!("  Total duty exposure (USD): {:.2}", summary.total_duty_exposure_usd);
    println!("  Total FTA savings (USD):   {:.2}", summary.total_fta_savings_usd);

    Ok(())
}
