//! Tariff Scenario Planner CLI
//!
//! Command-line front end for landed cost calculations and scenario comparisons

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tariff_scenario_planner::report::{self, render_table};
use tariff_scenario_planner::{OverrideSet, PlannerConfig, ScenarioRunner, TradeLane};

#[derive(Debug, Parser)]
#[command(name = "tariff-planner", version, about = "Landed cost and scenario planner")]
struct Cli {
    /// JSON config file (data directory, table names, pass-through rate)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory with the cleaned CSV tables
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every HS code in the tariff reference
    HsCodes,

    /// List importing and exporting countries available for an HS code
    Countries {
        #[arg(long)]
        hs_code: String,
    },

    /// Landed cost from the stored product values
    Calculate {
        #[command(flatten)]
        lane: LaneArgs,

        /// Share of the target margin passed to the customer (0-100)
        #[arg(long)]
        pass_through: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare stored values against a scenario with overrides
    Scenario {
        #[command(flatten)]
        lane: LaneArgs,

        #[command(flatten)]
        overrides: OverrideArgs,

        #[arg(long)]
        pass_through: Option<f64>,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
struct LaneArgs {
    #[arg(long)]
    hs_code: String,

    #[arg(long)]
    importing: String,

    #[arg(long)]
    exporting: String,
}

impl LaneArgs {
    fn lane(&self) -> TradeLane {
        TradeLane::new(&self.hs_code, &self.importing, &self.exporting)
    }
}

#[derive(Debug, Args)]
struct OverrideArgs {
    /// Volume in units (0 keeps the stored volume)
    #[arg(long)]
    volume: Option<f64>,
    #[arg(long)]
    freight: Option<f64>,
    /// Insurance, percent of base price
    #[arg(long)]
    insurance: Option<f64>,
    #[arg(long)]
    base_price: Option<f64>,
    #[arg(long)]
    target_margin: Option<f64>,
    #[arg(long)]
    fx_rate: Option<f64>,
    #[arg(long)]
    bcd: Option<f64>,
    #[arg(long)]
    igst: Option<f64>,
}

impl OverrideArgs {
    fn to_overrides(&self, pass_through_rate: f64) -> OverrideSet {
        OverrideSet {
            volume: self.volume,
            freight_usd: self.freight,
            insurance_percent: self.insurance,
            base_price_usd: self.base_price,
            target_margin_percent: self.target_margin,
            fx_rate: self.fx_rate,
            bcd_percent: self.bcd,
            igst_percent: self.igst,
            pass_through_rate,
        }
    }
}

fn load_config(cli: &Cli) -> Result<PlannerConfig> {
    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlannerConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let runner = ScenarioRunner::load(&config)
        .with_context(|| format!("loading tables from {}", config.data_dir.display()))?;

    match &cli.command {
        Command::HsCodes => {
            for code in runner.hs_codes() {
                println!("{}", code);
            }
        }

        Command::Countries { hs_code } => {
            let (importing, exporting) = runner.valid_countries(hs_code);
            println!("Importing countries: {}", importing.join(", "));
            println!("Exporting countries: {}", exporting.join(", "));
        }

        Command::Calculate { lane, pass_through, json } => {
            let lane = lane.lane();
            let rate = pass_through.unwrap_or(config.pass_through_rate);
            let result = runner.calculate(&lane, rate)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            println!("Landed Cost Calculator: {}", lane);
            println!();
            let rows: Vec<Vec<String>> = report::metric_rows(&result)
                .into_iter()
                .map(|(label, value)| vec![label.to_string(), value])
                .collect();
            println!("{}", render_table(&["Metric", "Value"], &rows));

            println!();
            println!("Breakdown of Landed Cost Components (USD)");
            let rows: Vec<Vec<String>> = report::breakdown_rows(&result)
                .into_iter()
                .map(|row| {
                    vec![
                        row.component.to_string(),
                        report::format_usd(row.amount_usd),
                        format!("{:.1}%", row.share_percent),
                    ]
                })
                .collect();
            println!("{}", render_table(&["Component", "Amount (USD)", "Share"], &rows));
        }

        Command::Scenario { lane, overrides, pass_through, json } => {
            let lane = lane.lane();
            let rate = pass_through.unwrap_or(config.pass_through_rate);
            let comparison = runner.compare(&lane, &overrides.to_overrides(rate))?;

            if *json {
                let body = serde_json::json!({
                    "lane": comparison.lane,
                    "current": comparison.baseline,
                    "updated": comparison.scenario,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
                return Ok(());
            }

            println!("Scenario Planner: {}", lane);
            println!();
            let rows: Vec<Vec<String>> = report::comparison_rows(&comparison)
                .into_iter()
                .map(|(label, current, updated)| vec![label.to_string(), current, updated])
                .collect();
            println!(
                "{}",
                render_table(&["Output Metric", "Current Values", "Updated Values"], &rows)
            );
        }
    }

    Ok(())
}
