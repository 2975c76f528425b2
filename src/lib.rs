//! Tariff Scenario Planner - landed cost engine for imported goods
//!
//! This library provides:
//! - Loading of the cleaned product, tariff, supplier, financial and policy tables
//! - Record lookup by HS code and trade lane
//! - Landed cost, pricing and FX/duty/FTA impact calculation
//! - Baseline vs scenario comparison and whole-portfolio sweeps

pub mod config;
pub mod error;
pub mod data;
pub mod engine;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use data::{DataTables, ProductRecord, TariffRecord, TradeLane};
pub use engine::{compute, MetricsResult, OverrideSet};
pub use scenario::{ScenarioRunner, ScenarioComparison};
