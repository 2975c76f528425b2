//! Landed cost engine: overrides in, metrics out

mod calculator;
mod metrics;
mod overrides;

pub use calculator::{compute, compute_resolved, ResolvedInputs};
pub use metrics::{CostComponent, Metric, MetricsResult, Unit};
pub use overrides::OverrideSet;
