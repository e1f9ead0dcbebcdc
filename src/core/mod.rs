// Core sampling and alerting logic

pub mod alerts;
pub mod metrics;
pub mod runtime;
pub mod source;
pub mod tracker;

// Re-export commonly used items
pub use alerts::{evaluate_alerts, AlertEvent, AlertKind};
pub use metrics::{BatterySample, CpuTicks, PowerState, StatusSnapshot, ThermalSample, VolumeSample};
pub use runtime::{OutputFormat, SamplingLoop, CYCLE_INTERVAL};
pub use source::{MetricsSource, SystemSource};
pub use tracker::{CycleDeltas, DeltaTracker};
