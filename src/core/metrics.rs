//! Sample types produced by the metrics source.
//!
//! All samples are cycle-local values; the only state carried across cycles
//! lives in the delta tracker.

use serde::Serialize;

/// Thermal-zone readings arrive as tenths of a Kelvin; 0 °C in that unit.
pub const DECI_KELVIN_ZERO_C: i32 = 2732;

/// Power source reported by the battery subsystem
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PowerState {
    OnAc,
    Charging,
    Discharging,
    #[default]
    Unknown,
}

/// Point-in-time battery reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatterySample {
    pub state: PowerState,
    /// Remaining charge, 0-100
    pub life_percent: u8,
    /// Estimated minutes until empty; only meaningful while discharging
    pub time_remaining_min: Option<u32>,
}

impl BatterySample {
    /// Build a sample enforcing the battery invariants: life is clamped to
    /// 0-100, and a machine on AC power always reports 100 (the platform
    /// convention for "full when plugged in").
    pub fn new(state: PowerState, life_percent: u8, time_remaining_min: Option<u32>) -> Self {
        let life_percent = match state {
            PowerState::OnAc => 100,
            _ => life_percent.min(100),
        };
        Self {
            state,
            life_percent,
            time_remaining_min,
        }
    }
}

/// Thermal-zone reading converted from a raw tenths-of-Kelvin value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThermalSample {
    /// Whole degrees Celsius
    pub celsius: i32,
    /// Tenths-of-a-degree remainder, always non-negative
    pub tenths: u32,
}

impl ThermalSample {
    /// Convert a raw tenths-of-Kelvin reading into degrees Celsius.
    pub fn from_deci_kelvin(raw: i32) -> Self {
        let offset = raw - DECI_KELVIN_ZERO_C;
        Self {
            celsius: offset / 10,
            tenths: (offset % 10).unsigned_abs(),
        }
    }
}

/// Cumulative per-mode CPU tick counters since boot.
///
/// Each counter is monotonically non-decreasing for the life of the host;
/// rates are derived from the difference of two consecutive samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl CpuTicks {
    pub fn total(&self) -> u64 {
        self.user + self.nice + self.system + self.idle
    }
}

/// Mixer volume level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VolumeSample {
    /// Level masked to 0-127, commonly 0-100 in practice
    pub level: u8,
}

impl VolumeSample {
    pub fn new(raw: u32) -> Self {
        Self {
            level: (raw & 0x7f) as u8,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.level == 0
    }
}

/// One cycle's worth of samples.
///
/// The sampling loop keeps the last good snapshot so that a failed read
/// degrades to the previous value instead of losing the field.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusSnapshot {
    pub battery: BatterySample,
    pub thermal: ThermalSample,
    pub cpu: CpuTicks,
    pub volume: VolumeSample,
}
