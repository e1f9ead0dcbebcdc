//! Cross-cycle delta tracking.
//!
//! Holds the previous cycle's counters and derives rate-of-change and
//! edge-triggered transition flags from consecutive samples.

use super::alerts::HIGH_TEMP_CELSIUS;
use super::metrics::{BatterySample, CpuTicks, PowerState, ThermalSample};

/// The prior cycle's sample data, overwritten at the end of every update.
#[derive(Debug, Clone, Copy, Default)]
struct PreviousState {
    power: PowerState,
    temp_celsius: i32,
    ticks: CpuTicks,
}

/// Values derived from two consecutive cycles
#[derive(Debug, Clone, Copy)]
pub struct CycleDeltas {
    /// CPU usage over the last interval, 0-100
    pub cpu_usage_percent: u8,
    /// True exactly once per AC-to-battery transition
    pub entered_battery: bool,
    /// True exactly once per upward crossing of the temperature threshold
    pub crossed_high_temp: bool,
}

/// Stateful tracker bundling all cross-cycle memory into one place.
#[derive(Debug, Default)]
pub struct DeltaTracker {
    prev: PreviousState,
    /// Reused when the tick counters did not advance
    last_usage: u8,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive deltas from the current samples and advance the tracker.
    ///
    /// The previous-state record is overwritten unconditionally, regardless
    /// of which flags fired.
    pub fn update(
        &mut self,
        battery: &BatterySample,
        thermal: &ThermalSample,
        cpu: &CpuTicks,
    ) -> CycleDeltas {
        let diff_total = cpu.total().saturating_sub(self.prev.ticks.total());
        let diff_idle = cpu.idle.saturating_sub(self.prev.ticks.idle);

        // Zero elapsed ticks means there is nothing to divide by; keep the
        // previous cycle's figure.
        if diff_total > 0 {
            let active = diff_total.saturating_sub(diff_idle);
            self.last_usage = ((1000 * active / diff_total + 5) / 10) as u8;
        }

        let entered_battery = battery.state == PowerState::Discharging
            && self.prev.power != PowerState::Discharging;

        let crossed_high_temp =
            thermal.celsius >= HIGH_TEMP_CELSIUS && self.prev.temp_celsius < HIGH_TEMP_CELSIUS;

        self.prev = PreviousState {
            power: battery.state,
            temp_celsius: thermal.celsius,
            ticks: *cpu,
        };

        CycleDeltas {
            cpu_usage_percent: self.last_usage,
            entered_battery,
            crossed_high_temp,
        }
    }
}
