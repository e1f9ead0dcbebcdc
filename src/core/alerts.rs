//! Alert evaluation for battery and temperature conditions.
//!
//! Evaluates the derived cycle values against fixed thresholds and produces
//! the notifications to raise. The battery-entry and temperature rules are
//! edge-triggered via the delta tracker; the low-battery rule is
//! level-triggered and re-fires every cycle the condition holds.

use super::metrics::BatterySample;
use super::tracker::CycleDeltas;

/// Battery life below this percentage raises the low-battery alert.
pub const LOW_BATTERY_PERCENT: u8 = 10;

/// Crossing this temperature (Celsius) raises the high-temperature alert.
pub const HIGH_TEMP_CELSIUS: i32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    EnteredBattery,
    LowBattery,
    HighTemperature,
}

/// An individual alert, passed straight to the notifier and discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertEvent {
    pub kind: AlertKind,
    pub message: &'static str,
}

/// Evaluate the current cycle and generate alerts.
///
/// Must be fed the same samples the formatter renders; no re-sampling.
pub fn evaluate_alerts(deltas: &CycleDeltas, battery: &BatterySample) -> Vec<AlertEvent> {
    let mut alerts = Vec::new();

    if deltas.entered_battery {
        alerts.push(AlertEvent {
            kind: AlertKind::EnteredBattery,
            message: "ON BATTERY",
        });
    }

    if battery.life_percent < LOW_BATTERY_PERCENT {
        alerts.push(AlertEvent {
            kind: AlertKind::LowBattery,
            message: "PLUG AC!",
        });
    }

    if deltas.crossed_high_temp {
        alerts.push(AlertEvent {
            kind: AlertKind::HighTemperature,
            message: "High temperature",
        });
    }

    alerts
}
