//! Status line rendering.
//!
//! Pure formatting only: no I/O and no state, so two calls with the same
//! inputs always produce the same bytes.

use chrono::NaiveDateTime;

use crate::core::metrics::{BatterySample, PowerState, ThermalSample, VolumeSample};

use super::icons::{
    ICON_LOAD, ICON_POWER_AC, ICON_POWER_BAT, ICON_TEMP, ICON_VOLUME_HIGH, ICON_VOLUME_MUTE,
    SEPARATOR, UNKNOWN_POWER,
};

/// Locale-independent 24-hour timestamp
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Render one status line with the fixed field order:
/// battery, temperature, CPU usage, volume, timestamp.
pub fn render(
    battery: &BatterySample,
    thermal: &ThermalSample,
    cpu_usage_percent: u8,
    volume: &VolumeSample,
    timestamp: &NaiveDateTime,
) -> String {
    let battery_icon = match battery.state {
        PowerState::OnAc | PowerState::Charging => ICON_POWER_AC,
        PowerState::Discharging => ICON_POWER_BAT,
        PowerState::Unknown => UNKNOWN_POWER,
    };

    let volume_icon = if volume.is_muted() {
        ICON_VOLUME_MUTE
    } else {
        ICON_VOLUME_HIGH
    };

    format!(
        "{} {}%{sep}{} {} C{sep}{} {:02}%{sep}{} {}%{sep}{}",
        battery_icon,
        battery.life_percent,
        ICON_TEMP,
        thermal.celsius,
        ICON_LOAD,
        cpu_usage_percent,
        volume_icon,
        volume.level,
        timestamp.format(TIMESTAMP_FORMAT),
        sep = SEPARATOR,
    )
}
