//! Metrics acquisition.
//!
//! `MetricsSource` is the seam between the sampling loop and the operating
//! system: four independent point-in-time reads, each of which may fail on
//! its own without taking the loop down. `SystemSource` is the production
//! implementation backed by the battery and sysinfo crates plus /proc and
//! the ALSA mixer CLI.

use std::fs;
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;
use sysinfo::Components;

use crate::error::{BarlineError, Result};

use super::metrics::{
    BatterySample, CpuTicks, PowerState, ThermalSample, VolumeSample, DECI_KELVIN_ZERO_C,
};

static VOLUME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d+)%\]").expect("volume pattern is valid")
});

/// Point-in-time reads of the monitored OS counters
pub trait MetricsSource {
    fn battery(&mut self) -> Result<BatterySample>;
    fn thermal(&mut self) -> Result<ThermalSample>;
    fn cpu_ticks(&mut self) -> Result<CpuTicks>;
    fn volume(&mut self) -> Result<VolumeSample>;
}

/// Production metrics source.
///
/// Long-lived handles are acquired once here and reused for the process
/// lifetime; only the per-cycle refreshes touch the OS afterwards.
pub struct SystemSource {
    manager: battery::Manager,
    components: Components,
}

impl SystemSource {
    pub fn new() -> Result<Self> {
        let manager = battery::Manager::new()
            .map_err(|e| BarlineError::metric(format!("battery manager: {}", e)))?;
        let components = Components::new_with_refreshed_list();

        Ok(Self {
            manager,
            components,
        })
    }
}

impl MetricsSource for SystemSource {
    fn battery(&mut self) -> Result<BatterySample> {
        let mut batteries = self
            .manager
            .batteries()
            .map_err(|e| BarlineError::metric(format!("battery enumeration: {}", e)))?;

        let battery = match batteries.next() {
            Some(b) => b.map_err(|e| BarlineError::metric(format!("battery read: {}", e)))?,
            // Desktop without a battery: permanently on mains
            None => return Ok(BatterySample::new(PowerState::OnAc, 100, None)),
        };

        let state = match battery.state() {
            battery::State::Charging => PowerState::Charging,
            battery::State::Discharging | battery::State::Empty => PowerState::Discharging,
            battery::State::Full => PowerState::OnAc,
            _ => PowerState::Unknown,
        };

        let life = battery
            .state_of_charge()
            .get::<battery::units::ratio::percent>()
            .round() as u8;

        let remaining = battery
            .time_to_empty()
            .map(|t| (t.get::<battery::units::time::minute>()).round() as u32);

        Ok(BatterySample::new(state, life, remaining))
    }

    fn thermal(&mut self) -> Result<ThermalSample> {
        self.components.refresh(true);

        let reading = self
            .components
            .iter()
            .find(|c| {
                let label = c.label().to_lowercase();
                label.contains("cpu")
                    || label.contains("core")
                    || label.contains("tctl")
                    || label.contains("package")
            })
            .or_else(|| self.components.iter().next())
            .and_then(|c| c.temperature())
            .ok_or_else(|| BarlineError::metric("no thermal sensor reading"))?;

        // The wire unit for thermal zones is tenths of a Kelvin
        let raw = (reading * 10.0).round() as i32 + DECI_KELVIN_ZERO_C;
        Ok(ThermalSample::from_deci_kelvin(raw))
    }

    fn cpu_ticks(&mut self) -> Result<CpuTicks> {
        read_cpu_ticks("/proc/stat")
    }

    fn volume(&mut self) -> Result<VolumeSample> {
        let output = Command::new("amixer")
            .args(["sget", "Master"])
            .output()
            .map_err(|e| BarlineError::metric(format!("amixer: {}", e)))?;

        if !output.status.success() {
            return Err(BarlineError::metric("amixer exited with failure"));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.contains("[off]") {
            return Ok(VolumeSample::new(0));
        }

        VOLUME_RE
            .captures(&stdout)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map(VolumeSample::new)
            .ok_or_else(|| BarlineError::metric("no volume level in amixer output"))
    }
}

/// Read and parse a /proc/stat-format file; an unreadable file degrades
/// the cycle like any other unavailable metric.
fn read_cpu_ticks(path: &str) -> Result<CpuTicks> {
    let stat = fs::read_to_string(path)
        .map_err(|e| BarlineError::metric(format!("{}: {}", path, e)))?;
    parse_proc_stat(&stat)
}

/// Parse the aggregate `cpu` line of /proc/stat into tick counters.
fn parse_proc_stat(stat: &str) -> Result<CpuTicks> {
    let line = stat
        .lines()
        .find(|l| l.starts_with("cpu "))
        .ok_or_else(|| BarlineError::metric("no aggregate cpu line in /proc/stat"))?;

    let fields: Vec<u64> = line
        .split_whitespace()
        .skip(1)
        .take(4)
        .map(|f| f.parse::<u64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| BarlineError::metric(format!("malformed /proc/stat: {}", e)))?;

    match fields.as_slice() {
        [user, nice, system, idle] => Ok(CpuTicks {
            user: *user,
            nice: *nice,
            system: *system,
            idle: *idle,
        }),
        _ => Err(BarlineError::metric("truncated cpu line in /proc/stat")),
    }
}
