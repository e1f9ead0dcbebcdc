//! The sampling loop.
//!
//! One synchronous thread of control: read the four metrics, derive deltas,
//! dispatch alerts, render, emit, sleep, repeat. A failed metric read only
//! degrades that field for the cycle; a failed sink write ends the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::error::Result;
use crate::platform::notify::Notifier;
use crate::platform::sink::LineSink;
use crate::ui::line;

use super::alerts::{evaluate_alerts, AlertKind};
use super::metrics::StatusSnapshot;
use super::source::MetricsSource;
use super::tracker::DeltaTracker;

/// Fixed wall-clock cadence of the reporter
pub const CYCLE_INTERVAL: Duration = Duration::from_secs(1);

/// How each cycle is rendered before it reaches the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// dzen2 markup status line
    Bar,
    /// One JSON object per cycle, for scripting consumers
    Json,
}

#[derive(Serialize)]
struct CycleRecord {
    timestamp: NaiveDateTime,
    #[serde(flatten)]
    snapshot: StatusSnapshot,
    cpu_usage_percent: u8,
}

/// Drives the fixed-interval sample/format/emit cycle.
pub struct SamplingLoop<S, K, N> {
    source: S,
    sink: K,
    notifier: N,
    tracker: DeltaTracker,
    /// Last good value per field, reused when a read fails
    last: StatusSnapshot,
    /// False until the first successful battery read; the placeholder
    /// battery value must never trip the charge rule
    battery_seen: bool,
    format: OutputFormat,
    running: Arc<AtomicBool>,
}

impl<S, K, N> SamplingLoop<S, K, N>
where
    S: MetricsSource,
    K: LineSink,
    N: Notifier,
{
    pub fn new(source: S, sink: K, notifier: N, format: OutputFormat) -> Self {
        Self {
            source,
            sink,
            notifier,
            tracker: DeltaTracker::new(),
            last: StatusSnapshot::default(),
            battery_seen: false,
            format,
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Flag cleared by the signal handler to request a graceful stop.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Run one cycle: sample, derive, alert, render, emit.
    pub fn cycle(&mut self) -> Result<()> {
        match self.source.battery() {
            Ok(sample) => {
                self.last.battery = sample;
                self.battery_seen = true;
            }
            Err(e) => log::warn!("battery read failed, keeping last value: {}", e),
        }
        match self.source.thermal() {
            Ok(sample) => self.last.thermal = sample,
            Err(e) => log::warn!("thermal read failed, keeping last value: {}", e),
        }
        match self.source.cpu_ticks() {
            Ok(sample) => self.last.cpu = sample,
            Err(e) => log::warn!("cpu read failed, keeping last value: {}", e),
        }
        match self.source.volume() {
            Ok(sample) => self.last.volume = sample,
            Err(e) => log::warn!("volume read failed, keeping last value: {}", e),
        }

        let deltas = self
            .tracker
            .update(&self.last.battery, &self.last.thermal, &self.last.cpu);

        // Alerts see exactly the data the formatter renders
        for alert in evaluate_alerts(&deltas, &self.last.battery) {
            if alert.kind == AlertKind::LowBattery && !self.battery_seen {
                continue;
            }
            if let Err(e) = self.notifier.notify(alert.message) {
                log::warn!("notification dropped: {}", e);
            }
        }

        let now = Local::now().naive_local();
        let output = match self.format {
            OutputFormat::Bar => line::render(
                &self.last.battery,
                &self.last.thermal,
                deltas.cpu_usage_percent,
                &self.last.volume,
                &now,
            ),
            OutputFormat::Json => serde_json::to_string(&CycleRecord {
                timestamp: now,
                snapshot: self.last,
                cpu_usage_percent: deltas.cpu_usage_percent,
            })?,
        };

        self.sink.write_line(&output)
    }

    /// Run until the shutdown flag clears or the sink dies.
    pub fn run(&mut self) -> Result<()> {
        log::info!("Sampling loop started");

        while self.running.load(Ordering::SeqCst) {
            if let Err(e) = self.cycle() {
                log::error!("cycle failed: {}", e);
                return Err(e);
            }
            thread::sleep(CYCLE_INTERVAL);
        }

        log::info!("Sampling loop stopped");
        Ok(())
    }
}
