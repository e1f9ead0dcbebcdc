use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use barline::core::metrics::{
    BatterySample, CpuTicks, PowerState, StatusSnapshot, ThermalSample, VolumeSample,
};
use barline::core::runtime::{OutputFormat, SamplingLoop};
use barline::core::source::MetricsSource;
use barline::error::{BarlineError, Result};
use barline::platform::notify::Notifier;
use barline::platform::sink::LineSink;
use barline::ui::icons::ICON_POWER_BAT;

/// Source replaying a fixed script; an exhausted or `None` step fails the
/// read like a real sensor going away.
#[derive(Default)]
struct ScriptedSource {
    battery: VecDeque<Option<BatterySample>>,
    thermal: VecDeque<Option<ThermalSample>>,
    cpu: VecDeque<Option<CpuTicks>>,
    volume: VecDeque<Option<VolumeSample>>,
}

impl ScriptedSource {
    fn pop<T>(queue: &mut VecDeque<Option<T>>, what: &str) -> Result<T> {
        queue
            .pop_front()
            .flatten()
            .ok_or_else(|| BarlineError::metric(format!("scripted {} failure", what)))
    }
}

impl MetricsSource for ScriptedSource {
    fn battery(&mut self) -> Result<BatterySample> {
        Self::pop(&mut self.battery, "battery")
    }

    fn thermal(&mut self) -> Result<ThermalSample> {
        Self::pop(&mut self.thermal, "thermal")
    }

    fn cpu_ticks(&mut self) -> Result<CpuTicks> {
        Self::pop(&mut self.cpu, "cpu")
    }

    fn volume(&mut self) -> Result<VolumeSample> {
        Self::pop(&mut self.volume, "volume")
    }
}

#[derive(Clone, Default)]
struct VecSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl LineSink for VecSink {
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }
}

struct FailingSink;

impl LineSink for FailingSink {
    fn write_line(&mut self, _line: &str) -> Result<()> {
        Err(BarlineError::sink("display process is gone"))
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) -> Result<()> {
        self.messages.borrow_mut().push(message.to_string());
        Ok(())
    }
}

fn steady_snapshot() -> StatusSnapshot {
    StatusSnapshot {
        battery: BatterySample::new(PowerState::OnAc, 100, None),
        thermal: ThermalSample {
            celsius: 22,
            tenths: 0,
        },
        cpu: CpuTicks {
            user: 100,
            nice: 0,
            system: 50,
            idle: 850,
        },
        volume: VolumeSample::new(50),
    }
}

fn script_cycles(snapshots: &[StatusSnapshot]) -> ScriptedSource {
    let mut source = ScriptedSource::default();
    for s in snapshots {
        source.battery.push_back(Some(s.battery));
        source.thermal.push_back(Some(s.thermal));
        source.cpu.push_back(Some(s.cpu));
        source.volume.push_back(Some(s.volume));
    }
    source
}

#[test]
fn test_metric_failure_degrades_to_last_value() {
    let mut source = script_cycles(&[steady_snapshot()]);
    // Second cycle: thermal read fails, everything else advances
    source.battery.push_back(Some(steady_snapshot().battery));
    source.thermal.push_back(None);
    source.cpu.push_back(Some(CpuTicks {
        user: 150,
        nice: 0,
        system: 80,
        idle: 870,
    }));
    source.volume.push_back(Some(VolumeSample::new(50)));

    let sink = VecSink::default();
    let lines = Rc::clone(&sink.lines);
    let mut reporter =
        SamplingLoop::new(source, sink, RecordingNotifier::default(), OutputFormat::Bar);

    reporter.cycle().unwrap();
    reporter.cycle().unwrap();

    let lines = lines.borrow();
    assert_eq!(lines.len(), 2);
    // The stale temperature is still rendered, and the cycle went on to
    // compute a fresh CPU figure from the new ticks
    assert!(lines[1].contains("22 C"));
    assert!(lines[1].contains("80%"));
}

#[test]
fn test_sink_failure_is_fatal() {
    let source = script_cycles(&[steady_snapshot()]);
    let mut reporter = SamplingLoop::new(
        source,
        FailingSink,
        RecordingNotifier::default(),
        OutputFormat::Bar,
    );

    let err = reporter.cycle().unwrap_err();
    assert!(matches!(err, BarlineError::SinkUnavailable(_)));
}

#[test]
fn test_battery_transitions_notify_once_each() {
    let states = [
        PowerState::OnAc,
        PowerState::OnAc,
        PowerState::Discharging,
        PowerState::Discharging,
        PowerState::OnAc,
        PowerState::Discharging,
    ];
    let snapshots: Vec<StatusSnapshot> = states
        .iter()
        .map(|&state| StatusSnapshot {
            battery: BatterySample::new(state, 50, None),
            ..steady_snapshot()
        })
        .collect();

    let notifier = RecordingNotifier::default();
    let messages = Rc::clone(&notifier.messages);
    let mut reporter = SamplingLoop::new(
        script_cycles(&snapshots),
        VecSink::default(),
        notifier,
        OutputFormat::Bar,
    );

    for _ in 0..states.len() {
        reporter.cycle().unwrap();
    }

    let messages = messages.borrow();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m == "ON BATTERY"));
}

#[test]
fn test_low_battery_notifies_every_cycle() {
    let snapshots: Vec<StatusSnapshot> = (0..3)
        .map(|_| StatusSnapshot {
            battery: BatterySample::new(PowerState::Discharging, 5, Some(12)),
            ..steady_snapshot()
        })
        .collect();

    let notifier = RecordingNotifier::default();
    let messages = Rc::clone(&notifier.messages);
    let mut reporter = SamplingLoop::new(
        script_cycles(&snapshots),
        VecSink::default(),
        notifier,
        OutputFormat::Bar,
    );

    // First cycle also enters battery power, so expect that alert once
    // plus the low-battery alert on all three cycles
    for _ in 0..3 {
        reporter.cycle().unwrap();
    }

    let messages = messages.borrow();
    assert_eq!(
        messages.iter().filter(|m| *m == "PLUG AC!").count(),
        3
    );
    assert_eq!(
        messages.iter().filter(|m| *m == "ON BATTERY").count(),
        1
    );
}

#[test]
fn test_failed_first_battery_read_raises_no_charge_alert() {
    let base = steady_snapshot();
    let mut source = ScriptedSource::default();
    // Cycle 1: no battery sample has ever been read
    source.battery.push_back(None);
    source.thermal.push_back(Some(base.thermal));
    source.cpu.push_back(Some(base.cpu));
    source.volume.push_back(Some(base.volume));
    // Cycle 2: a genuine low sample arrives
    source
        .battery
        .push_back(Some(BatterySample::new(PowerState::Discharging, 5, None)));
    source.thermal.push_back(Some(base.thermal));
    source.cpu.push_back(Some(base.cpu));
    source.volume.push_back(Some(base.volume));

    let notifier = RecordingNotifier::default();
    let messages = Rc::clone(&notifier.messages);
    let mut reporter = SamplingLoop::new(source, VecSink::default(), notifier, OutputFormat::Bar);

    reporter.cycle().unwrap();
    assert!(messages.borrow().is_empty());

    reporter.cycle().unwrap();
    let messages = messages.borrow();
    assert_eq!(messages.iter().filter(|m| *m == "PLUG AC!").count(), 1);
}

#[test]
fn test_rendered_line_tracks_battery_state() {
    let snapshots = [
        steady_snapshot(),
        StatusSnapshot {
            battery: BatterySample::new(PowerState::Discharging, 42, Some(95)),
            ..steady_snapshot()
        },
    ];

    let sink = VecSink::default();
    let lines = Rc::clone(&sink.lines);
    let mut reporter = SamplingLoop::new(
        script_cycles(&snapshots),
        sink,
        RecordingNotifier::default(),
        OutputFormat::Bar,
    );

    reporter.cycle().unwrap();
    reporter.cycle().unwrap();

    let lines = lines.borrow();
    assert!(lines[0].contains("100%"));
    assert!(lines[1].contains(ICON_POWER_BAT));
    assert!(lines[1].contains("42%"));
}

#[test]
fn test_json_output_is_parseable() {
    let sink = VecSink::default();
    let lines = Rc::clone(&sink.lines);
    let mut reporter = SamplingLoop::new(
        script_cycles(&[steady_snapshot()]),
        sink,
        RecordingNotifier::default(),
        OutputFormat::Json,
    );

    reporter.cycle().unwrap();

    let lines = lines.borrow();
    let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert!(record.get("timestamp").is_some());
    assert!(record.get("cpu_usage_percent").is_some());
    assert_eq!(record["thermal"]["celsius"], 22);
    assert_eq!(record["volume"]["level"], 50);
}
