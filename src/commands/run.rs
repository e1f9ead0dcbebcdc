//! Status reporter command handler.
//!
//! Wires the metrics source, line sink, and notifier together and drives
//! the sampling loop until the process is signalled.

use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::runtime::{OutputFormat, SamplingLoop};
use crate::core::source::SystemSource;
use crate::platform::notify::{DesktopNotifier, Notifier, NullNotifier};
use crate::platform::sink::{BarSink, LineSink, StdoutSink, DEFAULT_BAR_COMMAND};

/// Execute the run command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let json = matches.get_flag("json");
    let to_stdout = matches.get_flag("stdout");
    let quiet = matches.get_flag("quiet");
    let command = matches.get_one::<String>("command");

    let format = if json {
        OutputFormat::Json
    } else {
        OutputFormat::Bar
    };

    // The sink is established exactly once; startup failure is fatal
    let sink: Box<dyn LineSink> = match command {
        Some(cmd) => Box::new(BarSink::spawn(cmd).context("Failed to start display process")?),
        None if to_stdout || json => Box::new(StdoutSink::new()),
        None => Box::new(
            BarSink::spawn(DEFAULT_BAR_COMMAND).context("Failed to start display process")?,
        ),
    };

    let notifier: Box<dyn Notifier> = if quiet {
        Box::new(NullNotifier::new())
    } else {
        Box::new(DesktopNotifier::new())
    };

    let source = SystemSource::new().context("Failed to acquire system metric handles")?;

    let mut reporter = SamplingLoop::new(source, sink, notifier, format);

    let running = reporter.shutdown_flag();
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .context("Failed to install signal handler")?;

    reporter.run().context("Status reporter failed")
}
