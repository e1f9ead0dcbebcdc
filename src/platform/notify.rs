//! Transient on-screen notifications.
//!
//! Delivery is best-effort: the sampling loop logs and drops failures, so
//! a broken notification daemon never degrades the status line itself.

use std::process::{Child, Command, Stdio};

use crate::error::{BarlineError, Result};

/// Auto-dismiss timeout handed to the notification daemon
const NOTIFY_TIMEOUT_MS: u32 = 4000;

/// Displays a short transient message to the user
pub trait Notifier {
    fn notify(&mut self, message: &str) -> Result<()>;
}

impl Notifier for Box<dyn Notifier> {
    fn notify(&mut self, message: &str) -> Result<()> {
        (**self).notify(message)
    }
}

/// Notifier shelling out to `notify-send`.
///
/// Children are spawned without blocking on completion; exited ones are
/// reaped on the next call and on drop, so repeated alerts never pile up
/// defunct processes.
#[derive(Default)]
pub struct DesktopNotifier {
    pending: Vec<Child>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect exit statuses of finished children; running ones stay pending.
    fn reap(&mut self) {
        self.pending
            .retain_mut(|child| !matches!(child.try_wait(), Ok(Some(_))));
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&mut self, message: &str) -> Result<()> {
        self.reap();

        let child = Command::new("notify-send")
            .args(["-a", "barline", "-t", &NOTIFY_TIMEOUT_MS.to_string()])
            .arg(message)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BarlineError::notifier(format!("notify-send: {}", e)))?;
        self.pending.push(child);
        Ok(())
    }
}

impl Drop for DesktopNotifier {
    fn drop(&mut self) {
        for child in &mut self.pending {
            let _ = child.wait();
        }
    }
}

/// Notifier that swallows every message (for --quiet and tests).
#[derive(Default)]
pub struct NullNotifier;

impl NullNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for NullNotifier {
    fn notify(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }
}
