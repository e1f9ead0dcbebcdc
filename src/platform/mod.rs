// OS-facing collaborators: line sink and notifier

pub mod notify;
pub mod sink;

// Re-exports for cleaner imports
pub use notify::{DesktopNotifier, Notifier, NullNotifier};
pub use sink::{BarSink, LineSink, StdoutSink, DEFAULT_BAR_COMMAND};
