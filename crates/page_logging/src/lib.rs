#![deny(missing_docs)]
//! Logging helpers shared by the portfolio crates.
//!
//! Every `page_*` line is prefixed with the dispatch-loop frame of the
//! thread that logged it, so timer and effect lines can be matched to the
//! message that caused them.

use std::cell::Cell;
use std::fmt;

thread_local! {
    /// Frame number of the dispatch loop running on this thread.
    static FRAME: Cell<u64> = const { Cell::new(0) };
}

/// Records the dispatch-loop frame for the current thread.
pub fn set_frame(frame: u64) {
    FRAME.with(|v| v.set(frame));
}

/// Returns the dispatch-loop frame for the current thread, or 0 if unset.
pub fn current_frame() -> u64 {
    FRAME.with(|v| v.get())
}

/// Log prefix naming the current thread's frame.
///
/// Renders `[frame N]`, or `[frame -]` on threads that never dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTag(pub u64);

impl FrameTag {
    /// Tag for the calling thread.
    pub fn current() -> Self {
        Self(current_frame())
    }
}

impl fmt::Display for FrameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("[frame -]"),
            frame => write!(f, "[frame {frame}]"),
        }
    }
}

/// Logs a trace-level message.
#[macro_export]
macro_rules! page_trace {
    ($($arg:tt)*) => {{
        log::trace!("{} {}", $crate::FrameTag::current(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! page_debug {
    ($($arg:tt)*) => {{
        log::debug!("{} {}", $crate::FrameTag::current(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message.
#[macro_export]
macro_rules! page_info {
    ($($arg:tt)*) => {{
        log::info!("{} {}", $crate::FrameTag::current(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! page_warn {
    ($($arg:tt)*) => {{
        log::warn!("{} {}", $crate::FrameTag::current(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! page_error {
    ($($arg:tt)*) => {{
        log::error!("{} {}", $crate::FrameTag::current(), format_args!($($arg)*));
    }};
}

/// Installs a terminal logger for tests.
///
/// Safe to call from every test: later calls are ignored once a logger is set.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
