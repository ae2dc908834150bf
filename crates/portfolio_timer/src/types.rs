use std::io;

use thiserror::Error;

pub type TimerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One period of a running timer elapsed.
    Fired { timer_id: TimerId },
}

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("failed to build timer runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to spawn timer thread: {0}")]
    Thread(io::Error),
    #[error("timer driver has shut down")]
    Stopped,
}
