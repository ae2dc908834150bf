use std::sync::mpsc;

use crate::TimerEvent;

/// Receives timer events from the driver's worker threads.
pub trait TickSink: Send + Sync {
    /// Delivers an event. Returning `false` tells the timer nobody is listening
    /// and it stops on its own.
    fn emit(&self, event: TimerEvent) -> bool;
}

pub struct ChannelTickSink {
    tx: mpsc::Sender<TimerEvent>,
}

impl ChannelTickSink {
    pub fn new(tx: mpsc::Sender<TimerEvent>) -> Self {
        Self { tx }
    }
}

impl TickSink for ChannelTickSink {
    fn emit(&self, event: TimerEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}
