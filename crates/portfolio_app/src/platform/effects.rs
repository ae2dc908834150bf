use std::sync::{mpsc, Arc};

use page_logging::{page_debug, page_error};
use portfolio_core::{Effect, Msg};
use portfolio_timer::{TickSink, TimerDriver, TimerError, TimerEvent};

/// Turns timer events into page messages on the dispatch channel.
struct MsgTickSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl TickSink for MsgTickSink {
    fn emit(&self, event: TimerEvent) -> bool {
        let msg = match event {
            TimerEvent::Fired { timer_id } => Msg::CounterTick {
                counter_id: timer_id,
            },
        };
        self.msg_tx.send(msg).is_ok()
    }
}

pub struct EffectRunner {
    timers: TimerDriver,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>) -> Result<Self, TimerError> {
        let timers = TimerDriver::new(Arc::new(MsgTickSink { msg_tx }))?;
        Ok(Self { timers })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let result = match effect {
                Effect::StartTimer {
                    counter_id,
                    interval,
                } => {
                    page_debug!("StartTimer counter_id={} interval={:?}", counter_id, interval);
                    self.timers.start(counter_id, interval)
                }
                Effect::CancelTimer { counter_id } => {
                    page_debug!("CancelTimer counter_id={}", counter_id);
                    self.timers.cancel(counter_id)
                }
            };
            if let Err(err) = result {
                page_error!("Timer effect failed: {}", err);
            }
        }
    }

    pub fn shutdown(self) {
        self.timers.shutdown();
    }
}
