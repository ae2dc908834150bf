use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use page_logging::{page_debug, page_error, page_trace, page_warn};
use tokio::runtime::Runtime;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{TickSink, TimerError, TimerEvent, TimerId};

/// Smallest period a timer may run at; tokio rejects a zero period.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

enum TimerCommand {
    Start { timer_id: TimerId, interval: Duration },
    Cancel { timer_id: TimerId },
    Shutdown,
}

/// Owns one repeating timer per id on a dedicated tokio runtime.
///
/// Commands are processed in order on the driver thread, so a `cancel` sent
/// after a `start` always releases that timer. Dropping the driver cancels
/// every timer still running.
pub struct TimerDriver {
    cmd_tx: mpsc::Sender<TimerCommand>,
    thread: Option<JoinHandle<()>>,
}

impl TimerDriver {
    pub fn new(sink: Arc<dyn TickSink>) -> Result<Self, TimerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("portfolio-timer-worker")
            .enable_time()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("portfolio-timer".to_string())
            .spawn(move || run_driver(runtime, cmd_rx, sink))
            .map_err(TimerError::Thread)?;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    /// Starts a repeating timer. The first event fires one `interval` from now.
    pub fn start(&self, timer_id: TimerId, interval: Duration) -> Result<(), TimerError> {
        self.send(TimerCommand::Start { timer_id, interval })
    }

    pub fn cancel(&self, timer_id: TimerId) -> Result<(), TimerError> {
        self.send(TimerCommand::Cancel { timer_id })
    }

    /// Cancels every running timer and waits for the driver thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn send(&self, command: TimerCommand) -> Result<(), TimerError> {
        self.cmd_tx.send(command).map_err(|_| TimerError::Stopped)
    }

    fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.cmd_tx.send(TimerCommand::Shutdown);
        if thread.join().is_err() {
            page_error!("timer driver thread panicked");
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_driver(runtime: Runtime, cmd_rx: mpsc::Receiver<TimerCommand>, sink: Arc<dyn TickSink>) {
    let mut active: HashMap<TimerId, CancellationToken> = HashMap::new();

    while let Ok(command) = cmd_rx.recv() {
        match command {
            TimerCommand::Start { timer_id, interval } => {
                if active.get(&timer_id).is_some_and(|t| !t.is_cancelled()) {
                    page_warn!("timer {} already running; start ignored", timer_id);
                    continue;
                }
                let period = if interval < MIN_INTERVAL {
                    page_warn!(
                        "timer {} interval {:?} below minimum; using {:?}",
                        timer_id,
                        interval,
                        MIN_INTERVAL
                    );
                    MIN_INTERVAL
                } else {
                    interval
                };
                let token = CancellationToken::new();
                active.insert(timer_id, token.clone());
                page_debug!("timer {} started every {:?}", timer_id, period);
                runtime.spawn(run_timer(timer_id, period, token, sink.clone()));
            }
            TimerCommand::Cancel { timer_id } => match active.remove(&timer_id) {
                Some(token) => {
                    token.cancel();
                    page_debug!("timer {} cancelled", timer_id);
                }
                None => page_debug!("cancel for unknown timer {}", timer_id),
            },
            TimerCommand::Shutdown => break,
        }
    }

    for token in active.values() {
        token.cancel();
    }
    page_debug!("timer driver stopping with {} active timers", active.len());
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
}

async fn run_timer(
    timer_id: TimerId,
    period: Duration,
    token: CancellationToken,
    sink: Arc<dyn TickSink>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {
                if token.is_cancelled() {
                    break;
                }
                if !sink.emit(TimerEvent::Fired { timer_id }) {
                    page_trace!("timer {} sink closed", timer_id);
                    token.cancel();
                    break;
                }
            }
        }
    }
}
