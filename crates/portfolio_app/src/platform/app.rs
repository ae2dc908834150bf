use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use page_logging::{page_info, page_warn, set_frame};
use portfolio_core::visibility::{AlwaysVisible, ViewportTracker, VisibilitySource};
use portfolio_core::{update, Effect, Msg, PageState, STATS_REGION};

use super::cli::Args;
use super::config::{PageConfig, VisibilityMode};
use super::effects::EffectRunner;
use super::snapshot::write_snapshot;
use super::ui;

pub fn run_app(args: Args) -> Result<()> {
    super::logging::initialize(args.log);

    let mut config = PageConfig::load_or_default(args.config.as_deref());
    if let Some(activation) = args.activation {
        config.activation = activation.into();
    }
    if let Some(scroll_to) = args.scroll_to {
        config.scroll_to = scroll_to;
    }
    page_info!(
        "Starting page: {} counters, activation {:?}, visibility {:?}",
        config.stats.len(),
        config.activation,
        config.visibility
    );

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let effects = EffectRunner::new(msg_tx).context("failed to start counter timers")?;
    let mut page = PageRunner::new(
        config.build_state(),
        effects,
        Duration::from_millis(config.render_interval_ms),
        io::stdout(),
    );
    let mut visibility = PageVisibility::from_config(&config, &page.state);
    page.mount(&mut visibility, config.scroll_to);

    let deadline = Instant::now() + Duration::from_millis(config.run_timeout_ms);
    page.run_until_settled(&msg_rx, deadline);
    page.flush_render();

    if let Some(path) = &args.snapshot {
        let written = write_snapshot(path, &page.state.view())
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        page_info!("Wrote snapshot to {:?}", written);
    }

    page.dispatch(Msg::PageUnmounted);
    page.shutdown();
    Ok(())
}

/// Why the dispatch loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunExit {
    AllComplete,
    /// Some counters are still idle and nothing will wake them.
    NothingRunning,
    TimedOut,
    Disconnected,
}

enum PageVisibility {
    Viewport(ViewportTracker),
    Always(AlwaysVisible),
}

impl PageVisibility {
    fn from_config(config: &PageConfig, state: &PageState) -> Self {
        match config.visibility {
            VisibilityMode::Viewport => {
                let mut tracker = ViewportTracker::new(config.viewport_height);
                tracker.track(STATS_REGION, config.stats_bounds());
                Self::Viewport(tracker)
            }
            VisibilityMode::Always => Self::Always(AlwaysVisible::new(state.regions())),
        }
    }

    fn scroll_to(&mut self, y: f64) {
        if let Self::Viewport(tracker) = self {
            tracker.set_scroll(y);
        }
    }

    fn source(&mut self) -> &mut dyn VisibilitySource {
        match self {
            Self::Viewport(tracker) => tracker,
            Self::Always(always) => always,
        }
    }
}

/// Owns the page state on the dispatch thread and renders frames to `out`
/// when it changes.
struct PageRunner<W: Write> {
    state: PageState,
    effects: EffectRunner,
    out: W,
    frame: u64,
    render_interval: Duration,
    last_render: Option<Instant>,
    render_pending: bool,
}

impl<W: Write> PageRunner<W> {
    fn new(state: PageState, effects: EffectRunner, render_interval: Duration, out: W) -> Self {
        Self {
            state,
            effects,
            out,
            frame: 0,
            render_interval,
            last_render: None,
            render_pending: false,
        }
    }

    /// Mounts the page, applies the initial scroll and forwards whatever the
    /// viewport reports as visible.
    fn mount(&mut self, visibility: &mut PageVisibility, scroll_to: f64) {
        self.dispatch(Msg::PageMounted);
        visibility.scroll_to(scroll_to);
        self.dispatch(Msg::Scrolled { y: scroll_to });
        self.forward_visibility(visibility.source());
    }

    /// Applies `msg` and hands its effects to the timer driver. Returns the
    /// effects so callers can see what was requested.
    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        self.frame += 1;
        set_frame(self.frame);

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.render_pending = true;
        }
        self.state = state;
        self.effects.enqueue(effects.clone());

        let due = self
            .last_render
            .map_or(true, |at| at.elapsed() >= self.render_interval);
        if due {
            self.flush_render();
        }
        effects
    }

    fn forward_visibility(&mut self, source: &mut dyn VisibilitySource) {
        for change in source.poll_changes() {
            self.dispatch(Msg::RegionVisibilityChanged {
                region: change.region,
                visible: change.visible,
            });
        }
    }

    /// Dispatches timer ticks until every counter settles, nothing is left
    /// running, or `deadline` passes.
    fn run_until_settled(&mut self, msg_rx: &mpsc::Receiver<Msg>, deadline: Instant) -> RunExit {
        loop {
            if self.state.all_counters_complete() {
                page_info!("All counters settled");
                return RunExit::AllComplete;
            }
            if self.state.running_counter_ids().is_empty() {
                page_info!("No counter is running; stats region never became visible");
                return RunExit::NothingRunning;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            let received = if remaining.is_zero() {
                Err(RecvTimeoutError::Timeout)
            } else {
                msg_rx.recv_timeout(remaining)
            };
            match received {
                Ok(msg) => {
                    self.dispatch(msg);
                }
                Err(RecvTimeoutError::Timeout) => {
                    page_warn!(
                        "Run deadline reached with {} counters still running",
                        self.state.running_counter_ids().len()
                    );
                    return RunExit::TimedOut;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    page_warn!("Timer channel closed unexpectedly");
                    return RunExit::Disconnected;
                }
            }
        }
    }

    fn flush_render(&mut self) {
        if !self.render_pending {
            return;
        }
        self.render_pending = false;
        self.last_render = Some(Instant::now());

        for line in ui::render::render(&self.state.view()) {
            if writeln!(self.out, "{line}").is_err() {
                return;
            }
        }
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }

    fn shutdown(self) {
        self.effects.shutdown();
    }
}
