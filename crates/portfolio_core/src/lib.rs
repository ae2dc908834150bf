//! Portfolio core: pure page state machine, animated counters and view-model helpers.
mod content;
mod counter;
mod effect;
pub mod motion;
mod msg;
mod state;
mod update;
mod view_model;
pub mod visibility;

pub use content::{MagneticButton, NavItem, Stat, STATS, STATS_REGION};
pub use counter::{
    Activation, Counter, CounterPhase, CounterSpec, CounterState, TickOutcome,
    DEFAULT_DURATION_MS, DEFAULT_TICK_INTERVAL,
};
pub use effect::Effect;
pub use msg::Msg;
pub use state::{ActivationPolicy, CounterId, PageSettings, PageState, RegionId};
pub use update::update;
pub use view_model::{CounterView, MagneticView, NavItemView, NavbarView, PageViewModel};
