use crate::counter::{Activation, CounterPhase, TickOutcome};
use crate::motion::{self, Point};
use crate::{ActivationPolicy, CounterId, Effect, Msg, PageState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PageState, msg: Msg) -> (PageState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageMounted => {
            if !state.mount() {
                return (state, Vec::new());
            }
            match state.settings().activation {
                ActivationPolicy::OnMount => {
                    let idle = state.idle_counter_ids();
                    activate_counters(&mut state, idle)
                }
                ActivationPolicy::OnVisible => {
                    let idle = state.idle_counter_ids_in_visible_regions();
                    activate_counters(&mut state, idle)
                }
            }
        }
        Msg::RegionVisibilityChanged { region, visible } => {
            state.set_region_visible(region, visible);
            // Activation is fire-once; hiding a region never stops or rewinds a counter.
            // Before mount the region is only remembered.
            if visible
                && state.is_mounted()
                && state.settings().activation == ActivationPolicy::OnVisible
            {
                let idle = state.idle_counter_ids_in(region);
                activate_counters(&mut state, idle)
            } else {
                Vec::new()
            }
        }
        Msg::CounterTick { counter_id } => match state.tick_counter(counter_id) {
            Some(TickOutcome::Completed) => vec![Effect::CancelTimer { counter_id }],
            Some(TickOutcome::Advanced | TickOutcome::Ignored) | None => Vec::new(),
        },
        Msg::CounterUnmounted { counter_id } => teardown(&mut state, counter_id)
            .into_iter()
            .collect(),
        Msg::PageUnmounted => {
            state.unmount();
            state
                .counter_ids()
                .into_iter()
                .filter_map(|counter_id| teardown(&mut state, counter_id))
                .collect()
        }
        Msg::Scrolled { y } => {
            state.set_scroll(y);
            Vec::new()
        }
        Msg::MenuToggled => {
            state.toggle_menu();
            Vec::new()
        }
        Msg::NavItemSelected(_) => {
            state.close_menu();
            Vec::new()
        }
        Msg::PointerMoved {
            button,
            pointer,
            bounds,
        } => {
            state.set_magnetic_offset(button, motion::magnetic_offset(pointer, bounds));
            Vec::new()
        }
        Msg::PointerLeft { button } => {
            state.set_magnetic_offset(button, Point::ORIGIN);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn activate_counters(state: &mut PageState, counter_ids: Vec<CounterId>) -> Vec<Effect> {
    counter_ids
        .into_iter()
        .filter_map(|counter_id| match state.activate_counter(counter_id)? {
            Activation::Started => Some(Effect::StartTimer {
                counter_id,
                interval: state.counter(counter_id)?.tick_interval(),
            }),
            Activation::CompletedImmediately | Activation::Ignored => None,
        })
        .collect()
}

/// Removes a counter; a running counter's timer is released here, never twice.
fn teardown(state: &mut PageState, counter_id: CounterId) -> Option<Effect> {
    match state.remove_counter(counter_id)? {
        CounterPhase::Running => Some(Effect::CancelTimer { counter_id }),
        CounterPhase::Idle | CounterPhase::Complete => None,
    }
}
