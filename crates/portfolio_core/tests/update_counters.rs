use std::collections::HashMap;
use std::sync::Once;
use std::time::Duration;

use portfolio_core::{
    update, ActivationPolicy, CounterId, CounterSpec, Effect, Msg, PageSettings, PageState,
    STATS_REGION,
};

const TICK: Duration = Duration::from_millis(16);
const OTHER_REGION: u32 = 99;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(page_logging::initialize_for_tests);
}

fn settings(activation: ActivationPolicy) -> PageSettings {
    PageSettings {
        tick_interval: TICK,
        activation,
        ..PageSettings::default()
    }
}

fn stats_page(activation: ActivationPolicy) -> PageState {
    let (state, _) = update(
        PageState::with_page_stats(settings(activation), 2000),
        Msg::PageMounted,
    );
    state
}

fn started_ids(effects: &[Effect]) -> Vec<CounterId> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::StartTimer { counter_id, .. } => Some(*counter_id),
            Effect::CancelTimer { .. } => None,
        })
        .collect()
}

/// Ticks `counter_id` until it emits its cancel effect; returns the tick count.
fn tick_until_cancel(mut state: PageState, counter_id: CounterId) -> (PageState, usize) {
    for ticks in 1..=10_000 {
        let (next, effects) = update(state, Msg::CounterTick { counter_id });
        state = next;
        if !effects.is_empty() {
            assert_eq!(effects, vec![Effect::CancelTimer { counter_id }]);
            return (state, ticks);
        }
    }
    panic!("counter {counter_id} never completed");
}

#[test]
fn visible_stats_region_starts_every_stat_counter() {
    init_logging();
    let state = stats_page(ActivationPolicy::OnVisible);
    assert!(state.running_counter_ids().is_empty());

    let (state, effects) = update(
        state,
        Msg::RegionVisibilityChanged {
            region: STATS_REGION,
            visible: true,
        },
    );

    assert_eq!(
        effects,
        vec![
            Effect::StartTimer {
                counter_id: 1,
                interval: TICK
            },
            Effect::StartTimer {
                counter_id: 2,
                interval: TICK
            },
            Effect::StartTimer {
                counter_id: 3,
                interval: TICK
            },
            Effect::StartTimer {
                counter_id: 4,
                interval: TICK
            },
        ]
    );
    assert_eq!(state.running_counter_ids(), vec![1, 2, 3, 4]);
}

#[test]
fn activation_fires_only_once_per_counter() {
    init_logging();
    let state = stats_page(ActivationPolicy::OnVisible);
    let visible = Msg::RegionVisibilityChanged {
        region: STATS_REGION,
        visible: true,
    };
    let hidden = Msg::RegionVisibilityChanged {
        region: STATS_REGION,
        visible: false,
    };

    let (state, first) = update(state, visible.clone());
    assert_eq!(started_ids(&first).len(), 4);

    let (state, _) = update(state, Msg::CounterTick { counter_id: 2 });
    let before = state.view().counters;

    let (state, effects) = update(state, hidden);
    assert!(effects.is_empty());
    let (state, effects) = update(state, visible);
    assert!(effects.is_empty());
    assert_eq!(state.view().counters, before);
}

#[test]
fn unrelated_region_does_not_activate() {
    init_logging();
    let state = stats_page(ActivationPolicy::OnVisible);
    let (state, effects) = update(
        state,
        Msg::RegionVisibilityChanged {
            region: OTHER_REGION,
            visible: true,
        },
    );
    assert!(effects.is_empty());
    assert!(state.running_counter_ids().is_empty());
}

#[test]
fn visibility_before_mount_starts_nothing() {
    init_logging();
    let state = PageState::with_page_stats(settings(ActivationPolicy::OnVisible), 2000);
    let (state, effects) = update(
        state,
        Msg::RegionVisibilityChanged {
            region: STATS_REGION,
            visible: true,
        },
    );
    assert!(!state.is_mounted());
    assert!(effects.is_empty());
    assert!(state.running_counter_ids().is_empty());

    let (_state, effects) = update(state, Msg::PageUnmounted);
    assert!(effects.is_empty());
}

#[test]
fn region_visible_before_mount_starts_on_mount() {
    init_logging();
    let state = PageState::with_page_stats(settings(ActivationPolicy::OnVisible), 2000);
    let (state, _) = update(
        state,
        Msg::RegionVisibilityChanged {
            region: STATS_REGION,
            visible: true,
        },
    );
    let (state, effects) = update(state, Msg::PageMounted);
    assert_eq!(started_ids(&effects), vec![1, 2, 3, 4]);

    let (_state, effects) = update(
        state,
        Msg::RegionVisibilityChanged {
            region: STATS_REGION,
            visible: true,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn region_hidden_again_before_mount_stays_idle() {
    init_logging();
    let mut state = PageState::with_page_stats(settings(ActivationPolicy::OnVisible), 2000);
    for visible in [true, false] {
        let (next, _) = update(
            state,
            Msg::RegionVisibilityChanged {
                region: STATS_REGION,
                visible,
            },
        );
        state = next;
    }
    let (state, effects) = update(state, Msg::PageMounted);
    assert!(effects.is_empty());
    assert!(state.running_counter_ids().is_empty());
}

#[test]
fn on_mount_policy_starts_on_mount_and_ignores_visibility() {
    init_logging();
    let state = PageState::with_page_stats(settings(ActivationPolicy::OnMount), 2000);

    let (state, effects) = update(state, Msg::PageMounted);
    assert_eq!(started_ids(&effects), vec![1, 2, 3, 4]);

    let (state, effects) = update(state, Msg::PageMounted);
    assert!(effects.is_empty());

    let (_state, effects) = update(
        state,
        Msg::RegionVisibilityChanged {
            region: STATS_REGION,
            visible: true,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn completion_releases_the_timer_once() {
    init_logging();
    let mut state = PageState::new(settings(ActivationPolicy::OnMount));
    let counter_id = state.add_counter(
        "Projects Delivered",
        STATS_REGION,
        CounterSpec::new(50, 2000, "+"),
    );
    let (state, effects) = update(state, Msg::PageMounted);
    assert_eq!(started_ids(&effects), vec![counter_id]);

    let (mut state, ticks) = tick_until_cancel(state, counter_id);
    assert!((125..=126).contains(&ticks));
    assert!(state.all_counters_complete());
    assert_eq!(state.view().counters[0].text, "50+");
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::CounterTick { counter_id });
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());

    let (_state, effects) = update(state, Msg::CounterUnmounted { counter_id });
    assert!(effects.is_empty());
}

#[test]
fn unmounting_a_running_counter_cancels_its_timer() {
    init_logging();
    let state = stats_page(ActivationPolicy::OnMount);
    let (state, _) = update(state, Msg::CounterTick { counter_id: 4 });

    let (state, effects) = update(state, Msg::CounterUnmounted { counter_id: 4 });
    assert_eq!(effects, vec![Effect::CancelTimer { counter_id: 4 }]);
    assert!(state.counter(4).is_none());

    let (mut state, effects) = update(state, Msg::CounterUnmounted { counter_id: 4 });
    assert!(effects.is_empty());
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::CounterTick { counter_id: 4 });
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn unmounting_an_idle_counter_needs_no_cancel() {
    init_logging();
    let state = stats_page(ActivationPolicy::OnVisible);
    let (state, effects) = update(state, Msg::CounterUnmounted { counter_id: 1 });
    assert!(effects.is_empty());
    assert_eq!(state.counter_ids(), vec![2, 3, 4]);
}

#[test]
fn page_unmount_cancels_only_running_counters() {
    init_logging();
    let mut state = PageState::new(settings(ActivationPolicy::OnMount));
    let quick = state.add_counter("quick", STATS_REGION, CounterSpec::new(1, 16, ""));
    let slow = state.add_counter("slow", STATS_REGION, CounterSpec::new(1000, 60_000, ""));
    let instant = state.add_counter("instant", STATS_REGION, CounterSpec::new(9, 0, ""));

    let (state, effects) = update(state, Msg::PageMounted);
    assert_eq!(started_ids(&effects), vec![quick, slow]);
    assert_eq!(state.counter(instant).map(|c| c.value()), Some(9));

    let (state, effects) = update(state, Msg::CounterTick { counter_id: quick });
    assert_eq!(effects, vec![Effect::CancelTimer { counter_id: quick }]);

    let (state, effects) = update(state, Msg::PageUnmounted);
    assert_eq!(effects, vec![Effect::CancelTimer { counter_id: slow }]);
    assert!(state.counter_ids().is_empty());
    assert!(!state.is_mounted());
}

#[test]
fn every_timer_is_started_and_released_at_most_once() {
    init_logging();
    let mut state = stats_page(ActivationPolicy::OnVisible);
    let mut log = Vec::new();

    let script = [
        Msg::RegionVisibilityChanged {
            region: STATS_REGION,
            visible: true,
        },
        Msg::CounterTick { counter_id: 1 },
        Msg::CounterUnmounted { counter_id: 2 },
        Msg::RegionVisibilityChanged {
            region: STATS_REGION,
            visible: true,
        },
        Msg::CounterTick { counter_id: 2 },
        Msg::CounterUnmounted { counter_id: 2 },
    ];
    for msg in script {
        let (next, effects) = update(state, msg);
        state = next;
        log.extend(effects);
    }
    let (state, ticks) = tick_until_cancel(state, 1);
    assert!(ticks > 0);
    log.push(Effect::CancelTimer { counter_id: 1 });
    let (_state, effects) = update(state, Msg::PageUnmounted);
    log.extend(effects);

    let mut starts: HashMap<CounterId, usize> = HashMap::new();
    let mut cancels: HashMap<CounterId, usize> = HashMap::new();
    for effect in &log {
        match effect {
            Effect::StartTimer { counter_id, .. } => *starts.entry(*counter_id).or_default() += 1,
            Effect::CancelTimer { counter_id } => {
                assert!(starts.contains_key(counter_id), "cancel before start");
                *cancels.entry(*counter_id).or_default() += 1;
            }
        }
    }
    for id in 1..=4 {
        assert_eq!(starts.get(&id), Some(&1), "starts for {id}");
        assert_eq!(cancels.get(&id), Some(&1), "cancels for {id}");
    }
}

#[test]
fn counter_view_reports_progress_text() {
    init_logging();
    let state = stats_page(ActivationPolicy::OnMount);
    let (state, _) = update(state, Msg::CounterTick { counter_id: 4 });

    let view = state.view();
    let coffee = view
        .counters
        .iter()
        .find(|c| c.label == "Coffee Consumed")
        .unwrap();
    assert_eq!(coffee.value, 8);
    assert_eq!(coffee.text, "8+");
    assert_eq!(coffee.target, 1000);
    assert!(coffee.running);
    assert!(!coffee.complete);
}
