use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::counter::{Activation, Counter, CounterPhase, CounterSpec, TickOutcome};
use crate::motion::{self, HeroTransform, Point};
use crate::view_model::{CounterView, MagneticView, NavItemView, NavbarView, PageViewModel};
use crate::{content, MagneticButton, NavItem, DEFAULT_TICK_INTERVAL};

pub type CounterId = u64;
pub type RegionId = u32;

/// When idle counters start animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationPolicy {
    /// Every counter starts as soon as the page mounts.
    OnMount,
    /// A counter starts the first time its host region becomes visible.
    #[default]
    OnVisible,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub tick_interval: Duration,
    pub activation: ActivationPolicy,
    pub nav_scroll_threshold: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            activation: ActivationPolicy::default(),
            nav_scroll_threshold: motion::NAV_SCROLL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CounterSlot {
    label: String,
    region: RegionId,
    counter: Counter,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageState {
    settings: PageSettings,
    counters: BTreeMap<CounterId, CounterSlot>,
    next_counter_id: CounterId,
    mounted: bool,
    /// Regions last reported visible; survives until the page mounts.
    visible_regions: BTreeSet<RegionId>,
    scroll_y: f64,
    menu_open: bool,
    magnetic: BTreeMap<MagneticButton, Point>,
    dirty: bool,
}

impl PageState {
    pub fn new(settings: PageSettings) -> Self {
        Self {
            settings,
            next_counter_id: 1,
            ..Self::default()
        }
    }

    /// Page state with the built-in experience stats hosted in [`content::STATS_REGION`].
    pub fn with_page_stats(settings: PageSettings, duration_ms: i64) -> Self {
        let mut state = Self::new(settings);
        for stat in content::STATS {
            state.add_counter(
                stat.label,
                content::STATS_REGION,
                CounterSpec::new(stat.value, duration_ms, stat.suffix),
            );
        }
        state
    }

    /// Registers an idle counter hosted in `region`.
    pub fn add_counter(
        &mut self,
        label: impl Into<String>,
        region: RegionId,
        spec: CounterSpec,
    ) -> CounterId {
        let counter_id = self.next_counter_id.max(1);
        self.next_counter_id = counter_id + 1;
        self.counters.insert(
            counter_id,
            CounterSlot {
                label: label.into(),
                region,
                counter: Counter::new(spec, self.settings.tick_interval),
            },
        );
        self.dirty = true;
        counter_id
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn counter(&self, counter_id: CounterId) -> Option<&Counter> {
        self.counters.get(&counter_id).map(|slot| &slot.counter)
    }

    pub fn counter_ids(&self) -> Vec<CounterId> {
        self.counters.keys().copied().collect()
    }

    /// Regions hosting at least one counter.
    pub fn regions(&self) -> BTreeSet<RegionId> {
        self.counters.values().map(|slot| slot.region).collect()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True when no counter is idle or running.
    pub fn all_counters_complete(&self) -> bool {
        self.counters
            .values()
            .all(|slot| slot.counter.is_complete())
    }

    pub fn running_counter_ids(&self) -> Vec<CounterId> {
        self.ids_where(|slot| slot.counter.phase() == CounterPhase::Running)
    }

    pub fn view(&self) -> PageViewModel {
        let navbar = NavbarView {
            is_scrolled: motion::is_scrolled(self.scroll_y, self.settings.nav_scroll_threshold),
            menu_open: self.menu_open,
            items: NavItem::ALL
                .iter()
                .map(|item| NavItemView {
                    label: item.label().to_string(),
                    anchor: item.anchor(),
                })
                .collect(),
        };

        let counters = self
            .counters
            .iter()
            .map(|(&counter_id, slot)| CounterView {
                counter_id,
                label: slot.label.clone(),
                text: slot.counter.display(),
                value: slot.counter.value(),
                target: slot.counter.spec().target(),
                running: slot.counter.phase() == CounterPhase::Running,
                complete: slot.counter.is_complete(),
            })
            .collect();

        let magnetic = self
            .magnetic
            .iter()
            .map(|(&button, &offset)| MagneticView { button, offset })
            .collect();

        PageViewModel {
            scroll_y: self.scroll_y,
            navbar,
            hero: HeroTransform::at_scroll(self.scroll_y),
            counters,
            magnetic,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.dirty = true;
        true
    }

    pub(crate) fn unmount(&mut self) {
        if self.mounted {
            self.mounted = false;
            self.dirty = true;
        }
    }

    pub(crate) fn idle_counter_ids(&self) -> Vec<CounterId> {
        self.ids_where(|slot| slot.counter.phase() == CounterPhase::Idle)
    }

    pub(crate) fn idle_counter_ids_in(&self, region: RegionId) -> Vec<CounterId> {
        self.ids_where(|slot| slot.region == region && slot.counter.phase() == CounterPhase::Idle)
    }

    pub(crate) fn idle_counter_ids_in_visible_regions(&self) -> Vec<CounterId> {
        self.ids_where(|slot| {
            self.visible_regions.contains(&slot.region) && slot.counter.phase() == CounterPhase::Idle
        })
    }

    pub(crate) fn set_region_visible(&mut self, region: RegionId, visible: bool) {
        if visible {
            self.visible_regions.insert(region);
        } else {
            self.visible_regions.remove(&region);
        }
    }

    pub(crate) fn activate_counter(&mut self, counter_id: CounterId) -> Option<Activation> {
        let slot = self.counters.get_mut(&counter_id)?;
        let activation = slot.counter.activate();
        if activation != Activation::Ignored {
            self.dirty = true;
        }
        Some(activation)
    }

    pub(crate) fn tick_counter(&mut self, counter_id: CounterId) -> Option<TickOutcome> {
        let slot = self.counters.get_mut(&counter_id)?;
        let before = slot.counter.value();
        let outcome = slot.counter.tick();
        if outcome == TickOutcome::Completed || slot.counter.value() != before {
            self.dirty = true;
        }
        Some(outcome)
    }

    /// Drops a counter, returning the phase it was in.
    pub(crate) fn remove_counter(&mut self, counter_id: CounterId) -> Option<CounterPhase> {
        let slot = self.counters.remove(&counter_id)?;
        self.dirty = true;
        Some(slot.counter.phase())
    }

    pub(crate) fn set_scroll(&mut self, scroll_y: f64) {
        let scroll_y = scroll_y.max(0.0);
        if scroll_y != self.scroll_y {
            self.scroll_y = scroll_y;
            self.dirty = true;
        }
    }

    pub(crate) fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.dirty = true;
    }

    pub(crate) fn close_menu(&mut self) {
        if self.menu_open {
            self.menu_open = false;
            self.dirty = true;
        }
    }

    pub(crate) fn set_magnetic_offset(&mut self, button: MagneticButton, offset: Point) {
        if offset == Point::ORIGIN {
            if self.magnetic.remove(&button).is_some() {
                self.dirty = true;
            }
            return;
        }
        if self.magnetic.insert(button, offset) != Some(offset) {
            self.dirty = true;
        }
    }

    fn ids_where(&self, predicate: impl Fn(&CounterSlot) -> bool) -> Vec<CounterId> {
        self.counters
            .iter()
            .filter(|(_, slot)| predicate(slot))
            .map(|(&counter_id, _)| counter_id)
            .collect()
    }
}
