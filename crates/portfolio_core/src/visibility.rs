//! Visibility notifications for page regions.
//!
//! Counters never look at scroll positions themselves. The shell owns a
//! [`VisibilitySource`], drains its changes and forwards them as
//! [`crate::Msg::RegionVisibilityChanged`].

use std::collections::BTreeMap;

use crate::RegionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub region: RegionId,
    pub visible: bool,
}

/// A source of visibility-change notifications for page regions.
pub trait VisibilitySource {
    /// Returns the changes observed since the previous call, in order.
    fn poll_changes(&mut self) -> Vec<VisibilityChange>;
}

/// Reports every registered region as visible exactly once.
#[derive(Debug, Default)]
pub struct AlwaysVisible {
    pending: Vec<RegionId>,
}

impl AlwaysVisible {
    pub fn new(regions: impl IntoIterator<Item = RegionId>) -> Self {
        Self {
            pending: regions.into_iter().collect(),
        }
    }
}

impl VisibilitySource for AlwaysVisible {
    fn poll_changes(&mut self) -> Vec<VisibilityChange> {
        self.pending
            .drain(..)
            .map(|region| VisibilityChange {
                region,
                visible: true,
            })
            .collect()
    }
}

/// Vertical band of the page, in document pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBounds {
    pub top: f64,
    pub height: f64,
}

impl RegionBounds {
    fn intersects(&self, view_top: f64, view_height: f64) -> bool {
        let view_bottom = view_top + view_height;
        let bottom = self.top + self.height;
        self.top < view_bottom && bottom > view_top
    }
}

#[derive(Debug, Clone, Copy)]
struct TrackedRegion {
    bounds: RegionBounds,
    visible: bool,
}

/// Derives region visibility from the scroll position and viewport height.
///
/// A change is queued only when a region's visibility flips.
#[derive(Debug)]
pub struct ViewportTracker {
    scroll_y: f64,
    viewport_height: f64,
    regions: BTreeMap<RegionId, TrackedRegion>,
    pending: Vec<VisibilityChange>,
}

impl ViewportTracker {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height: viewport_height.max(0.0),
            regions: BTreeMap::new(),
            pending: Vec::new(),
        }
    }

    /// Registers a region, or moves one already tracked, and evaluates it
    /// against the current viewport. A moved region keeps its last reported
    /// visibility.
    pub fn track(&mut self, region: RegionId, bounds: RegionBounds) {
        self.regions
            .entry(region)
            .and_modify(|tracked| tracked.bounds = bounds)
            .or_insert(TrackedRegion {
                bounds,
                visible: false,
            });
        self.recompute();
    }

    pub fn set_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.max(0.0);
        self.recompute();
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        self.recompute();
    }

    pub fn is_visible(&self, region: RegionId) -> bool {
        self.regions
            .get(&region)
            .map(|tracked| tracked.visible)
            .unwrap_or(false)
    }

    fn recompute(&mut self) {
        for (&region, tracked) in self.regions.iter_mut() {
            let visible = tracked
                .bounds
                .intersects(self.scroll_y, self.viewport_height);
            if visible != tracked.visible {
                tracked.visible = visible;
                self.pending.push(VisibilityChange { region, visible });
            }
        }
    }
}

impl VisibilitySource for ViewportTracker {
    fn poll_changes(&mut self) -> Vec<VisibilityChange> {
        std::mem::take(&mut self.pending)
    }
}
