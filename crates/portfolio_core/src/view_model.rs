use serde::Serialize;

use crate::motion::{HeroTransform, Point};
use crate::{CounterId, MagneticButton};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PageViewModel {
    pub scroll_y: f64,
    pub navbar: NavbarView,
    pub hero: HeroTransform,
    pub counters: Vec<CounterView>,
    /// Buttons currently displaced from their rest position.
    pub magnetic: Vec<MagneticView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NavbarView {
    pub is_scrolled: bool,
    pub menu_open: bool,
    pub items: Vec<NavItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItemView {
    pub label: String,
    pub anchor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterView {
    pub counter_id: CounterId,
    pub label: String,
    /// `"{value}{suffix}"`
    pub text: String,
    pub value: u64,
    pub target: u64,
    pub running: bool,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagneticView {
    pub button: MagneticButton,
    pub offset: Point,
}
