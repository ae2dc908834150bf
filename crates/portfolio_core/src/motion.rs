//! Scroll- and pointer-driven display values.

use serde::Serialize;

/// Scroll offset past which the navbar switches to its solid style.
pub const NAV_SCROLL_THRESHOLD: f64 = 50.0;

/// Fraction of the pointer's distance from a button's centre that the button follows.
pub const MAGNETIC_STRENGTH: f64 = 0.3;

const HERO_OFFSET_INPUT: (f64, f64) = (0.0, 500.0);
const HERO_OFFSET_OUTPUT: (f64, f64) = (0.0, 150.0);
const HERO_FADE_INPUT: (f64, f64) = (0.0, 300.0);
const HERO_FADE_OUTPUT: (f64, f64) = (1.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Client-space bounding box of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Linear mapping of `input` from one range onto another, clamped to the output range.
pub fn interpolate(input: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let (in0, in1) = from;
    let (out0, out1) = to;
    let span = in1 - in0;
    if span == 0.0 || input.is_nan() {
        return out0;
    }
    let progress = ((input - in0) / span).clamp(0.0, 1.0);
    out0 + (out1 - out0) * progress
}

/// Parallax offset and fade of the hero block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeroTransform {
    pub offset_y: f64,
    pub opacity: f64,
}

impl Default for HeroTransform {
    fn default() -> Self {
        Self::at_scroll(0.0)
    }
}

impl HeroTransform {
    pub fn at_scroll(scroll_y: f64) -> Self {
        Self {
            offset_y: interpolate(scroll_y, HERO_OFFSET_INPUT, HERO_OFFSET_OUTPUT),
            opacity: interpolate(scroll_y, HERO_FADE_INPUT, HERO_FADE_OUTPUT),
        }
    }
}

pub fn magnetic_offset(pointer: Point, bounds: Rect) -> Point {
    let center = bounds.center();
    Point::new(
        (pointer.x - center.x) * MAGNETIC_STRENGTH,
        (pointer.y - center.y) * MAGNETIC_STRENGTH,
    )
}

pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}
