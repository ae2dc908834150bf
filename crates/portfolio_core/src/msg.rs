use crate::motion::{Point, Rect};
use crate::{MagneticButton, NavItem};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Page finished mounting.
    PageMounted,
    /// Page is being torn down; every counter goes with it.
    PageUnmounted,
    /// A single counter's host element was removed.
    CounterUnmounted { counter_id: crate::CounterId },
    /// Visibility notification forwarded from a `VisibilitySource`.
    RegionVisibilityChanged {
        region: crate::RegionId,
        visible: bool,
    },
    /// Timer fired for a counter.
    CounterTick { counter_id: crate::CounterId },
    /// Window scroll offset changed.
    Scrolled { y: f64 },
    /// User pressed the mobile menu button.
    MenuToggled,
    /// User picked a navigation entry.
    NavItemSelected(NavItem),
    /// Pointer moved over a magnetic button.
    PointerMoved {
        button: MagneticButton,
        pointer: Point,
        bounds: Rect,
    },
    /// Pointer left a magnetic button.
    PointerLeft { button: MagneticButton },
    /// Fallback for placeholder wiring.
    NoOp,
}
