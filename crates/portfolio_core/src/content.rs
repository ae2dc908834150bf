//! Static page content that the runtime needs to know about.

use serde::Serialize;

use crate::RegionId;

/// Region hosting the experience stats grid.
pub const STATS_REGION: RegionId = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NavItem {
    Home,
    Projects,
    Skills,
    Experience,
    Contact,
}

impl NavItem {
    pub const ALL: [NavItem; 5] = [
        NavItem::Home,
        NavItem::Projects,
        NavItem::Skills,
        NavItem::Experience,
        NavItem::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavItem::Home => "Home",
            NavItem::Projects => "Projects",
            NavItem::Skills => "Skills",
            NavItem::Experience => "Experience",
            NavItem::Contact => "Contact",
        }
    }

    /// In-page anchor, e.g. `#projects`.
    pub fn anchor(self) -> String {
        format!("#{}", self.label().to_lowercase())
    }
}

/// Buttons that drift toward the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MagneticButton {
    ExploreWork,
    DownloadResume,
    SendEmail,
    ScheduleCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: i64,
    pub suffix: &'static str,
}

pub const STATS: [Stat; 4] = [
    Stat {
        label: "Years Experience",
        value: 3,
        suffix: "+",
    },
    Stat {
        label: "Projects Delivered",
        value: 50,
        suffix: "+",
    },
    Stat {
        label: "Happy Clients",
        value: 30,
        suffix: "+",
    },
    Stat {
        label: "Coffee Consumed",
        value: 1000,
        suffix: "+",
    },
];
