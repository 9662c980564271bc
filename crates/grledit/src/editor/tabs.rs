//! Tab/panel visibility switch.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The three panels. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Grl,
    Context,
    Result,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Grl, Tab::Context, Tab::Result];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Grl => "GRL",
            Tab::Context => "Context",
            Tab::Result => "Result",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Grl => Tab::Context,
            Tab::Context => Tab::Result,
            Tab::Result => Tab::Grl,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Grl => Tab::Result,
            Tab::Context => Tab::Grl,
            Tab::Result => Tab::Context,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TabController {
    active: Tab,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn activate(&mut self, tab: Tab) {
        if self.active != tab {
            debug!(from = ?self.active, to = ?tab, "tab activated");
        }
        self.active = tab;
    }

    pub fn is_panel_visible(&self, tab: Tab) -> bool {
        self.active == tab
    }

    pub fn is_nav_marked(&self, tab: Tab) -> bool {
        self.active == tab
    }

    pub fn next(&mut self) {
        self.activate(self.active.next());
    }

    pub fn prev(&mut self) {
        self.activate(self.active.prev());
    }
}
