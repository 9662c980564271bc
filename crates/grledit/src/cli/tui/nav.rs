use crossterm::event::KeyCode;
use grledit::Tab;

#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub key: &'static str,
    pub code: KeyCode,
    pub description: &'static str,
    pub tab: Tab,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        key: "F1",
        code: KeyCode::F(1),
        description: "Rule text",
        tab: Tab::Grl,
    },
    NavItem {
        key: "F2",
        code: KeyCode::F(2),
        description: "Context documents",
        tab: Tab::Context,
    },
    NavItem {
        key: "F3",
        code: KeyCode::F(3),
        description: "Last evaluation result",
        tab: Tab::Result,
    },
];

pub fn nav_index_for_tab(tab: Tab) -> Option<usize> {
    NAV_ITEMS.iter().position(|item| item.tab == tab)
}

pub fn nav_tab_for_key(code: KeyCode) -> Option<Tab> {
    NAV_ITEMS.iter().find(|item| item.code == code).map(|item| item.tab)
}
