use grledit::Tab;

use super::app::App;
use super::components::action_bar::ActionHint;

fn ordered_hints(items: &[(&'static str, &'static str)]) -> Vec<ActionHint> {
    let mut hints = Vec::with_capacity(items.len());
    let mut priority: i16 = 100;
    for (key, label) in items {
        hints.push(ActionHint::new(*key, *label, priority.max(1) as u8));
        priority -= 5;
    }
    hints
}

fn grl_actions() -> Vec<ActionHint> {
    ordered_hints(&[
        ("Ctrl+R", "Submit"),
        ("Tab", "Indent"),
        ("Ctrl+A", "Select all"),
        ("F2", "Context"),
        ("F3", "Result"),
        ("Ctrl+Q", "Quit"),
    ])
}

fn context_actions(app: &App) -> Vec<ActionHint> {
    let mut hints = ordered_hints(&[
        ("Ctrl+R", "Submit"),
        ("Ctrl+N", "New block"),
        ("Ctrl+D", "Delete block"),
        ("Ctrl+Up/Down", "Select block"),
        ("Tab", "Indent"),
        ("Ctrl+A", "Select all"),
        ("F1", "GRL"),
        ("F3", "Result"),
        ("Ctrl+Q", "Quit"),
    ]);
    if app.session.selected_block().is_none() {
        hints.retain(|h| !matches!(h.key.as_ref(), "Ctrl+D" | "Ctrl+Up/Down" | "Tab" | "Ctrl+A"));
    }
    hints
}

fn result_actions() -> Vec<ActionHint> {
    ordered_hints(&[
        ("Ctrl+R", "Resubmit"),
        ("Up/Down", "Scroll"),
        ("F1", "GRL"),
        ("F2", "Context"),
        ("Ctrl+Q", "Quit"),
    ])
}

/// Footer hints for the active panel.
pub fn action_hints(app: &App) -> Vec<ActionHint> {
    let mut hints = match app.session.active_tab() {
        Tab::Grl => grl_actions(),
        Tab::Context => context_actions(app),
        Tab::Result => result_actions(),
    };
    if app.is_submitting() {
        for hint in hints.iter_mut().filter(|h| h.key == "Ctrl+R") {
            *hint = ActionHint::disabled("Ctrl+R", "Submitting", hint.priority);
        }
    }
    hints
}
