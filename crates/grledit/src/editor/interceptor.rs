//! Structural-key interception.
//!
//! Tab would normally move focus off the surface. Inside an editing surface
//! it is swallowed and replaced by a literal whitespace token instead.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use grledit_protocol::TAB_TOKEN;

use super::surface::TextSurface;

/// What the interceptor did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// Key consumed, token inserted.
    Inserted,
    /// Key consumed, nothing inserted (the surface has no caret).
    Suppressed,
    /// Not a structural key; the host should handle it.
    Passthrough,
}

impl Interception {
    pub fn consumed(self) -> bool {
        !matches!(self, Interception::Passthrough)
    }
}

#[derive(Debug, Clone)]
pub struct StructuralKeyInterceptor {
    token: &'static str,
}

impl Default for StructuralKeyInterceptor {
    fn default() -> Self {
        Self { token: TAB_TOKEN }
    }
}

impl StructuralKeyInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab press (BackTab stays with the host for panel navigation).
    pub fn is_structural(key: &KeyEvent) -> bool {
        key.code == KeyCode::Tab && key.kind != KeyEventKind::Release
    }

    pub fn intercept(&self, surface: &mut TextSurface, key: &KeyEvent) -> Interception {
        if !Self::is_structural(key) {
            return Interception::Passthrough;
        }
        self.insert_token(surface)
    }

    /// Insert the token at the caret and collapse the caret after it.
    pub fn insert_token(&self, surface: &mut TextSurface) -> Interception {
        if surface.insert_before_selection(self.token) {
            Interception::Inserted
        } else {
            Interception::Suppressed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::surface::Selection;
    use crossterm::event::KeyModifiers;

    fn tab() -> KeyEvent {
        KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)
    }

    #[test]
    fn test_tab_inserts_token_at_caret() {
        let mut surface = TextSurface::from_text("whenthen");
        surface.set_caret(4);
        let outcome = StructuralKeyInterceptor::new().intercept(&mut surface, &tab());

        assert_eq!(outcome, Interception::Inserted);
        assert_eq!(surface.text(), "when\u{a0}\u{a0}\u{a0}\u{a0}then");
        assert_eq!(surface.selection(), Some(Selection::caret(4 + TAB_TOKEN.len())));
    }

    #[test]
    fn test_tab_without_caret_is_silent_noop() {
        let mut surface = TextSurface::from_text("untouched");
        let outcome = StructuralKeyInterceptor::new().intercept(&mut surface, &tab());

        assert_eq!(outcome, Interception::Suppressed);
        assert!(outcome.consumed());
        assert_eq!(surface.text(), "untouched");
        assert_eq!(surface.caret(), None);
    }

    #[test]
    fn test_selected_text_is_preserved() {
        let mut surface = TextSurface::from_text("keep me");
        surface.select(0, 4);
        StructuralKeyInterceptor::new().intercept(&mut surface, &tab());

        assert_eq!(surface.text(), format!("{}keep me", TAB_TOKEN));
        assert_eq!(surface.caret(), Some(TAB_TOKEN.len()));
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut surface = TextSurface::from_text("x");
        surface.focus();
        let interceptor = StructuralKeyInterceptor::new();
        for key in [
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            KeyEvent::new(KeyCode::Char('\t'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
        ] {
            assert_eq!(interceptor.intercept(&mut surface, &key), Interception::Passthrough);
        }
        assert_eq!(surface.text(), "x");
    }

    #[test]
    fn test_repeated_tabs_accumulate() {
        let mut surface = TextSurface::new();
        surface.focus();
        let interceptor = StructuralKeyInterceptor::new();
        interceptor.intercept(&mut surface, &tab());
        interceptor.intercept(&mut surface, &tab());
        assert_eq!(surface.text().chars().count(), 8);
        assert_eq!(surface.caret(), Some(surface.len()));
    }
}
