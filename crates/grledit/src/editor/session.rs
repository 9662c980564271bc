//! Editor session: every surface plus the tab state.
//!
//! Key routing goes through [`EditorSession::focused_surface_mut`], so the
//! structural-key interceptor applies to whichever surface is focused,
//! including blocks created after startup.

use crossterm::event::KeyEvent;
use grledit_protocol::{EvaluationOutcome, EvaluationRequest};

use super::blocks::{BlockPlacement, ContextBlock, ContextCollection};
use super::highlight::{Highlighter, MatchSpan};
use super::interceptor::{Interception, StructuralKeyInterceptor};
use super::surface::TextSurface;
use super::tabs::{Tab, TabController};

/// Which surface receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Rule,
    Block(usize),
    /// Result panel, or Context panel with no blocks.
    None,
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    pub rule: TextSurface,
    pub contexts: ContextCollection,
    /// Read-only display of the last submission.
    pub result: TextSurface,
    pub tabs: TabController,
    selected_block: Option<usize>,
    interceptor: StructuralKeyInterceptor,
    highlighter: Highlighter,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(BlockPlacement::default())
    }
}

impl EditorSession {
    pub fn new(placement: BlockPlacement) -> Self {
        Self::with_contents(String::new(), Vec::<String>::new(), placement)
    }

    /// Session preloaded with rule text and context blocks (in order).
    pub fn with_contents<I, S>(rule: impl Into<String>, contexts: I, placement: BlockPlacement) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rule = TextSurface::from_text(rule);
        rule.focus();
        let contexts = ContextCollection::with_texts(placement, contexts);
        let selected_block = if contexts.is_empty() { None } else { Some(0) };
        let mut session = Self {
            rule,
            contexts,
            result: TextSurface::new(),
            tabs: TabController::new(),
            selected_block,
            interceptor: StructuralKeyInterceptor::new(),
            highlighter: Highlighter::grl(),
        };
        session.focus_selected_block();
        session
    }

    pub fn active_tab(&self) -> Tab {
        self.tabs.active()
    }

    pub fn activate(&mut self, tab: Tab) {
        self.tabs.activate(tab);
        match tab {
            Tab::Grl => self.rule.focus(),
            Tab::Context => self.focus_selected_block(),
            Tab::Result => {}
        }
    }

    pub fn focus(&self) -> Focus {
        match self.tabs.active() {
            Tab::Grl => Focus::Rule,
            Tab::Context => self.selected_block.map(Focus::Block).unwrap_or(Focus::None),
            Tab::Result => Focus::None,
        }
    }

    pub fn focused_surface_mut(&mut self) -> Option<&mut TextSurface> {
        match self.focus() {
            Focus::Rule => Some(&mut self.rule),
            Focus::Block(index) => self.contexts.get_mut(index).map(|b| &mut b.surface),
            Focus::None => None,
        }
    }

    /// Run the structural-key interceptor against the focused surface.
    pub fn intercept_key(&mut self, key: &KeyEvent) -> Interception {
        let interceptor = self.interceptor.clone();
        match self.focused_surface_mut() {
            Some(surface) => interceptor.intercept(surface, key),
            None => Interception::Passthrough,
        }
    }

    pub fn selected_block(&self) -> Option<usize> {
        self.selected_block
    }

    /// Add an empty block and focus it.
    pub fn add_block(&mut self) -> usize {
        let index = self.contexts.add_block();
        self.selected_block = Some(index);
        self.focus_selected_block();
        index
    }

    pub fn delete_selected_block(&mut self) -> Option<ContextBlock> {
        let index = self.selected_block?;
        self.delete_block(index)
    }

    /// Delete the block at `index`, keeping the selection on a neighbour.
    pub fn delete_block(&mut self, index: usize) -> Option<ContextBlock> {
        let removed = self.contexts.delete_block(index)?;
        self.selected_block = match self.selected_block {
            _ if self.contexts.is_empty() => None,
            Some(selected) if selected > index => Some(selected - 1),
            Some(selected) => Some(selected.min(self.contexts.len() - 1)),
            None => None,
        };
        self.focus_selected_block();
        Some(removed)
    }

    pub fn select_next_block(&mut self) {
        if let Some(selected) = self.selected_block {
            if selected + 1 < self.contexts.len() {
                self.selected_block = Some(selected + 1);
                self.focus_selected_block();
            }
        }
    }

    pub fn select_prev_block(&mut self) {
        if let Some(selected) = self.selected_block {
            if selected > 0 {
                self.selected_block = Some(selected - 1);
                self.focus_selected_block();
            }
        }
    }

    /// Only the selected block keeps a caret.
    fn focus_selected_block(&mut self) {
        for index in 0..self.contexts.len() {
            if let Some(block) = self.contexts.get_mut(index) {
                if Some(index) == self.selected_block {
                    block.surface.focus();
                } else {
                    block.surface.blur();
                }
            }
        }
    }

    /// Keyword spans in the rule text.
    pub fn rule_spans(&self) -> Vec<MatchSpan> {
        self.highlighter.scan(self.rule.text())
    }

    /// Encode exactly what is currently in the buffers.
    pub fn snapshot(&self) -> EvaluationRequest {
        EvaluationRequest::from_texts(self.rule.text(), self.contexts.enumerate())
    }

    /// Write a rendered outcome into the Result surface and surface that panel.
    pub fn show_outcome(&mut self, outcome: &EvaluationOutcome) {
        self.result.set_text(outcome.render());
        self.activate(Tab::Result);
    }
}
