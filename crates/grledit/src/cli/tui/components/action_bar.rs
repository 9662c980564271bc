//! Footer row of key hints.
//!
//! Hints that do not fit are dropped lowest priority first and replaced by a
//! trailing ellipsis marker.

use std::borrow::Cow;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionHint {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub enabled: bool,
    pub priority: u8,
}

impl ActionHint {
    pub fn new(key: impl Into<Cow<'static, str>>, label: impl Into<Cow<'static, str>>, priority: u8) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            enabled: true,
            priority,
        }
    }

    /// Shown dimmed; the key currently does nothing.
    pub fn disabled(key: impl Into<Cow<'static, str>>, label: impl Into<Cow<'static, str>>, priority: u8) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, label, priority)
        }
    }

    /// `[key] label`
    fn width(&self) -> usize {
        self.key.chars().count() + 3 + self.label.chars().count()
    }
}

const GAP: &str = "  ";
const MORE: &str = "…";

/// Indexes of the hints that fit in `width`, in display order.
pub fn fit_hints(hints: &[ActionHint], width: usize) -> (Vec<usize>, bool) {
    let mut kept: Vec<usize> = (0..hints.len()).collect();
    let mut dropped = false;

    loop {
        let mut total: usize = kept.iter().map(|&i| hints[i].width()).sum();
        total += GAP.len() * kept.len().saturating_sub(1);
        if dropped {
            total += GAP.len() + MORE.chars().count();
        }
        if total <= width || kept.is_empty() {
            return (kept, dropped);
        }

        // later entries lose ties
        let victim = kept
            .iter()
            .enumerate()
            .min_by_key(|(_, idx)| (hints[**idx].priority, std::cmp::Reverse(**idx)))
            .map(|(pos, _)| pos)
            .unwrap_or(0);
        kept.remove(victim);
        dropped = true;
    }
}

pub fn render_action_bar(frame: &mut Frame, area: Rect, hints: &[ActionHint]) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let (kept, dropped) = fit_hints(hints, inner.width as usize);
    let mut spans = Vec::new();
    for (n, &i) in kept.iter().enumerate() {
        if n > 0 {
            spans.push(Span::raw(GAP));
        }
        let hint = &hints[i];
        let (key_style, label_style) = if hint.enabled {
            (Style::default().fg(Color::Cyan).bold(), Style::default())
        } else {
            (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("[{}]", hint.key), key_style));
        spans.push(Span::styled(format!(" {}", hint.label), label_style));
    }
    if dropped {
        spans.push(Span::raw(GAP));
        spans.push(Span::styled(MORE, Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), inner);
}
