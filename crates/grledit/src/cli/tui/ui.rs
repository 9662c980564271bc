//! UI rendering for the editor

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
};

use grledit::{MatchSpan, Tab, TextSurface};

use super::app::App;
use super::components::action_bar::render_action_bar;
use super::keymap::action_hints;
use super::nav::{nav_index_for_tab, NAV_ITEMS};

/// Context blocks shown at once; the window follows the selection.
const MAX_VISIBLE_BLOCKS: usize = 4;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title, nav row, rule
            Constraint::Min(3),    // active panel
            Constraint::Length(1), // status
            Constraint::Length(2), // action bar
        ])
        .split(frame.area());

    draw_nav(frame, app, chunks[0]);
    match app.session.active_tab() {
        Tab::Grl => draw_grl_panel(frame, app, chunks[1]),
        Tab::Context => draw_context_panel(frame, app, chunks[1]),
        Tab::Result => draw_result_panel(frame, app, chunks[1]),
    }
    draw_status(frame, app, chunks[2]);
    render_action_bar(frame, chunks[3], &action_hints(app));
}

fn draw_nav(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = NAV_ITEMS
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled(item.key, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::raw(item.tab.label()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(nav_index_for_tab(app.session.active_tab()).unwrap_or(0))
        .highlight_style(Style::default().fg(Color::Yellow).bold().underlined())
        .divider("|")
        .block(Block::default().borders(Borders::BOTTOM).title(" GRL Editor "));
    frame.render_widget(tabs, area);
}

fn panel_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Plain })
        .border_style(border_style)
        .title(title)
}

/// Split text into lines, styling the byte ranges covered by `spans`.
pub fn highlighted_lines(text: &str, spans: &[MatchSpan]) -> Vec<Line<'static>> {
    let keyword = Style::default().fg(Color::Magenta).bold();
    let mut lines = Vec::new();
    let mut line_start = 0;

    for raw in text.split('\n') {
        let line_end = line_start + raw.len();
        let mut parts = Vec::new();
        let mut cursor = line_start;
        for span in spans.iter().filter(|s| s.start >= line_start && s.end <= line_end) {
            if span.start > cursor {
                parts.push(Span::raw(text[cursor..span.start].to_string()));
            }
            parts.push(Span::styled(text[span.start..span.end].to_string(), keyword));
            cursor = span.end;
        }
        if cursor < line_end {
            parts.push(Span::raw(text[cursor..line_end].to_string()));
        }
        lines.push(Line::from(parts));
        line_start = line_end + 1;
    }

    lines
}

/// Vertical scroll that keeps the caret line inside a viewport of `height` rows.
fn scroll_for(surface: &TextSurface, height: u16) -> u16 {
    let line = surface.caret_line_col().map(|(line, _)| line).unwrap_or(0) as u16;
    line.saturating_sub(height.saturating_sub(1))
}

fn place_cursor(frame: &mut Frame, surface: &TextSurface, inner: Rect, scroll: u16) {
    let Some((line, col)) = surface.caret_line_col() else {
        return;
    };
    let y = (line as u16).saturating_sub(scroll);
    let x = (col as u16).min(inner.width.saturating_sub(1));
    if y < inner.height {
        frame.set_cursor_position(Position::new(inner.x + x, inner.y + y));
    }
}

fn draw_grl_panel(frame: &mut Frame, app: &App, area: Rect) {
    let surface = &app.session.rule;
    let block = panel_block(" Rules (GRL) ".to_string(), true);
    let inner = block.inner(area);
    let scroll = scroll_for(surface, inner.height);

    let lines = highlighted_lines(surface.text(), &app.session.rule_spans());
    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
    place_cursor(frame, surface, inner, scroll);
}

fn draw_context_panel(frame: &mut Frame, app: &App, area: Rect) {
    let contexts = &app.session.contexts;
    if contexts.is_empty() {
        let empty = Paragraph::new("No context blocks. Press Ctrl+N to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(panel_block(" Context ".to_string(), false));
        frame.render_widget(empty, area);
        return;
    }

    let selected = app.session.selected_block().unwrap_or(0);
    let visible = contexts.len().min(MAX_VISIBLE_BLOCKS);
    let first = selected.saturating_sub(visible - 1).min(contexts.len() - visible);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, visible as u32); visible])
        .split(area);

    for (row, index) in (first..first + visible).enumerate() {
        let Some(block) = contexts.get(index) else {
            continue;
        };
        let focused = index == selected;
        let title = format!(" Context #{} of {} ", index + 1, contexts.len());
        let frame_block = panel_block(title, focused);
        let inner = frame_block.inner(rows[row]);
        let scroll = if focused { scroll_for(&block.surface, inner.height) } else { 0 };

        let paragraph = Paragraph::new(block.text().to_string())
            .block(frame_block)
            .scroll((scroll, 0));
        frame.render_widget(paragraph, rows[row]);
        if focused {
            place_cursor(frame, &block.surface, inner, scroll);
        }
    }
}

fn draw_result_panel(frame: &mut Frame, app: &App, area: Rect) {
    let (title, style) = match &app.last_submission {
        Some(last) if last.success => (
            format!(" Result: {} at {} ", last.status, last.finished_at.format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        ),
        Some(last) => (
            format!(" Result: failed at {} ", last.finished_at.format("%H:%M:%S")),
            Style::default().fg(Color::Red),
        ),
        None => (" Result ".to_string(), Style::default().fg(Color::DarkGray)),
    };

    let body = if app.session.result.is_empty() {
        "Nothing submitted yet. Press Ctrl+R to evaluate."
    } else {
        app.session.result.text()
    };

    let paragraph = Paragraph::new(body.to_string())
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((app.result_scroll, 0))
        .block(panel_block(title, false));
    frame.render_widget(paragraph, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.is_submitting() {
        Line::styled(
            format!(" Submitting to {} ...", app.endpoint),
            Style::default().fg(Color::Yellow),
        )
    } else if let Some(status) = &app.status {
        let color = if status.is_error { Color::Red } else { Color::Green };
        Line::styled(format!(" {}", status.text), Style::default().fg(color))
    } else {
        Line::styled(
            format!(" Ready. Endpoint: {}", app.endpoint),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use grledit::scan;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlighted_lines_preserve_text() {
        let text = "rule A {\n  when x\n}\nRule B";
        let lines = highlighted_lines(text, &scan(text));
        let joined: Vec<String> = lines.iter().map(plain).collect();
        assert_eq!(joined.join("\n"), text);
    }

    #[test]
    fn test_keyword_spans_are_styled() {
        let text = "x rule y";
        let lines = highlighted_lines(text, &scan(text));
        let styled: Vec<&str> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style.fg == Some(Color::Magenta))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(styled, ["rule"]);
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let lines = highlighted_lines("", &[]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].spans.is_empty());
    }
}
