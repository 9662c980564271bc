//! Plain-text editing surface.
//!
//! All offsets are byte offsets into the UTF-8 text and always sit on char
//! boundaries. A surface without a [`Selection`] has no caret: it can be read
//! and replaced wholesale but rejects caret-relative edits.

/// Caret/selection range. `anchor == head` is a collapsed caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn caret(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }
}

/// An editable text buffer with an optional caret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSurface {
    text: String,
    selection: Option<Selection>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface holding `text` with no caret.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Caret position (the selection head).
    pub fn caret(&self) -> Option<usize> {
        self.selection.map(|s| s.head)
    }

    pub fn has_caret(&self) -> bool {
        self.selection.is_some()
    }

    /// Replace the whole buffer. A caret, if present, moves to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if self.selection.is_some() {
            self.selection = Some(Selection::caret(self.text.len()));
        }
    }

    /// Give the surface a caret (at the end) if it has none.
    pub fn focus(&mut self) {
        if self.selection.is_none() {
            self.selection = Some(Selection::caret(self.text.len()));
        }
    }

    pub fn blur(&mut self) {
        self.selection = None;
    }

    pub fn set_caret(&mut self, pos: usize) {
        self.selection = Some(Selection::caret(floor_boundary(&self.text, pos)));
    }

    pub fn select(&mut self, anchor: usize, head: usize) {
        self.selection = Some(Selection {
            anchor: floor_boundary(&self.text, anchor),
            head: floor_boundary(&self.text, head),
        });
    }

    pub fn select_all(&mut self) {
        self.select(0, self.text.len());
    }

    /// Typed input: replaces the selection with `s`. Returns false without a caret.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        let start = sel.start();
        self.text.replace_range(start..sel.end(), s);
        self.selection = Some(Selection::caret(start + s.len()));
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf))
    }

    pub fn newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    /// Insert `s` at the selection start without removing selected text, then
    /// collapse the caret to just after the inserted text.
    pub fn insert_before_selection(&mut self, s: &str) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        let start = sel.start();
        self.text.insert_str(start, s);
        self.selection = Some(Selection::caret(start + s.len()));
        true
    }

    pub fn backspace(&mut self) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        if !sel.is_collapsed() {
            return self.delete_selection(sel);
        }
        match prev_boundary(&self.text, sel.head) {
            Some(prev) => {
                self.text.replace_range(prev..sel.head, "");
                self.selection = Some(Selection::caret(prev));
                true
            }
            None => false,
        }
    }

    pub fn delete_forward(&mut self) -> bool {
        let Some(sel) = self.selection else {
            return false;
        };
        if !sel.is_collapsed() {
            return self.delete_selection(sel);
        }
        match next_boundary(&self.text, sel.head) {
            Some(next) => {
                self.text.replace_range(sel.head..next, "");
                true
            }
            None => false,
        }
    }

    fn delete_selection(&mut self, sel: Selection) -> bool {
        self.text.replace_range(sel.start()..sel.end(), "");
        self.selection = Some(Selection::caret(sel.start()));
        true
    }

    pub fn move_left(&mut self) {
        if let Some(sel) = self.selection {
            let pos = if sel.is_collapsed() {
                prev_boundary(&self.text, sel.head).unwrap_or(0)
            } else {
                sel.start()
            };
            self.selection = Some(Selection::caret(pos));
        }
    }

    pub fn move_right(&mut self) {
        if let Some(sel) = self.selection {
            let pos = if sel.is_collapsed() {
                next_boundary(&self.text, sel.head).unwrap_or(self.text.len())
            } else {
                sel.end()
            };
            self.selection = Some(Selection::caret(pos));
        }
    }

    pub fn move_line_start(&mut self) {
        if let Some(head) = self.caret() {
            self.selection = Some(Selection::caret(self.line_start_of(head)));
        }
    }

    pub fn move_line_end(&mut self) {
        if let Some(head) = self.caret() {
            self.selection = Some(Selection::caret(self.line_end_of(head)));
        }
    }

    pub fn move_up(&mut self) {
        let Some(head) = self.caret() else {
            return;
        };
        let line_start = self.line_start_of(head);
        if line_start == 0 {
            self.selection = Some(Selection::caret(0));
            return;
        }
        let column = self.text[line_start..head].chars().count();
        let prev_start = self.line_start_of(line_start - 1);
        self.selection = Some(Selection::caret(self.offset_in_line(prev_start, column)));
    }

    pub fn move_down(&mut self) {
        let Some(head) = self.caret() else {
            return;
        };
        let line_end = self.line_end_of(head);
        if line_end == self.text.len() {
            self.selection = Some(Selection::caret(line_end));
            return;
        }
        let column = self.text[self.line_start_of(head)..head].chars().count();
        self.selection = Some(Selection::caret(self.offset_in_line(line_end + 1, column)));
    }

    /// Caret as (line index, char column), for placing the terminal cursor.
    pub fn caret_line_col(&self) -> Option<(usize, usize)> {
        let head = self.caret()?;
        let before = &self.text[..head];
        let line = before.matches('\n').count();
        let column = before[self.line_start_of(head)..].chars().count();
        Some((line, column))
    }

    fn line_start_of(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end_of(&self, pos: usize) -> usize {
        self.text[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.text.len())
    }

    /// Offset `column` chars into the line starting at `line_start`, clamped
    /// to the line end.
    fn offset_in_line(&self, line_start: usize, column: usize) -> usize {
        let line_end = self.line_end_of(line_start);
        self.text[line_start..line_end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| line_start + i)
            .unwrap_or(line_end)
    }
}

fn floor_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn prev_boundary(text: &str, pos: usize) -> Option<usize> {
    text[..pos].char_indices().next_back().map(|(i, _)| i)
}

fn next_boundary(text: &str, pos: usize) -> Option<usize> {
    text[pos..].chars().next().map(|c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(text: &str) -> TextSurface {
        let mut surface = TextSurface::from_text(text);
        surface.focus();
        surface
    }

    #[test]
    fn test_edits_require_a_caret() {
        let mut surface = TextSurface::from_text("abc");
        assert!(!surface.insert_char('x'));
        assert!(!surface.backspace());
        assert!(!surface.delete_forward());
        surface.move_left();
        assert_eq!(surface.text(), "abc");
        assert_eq!(surface.caret(), None);
    }

    #[test]
    fn test_typing_at_caret() {
        let mut surface = focused("rule");
        surface.set_caret(0);
        surface.insert_str("my ");
        assert_eq!(surface.text(), "my rule");
        assert_eq!(surface.caret(), Some(3));
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut surface = focused("when true");
        surface.select(5, 9);
        surface.insert_str("false");
        assert_eq!(surface.text(), "when false");
        assert_eq!(surface.caret(), Some(10));
    }

    #[test]
    fn test_insert_before_selection_keeps_selected_text() {
        let mut surface = focused("abcdef");
        surface.select(4, 2);
        assert!(surface.insert_before_selection("--"));
        assert_eq!(surface.text(), "ab--cdef");
        assert_eq!(surface.selection(), Some(Selection::caret(4)));
    }

    #[test]
    fn test_backspace_and_delete_respect_multibyte_chars() {
        let mut surface = focused("aé🦀");
        assert!(surface.backspace());
        assert_eq!(surface.text(), "aé");
        surface.set_caret(1);
        assert!(surface.delete_forward());
        assert_eq!(surface.text(), "a");
        assert!(!surface.delete_forward());
    }

    #[test]
    fn test_set_caret_snaps_to_char_boundary() {
        let mut surface = focused("é");
        surface.set_caret(1);
        assert_eq!(surface.caret(), Some(0));
        surface.set_caret(99);
        assert_eq!(surface.caret(), Some(2));
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut surface = focused("first line\nab\nthird line");
        surface.set_caret(6);
        surface.move_down();
        assert_eq!(surface.caret(), Some(13));
        surface.move_down();
        assert_eq!(surface.caret(), Some(16));
        surface.move_up();
        assert_eq!(surface.caret(), Some(13));
        surface.move_up();
        assert_eq!(surface.caret(), Some(2));
        surface.move_up();
        assert_eq!(surface.caret(), Some(0));
    }

    #[test]
    fn test_line_start_end_and_caret_position() {
        let mut surface = focused("rule A {\n  when\n}");
        surface.set_caret(12);
        assert_eq!(surface.caret_line_col(), Some((1, 3)));
        surface.move_line_start();
        assert_eq!(surface.caret(), Some(9));
        surface.move_line_end();
        assert_eq!(surface.caret(), Some(15));
    }

    #[test]
    fn test_set_text_moves_caret_to_end() {
        let mut surface = focused("old");
        surface.set_caret(1);
        surface.set_text("replacement");
        assert_eq!(surface.caret(), Some(11));

        let mut display = TextSurface::new();
        display.set_text("shown");
        assert_eq!(display.caret(), None);
    }

    #[test]
    fn test_horizontal_moves_collapse_selection() {
        let mut surface = focused("abcdef");
        surface.select(1, 4);
        surface.move_left();
        assert_eq!(surface.selection(), Some(Selection::caret(1)));
        surface.select(1, 4);
        surface.move_right();
        assert_eq!(surface.selection(), Some(Selection::caret(4)));
    }
}
