//! Keyword scanner for rule text.
//!
//! Matching is ASCII case-insensitive and ignores word boundaries: `ruled`
//! contains a `rule` match. Spans never overlap because the scan resumes
//! after each match.

use serde::Serialize;

/// One keyword occurrence. Offsets are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    /// Exact text found, original case preserved.
    pub matched_text: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: String,
    pub kind: String,
}

impl Keyword {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }
}

/// Scanner over a keyword table.
#[derive(Debug, Clone)]
pub struct Highlighter {
    /// Longest first, so `rules` wins over `rule` at the same offset.
    keywords: Vec<Keyword>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::grl()
    }
}

impl Highlighter {
    /// The rule-language table: the `rule` keyword.
    pub fn grl() -> Self {
        Self::with_keywords([Keyword::new("rule", "rule")])
    }

    pub fn with_keywords(keywords: impl IntoIterator<Item = Keyword>) -> Self {
        let mut keywords: Vec<Keyword> = keywords
            .into_iter()
            .filter(|k| !k.text.is_empty())
            .collect();
        keywords.sort_by(|a, b| b.text.len().cmp(&a.text.len()));
        Self { keywords }
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn scan(&self, text: &str) -> Vec<MatchSpan> {
        let bytes = text.as_bytes();
        let mut spans = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let hit = self.keywords.iter().find(|k| {
                let needle = k.text.as_bytes();
                bytes.len() - pos >= needle.len()
                    && bytes[pos..pos + needle.len()].eq_ignore_ascii_case(needle)
            });

            match hit {
                Some(keyword) => {
                    let end = pos + keyword.text.len();
                    spans.push(MatchSpan {
                        start: pos,
                        end,
                        matched_text: text[pos..end].to_string(),
                        kind: keyword.kind.clone(),
                    });
                    pos = end;
                }
                None => {
                    pos += text[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
                }
            }
        }

        spans
    }
}

/// Scan with the default rule-language table.
pub fn scan(text: &str) -> Vec<MatchSpan> {
    Highlighter::grl().scan(text)
}
