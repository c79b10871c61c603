use std::borrow::Cow;

/// Opens a placeholder token. Private-use code point, never produced by
/// the formatter itself.
pub const OPEN: char = '\u{E000}';
/// Closes a placeholder token.
pub const CLOSE: char = '\u{E001}';

/// What a placeholder stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    EscapedDollar,
    CodeSpan,
    DisplayMath,
    InlineMath,
    Footnote,
}

impl PlaceholderKind {
    fn tag(self) -> char {
        match self {
            Self::EscapedDollar => 'D',
            Self::CodeSpan => 'C',
            Self::DisplayMath => 'M',
            Self::InlineMath => 'I',
            Self::Footnote => 'F',
        }
    }
}

/// Protected spans for one formatting call.
///
/// Tokens are unique strings, so restoration does not depend on position;
/// it runs in reverse insertion order so a value that itself contains an
/// earlier token (math around an escaped dollar, say) is expanded before
/// that earlier token is.
#[derive(Debug, Default)]
pub struct PlaceholderTable {
    entries: Vec<(String, String)>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and returns the token to put in its place.
    pub fn insert(&mut self, kind: PlaceholderKind, value: String) -> String {
        let token = format!("{OPEN}{}{}{CLOSE}", kind.tag(), self.entries.len());
        self.entries.push((token.clone(), value));
        token
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every token in `text` with its stored value.
    pub fn restore(&self, mut text: String) -> String {
        for (token, value) in self.entries.iter().rev() {
            if text.contains(token.as_str()) {
                text = text.replace(token.as_str(), value);
            }
        }
        text
    }
}

/// True if `text` still carries any placeholder delimiter.
pub fn contains_token(text: &str) -> bool {
    text.contains([OPEN, CLOSE])
}

/// Drops placeholder delimiters from untrusted input so no token can be forged.
pub fn strip_sentinels(text: &str) -> Cow<'_, str> {
    if contains_token(text) {
        Cow::Owned(text.chars().filter(|c| *c != OPEN && *c != CLOSE).collect())
    } else {
        Cow::Borrowed(text)
    }
}
