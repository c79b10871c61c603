use crate::parsing::inline::cursor::Cursor;

/// Inline footnotes `^[…]`.
///
/// Brackets inside the note must balance. A note directly followed by `(`
/// is a link label, not a footnote.
pub struct Footnote;

impl Footnote {
    pub const OPEN: &'static [u8; 2] = b"^[";
    pub const LBRACKET: u8 = b'[';
    pub const RBRACKET: u8 = b']';
    pub const LINK_PAREN: u8 = b'(';

    pub fn render(content: &str) -> String {
        format!("<fn>{content}</fn>")
    }

    /// Replaces every footnote in `text` (delimiters included) with whatever
    /// `replace` returns for its content.
    pub fn convert(text: &str, mut replace: impl FnMut(&str) -> String) -> String {
        let mut cur = Cursor::new(text);
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;

        while !cur.eof() {
            if let Some((start, inner_start, inner_end)) = try_parse_footnote(&mut cur) {
                out.push_str(&text[copied..start]);
                out.push_str(&replace(&text[inner_start..inner_end]));
                copied = cur.pos();
                continue;
            }
            cur.bump();
        }

        out.push_str(&text[copied..]);
        out
    }
}

/// Attempts to parse a footnote starting at the current position.
///
/// Returns `(start, inner_start, inner_end)` and leaves the cursor after the
/// closing bracket. On failure, cursor position is restored.
fn try_parse_footnote(cur: &mut Cursor<'_>) -> Option<(usize, usize, usize)> {
    if !cur.starts_with(Footnote::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(Footnote::OPEN.len());
    let inner_start = cur.pos();

    let mut depth = 0usize;
    while let Some(b) = cur.peek() {
        match b {
            Footnote::LBRACKET => depth += 1,
            Footnote::RBRACKET if depth == 0 => break,
            Footnote::RBRACKET => depth -= 1,
            _ => {}
        }
        cur.bump();
    }

    if cur.peek() != Some(Footnote::RBRACKET) {
        // Not closed, restore cursor
        *cur = saved;
        return None;
    }
    let inner_end = cur.pos();
    cur.bump(); // ]

    if inner_end == inner_start || cur.peek() == Some(Footnote::LINK_PAREN) {
        *cur = saved;
        return None;
    }

    Some((start, inner_start, inner_end))
}
