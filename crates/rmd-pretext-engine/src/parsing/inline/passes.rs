//! The individual inline passes, in the order `InlineFormatter` runs them.
//!
//! Protect passes (1–4) move raw content into the `PlaceholderTable` and
//! leave a token behind; everything after them only ever sees tokens, never
//! the protected text.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Math},
    placeholder::{PlaceholderKind, PlaceholderTable},
};

/// Pass 1. `\$` becomes a token restoring to a bare `$`.
///
/// Runs first so no later pass reads an escaped dollar as a math delimiter.
pub fn protect_escaped_dollars(text: &str, table: &mut PlaceholderTable) -> String {
    if !text.contains(Math::ESCAPED_DOLLAR) {
        return text.to_string();
    }
    let token = table.insert(PlaceholderKind::EscapedDollar, "$".to_string());
    text.replace(Math::ESCAPED_DOLLAR, &token)
}

/// Pass 2. `` `code` `` becomes a token restoring to `<c>code</c>`.
///
/// Single backticks only; an empty pair is not a span.
pub fn protect_code_spans(text: &str, table: &mut PlaceholderTable) -> String {
    let mut cur = Cursor::new(text);
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;

    while cur.seek(CodeSpan::TICK) {
        let start = cur.pos();
        cur.bump();
        let inner_start = cur.pos();
        if !cur.seek(CodeSpan::TICK) {
            break;
        }
        let inner_end = cur.pos();
        if inner_end == inner_start {
            // `` is not a span; retry from the second tick
            continue;
        }
        cur.bump();

        let token = table.insert(
            PlaceholderKind::CodeSpan,
            CodeSpan::render(&text[inner_start..inner_end]),
        );
        out.push_str(&text[copied..start]);
        out.push_str(&token);
        copied = cur.pos();
    }

    out.push_str(&text[copied..]);
    out
}

static DISPLAY_MATH: OnceLock<Regex> = OnceLock::new();

/// Pass 3. `$$…$$` becomes a token restoring to the finished `<me>`.
pub fn protect_display_math(text: &str, table: &mut PlaceholderTable) -> String {
    let re = DISPLAY_MATH
        .get_or_init(|| Regex::new(r"(?s)\$\$(.+?)\$\$").expect("Invalid display math regex"));
    re.replace_all(text, |caps: &Captures<'_>| {
        table.insert(PlaceholderKind::DisplayMath, Math::display(&caps[1]))
    })
    .into_owned()
}

/// Pass 4. `$…$` becomes a token restoring to the finished `<m>`.
///
/// A `$` touching another `$` is never an inline delimiter; that keeps a
/// stray `$$` from being read as two inline spans.
pub fn protect_inline_math(text: &str, table: &mut PlaceholderTable) -> String {
    let mut cur = Cursor::new(text);
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;

    while cur.seek(Math::DOLLAR) {
        if cur.prev() == Some(Math::DOLLAR) || cur.peek_at(1) == Some(Math::DOLLAR) {
            cur.bump();
            continue;
        }
        let start = cur.pos();
        let mut probe = cur.clone();
        probe.bump();
        let inner_start = probe.pos();
        if !probe.seek(Math::DOLLAR) || probe.pos() == inner_start {
            cur.bump();
            continue;
        }
        let inner_end = probe.pos();
        if probe.peek_at(1) == Some(Math::DOLLAR) {
            cur.bump();
            continue;
        }
        probe.bump();

        let token = table.insert(
            PlaceholderKind::InlineMath,
            Math::inline(&text[inner_start..inner_end]),
        );
        out.push_str(&text[copied..start]);
        out.push_str(&token);
        copied = probe.pos();
        cur = probe;
    }

    out.push_str(&text[copied..]);
    out
}

/// Counts delimiters the protect passes could not pair up.
pub fn count_stray_delimiters(text: &str) -> usize {
    text.bytes()
        .filter(|b| *b == Math::DOLLAR || *b == CodeSpan::TICK)
        .count()
}

/// ` -- ` between words becomes `<mdash/>`.
pub fn apply_mdash(text: &str) -> String {
    text.replace(" -- ", " <mdash/> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(pass: fn(&str, &mut PlaceholderTable) -> String, input: &str) -> String {
        let mut table = PlaceholderTable::new();
        let protected = pass(input, &mut table);
        table.restore(protected)
    }

    #[test]
    fn code_spans_render_verbatim() {
        assert_eq!(
            run(protect_code_spans, "use `x <- 1` here"),
            "use <c>x &lt;- 1</c> here"
        );
    }

    #[test]
    fn empty_backtick_pair_is_not_a_span() {
        assert_eq!(run(protect_code_spans, "a `` b"), "a `` b");
        assert_eq!(run(protect_code_spans, "``x`"), "`<c>x</c>");
    }

    #[test]
    fn unclosed_code_span_is_literal() {
        assert_eq!(run(protect_code_spans, "a `b"), "a `b");
    }

    #[test]
    fn inline_math_pairs() {
        assert_eq!(
            run(protect_inline_math, "$a$ and $b$"),
            "<m>a</m> and <m>b</m>"
        );
    }

    #[test]
    fn inline_math_ignores_double_dollars() {
        assert_eq!(run(protect_inline_math, "$$ x $y$"), "$$ x <m>y</m>");
        assert_eq!(run(protect_inline_math, "$a$$"), "$a$$");
    }

    #[test]
    fn single_dollar_is_left_alone() {
        assert_eq!(run(protect_inline_math, "costs $5"), "costs $5");
    }

    #[test]
    fn display_math_spans_joined_lines() {
        assert_eq!(
            run(protect_display_math, "before $$ a \n = b $$ after"),
            "before <me>a \n = b</me> after"
        );
    }

    #[test]
    fn escaped_dollar_restores_to_dollar() {
        assert_eq!(run(protect_escaped_dollars, r"\$5 and \$6"), "$5 and $6");
    }

    #[test]
    fn stray_delimiters_are_counted() {
        assert_eq!(count_stray_delimiters("a $ b ` c"), 2);
        assert_eq!(count_stray_delimiters("clean"), 0);
    }
}
