use std::borrow::Cow;

/// Escapes `&`, `<` and `>` for XML text content.
///
/// An `&` that already begins a numeric reference or one of the five
/// predefined XML entities is left alone, so escaping twice gives the same
/// result as escaping once. Any other `&name;` is escaped.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for (i, c) in text.char_indices() {
        match c {
            '&' if starts_reference(&text[i + 1..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Wraps `s` in a CDATA section, splitting any `]]>` it contains.
pub fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}

const PREDEFINED_ENTITIES: [&str; 5] = ["amp;", "lt;", "gt;", "quot;", "apos;"];

/// Does `rest` (the text after an `&`) complete a reference like `amp;`,
/// `#38;` or `#x26;`?
fn starts_reference(rest: &str) -> bool {
    let b = rest.as_bytes();
    match b.first() {
        Some(b'#') => match b.get(1) {
            Some(b'x' | b'X') => scan(&b[2..], |c| c.is_ascii_hexdigit()).is_some(),
            _ => scan(&b[1..], |c| c.is_ascii_digit()).is_some(),
        },
        _ => PREDEFINED_ENTITIES.iter().any(|e| rest.starts_with(e)),
    }
}

/// Length of a non-empty run matching `pred` that is terminated by `;`.
fn scan(b: &[u8], pred: impl Fn(u8) -> bool) -> Option<usize> {
    let n = b.iter().take(32).take_while(|c| pred(**c)).count();
    (n > 0 && b.get(n) == Some(&b';')).then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a < b", "a &lt; b")]
    #[case("x > 0 & y", "x &gt; 0 &amp; y")]
    #[case("AT&T", "AT&amp;T")]
    #[case("&amp; stays", "&amp; stays")]
    #[case("&#38; &#x26; kept", "&#38; &#x26; kept")]
    #[case("&; &#; &x", "&amp;; &amp;#; &amp;x")]
    #[case("no specials", "no specials")]
    #[case("Use&nbsp;this and R&D; too", "Use&amp;nbsp;this and R&amp;D; too")]
    #[case("&quot;q&quot; &apos;", "&quot;q&quot; &apos;")]
    fn escapes_reserved_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_text(input), expected);
    }

    #[rstest]
    #[case("Tom & Jerry < Spike")]
    #[case("&&&")]
    #[case("5 > 3 &lt; 4")]
    #[case("plain")]
    #[case("R&D; &copy;")]
    fn escaping_is_idempotent(#[case] input: &str) {
        let once = escape_text(input).into_owned();
        let twice = escape_text(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn cdata_splits_terminator() {
        assert_eq!(cdata("a < b"), "<![CDATA[a < b]]>");
        assert_eq!(cdata("x]]>y"), "<![CDATA[x]]]]><![CDATA[>y]]>");
    }
}
