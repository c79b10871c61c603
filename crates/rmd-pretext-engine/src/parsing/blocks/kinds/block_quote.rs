/// Blockquote block type with owned delimiter constants.
///
/// Nested quotes are flattened: `> > x` is quoted text `x`.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';
    /// Splits formatted quote text into content and attribution.
    pub const ATTRIBUTION_MARK: &'static str = "<mdash/>";

    /// Strips blockquote prefixes from a line, returning (depth, byte_offset).
    ///
    /// Handles `> text`, `>> nested` and `> > spaced nested`.
    pub fn strip_prefixes(s: &str) -> (u8, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut depth = 0u8;

        loop {
            while i < b.len() && b[i] == b' ' {
                i += 1;
            }
            if i < b.len() && b[i] == (Self::PREFIX as u8) {
                depth = depth.saturating_add(1);
                i += 1;
                if i < b.len() && b[i] == b' ' {
                    i += 1;
                }
            } else {
                break;
            }
        }
        (depth, i)
    }

    /// The quoted text of a line, or `None` when the line is not a quote.
    pub fn content(line: &str) -> Option<&str> {
        match Self::strip_prefixes(line) {
            (0, _) => None,
            (_, idx) => Some(line[idx..].trim_end()),
        }
    }

    /// `"Be curious. <mdash/> Someone"` becomes content plus attribution.
    ///
    /// Only a single mark splits; with none or several the text stays whole.
    pub fn split_attribution(formatted: &str) -> (String, Option<String>) {
        if formatted.matches(Self::ATTRIBUTION_MARK).count() != 1 {
            return (formatted.to_string(), None);
        }
        match formatted.split_once(Self::ATTRIBUTION_MARK) {
            Some((content, attribution))
                if !content.trim().is_empty() && !attribution.trim().is_empty() =>
            {
                (
                    content.trim().to_string(),
                    Some(attribution.trim().to_string()),
                )
            }
            _ => (formatted.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_prefixes("hello"), (0, 0));
        assert_eq!(BlockQuote::content("hello"), None);
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_prefixes("> hello"), (1, 2));
        assert_eq!(BlockQuote::content("> hello  "), Some("hello"));
    }

    #[test]
    fn nested_quotes_flatten() {
        assert_eq!(BlockQuote::strip_prefixes("> > hello"), (2, 4));
        assert_eq!(BlockQuote::content(">> hello"), Some("hello"));
    }

    #[test]
    fn bare_marker_is_an_empty_quote_line() {
        assert_eq!(BlockQuote::content(">"), Some(""));
    }

    #[test]
    fn splits_single_attribution() {
        let (content, attribution) =
            BlockQuote::split_attribution("Stay curious. <mdash/> A. Scientist");
        assert_eq!(content, "Stay curious.");
        assert_eq!(attribution.as_deref(), Some("A. Scientist"));
    }

    #[test]
    fn several_marks_do_not_split() {
        let text = "a <mdash/> b <mdash/> c";
        assert_eq!(BlockQuote::split_attribution(text), (text.to_string(), None));
    }

    #[test]
    fn trailing_mark_does_not_split() {
        let text = "dangling <mdash/>";
        assert_eq!(BlockQuote::split_attribution(text), (text.to_string(), None));
    }
}
