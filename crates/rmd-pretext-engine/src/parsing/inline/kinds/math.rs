use std::borrow::Cow;

use crate::parsing::inline::escape::cdata;

/// Inline and display math.
pub struct Math;

impl Math {
    pub const DOLLAR: u8 = b'$';
    /// A literal (currency) dollar in the source.
    pub const ESCAPED_DOLLAR: &'static str = r"\$";

    /// `<m>` for inline math. Content is kept as written.
    pub fn inline(content: &str) -> String {
        format!("<m>{}</m>", Self::encode(content, false))
    }

    /// `<me>` for display math. Surrounding whitespace is dropped.
    pub fn display(content: &str) -> String {
        format!("<me>{}</me>", Self::encode(content.trim(), true))
    }

    /// Verbatim when the LaTeX is XML-safe, CDATA otherwise.
    pub fn encode(content: &str, display: bool) -> Cow<'_, str> {
        if Self::needs_cdata(content, display) {
            Cow::Owned(cdata(content))
        } else {
            Cow::Borrowed(content)
        }
    }

    /// Alignment environments (`&`) and relations (`<`, `>`) are not valid
    /// XML text; display environments go to CDATA as well.
    pub fn needs_cdata(content: &str, display: bool) -> bool {
        content.contains(['&', '<', '>']) || (display && content.contains(r"\begin"))
    }
}
