use html_escape::encode_text;

/// Code span inline type with owned delimiter constant.
///
/// Code spans are raw zones: their content is never formatted further.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: u8 = b'`';

    /// Renders the verbatim span content as `<c>`.
    pub fn render(code: &str) -> String {
        format!("<c>{}</c>", encode_text(code))
    }
}
