use super::kinds::{
    BlockQuote, CodeFence, DisplayMath, FenceSig, Heading, HeadingLine, ListItem,
    MalformedHeading,
};

/// Classification of a single line outside any fenced block.
///
/// Each line is classified on its own; fence interiors never reach the
/// classifier, the builder consumes them raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    /// Opening code fence with its raw info string.
    FenceOpen { sig: FenceSig, info: String },
    /// `$$` alone on a line.
    MathFence,
    /// `$$…$$` as the whole line.
    MathLine(String),
    /// `$$` followed by the first line of a multi-line block.
    MathOpen(String),
    Heading(HeadingLine),
    MalformedHeading(MalformedHeading),
    Quote(String),
    ListItem { ordered: bool, text: String },
    Text { text: String, indented: bool },
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line in precedence order: fence, heading, quote, list
    /// item, blank, text.
    pub fn classify(&self, line: &str) -> LineClass {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            return LineClass::Blank;
        }
        if let Some((sig, info)) = CodeFence::sig(line) {
            return LineClass::FenceOpen {
                sig,
                info: info.to_string(),
            };
        }
        if DisplayMath::is_fence(line) {
            return LineClass::MathFence;
        }
        if let Some(latex) = DisplayMath::single_line(line) {
            return LineClass::MathLine(latex.to_string());
        }
        if let Some(first) = DisplayMath::opening(line) {
            return LineClass::MathOpen(first.to_string());
        }
        match Heading::parse(line) {
            Some(Ok(heading)) => return LineClass::Heading(heading),
            Some(Err(why)) => return LineClass::MalformedHeading(why),
            None => {}
        }
        if let Some(text) = BlockQuote::content(line) {
            return LineClass::Quote(text.to_string());
        }
        if let Some((ordered, text)) = ListItem::parse(line) {
            return LineClass::ListItem {
                ordered,
                text: text.to_string(),
            };
        }

        LineClass::Text {
            text: line.trim().to_string(),
            indented: line.starts_with("  ") || line.starts_with('\t'),
        }
    }
}
