use serde::{Deserialize, Serialize};

/// A chapter element supplied from outside the document.
///
/// Some chapters carry no level-1 heading of their own; the converter then
/// opens this chapter before the first line and ignores `#` headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterOptions {
    pub id: Option<String>,
    pub title: String,
}

/// Knobs for the per-chapter quirks of the source documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Fixed chapter to open before the first line.
    pub chapter: Option<ChapterOptions>,
    /// Turn ` -- ` into `<mdash/>`.
    pub mdash: bool,
    /// Split a blockquote at a single `<mdash/>` into content and attribution.
    pub blockquote_attribution: bool,
    /// Let an indented plain line extend the previous list item.
    pub lazy_list_continuation: bool,
    /// Skip a `---` delimited YAML header on the first line.
    pub skip_front_matter: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            chapter: None,
            mdash: true,
            blockquote_attribution: true,
            lazy_list_continuation: false,
            skip_front_matter: true,
        }
    }
}
