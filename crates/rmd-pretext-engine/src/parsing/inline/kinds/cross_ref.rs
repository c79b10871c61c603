use std::sync::OnceLock;

use regex::{Captures, Regex};

/// bookdown cross-references: `\@ref(id)`, `Figure \@ref(fig:id)`,
/// `Table \@ref(tab:id)`.
///
/// A leading `Chapter`/`Section`/`Figure`/`Table` word is consumed because
/// PreTeXt generates that text for the `<xref>` itself.
pub struct CrossRef;

static REF: OnceLock<Regex> = OnceLock::new();

impl CrossRef {
    pub const FIGURE_PREFIX: &'static str = "fig:";
    pub const TABLE_PREFIX: &'static str = "tab:";

    pub fn convert(text: &str) -> String {
        let re = REF.get_or_init(|| {
            Regex::new(r"(?:\b(?:Chapter|Section|Figure|Table)\s+)?\\@ref\(([^)\s]+)\)")
                .expect("Invalid cross-reference regex")
        });
        re.replace_all(text, |caps: &Captures<'_>| {
            format!(r#"<xref ref="{}"/>"#, Self::target(&caps[1]))
        })
        .into_owned()
    }

    /// Maps a source id to the target `xml:id` the converter emits.
    pub fn target(raw: &str) -> String {
        let id = if let Some(rest) = raw.strip_prefix(Self::FIGURE_PREFIX) {
            format!("fig-{rest}")
        } else if let Some(rest) = raw.strip_prefix(Self::TABLE_PREFIX) {
            format!("table-{rest}")
        } else {
            raw.to_string()
        };
        id.replace('_', "-").replace('"', "&quot;")
    }
}
