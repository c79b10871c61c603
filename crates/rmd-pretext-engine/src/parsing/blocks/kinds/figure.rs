use std::sync::OnceLock;

use regex::Regex;

use crate::models::{BlockNode, CodeBlock};

use super::code_fence::FenceParams;

/// A code chunk with a `fig.cap` option: a figure, plus the code that drew
/// it as a remark unless `echo=FALSE`.
pub struct FigureChunk;

static INCLUDE_GRAPHICS: OnceLock<Regex> = OnceLock::new();

impl FigureChunk {
    pub const ID_PREFIX: &'static str = "fig-";
    pub const SOURCE_IMAGES: &'static str = "./img/";
    pub const IMAGES: &'static str = "images/";
    pub const GENERATED: &'static str = "generated";
    pub const FALLBACK_IMAGE: &'static str = "generated/plot.png";

    /// Builds the figure node for a chunk whose `fig.cap` is `raw_caption`.
    /// `format` turns the unwrapped caption into inline markup.
    pub fn build(
        language: &str,
        raw_caption: &str,
        params: &FenceParams,
        source: String,
        format: impl FnOnce(&str) -> String,
    ) -> BlockNode {
        let label = params.label();
        let image_source = Self::image_source(&source, label);
        let remark = params
            .echo()
            .then(|| CodeBlock::program(language, source));

        BlockNode::Figure {
            id: label.map(Self::id),
            caption: format(&Self::unwrap_caption(raw_caption)),
            image_source,
            remark,
        }
    }

    /// Matches the id `\@ref(fig:label)` resolves to.
    pub fn id(label: &str) -> String {
        format!("{}{}", Self::ID_PREFIX, label.replace('_', "-"))
    }

    /// Strips the surrounding quotes and unescapes `\"` and `\'`.
    pub fn unwrap_caption(raw: &str) -> String {
        let raw = raw.trim();
        let inner = ['"', '\'']
            .into_iter()
            .find_map(|q| raw.strip_prefix(q)?.strip_suffix(q))
            .unwrap_or(raw);
        inner.replace(r#"\""#, "\"").replace(r"\'", "'")
    }

    /// `include_graphics("./img/x.png")` wins, then the chunk label, then a
    /// fixed fallback.
    pub fn image_source(code: &str, label: Option<&str>) -> String {
        let re = INCLUDE_GRAPHICS.get_or_init(|| {
            Regex::new(r#"include_graphics\(\s*["']([^"']+)["']"#)
                .expect("Invalid include_graphics regex")
        });
        if let Some(caps) = re.captures(code) {
            return caps[1].replace(Self::SOURCE_IMAGES, Self::IMAGES);
        }
        match label {
            Some(label) => format!("{}/{label}.png", Self::GENERATED),
            None => Self::FALLBACK_IMAGE.to_string(),
        }
    }
}
