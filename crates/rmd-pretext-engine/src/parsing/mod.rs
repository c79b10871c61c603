//! # Parsing
//!
//! Single forward pass over the source lines:
//!
//! ```text
//! line ─► MarkdownLineClassifier ─► LineClass ─┬─► BlockBuilder ──► BlockNode ─┐
//!                                              └─► SectionStack ─► SectionEvent ┴─► TreeSink ─► Document
//! ```
//!
//! Inline formatting happens inside the builder, as each block is flushed,
//! and for heading titles as they are opened. Nothing ever reads back what
//! has already been emitted.

pub mod blocks;
pub mod inline;
pub mod sections;
pub mod sink;

#[cfg(test)]
mod tests;

use std::fmt;

use log::{debug, info, warn};

use crate::{
    models::{Document, SectionKind},
    options::ConvertOptions,
    render,
};

use blocks::{BlockBuilder, LineClass, MarkdownLineClassifier, kinds::HeadingLine};
use sections::SectionStack;
use sink::TreeSink;

/// Recoverable oddities seen during a run. None of them stop conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// `#` lines dropped as unusable headings.
    pub malformed_headings: usize,
    /// Headings that skipped a level below their parent.
    pub depth_gaps: usize,
    /// Fences still open at end of input.
    pub unterminated_fences: usize,
    /// Unpaired `$` and backticks left as literal text.
    pub ambiguous_delimiters: usize,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} malformed heading(s), {} depth gap(s), {} unterminated fence(s), {} ambiguous delimiter(s)",
            self.malformed_headings,
            self.depth_gaps,
            self.unterminated_fences,
            self.ambiguous_delimiters
        )
    }
}

/// A finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

impl Conversion {
    pub fn to_pretext(&self) -> String {
        render::to_pretext(&self.document)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrontMatter {
    /// Nothing seen yet; a `---` first line opens the header.
    Pending,
    Inside,
    Done,
}

impl FrontMatter {
    const DELIMITER: &'static str = "---";
    const END: &'static str = "...";
}

/// Converter state for one document: section stack, pending block, tree.
pub struct Converter {
    blocks: BlockBuilder,
    sections: SectionStack,
    sink: TreeSink,
    front_matter: FrontMatter,
    fixed_chapter: bool,
    diagnostics: Diagnostics,
}

impl Converter {
    pub fn new(options: &ConvertOptions) -> Self {
        let mut converter = Self {
            blocks: BlockBuilder::new(options),
            sections: SectionStack::new(),
            sink: TreeSink::new(),
            front_matter: if options.skip_front_matter {
                FrontMatter::Pending
            } else {
                FrontMatter::Done
            },
            fixed_chapter: options.chapter.is_some(),
            diagnostics: Diagnostics::default(),
        };

        if let Some(chapter) = &options.chapter {
            let title = converter.blocks.format_inline(&chapter.title);
            let transition = converter
                .sections
                .open(SectionKind::Chapter, chapter.id.clone(), title);
            for event in transition.events {
                converter.sink.apply(event);
            }
        }
        converter
    }

    pub fn push_line(&mut self, line: &str) {
        if self.in_front_matter(line) {
            return;
        }
        if self.blocks.in_fence() {
            self.blocks.push_raw(line);
            self.drain_blocks();
            return;
        }

        match MarkdownLineClassifier.classify(line) {
            LineClass::Heading(heading) => {
                self.blocks.flush();
                self.drain_blocks();
                self.open_heading(heading);
            }
            LineClass::MalformedHeading(why) => {
                self.diagnostics.malformed_headings += 1;
                debug!("Skipping malformed heading ({why:?}): {line}");
            }
            class => {
                self.blocks.push(class);
                self.drain_blocks();
            }
        }
    }

    pub fn finish(mut self) -> Conversion {
        if self.front_matter == FrontMatter::Inside {
            warn!("Front matter never closed; the whole input was skipped");
        }
        self.blocks.finish();
        self.drain_blocks();
        for event in self.sections.close_all() {
            self.sink.apply(event);
        }

        self.diagnostics.unterminated_fences = self.blocks.unterminated_fences();
        self.diagnostics.ambiguous_delimiters = self.blocks.ambiguous_delimiters();
        let document = self.sink.finish();

        info!(
            "Converted {} sections and {} blocks",
            document.structural_count(),
            document.block_count()
        );
        if !self.diagnostics.is_clean() {
            info!("Diagnostics: {}", self.diagnostics);
        }

        Conversion {
            document,
            diagnostics: self.diagnostics,
        }
    }

    fn in_front_matter(&mut self, line: &str) -> bool {
        let trimmed = line.trim_end();
        match self.front_matter {
            FrontMatter::Done => false,
            FrontMatter::Pending if trimmed == FrontMatter::DELIMITER => {
                self.front_matter = FrontMatter::Inside;
                true
            }
            FrontMatter::Pending => {
                self.front_matter = FrontMatter::Done;
                false
            }
            FrontMatter::Inside => {
                if trimmed == FrontMatter::DELIMITER || trimmed == FrontMatter::END {
                    self.front_matter = FrontMatter::Done;
                }
                true
            }
        }
    }

    fn open_heading(&mut self, heading: HeadingLine) {
        let Some(kind) = SectionKind::from_depth(heading.depth) else {
            return;
        };
        if self.fixed_chapter && kind == SectionKind::Chapter {
            debug!("Ignoring chapter heading under a fixed chapter: {}", heading.title);
            return;
        }

        let title = self.blocks.format_inline(&heading.title);
        let transition = self.sections.open(kind, heading.id, title);
        if transition.gap {
            self.diagnostics.depth_gaps += 1;
            debug!("Heading skips a level: {} {}", kind.tag(), heading.title);
        }
        for event in transition.events {
            self.sink.apply(event);
        }
    }

    fn drain_blocks(&mut self) {
        for block in self.blocks.take_blocks() {
            self.sink.push_block(block);
        }
    }
}

/// Converts a whole source text.
pub fn convert(source: &str, options: &ConvertOptions) -> Conversion {
    convert_lines(source.lines(), options)
}

/// Converts a sequence of lines (line terminators optional).
pub fn convert_lines<I, S>(lines: I, options: &ConvertOptions) -> Conversion
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut converter = Converter::new(options);
    for line in lines {
        converter.push_line(line.as_ref());
    }
    converter.finish()
}
