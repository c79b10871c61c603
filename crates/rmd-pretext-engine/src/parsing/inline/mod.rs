//! # Inline Formatting
//!
//! Turns one joined line of source text into PreTeXt inline markup.
//!
//! Delimiters overlap (a `$` inside a code span, `*` inside math, a footnote
//! holding its own emphasis), so formatting is a fixed sequence of passes
//! over a string in which protected spans have been swapped out for
//! placeholder tokens:
//!
//! 1. escaped dollars (`\$`)
//! 2. code spans
//! 3. display math (`$$…$$`)
//! 4. inline math (`$…$`)
//! 5. footnotes, whose content runs through this same sequence
//! 6. XML escaping of the residual text
//! 7. term / strong / emphasis
//! 8. `--` dashes
//! 9. cross-references
//!
//! and finally every placeholder is restored, most recent first.
//!
//! Footnotes are lifted out before escaping so their content is formatted
//! exactly once; the finished `<fn>` is itself held as a placeholder.

pub mod cursor;
pub mod escape;
pub mod kinds;
pub mod passes;
pub mod placeholder;

use log::debug;

use self::{
    escape::escape_text,
    kinds::{CrossRef, Emphasis, Footnote},
    placeholder::{PlaceholderKind, PlaceholderTable, strip_sentinels},
};

/// Footnotes nested deeper than this are left as literal text.
pub const MAX_FOOTNOTE_DEPTH: usize = 2;

/// Formats inline text. One formatter serves a whole document; the
/// placeholder table is per call.
#[derive(Debug, Default)]
pub struct InlineFormatter {
    mdash: bool,
    ambiguous: usize,
}

impl InlineFormatter {
    pub fn new(mdash: bool) -> Self {
        Self {
            mdash,
            ambiguous: 0,
        }
    }

    pub fn format(&mut self, text: &str) -> String {
        let text = strip_sentinels(text);
        let mut table = PlaceholderTable::new();
        let formatted = self.run(&text, &mut table, 0);
        if !table.is_empty() {
            debug!("Restoring {} protected spans", table.len());
        }
        table.restore(formatted)
    }

    /// Unpaired `$` and backticks seen so far.
    pub fn ambiguous(&self) -> usize {
        self.ambiguous
    }

    fn run(&mut self, text: &str, table: &mut PlaceholderTable, depth: usize) -> String {
        let text = passes::protect_escaped_dollars(text, table);
        let text = passes::protect_code_spans(&text, table);
        let text = passes::protect_display_math(&text, table);
        let text = passes::protect_inline_math(&text, table);

        if depth == 0 {
            let stray = passes::count_stray_delimiters(&text);
            if stray > 0 {
                debug!("Leaving {stray} unpaired delimiter(s) literal in: {text}");
            }
            self.ambiguous += stray;
        }

        let text = if depth < MAX_FOOTNOTE_DEPTH {
            Footnote::convert(&text, |note| {
                let inner = self.run(note, table, depth + 1);
                table.insert(PlaceholderKind::Footnote, Footnote::render(&inner))
            })
        } else {
            text
        };

        let text = escape_text(&text);
        let text = Emphasis::apply(&text);
        let text = if self.mdash {
            passes::apply_mdash(&text)
        } else {
            text
        };
        CrossRef::convert(&text)
    }
}
