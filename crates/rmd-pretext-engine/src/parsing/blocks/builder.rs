use std::mem;

use log::warn;

use crate::{
    models::{BlockNode, CodeBlock},
    options::ConvertOptions,
    parsing::inline::InlineFormatter,
};

use super::{
    classify::LineClass,
    kinds::{BlockQuote, CodeFence, DisplayMath, FenceInfo, FenceSig, FigureChunk},
};

/// The one block being accumulated. Switching kind flushes it.
#[derive(Debug, Default)]
enum LeafState {
    #[default]
    None,
    Paragraph {
        lines: Vec<String>,
    },
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Quote {
        lines: Vec<String>,
    },
    Fence {
        sig: FenceSig,
        info: FenceInfo,
        lines: Vec<String>,
    },
    Math {
        lines: Vec<String>,
    },
}

/// Accumulates classified lines into finished `BlockNode`s.
///
/// Blocks are inline formatted as they are flushed; the driver drains them
/// with [`BlockBuilder::take_blocks`] after every line.
pub struct BlockBuilder {
    leaf: LeafState,
    formatter: InlineFormatter,
    attribution: bool,
    lazy_list: bool,
    unterminated: usize,
    out: Vec<BlockNode>,
}

impl BlockBuilder {
    pub fn new(options: &ConvertOptions) -> Self {
        Self {
            leaf: LeafState::None,
            formatter: InlineFormatter::new(options.mdash),
            attribution: options.blockquote_attribution,
            lazy_list: options.lazy_list_continuation,
            unterminated: 0,
            out: vec![],
        }
    }

    /// While true, lines go to [`BlockBuilder::push_raw`] unclassified.
    pub fn in_fence(&self) -> bool {
        matches!(self.leaf, LeafState::Fence { .. } | LeafState::Math { .. })
    }

    pub fn push(&mut self, class: LineClass) {
        match class {
            LineClass::Blank | LineClass::Heading(_) => self.flush(),
            LineClass::MalformedHeading(_) => {}
            LineClass::FenceOpen { sig, info } => {
                self.flush();
                self.leaf = LeafState::Fence {
                    sig,
                    info: FenceInfo::parse(&info),
                    lines: vec![],
                };
            }
            LineClass::MathFence => {
                self.flush();
                self.leaf = LeafState::Math { lines: vec![] };
            }
            LineClass::MathOpen(first) => {
                self.flush();
                self.leaf = LeafState::Math { lines: vec![first] };
            }
            LineClass::MathLine(latex) => {
                self.flush();
                self.out.push(BlockNode::MathBlock(latex));
            }
            LineClass::Quote(text) => self.push_quote(text),
            LineClass::ListItem { ordered, text } => self.push_list_item(ordered, text),
            LineClass::Text { text, indented } => self.push_text(text, indented),
        }
    }

    /// A line inside a code or math fence. Nothing but the matching close is
    /// recognized.
    pub fn push_raw(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        let closes = match &self.leaf {
            LeafState::Fence { sig, .. } => CodeFence::closes(*sig, line),
            LeafState::Math { .. } => DisplayMath::is_fence(line),
            _ => return,
        };
        if closes {
            self.flush();
            return;
        }

        match &mut self.leaf {
            LeafState::Fence { lines, .. } => lines.push(line.to_string()),
            LeafState::Math { lines } => match line.trim_end().strip_suffix(DisplayMath::FENCE) {
                // `x = 1 $$` closes too
                Some(last) => {
                    if !last.trim().is_empty() {
                        lines.push(last.trim_end().to_string());
                    }
                    self.flush();
                }
                None => lines.push(line.to_string()),
            },
            _ => {}
        }
    }

    /// Flushes whatever is pending. Flushing nothing is a no-op.
    pub fn flush(&mut self) {
        match mem::take(&mut self.leaf) {
            LeafState::None => {}
            LeafState::Paragraph { lines } => {
                let content = self.formatter.format(&lines.join(" "));
                self.out.push(BlockNode::Paragraph(content));
            }
            LeafState::List { ordered, items } => {
                let items = items.iter().map(|i| self.formatter.format(i)).collect();
                self.out.push(BlockNode::List { ordered, items });
            }
            LeafState::Quote { lines } => {
                if let Some(node) = self.quote_block(&lines) {
                    self.out.push(node);
                }
            }
            LeafState::Fence { info, lines, .. } => {
                let node = self.fence_block(info, lines);
                self.out.push(node);
            }
            LeafState::Math { lines } => {
                if lines.iter().any(|l| !l.trim().is_empty()) {
                    self.out.push(BlockNode::MathBlock(lines.join("\n")));
                }
            }
        }
    }

    /// End of input. An open fence is emitted as-is.
    pub fn finish(&mut self) {
        if self.in_fence() {
            self.unterminated += 1;
            warn!("Unterminated fence at end of input, keeping its content");
        }
        self.flush();
    }

    pub fn take_blocks(&mut self) -> Vec<BlockNode> {
        mem::take(&mut self.out)
    }

    /// Formats heading titles with the same formatter as the body.
    pub fn format_inline(&mut self, text: &str) -> String {
        self.formatter.format(text)
    }

    pub fn unterminated_fences(&self) -> usize {
        self.unterminated
    }

    pub fn ambiguous_delimiters(&self) -> usize {
        self.formatter.ambiguous()
    }

    fn push_quote(&mut self, text: String) {
        if !matches!(self.leaf, LeafState::Quote { .. }) {
            self.flush();
            self.leaf = LeafState::Quote { lines: vec![] };
        }
        if let LeafState::Quote { lines } = &mut self.leaf
            && !text.is_empty()
        {
            lines.push(text);
        }
    }

    fn push_list_item(&mut self, ordered: bool, text: String) {
        match &mut self.leaf {
            LeafState::List {
                ordered: current,
                items,
            } if *current == ordered => items.push(text),
            _ => {
                self.flush();
                self.leaf = LeafState::List {
                    ordered,
                    items: vec![text],
                };
            }
        }
    }

    fn push_text(&mut self, text: String, indented: bool) {
        match &mut self.leaf {
            LeafState::List { items, .. } if self.lazy_list && indented => {
                if let Some(last) = items.last_mut() {
                    last.push(' ');
                    last.push_str(&text);
                }
            }
            LeafState::Paragraph { lines } => lines.push(text),
            _ => {
                self.flush();
                self.leaf = LeafState::Paragraph { lines: vec![text] };
            }
        }
    }

    fn quote_block(&mut self, lines: &[String]) -> Option<BlockNode> {
        if lines.is_empty() {
            return None;
        }
        let formatted = self.formatter.format(&lines.join(" "));
        let (content, attribution) = if self.attribution {
            BlockQuote::split_attribution(&formatted)
        } else {
            (formatted, None)
        };
        Some(BlockNode::Blockquote {
            content,
            attribution,
        })
    }

    fn fence_block(&mut self, info: FenceInfo, lines: Vec<String>) -> BlockNode {
        let source = lines.join("\n");
        let Some(language) = info.language.as_deref() else {
            return BlockNode::Code(CodeBlock::output(source));
        };
        match info.params.fig_cap() {
            Some(caption) => FigureChunk::build(language, caption, &info.params, source, |c| {
                self.formatter.format(c)
            }),
            None => BlockNode::Code(CodeBlock::program(language, source)),
        }
    }
}
