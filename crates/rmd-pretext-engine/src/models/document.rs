//! # Document Tree
//!
//! The converted document: structural containers (chapter down to
//! subsubsection) holding block nodes in source order.
//!
//! All inline text stored here (titles, paragraph content, list items,
//! captions) is already resolved PreTeXt inline markup. Code and math
//! bodies are kept raw; the renderer decides how to encode them.

/// Structural container kinds, ordered by nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionKind {
    Chapter,
    Section,
    Subsection,
    Subsubsection,
}

impl SectionKind {
    /// Maps a heading depth (`#` = 0 … `####` = 3) to a kind.
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(Self::Chapter),
            1 => Some(Self::Section),
            2 => Some(Self::Subsection),
            3 => Some(Self::Subsubsection),
            _ => None,
        }
    }

    pub fn depth(self) -> usize {
        match self {
            Self::Chapter => 0,
            Self::Section => 1,
            Self::Subsection => 2,
            Self::Subsubsection => 3,
        }
    }

    /// The PreTeXt element name.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::Subsection => "subsection",
            Self::Subsubsection => "subsubsection",
        }
    }
}

/// The root container: top-level nodes in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Structural(StructuralNode),
    Block(BlockNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralNode {
    pub kind: SectionKind,
    pub id: Option<String>,
    pub title: String,
    pub children: Vec<Node>,
}

impl StructuralNode {
    pub fn new(kind: SectionKind, id: Option<String>, title: String) -> Self {
        Self {
            kind,
            id,
            title,
            children: Vec::new(),
        }
    }

    /// Direct structural children, skipping blocks.
    pub fn sections(&self) -> impl Iterator<Item = &StructuralNode> {
        self.children.iter().filter_map(Node::as_structural)
    }

    /// Direct block children, skipping nested sections.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockNode> {
        self.children.iter().filter_map(Node::as_block)
    }
}

impl Node {
    pub fn as_structural(&self) -> Option<&StructuralNode> {
        match self {
            Node::Structural(s) => Some(s),
            Node::Block(_) => None,
        }
    }

    pub fn as_block(&self) -> Option<&BlockNode> {
        match self {
            Node::Block(b) => Some(b),
            Node::Structural(_) => None,
        }
    }
}

/// A verbatim code block: either program source or captured console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub source: String,
    pub is_output: bool,
}

impl CodeBlock {
    pub fn program(language: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            source: source.into(),
            is_output: false,
        }
    }

    pub fn output(source: impl Into<String>) -> Self {
        Self {
            language: None,
            source: source.into(),
            is_output: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    Paragraph(String),
    List {
        ordered: bool,
        items: Vec<String>,
    },
    Blockquote {
        content: String,
        attribution: Option<String>,
    },
    Code(CodeBlock),
    Figure {
        id: Option<String>,
        caption: String,
        image_source: String,
        /// Source listing shown next to the figure.
        remark: Option<CodeBlock>,
    },
    /// Raw LaTeX of a display equation.
    MathBlock(String),
}

impl BlockNode {
    pub fn is_captured_output(&self) -> bool {
        matches!(self, BlockNode::Code(CodeBlock { is_output: true, .. }))
    }
}

impl Document {
    /// Direct structural children of the root.
    pub fn sections(&self) -> impl Iterator<Item = &StructuralNode> {
        self.children.iter().filter_map(Node::as_structural)
    }

    /// Counts structural nodes at every depth.
    pub fn structural_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|n| match n {
                    Node::Structural(s) => 1 + count(&s.children),
                    Node::Block(_) => 0,
                })
                .sum()
        }
        count(&self.children)
    }

    /// Counts block nodes at every depth.
    pub fn block_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|n| match n {
                    Node::Structural(s) => count(&s.children),
                    Node::Block(_) => 1,
                })
                .sum()
        }
        count(&self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_kinds_follow_heading_depth() {
        for depth in 0..4 {
            let kind = SectionKind::from_depth(depth).unwrap();
            assert_eq!(kind.depth(), depth);
        }
        assert_eq!(SectionKind::from_depth(4), None);
        assert!(SectionKind::Chapter < SectionKind::Subsubsection);
    }

    #[test]
    fn counts_walk_the_whole_tree() {
        let mut section = StructuralNode::new(SectionKind::Section, None, "A".into());
        section
            .children
            .push(Node::Block(BlockNode::Paragraph("x".into())));
        section.children.push(Node::Structural(StructuralNode::new(
            SectionKind::Subsection,
            None,
            "B".into(),
        )));
        let doc = Document {
            children: vec![
                Node::Block(BlockNode::Paragraph("intro".into())),
                Node::Structural(section),
            ],
        };

        assert_eq!(doc.structural_count(), 2);
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.sections().count(), 1);
    }

    #[test]
    fn captured_output_detection() {
        assert!(BlockNode::Code(CodeBlock::output("## [1] 2")).is_captured_output());
        assert!(!BlockNode::Code(CodeBlock::program("r", "1 + 1")).is_captured_output());
    }
}
