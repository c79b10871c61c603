//! Sink for turning section events and blocks into a [`Document`].

use crate::models::{BlockNode, Document, Node, StructuralNode};

use super::sections::SectionEvent;

/// Builds the document tree, keeping a stack of open structural nodes.
///
/// Open pushes, Close pops and attaches the finished node to its parent.
#[derive(Debug, Default)]
pub struct TreeSink {
    root: Vec<Node>,
    open: Vec<StructuralNode>,
}

impl TreeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: SectionEvent) {
        match event {
            SectionEvent::Open { kind, id, title } => {
                self.open.push(StructuralNode::new(kind, id, title));
            }
            SectionEvent::Close { kind } => {
                if let Some(node) = self.open.pop() {
                    debug_assert_eq!(node.kind, kind, "close does not match open");
                    self.attach(Node::Structural(node));
                }
            }
        }
    }

    /// Appends a block to the innermost open section, or the root.
    pub fn push_block(&mut self, block: BlockNode) {
        self.attach(Node::Block(block));
    }

    /// Consume the sink. Sections still open are closed innermost first.
    pub fn finish(mut self) -> Document {
        while let Some(node) = self.open.pop() {
            self.attach(Node::Structural(node));
        }
        Document {
            children: self.root,
        }
    }

    fn attach(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root.push(node),
        }
    }
}
