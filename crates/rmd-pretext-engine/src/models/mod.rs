pub mod document;

pub use document::{BlockNode, CodeBlock, Document, Node, SectionKind, StructuralNode};
