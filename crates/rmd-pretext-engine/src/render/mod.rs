//! # PreTeXt Serialization
//!
//! Writes a [`Document`] as PreTeXt XML, two spaces per nesting level.
//!
//! Inline strings in the tree are already markup and are written as-is.
//! Code is wrapped in CDATA with its lines at column zero so whitespace
//! survives exactly; display math goes through the same verbatim-or-CDATA
//! rule as inline math.

use html_escape::encode_double_quoted_attribute;

use crate::{
    models::{BlockNode, CodeBlock, Document, Node, StructuralNode},
    parsing::inline::{escape::cdata, kinds::Math},
};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>"#;
const INDENT: &str = "  ";

/// Serializes the whole document, XML declaration included.
pub fn to_pretext(doc: &Document) -> String {
    let mut w = PretextWriter::default();
    w.line(XML_DECLARATION);
    w.blank();
    for node in &doc.children {
        w.node(node);
    }
    w.out
}

#[derive(Default)]
struct PretextWriter {
    out: String,
    depth: usize,
}

impl PretextWriter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.line(&format!("<{tag}>"));
        self.depth += 1;
    }

    /// Opens `tag`, with `name="value"` when a value is given.
    fn open_with(&mut self, tag: &str, name: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                self.line(&format!(
                    r#"<{tag} {name}="{}">"#,
                    encode_double_quoted_attribute(value)
                ));
                self.depth += 1;
            }
            None => self.open(tag),
        }
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{tag}>"));
    }

    /// `<tag>content</tag>` on one line.
    fn element(&mut self, tag: &str, content: &str) {
        self.line(&format!("<{tag}>{content}</{tag}>"));
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::Structural(section) => self.section(section),
            Node::Block(block) => self.block(block),
        }
    }

    fn section(&mut self, section: &StructuralNode) {
        let tag = section.kind.tag();
        self.open_with(tag, "xml:id", section.id.as_deref());
        self.element("title", &section.title);
        for child in &section.children {
            self.node(child);
        }
        self.close(tag);
    }

    fn block(&mut self, block: &BlockNode) {
        match block {
            BlockNode::Paragraph(content) => self.element("p", content),
            BlockNode::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                self.open(tag);
                for item in items {
                    self.line(&format!("<li><p>{item}</p></li>"));
                }
                self.close(tag);
            }
            BlockNode::Blockquote {
                content,
                attribution,
            } => {
                self.open("blockquote");
                self.element("p", content);
                if let Some(attribution) = attribution {
                    self.element("attribution", attribution);
                }
                self.close("blockquote");
            }
            BlockNode::Code(code) => self.code(code),
            BlockNode::Figure {
                id,
                caption,
                image_source,
                remark,
            } => {
                self.open_with("figure", "xml:id", id.as_deref());
                self.element("caption", caption);
                self.line(&format!(
                    r#"<image source="{}"/>"#,
                    encode_double_quoted_attribute(image_source)
                ));
                self.close("figure");

                if let Some(code) = remark {
                    self.open("remark");
                    self.element("title", &remark_title(code));
                    self.code(code);
                    self.close("remark");
                }
            }
            BlockNode::MathBlock(latex) => {
                self.open("p");
                self.line(&Math::display(latex));
                self.close("p");
            }
        }
    }

    fn code(&mut self, code: &CodeBlock) {
        match (&code.language, code.is_output) {
            (Some(language), false) => {
                self.open_with("program", "language", Some(language.as_str()));
                self.element("input", &code_body(&code.source));
                self.close("program");
            }
            _ => {
                self.open("console");
                self.element("output", &code_body(&code.source));
                self.close("console");
            }
        }
    }
}

/// Body text for `<input>`/`<output>`: CDATA starting on its own line and
/// ending right before the closing tag.
fn code_body(source: &str) -> String {
    let source = source.trim_end_matches('\n');
    if source.is_empty() {
        return String::new();
    }
    cdata(&format!("\n{source}\n"))
}

/// "R Code", "Python Code", ...
fn remark_title(code: &CodeBlock) -> String {
    let language = code.language.as_deref().unwrap_or("r");
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => format!("{}{} Code", first.to_uppercase(), chars.as_str()),
        None => "Code".to_string(),
    }
}
