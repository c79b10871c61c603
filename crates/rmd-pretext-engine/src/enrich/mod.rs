//! # Output Enrichment
//!
//! Attaches previously captured console output to the program blocks that
//! produced it. Runs on a finished [`Document`], after conversion.
//!
//! Pairs are matched on whitespace-normalized source: a program matches a
//! pair when either normalized text equals or contains the other. The
//! output goes in as the program's next sibling, unless a captured output
//! is already there.
//!
//! Pairs come from a TOML file:
//!
//! ```toml
//! [[outputs]]
//! code = "mean(c(1, 2))"
//! output = "## [1] 1.5"
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BlockNode, CodeBlock, Document, Node};

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Failed to read outputs file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse outputs: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One program source and the console output it printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedOutput {
    pub code: String,
    pub output: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OutputsFile {
    #[serde(default)]
    outputs: Vec<CapturedOutput>,
}

/// What [`attach_outputs`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub attached: usize,
    /// Matches whose program already had an output after it.
    pub skipped_existing: usize,
    /// Programs no pair matched.
    pub unmatched: usize,
}

pub fn load_outputs<P: AsRef<Path>>(path: P) -> Result<Vec<CapturedOutput>, EnrichError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| EnrichError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_outputs(&content)
}

pub fn parse_outputs(content: &str) -> Result<Vec<CapturedOutput>, EnrichError> {
    let file: OutputsFile = toml::from_str(content)?;
    Ok(file.outputs)
}

/// Inserts a captured-output block after every program that matches a pair.
pub fn attach_outputs(doc: &mut Document, outputs: &[CapturedOutput]) -> EnrichReport {
    let pairs: Vec<(String, &CapturedOutput)> = outputs
        .iter()
        .map(|pair| (normalize(&pair.code), pair))
        .filter(|(code, _)| !code.is_empty())
        .collect();

    let mut report = EnrichReport::default();
    attach_in(&mut doc.children, &pairs, &mut report);
    debug!(
        "Attached {} outputs ({} already present, {} programs unmatched)",
        report.attached, report.skipped_existing, report.unmatched
    );
    report
}

fn attach_in(children: &mut Vec<Node>, pairs: &[(String, &CapturedOutput)], report: &mut EnrichReport) {
    let mut i = 0;
    while i < children.len() {
        let source = match &mut children[i] {
            Node::Structural(section) => {
                attach_in(&mut section.children, pairs, report);
                None
            }
            Node::Block(BlockNode::Code(CodeBlock {
                source,
                is_output: false,
                language: Some(_),
            })) => Some(normalize(source)),
            Node::Block(_) => None,
        };

        if let Some(source) = source.filter(|s| !s.is_empty()) {
            match find_output(&source, pairs) {
                Some(_) if has_output_after(children, i) => report.skipped_existing += 1,
                Some(pair) => {
                    let output = pair.output.trim_end_matches('\n');
                    children.insert(i + 1, Node::Block(BlockNode::Code(CodeBlock::output(output))));
                    report.attached += 1;
                    i += 1;
                }
                None => report.unmatched += 1,
            }
        }
        i += 1;
    }
}

fn find_output<'a>(source: &str, pairs: &[(String, &'a CapturedOutput)]) -> Option<&'a CapturedOutput> {
    pairs
        .iter()
        .find(|(code, _)| source == code || source.contains(code.as_str()) || code.contains(source))
        .map(|(_, pair)| *pair)
}

fn has_output_after(children: &[Node], i: usize) -> bool {
    matches!(children.get(i + 1), Some(Node::Block(block)) if block.is_captured_output())
}

/// Collapses every whitespace run to one space.
fn normalize(code: &str) -> String {
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}
