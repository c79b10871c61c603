//! Converts R Markdown / bookdown chapters into PreTeXt XML.
//!
//! [`convert`] runs the line-driven parser and returns the document tree
//! plus diagnostics; [`to_pretext`] serializes the tree. [`attach_outputs`]
//! optionally splices captured console output in after program blocks.

pub mod enrich;
pub mod io;
pub mod models;
pub mod options;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use enrich::{
    CapturedOutput, EnrichError, EnrichReport, attach_outputs, load_outputs, parse_outputs,
};
pub use io::{IoError, convert_file, read_source, write_document};
pub use models::document::*;
pub use options::{ChapterOptions, ConvertOptions};
pub use parsing::{Conversion, Converter, Diagnostics, convert, convert_lines};
pub use render::to_pretext;
