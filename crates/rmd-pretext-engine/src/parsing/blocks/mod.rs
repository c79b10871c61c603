//! # Block Parsing
//!
//! Two-phase block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line outside a fence becomes a
//!    `LineClass` (blank, fence open, heading, quote, list item, text, …)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` keeps the one
//!    pending block and emits finished `BlockNode`s when it is flushed
//!
//! ## Modules
//!
//! - **`kinds`**: block types with owned delimiters (CodeFence, BlockQuote, Heading, ...)
//! - **`classify`**: `MarkdownLineClassifier` produces a `LineClass` for each line
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - At most one block is pending; a different kind flushes it first
//! - Fenced code and `$$` math are raw zones: no classification inside
//! - A blank line ends paragraphs, lists and quotes but never a fence

pub mod builder;
pub mod classify;
pub mod kinds;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
