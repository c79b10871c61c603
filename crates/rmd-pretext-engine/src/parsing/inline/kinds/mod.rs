//! # Inline Kinds
//!
//! Inline constructs that own their delimiters and their PreTeXt encoding.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `` ` `` delimited, rendered as `<c>`
//! - **`Math`**: `$…$` and `$$…$$`, rendered as `<m>` / `<me>`
//! - **`Emphasis`**: `***`, `**`, `*` (and `_` spellings), rendered as `<term>` / `<em>`
//! - **`CrossRef`**: `\@ref(id)`, rendered as `<xref>`
//! - **`Footnote`**: `^[…]`, rendered as `<fn>`
//!
//! The passes in `super::passes` call into these; they never hardcode a
//! delimiter themselves.

pub mod code_span;
pub mod cross_ref;
pub mod emphasis;
pub mod footnote;
pub mod math;

pub use code_span::CodeSpan;
pub use cross_ref::CrossRef;
pub use emphasis::Emphasis;
pub use footnote::Footnote;
pub use math::Math;
