pub mod block_quote;
pub mod code_fence;
pub mod display_math;
pub mod figure;
pub mod heading;
pub mod list_item;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceInfo, FenceKind, FenceParams, FenceSig};
pub use display_math::DisplayMath;
pub use figure::FigureChunk;
pub use heading::{Heading, HeadingLine, MalformedHeading};
pub use list_item::ListItem;
