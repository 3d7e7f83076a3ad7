//! HTML extraction modules
//!
//! Declared Open Graph tags come first; body scrapers fill the gaps.

mod body_extractor;
mod opengraph_extractor;

pub use body_extractor::*;
pub use opengraph_extractor::*;
