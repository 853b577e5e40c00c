//! Text processing: normalization, keyword extraction, canonicalization,
//! and section segmentation.

pub mod extract;
pub mod matcher;
pub mod normalize;
pub mod sections;
