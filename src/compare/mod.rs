//! Pairwise comparison engine.
//!
//! [`similarity`] scores body text, [`differences`] extracts structural
//! deltas and [`comparator`] combines both with the engagement delta for
//! every unordered page pair.

pub mod comparator;
pub mod differences;
pub mod sequence;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use comparator::{compare, compare_pair, compare_strict, pair_indices};
pub use differences::{heading_changes, key_differences};
pub use sequence::SequenceMatcher;
pub use similarity::content_similarity;
