//! Scanned-prescription text pipeline.
//!
//! This crate turns raw scanned text into match-ready medicine candidates:
//! text producer → line extraction → [`medguard_core`] fuzzy matching.
//! Nothing here writes to the timeline; every downstream match carries a
//! mandatory confirmation requirement.

pub mod extraction;
pub mod producer;

pub use extraction::*;
pub use producer::*;
