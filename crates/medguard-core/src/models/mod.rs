//! Domain models for medguard.

mod matching;
mod records;
mod risk;
mod timeline;

pub use matching::*;
pub use records::*;
pub use risk::*;
pub use timeline::*;
