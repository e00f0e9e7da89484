//! Food catalog ingestion and lookup.
//!
//! Pipeline: Raw Records → Normalization (once, at ingestion) → In-memory Index

mod index;
mod normalizer;

pub use index::*;
pub use normalizer::*;
