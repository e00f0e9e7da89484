//! Error classification shared by the engine modules.

use serde::{Deserialize, Serialize};

/// Which class of rejection an operation failed with.
///
/// Only these two classes are ever surfaced to callers. Catalog data gaps
/// and lookup misses are absorbed where they occur.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input (bad index, wrong sequence, bad configuration)
    Validation,
    /// Operation not allowed in the current state
    State,
}
