use std::fmt;

use serde::{Deserialize, Serialize};

/// A platform-defined special directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPath {
    /// Per-user cache directory.
    Caches,
    /// Per-user documents directory.
    Documents,
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caches => write!(f, "caches"),
            Self::Documents => write!(f, "documents"),
        }
    }
}
