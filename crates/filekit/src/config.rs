use serde::{Deserialize, Serialize};

use filekit_types::Attributes;

/// Configuration for [`FileKit`](crate::FileKit).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileKitConfig {
    /// Attributes applied to saved files when a call passes none.
    #[serde(default)]
    pub file_attributes: Attributes,
    /// Attributes applied to created folders when a call passes none.
    #[serde(default)]
    pub folder_attributes: Attributes,
}

impl FileKitConfig {
    /// Owner-only access: `0o600` files and `0o700` folders.
    pub fn private() -> Self {
        Self {
            file_attributes: Attributes::with_permissions(0o600),
            folder_attributes: Attributes::with_permissions(0o700),
        }
    }
}
