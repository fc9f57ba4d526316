use serde::{Deserialize, Serialize};

/// Creation attributes handed to the operating system unexamined.
///
/// FileKit never interprets these; they are applied to a newly created file
/// or directory where the platform supports them and ignored elsewhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    /// Unix permission bits (e.g. `0o644`). Ignored on non-Unix targets.
    #[serde(default)]
    pub permissions: Option<u32>,
}

impl Attributes {
    pub fn with_permissions(mode: u32) -> Self {
        Self {
            permissions: Some(mode),
        }
    }

    /// Returns `true` if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_none()
    }

    /// Fill unset fields from `defaults`.
    pub fn or(self, defaults: Attributes) -> Self {
        Self {
            permissions: self.permissions.or(defaults.permissions),
        }
    }
}
