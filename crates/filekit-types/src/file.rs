use std::path::{is_separator, Component, Path, PathBuf};

use crate::folder::Folder;

/// A named file inside an owning folder, with optional content.
///
/// `data` of `None` means the content has not been loaded (or there is
/// none). Equality is structural: two files with the same location but
/// different data are not equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct File {
    name: String,
    folder: Folder,
    data: Option<Vec<u8>>,
}

impl File {
    /// Create a file value. `name` is the leaf component only.
    pub fn new(name: impl Into<String>, folder: Folder, data: Option<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            folder,
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folder(&self) -> &Folder {
        &self.folder
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Returns `true` if `name` is exactly one normal path component: not
    /// empty, no separators, not `.` or `..`, not absolute.
    pub fn has_leaf_name(&self) -> bool {
        if self.name.is_empty() || self.name.contains(is_separator) {
            return false;
        }
        let mut components = Path::new(&self.name).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }

    /// The owning folder's location joined with `name`.
    ///
    /// Only stays inside the folder when [`File::has_leaf_name`] holds.
    pub fn location(&self) -> PathBuf {
        self.folder.join(&self.name)
    }

    /// A copy of this file with different content.
    pub fn with_data(&self, data: Vec<u8>) -> Self {
        Self {
            name: self.name.clone(),
            folder: self.folder.clone(),
            data: Some(data),
        }
    }

    /// Consume the value, returning its content.
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.data
    }
}
