use std::path::{Path, PathBuf};

use crate::file::File;

/// A directory location and the entries discovered by the most recent load.
///
/// A folder built with [`Folder::new`] has no entries regardless of what is
/// on disk; only a load through the service observes children. `files` is
/// derived from `entries` and always has one unloaded [`File`] per entry.
#[derive(Clone, Debug)]
pub struct Folder {
    location: PathBuf,
    entries: Vec<PathBuf>,
    files: Vec<File>,
}

impl Folder {
    /// A bare folder value at `location`.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            entries: Vec::new(),
            files: Vec::new(),
        }
    }

    /// A folder value holding the given child locations, in the given order.
    ///
    /// Each entry gets a [`File`] named after its last path component, owned
    /// by a bare folder at `location`, with no data.
    pub fn with_entries(location: impl Into<PathBuf>, entries: Vec<PathBuf>) -> Self {
        let location = location.into();
        let files = entries
            .iter()
            .map(|entry| File::new(leaf_name(entry), Folder::new(location.clone()), None))
            .collect();
        Self {
            location,
            entries,
            files,
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Child locations found by the most recent load.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// One unloaded file value per entry.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// Location of a child named `name`.
    pub fn join(&self, name: &str) -> PathBuf {
        self.location.join(name)
    }

    /// A subfolder value named `name`.
    pub fn subfolder(&self, name: &str) -> Folder {
        Folder::new(self.join(name))
    }
}

impl PartialEq for Folder {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.entries == other.entries
    }
}

impl Eq for Folder {}

impl From<PathBuf> for Folder {
    fn from(location: PathBuf) -> Self {
        Self::new(location)
    }
}

impl From<&Path> for Folder {
    fn from(location: &Path) -> Self {
        Self::new(location)
    }
}

fn leaf_name(entry: &Path) -> String {
    match entry.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => entry.to_string_lossy().into_owned(),
    }
}
