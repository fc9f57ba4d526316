use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::search_path::SearchPath;

/// Failures reported by FileKit operations.
///
/// Every operation fails with exactly one of these kinds. Lower-level I/O
/// errors are translated at the point of the call and never passed through.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FileKitError {
    /// The write failed or could not be completed.
    #[error("failed to save {}", path.display())]
    FailedToSave { path: PathBuf },

    /// The read returned no data, or the directory could not be enumerated.
    #[error("failed to load {}", path.display())]
    FailedToLoad { path: PathBuf },

    /// The entry could not be removed.
    #[error("failed to delete {}", path.display())]
    FailedToDelete { path: PathBuf },

    /// The directory (or one of its ancestors) could not be created.
    #[error("failed to create {}", path.display())]
    FailedToCreate { path: PathBuf },

    /// A save targeted a folder that does not exist yet.
    #[error("folder does not exist: {}", path.display())]
    FolderDoesNotExist { path: PathBuf },

    /// The platform has no location for the requested special directory.
    #[error("search path not found: {0}")]
    SearchPathNotFound(SearchPath),
}

/// Fieldless discriminant of [`FileKitError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FailedToSave,
    FailedToLoad,
    FailedToDelete,
    FailedToCreate,
    FolderDoesNotExist,
    SearchPathNotFound,
}

impl FileKitError {
    pub fn failed_to_save(path: impl Into<PathBuf>) -> Self {
        Self::FailedToSave { path: path.into() }
    }

    pub fn failed_to_load(path: impl Into<PathBuf>) -> Self {
        Self::FailedToLoad { path: path.into() }
    }

    pub fn failed_to_delete(path: impl Into<PathBuf>) -> Self {
        Self::FailedToDelete { path: path.into() }
    }

    pub fn failed_to_create(path: impl Into<PathBuf>) -> Self {
        Self::FailedToCreate { path: path.into() }
    }

    pub fn folder_does_not_exist(path: impl Into<PathBuf>) -> Self {
        Self::FolderDoesNotExist { path: path.into() }
    }

    /// The location that failed, if this kind carries one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FailedToSave { path }
            | Self::FailedToLoad { path }
            | Self::FailedToDelete { path }
            | Self::FailedToCreate { path }
            | Self::FolderDoesNotExist { path } => Some(path),
            Self::SearchPathNotFound(_) => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FailedToSave { .. } => ErrorKind::FailedToSave,
            Self::FailedToLoad { .. } => ErrorKind::FailedToLoad,
            Self::FailedToDelete { .. } => ErrorKind::FailedToDelete,
            Self::FailedToCreate { .. } => ErrorKind::FailedToCreate,
            Self::FolderDoesNotExist { .. } => ErrorKind::FolderDoesNotExist,
            Self::SearchPathNotFound(_) => ErrorKind::SearchPathNotFound,
        }
    }
}

/// Result alias for FileKit operations.
pub type FileKitResult<T> = Result<T, FileKitError>;
