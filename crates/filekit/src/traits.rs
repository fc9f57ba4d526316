use std::path::PathBuf;

use filekit_types::{Attributes, File, FileKitResult, Folder};

/// Create/save/load/delete of files and folders.
///
/// All implementations must satisfy these invariants:
/// - Input values are never mutated; loads return fresh values.
/// - Each failure is reported as exactly one `FileKitError` kind carrying
///   the location that failed.
/// - Calls are independent: no locks, no shared mutable state, no retries.
pub trait FileSystemService: Send + Sync {
    /// Create `folder` and any missing ancestors. Succeeds if it already
    /// exists as a directory.
    fn create(&self, folder: &Folder, attributes: Option<Attributes>) -> FileKitResult<PathBuf>;

    /// Write `file`'s data (empty if absent) to its location.
    ///
    /// Fails with `FolderDoesNotExist` if the owning folder is missing.
    fn save(&self, file: &File, attributes: Option<Attributes>) -> FileKitResult<PathBuf>;

    /// Read the bytes at `file`'s location into a new file value.
    fn load_file(&self, file: &File) -> FileKitResult<File>;

    /// Enumerate the immediate children of `folder` (non-recursive).
    ///
    /// Entry order is whatever the platform reports.
    fn load_folder(&self, folder: &Folder) -> FileKitResult<Folder>;

    /// Remove the single entry at `file`'s location.
    fn delete_file(&self, file: &File) -> FileKitResult<PathBuf>;

    /// Remove `folder` and everything beneath it.
    fn delete_folder(&self, folder: &Folder) -> FileKitResult<PathBuf>;
}
