//! Lookups that produce [`Folder`] and [`File`] values from well-known places.
//!
//! None of these touch file contents. They only resolve a location, so the
//! values they return work with any [`FileSystemService`](crate::FileSystemService).

use std::path::{Path, PathBuf};

use tracing::debug;

use filekit_types::{File, FileKitError, FileKitResult, Folder, SearchPath};

/// Resolve a platform special directory for the current user.
pub fn path_to_folder(search_path: SearchPath) -> FileKitResult<PathBuf> {
    let path = match search_path {
        SearchPath::Caches => dirs::cache_dir(),
        SearchPath::Documents => dirs::document_dir(),
    };
    match path {
        Some(path) => Ok(path),
        None => {
            debug!(%search_path, "no platform directory for search path");
            Err(FileKitError::SearchPathNotFound(search_path))
        }
    }
}

pub fn folder(search_path: SearchPath) -> FileKitResult<Folder> {
    path_to_folder(search_path).map(Folder::new)
}

pub fn file_in_caches_folder(name: impl Into<String>, data: Option<Vec<u8>>) -> FileKitResult<File> {
    Ok(File::new(name, folder(SearchPath::Caches)?, data))
}

pub fn file_in_documents_folder(
    name: impl Into<String>,
    data: Option<Vec<u8>>,
) -> FileKitResult<File> {
    Ok(File::new(name, folder(SearchPath::Documents)?, data))
}

/// A folder value for `path`. Relative paths resolve against the current
/// working directory.
pub fn folder_from_path(path: impl AsRef<Path>) -> FileKitResult<Folder> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(Folder::new(path));
    }
    let cwd = std::env::current_dir().map_err(|_| FileKitError::failed_to_load(path))?;
    Ok(Folder::new(cwd.join(path)))
}

pub fn current_working_folder() -> FileKitResult<Folder> {
    std::env::current_dir()
        .map(Folder::new)
        .map_err(|_| FileKitError::failed_to_load("."))
}

/// A directory of packaged resources shipped alongside a program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The bundle containing the running executable.
    pub fn main() -> FileKitResult<Self> {
        let exe = std::env::current_exe().map_err(|_| FileKitError::failed_to_load("."))?;
        match exe.parent() {
            Some(dir) => Ok(Self::new(dir)),
            None => Err(FileKitError::failed_to_load(exe)),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The unloaded file `<resource>.<extension>`, optionally inside
    /// `subdirectory`. Fails with `FailedToLoad` if it is not in the bundle.
    pub fn file_for_resource(
        &self,
        resource: &str,
        extension: &str,
        subdirectory: Option<&str>,
    ) -> FileKitResult<File> {
        let folder = match subdirectory {
            Some(sub) => Folder::new(self.root.join(sub)),
            None => Folder::new(self.root.clone()),
        };
        let file = File::new(format!("{resource}.{extension}"), folder, None);
        let location = file.location();
        if !location.is_file() {
            debug!(path = %location.display(), "resource not found in bundle");
            return Err(FileKitError::failed_to_load(location));
        }
        Ok(file)
    }
}
