use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use filekit_types::{Attributes, File, FileKitError, FileKitResult, Folder};

use crate::config::FileKitConfig;
use crate::traits::FileSystemService;

/// Blocking filesystem service backed by `std::fs`.
///
/// Every call runs on the caller's thread and returns once the underlying
/// system call has completed. Saving is strict: the owning folder must
/// already exist, otherwise the save fails with `FolderDoesNotExist` and
/// nothing is written. Use [`FileSystemService::create`] first.
#[derive(Clone, Debug, Default)]
pub struct FileKit {
    config: FileKitConfig,
}

impl FileKit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FileKitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FileKitConfig {
        &self.config
    }
}

/// Log the OS error and translate it into a taxonomy kind for `location`.
fn translate<F>(location: &Path, err: io::Error, kind: F) -> FileKitError
where
    F: FnOnce(PathBuf) -> FileKitError,
{
    let error = kind(location.to_path_buf());
    warn!(path = %location.display(), os_error = %err, "{error}");
    error
}

/// Reject names that would address an entry outside the owning folder.
fn require_leaf_name<F>(file: &File, kind: F) -> FileKitResult<()>
where
    F: FnOnce(PathBuf) -> FileKitError,
{
    if file.has_leaf_name() {
        return Ok(());
    }
    warn!(
        name = file.name(),
        folder = %file.folder().location().display(),
        "file name is not a single path component"
    );
    Err(kind(file.location()))
}

#[cfg(unix)]
fn apply_permissions(handle: &fs::File, attributes: Attributes) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = attributes.permissions {
        handle.set_permissions(fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_permissions(_handle: &fs::File, _attributes: Attributes) -> io::Result<()> {
    Ok(())
}

fn dir_builder(attributes: Attributes) -> fs::DirBuilder {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        if let Some(mode) = attributes.permissions {
            builder.mode(mode);
        }
    }
    #[cfg(not(unix))]
    let _ = attributes;
    builder
}

impl FileSystemService for FileKit {
    fn create(&self, folder: &Folder, attributes: Option<Attributes>) -> FileKitResult<PathBuf> {
        let location = folder.location();
        let attributes = attributes
            .unwrap_or_default()
            .or(self.config.folder_attributes);
        debug!(path = %location.display(), "creating folder");

        dir_builder(attributes)
            .create(location)
            .map_err(|e| translate(location, e, FileKitError::failed_to_create))?;
        Ok(location.to_path_buf())
    }

    fn save(&self, file: &File, attributes: Option<Attributes>) -> FileKitResult<PathBuf> {
        let location = file.location();
        let folder = file.folder().location();
        let attributes = attributes.unwrap_or_default().or(self.config.file_attributes);
        debug!(path = %location.display(), bytes = file.data().map_or(0, <[u8]>::len), "saving file");

        require_leaf_name(file, FileKitError::failed_to_save)?;
        if !folder.is_dir() {
            warn!(path = %folder.display(), "refusing to save into a missing folder");
            return Err(FileKitError::folder_does_not_exist(folder));
        }

        let data = file.data().unwrap_or_default();
        let written = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&location)
            .and_then(|mut handle| {
                handle.write_all(data)?;
                handle.flush()?;
                apply_permissions(&handle, attributes)
            });
        written.map_err(|e| translate(&location, e, FileKitError::failed_to_save))?;
        Ok(location)
    }

    fn load_file(&self, file: &File) -> FileKitResult<File> {
        let location = file.location();
        debug!(path = %location.display(), "loading file");
        require_leaf_name(file, FileKitError::failed_to_load)?;

        let data =
            fs::read(&location).map_err(|e| translate(&location, e, FileKitError::failed_to_load))?;
        Ok(file.with_data(data))
    }

    fn load_folder(&self, folder: &Folder) -> FileKitResult<Folder> {
        let location = folder.location();
        debug!(path = %location.display(), "loading folder");

        let entries = fs::read_dir(location)
            .and_then(|dir| {
                dir.map(|entry| entry.map(|e| e.path()))
                    .collect::<io::Result<Vec<_>>>()
            })
            .map_err(|e| translate(location, e, FileKitError::failed_to_load))?;
        debug!(path = %location.display(), entries = entries.len(), "folder loaded");
        Ok(Folder::with_entries(location, entries))
    }

    fn delete_file(&self, file: &File) -> FileKitResult<PathBuf> {
        let location = file.location();
        debug!(path = %location.display(), "deleting file");
        require_leaf_name(file, FileKitError::failed_to_delete)?;

        fs::remove_file(&location)
            .map_err(|e| translate(&location, e, FileKitError::failed_to_delete))?;
        Ok(location)
    }

    fn delete_folder(&self, folder: &Folder) -> FileKitResult<PathBuf> {
        let location = folder.location();
        debug!(path = %location.display(), "deleting folder");

        fs::remove_dir_all(location)
            .map_err(|e| translate(location, e, FileKitError::failed_to_delete))?;
        Ok(location.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filekit_types::ErrorKind;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn sandbox() -> (TempDir, Folder) {
        let dir = TempDir::new().unwrap();
        let folder = Folder::new(dir.path().join("filekit"));
        (dir, folder)
    }

    fn hello(folder: &Folder, name: &str) -> File {
        File::new(name, folder.clone(), Some(b"Hello World".to_vec()))
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    #[test]
    fn create_makes_intermediate_folders() {
        let (dir, _) = sandbox();
        let kit = FileKit::new();
        let nested = Folder::new(dir.path().join("a").join("b").join("c"));
        let location = kit.create(&nested, None).unwrap();
        assert_eq!(location, nested.location());
        assert!(nested.location().is_dir());
    }

    #[test]
    fn create_is_idempotent() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();
        kit.create(&folder, None).unwrap();
        assert!(folder.location().is_dir());
    }

    #[test]
    fn create_under_a_regular_file_fails() {
        let (dir, _) = sandbox();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let folder = Folder::new(blocker.join("child"));
        let err = FileKit::new().create(&folder, None).unwrap_err();
        assert_eq!(err, FileKitError::failed_to_create(folder.location()));
    }

    // -----------------------------------------------------------------------
    // Save / Load
    // -----------------------------------------------------------------------

    #[test]
    fn save_then_load_roundtrip() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();

        let file = hello(&folder, "file.txt");
        let location = kit.save(&file, None).unwrap();
        assert_eq!(location, file.location());

        let loaded = kit.load_file(&file).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn save_without_data_writes_empty_file() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();

        let file = File::new("empty.txt", folder.clone(), None);
        kit.save(&file, None).unwrap();
        let loaded = kit.load_file(&file).unwrap();
        assert_eq!(loaded.data(), Some(&[][..]));
    }

    #[test]
    fn save_overwrites_existing_content() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();

        kit.save(&hello(&folder, "file.txt"), None).unwrap();
        let shorter = File::new("file.txt", folder.clone(), Some(b"Hi".to_vec()));
        kit.save(&shorter, None).unwrap();
        assert_eq!(kit.load_file(&shorter).unwrap(), shorter);
    }

    #[test]
    fn save_into_missing_folder_fails() {
        let (_dir, folder) = sandbox();
        let file = hello(&folder, "file.txt");
        let err = FileKit::new().save(&file, None).unwrap_err();
        assert_eq!(err, FileKitError::folder_does_not_exist(folder.location()));
        assert!(!file.location().exists());
    }

    #[test]
    fn save_onto_a_directory_fails() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder.subfolder("taken"), None).unwrap();

        let file = hello(&folder, "taken");
        let err = kit.save(&file, None).unwrap_err();
        assert_eq!(err, FileKitError::failed_to_save(file.location()));
    }

    #[test]
    fn save_rejects_absolute_name() {
        let (_dir, folder) = sandbox();
        let outside = TempDir::new().unwrap();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();

        let escaped = outside.path().join("escaped.txt");
        let file = File::new(escaped.to_string_lossy(), folder.clone(), Some(b"x".to_vec()));
        let err = kit.save(&file, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedToSave);
        assert!(!escaped.exists());
    }

    #[test]
    fn save_rejects_name_with_separator() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();
        kit.create(&folder.subfolder("a"), None).unwrap();

        let file = File::new("a/b.txt", folder.clone(), Some(b"x".to_vec()));
        let err = kit.save(&file, None).unwrap_err();
        assert_eq!(err, FileKitError::failed_to_save(folder.join("a/b.txt")));
        assert!(!folder.join("a/b.txt").exists());
    }

    #[test]
    fn non_leaf_name_beats_missing_folder() {
        let (_dir, folder) = sandbox();
        let file = File::new("a/b.txt", folder, Some(b"x".to_vec()));
        let err = FileKit::new().save(&file, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedToSave);
    }

    #[test]
    fn load_and_delete_reject_non_leaf_names() {
        let (_dir, folder) = sandbox();
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("keep.txt");
        fs::write(&target, b"keep").unwrap();

        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();
        let file = File::new(target.to_string_lossy(), folder, None);

        assert_eq!(kit.load_file(&file).unwrap_err().kind(), ErrorKind::FailedToLoad);
        assert_eq!(kit.delete_file(&file).unwrap_err().kind(), ErrorKind::FailedToDelete);
        assert!(target.exists());
    }

    #[test]
    fn load_missing_file_fails() {
        let (_dir, folder) = sandbox();
        let file = File::new("nope.txt", folder, None);
        let err = FileKit::new().load_file(&file).unwrap_err();
        assert_eq!(err, FileKitError::failed_to_load(file.location()));
    }

    #[test]
    fn load_does_not_touch_the_input() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();
        kit.save(&hello(&folder, "file.txt"), None).unwrap();

        let unloaded = File::new("file.txt", folder, None);
        let loaded = kit.load_file(&unloaded).unwrap();
        assert!(unloaded.data().is_none());
        assert_ne!(unloaded, loaded);
    }

    // -----------------------------------------------------------------------
    // Folder enumeration
    // -----------------------------------------------------------------------

    #[test]
    fn load_folder_lists_saved_files() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();
        kit.save(&hello(&folder, "file.txt"), None).unwrap();
        kit.save(&hello(&folder, "file1.txt"), None).unwrap();

        let loaded = kit.load_folder(&folder).unwrap();
        assert_eq!(loaded.files().len(), 2);
        assert_eq!(loaded.entries().len(), 2);

        let names: HashSet<_> = loaded.files().iter().map(|f| f.name().to_owned()).collect();
        assert_eq!(names, HashSet::from(["file.txt".to_owned(), "file1.txt".to_owned()]));
        for file in loaded.files() {
            assert!(file.data().is_none());
            assert_eq!(file.folder(), &folder);
        }
    }

    #[test]
    fn load_folder_is_not_recursive() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        let child = folder.subfolder("child");
        kit.create(&child, None).unwrap();
        kit.save(&hello(&child, "deep.txt"), None).unwrap();

        let loaded = kit.load_folder(&folder).unwrap();
        assert_eq!(loaded.entries(), [child.location().to_path_buf()]);
    }

    #[test]
    fn constructed_folder_stays_empty_until_loaded() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();
        kit.save(&hello(&folder, "file.txt"), None).unwrap();
        assert!(folder.entries().is_empty());
        assert_ne!(kit.load_folder(&folder).unwrap(), folder);
    }

    #[test]
    fn load_missing_folder_fails() {
        let (_dir, folder) = sandbox();
        let err = FileKit::new().load_folder(&folder).unwrap_err();
        assert_eq!(err, FileKitError::failed_to_load(folder.location()));
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_then_load_fails() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();
        let file = hello(&folder, "file.txt");
        kit.save(&file, None).unwrap();

        assert_eq!(kit.delete_file(&file).unwrap(), file.location());
        let err = kit.load_file(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FailedToLoad);
    }

    #[test]
    fn delete_missing_file_fails() {
        let (_dir, folder) = sandbox();
        let file = File::new("ghost.txt", folder, None);
        let err = FileKit::new().delete_file(&file).unwrap_err();
        assert_eq!(err, FileKitError::failed_to_delete(file.location()));
    }

    #[test]
    fn delete_folder_is_recursive() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        let child = folder.subfolder("child");
        kit.create(&child, None).unwrap();
        kit.save(&hello(&folder, "file.txt"), None).unwrap();
        kit.save(&hello(&child, "deep.txt"), None).unwrap();

        assert_eq!(kit.delete_folder(&folder).unwrap(), folder.location());
        assert!(!folder.location().exists());
    }

    #[test]
    fn delete_missing_folder_fails() {
        let (_dir, folder) = sandbox();
        let err = FileKit::new().delete_folder(&folder).unwrap_err();
        assert_eq!(err, FileKitError::failed_to_delete(folder.location()));
    }

    // -----------------------------------------------------------------------
    // Attributes
    // -----------------------------------------------------------------------

    #[cfg(unix)]
    #[test]
    fn explicit_attributes_set_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, Some(Attributes::with_permissions(0o700)))
            .unwrap();
        let file = hello(&folder, "secret.txt");
        kit.save(&file, Some(Attributes::with_permissions(0o600)))
            .unwrap();

        let dir_mode = fs::metadata(folder.location()).unwrap().permissions().mode();
        let file_mode = fs::metadata(file.location()).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o777, 0o700);
        assert_eq!(file_mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn configured_attributes_apply_by_default() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, folder) = sandbox();
        let kit = FileKit::with_config(FileKitConfig::private());
        kit.create(&folder, None).unwrap();
        let file = hello(&folder, "file.txt");
        kit.save(&file, None).unwrap();

        let file_mode = fs::metadata(file.location()).unwrap().permissions().mode();
        assert_eq!(file_mode & 0o777, 0o600);
    }

    // -----------------------------------------------------------------------
    // End to end
    // -----------------------------------------------------------------------

    #[test]
    fn create_save_load_delete_scenario() {
        let (_dir, folder) = sandbox();
        let kit = FileKit::new();
        kit.create(&folder, None).unwrap();

        let file = hello(&folder, "file.txt");
        kit.save(&file, None).unwrap();

        let loaded = kit.load_file(&file).unwrap();
        let text = String::from_utf8(loaded.into_data().unwrap()).unwrap();
        assert_eq!(text, "Hello World");

        kit.delete_file(&file).unwrap();
        let err = kit.load_file(&file).unwrap_err();
        assert_eq!(err, FileKitError::failed_to_load(file.location()));
    }
}
