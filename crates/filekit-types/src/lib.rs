//! Value types for FileKit.
//!
//! Everything in this crate is a plain, immutable value. Nothing here touches
//! the filesystem; the `filekit` crate owns all I/O and returns new values
//! built from these types.
//!
//! # Key Types
//!
//! - [`File`] — a leaf name inside an owning [`Folder`], with optional content
//! - [`Folder`] — a location plus the entries found by the most recent load
//! - [`Attributes`] — opaque creation attributes passed through to the OS
//! - [`SearchPath`] — identifier of a platform special directory
//! - [`FileKitError`] — the closed set of operation failures

pub mod attributes;
pub mod error;
pub mod file;
pub mod folder;
pub mod search_path;

pub use attributes::Attributes;
pub use error::{ErrorKind, FileKitError, FileKitResult};
pub use file::File;
pub use folder::Folder;
pub use search_path::SearchPath;
