//! Typed filesystem access for files and folders.
//!
//! Callers describe "a file at this location with this content" as a
//! [`File`] value and hand it to a service; the service performs the I/O and
//! returns a new value or one [`FileKitError`] kind carrying the location
//! that failed.
//!
//! # Services
//!
//! All backends implement the [`FileSystemService`] trait:
//!
//! - [`FileKit`] -- blocking operations against the host filesystem
//! - [`AsyncFileKit`] -- the same operations run on a worker pool, with the
//!   outcome delivered to a callback through a [`CallbackQueue`]
//!
//! # Design Rules
//!
//! 1. Input values are never mutated; every operation returns a new value.
//! 2. Saving requires the owning folder to exist already.
//! 3. Operations share no state and take no locks.
//! 4. No retries, no partial progress, no cancellation.

pub mod async_kit;
pub mod config;
pub mod dispatch;
pub mod kit;
pub mod locations;
pub mod traits;

pub use async_kit::{AsyncFileKit, Completion};
pub use config::FileKitConfig;
pub use dispatch::{CallbackQueue, Job, LocalQueue, LocalQueueSender};
pub use kit::FileKit;
pub use locations::ResourceBundle;
pub use traits::FileSystemService;

pub use filekit_types::{
    Attributes, ErrorKind, File, FileKitError, FileKitResult, Folder, SearchPath,
};
