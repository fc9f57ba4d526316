use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::debug;

use filekit_types::{Attributes, File, FileKitResult, Folder};

use crate::dispatch::CallbackQueue;
use crate::kit::FileKit;
use crate::traits::FileSystemService;

/// Receives the outcome of an asynchronous operation, exactly once.
pub type Completion<T> = Box<dyn FnOnce(FileKitResult<T>) + Send + 'static>;

/// Callback-driven form of a [`FileSystemService`].
///
/// Each call returns immediately. The work runs on the worker runtime's
/// blocking pool, and the outcome is handed to the callback queue, which
/// defaults to the runtime the `AsyncFileKit` was built on. Completions are
/// never run inline or on the worker thread. Operations cannot be cancelled
/// once submitted, and two submissions have no ordering between them.
///
/// Completions are optional for `create`, `save` and the deletes, where the
/// outcome is discarded when absent. Loads always take one.
pub struct AsyncFileKit<S = FileKit> {
    service: Arc<S>,
    worker: Handle,
    callbacks: Arc<dyn CallbackQueue>,
}

impl AsyncFileKit<FileKit> {
    /// A default [`FileKit`] whose work runs on `worker`.
    pub fn new(worker: Handle) -> Self {
        Self::with_service(FileKit::new(), worker)
    }
}

impl<S: FileSystemService + 'static> AsyncFileKit<S> {
    /// Wrap `service`. Completions go to the runtime the caller is on, or to
    /// `worker` when called outside a runtime.
    pub fn with_service(service: S, worker: Handle) -> Self {
        let callbacks = Handle::try_current().unwrap_or_else(|_| worker.clone());
        Self {
            service: Arc::new(service),
            worker,
            callbacks: Arc::new(callbacks),
        }
    }

    /// Deliver completions on `queue` instead.
    pub fn with_callback_queue(mut self, queue: impl CallbackQueue + 'static) -> Self {
        self.callbacks = Arc::new(queue);
        self
    }

    /// The wrapped blocking service.
    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn create(
        &self,
        folder: Folder,
        attributes: Option<Attributes>,
        completion: Option<Completion<PathBuf>>,
    ) {
        self.submit("create", move |s| s.create(&folder, attributes), completion);
    }

    pub fn save(
        &self,
        file: File,
        attributes: Option<Attributes>,
        completion: Option<Completion<PathBuf>>,
    ) {
        self.submit("save", move |s| s.save(&file, attributes), completion);
    }

    pub fn load_file<F>(&self, file: File, completion: F)
    where
        F: FnOnce(FileKitResult<File>) + Send + 'static,
    {
        let completion: Completion<File> = Box::new(completion);
        self.submit("load_file", move |s| s.load_file(&file), Some(completion));
    }

    pub fn load_folder<F>(&self, folder: Folder, completion: F)
    where
        F: FnOnce(FileKitResult<Folder>) + Send + 'static,
    {
        let completion: Completion<Folder> = Box::new(completion);
        self.submit("load_folder", move |s| s.load_folder(&folder), Some(completion));
    }

    pub fn delete_file(&self, file: File, completion: Option<Completion<PathBuf>>) {
        self.submit("delete_file", move |s| s.delete_file(&file), completion);
    }

    pub fn delete_folder(&self, folder: Folder, completion: Option<Completion<PathBuf>>) {
        self.submit("delete_folder", move |s| s.delete_folder(&folder), completion);
    }

    /// Run `work` on the blocking pool, then hand the outcome to the
    /// callback queue. Any file handle opened by `work` is closed before the
    /// outcome is dispatched.
    fn submit<T, W>(&self, operation: &'static str, work: W, completion: Option<Completion<T>>)
    where
        T: Send + 'static,
        W: FnOnce(&S) -> FileKitResult<T> + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let callbacks = Arc::clone(&self.callbacks);
        debug!(operation, "submitting to worker pool");

        self.worker.spawn_blocking(move || {
            let outcome = work(&service);
            match completion {
                Some(completion) => callbacks.dispatch(Box::new(move || completion(outcome))),
                None => {
                    if let Err(error) = outcome {
                        debug!(operation, %error, "no completion; outcome discarded");
                    }
                }
            }
        });
    }
}

impl<S> std::fmt::Debug for AsyncFileKit<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncFileKit").finish_non_exhaustive()
    }
}
