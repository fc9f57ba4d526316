//! Execution contexts for asynchronous completions.
//!
//! A [`CallbackQueue`] decides where a completion runs. The worker pool never
//! runs completions itself; it hands each one to the queue chosen by the
//! caller.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::warn;

/// A unit of work scheduled on a callback queue.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// An execution context that completions are delivered on.
pub trait CallbackQueue: Send + Sync {
    /// Schedule `job` to run on this context. Must not run it inline.
    fn dispatch(&self, job: Job);
}

/// Runs each job as a task on the runtime.
impl CallbackQueue for Handle {
    fn dispatch(&self, job: Job) {
        self.spawn(async move { job() });
    }
}

/// A queue drained explicitly by the thread that owns it.
///
/// Jobs accumulate until the owner calls one of the `run_*` methods, so
/// completions run on that thread and nowhere else.
pub struct LocalQueue {
    sender: mpsc::UnboundedSender<Job>,
    receiver: mpsc::UnboundedReceiver<Job>,
}

/// The sending side of a [`LocalQueue`], handed to the service.
#[derive(Clone, Debug)]
pub struct LocalQueueSender {
    sender: mpsc::UnboundedSender<Job>,
}

impl LocalQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> LocalQueueSender {
        LocalQueueSender {
            sender: self.sender.clone(),
        }
    }

    /// Run every job already queued without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Block the current thread until a job arrives, then run it.
    ///
    /// Must not be called from within an async runtime.
    pub fn run_one_blocking(&mut self) {
        if let Some(job) = self.receiver.blocking_recv() {
            job();
        }
    }

    /// Wait for the next job and run it.
    pub async fn run_one(&mut self) {
        if let Some(job) = self.receiver.recv().await {
            job();
        }
    }
}

impl Default for LocalQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocalQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalQueue").finish_non_exhaustive()
    }
}

impl CallbackQueue for LocalQueueSender {
    fn dispatch(&self, job: Job) {
        if self.sender.send(job).is_err() {
            warn!("local queue dropped; completion discarded");
        }
    }
}
