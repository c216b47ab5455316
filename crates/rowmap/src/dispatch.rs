//! Background execution of caller-supplied work on the tokio runtime.

use crate::error::{OrmError, OrmResult};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Submits futures to a tokio runtime.
///
/// There is no ordering between independently submitted tasks and no
/// cancellation once a task is running. After [`shutdown`](Self::shutdown)
/// new submissions fail; tasks already running are left to finish.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    handle: Handle,
    open: Arc<AtomicBool>,
}

impl Dispatcher {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Dispatcher on the runtime the caller is running in.
    pub fn current() -> OrmResult<Self> {
        let handle = Handle::try_current()
            .map_err(|e| OrmError::Other(format!("no tokio runtime: {}", e)))?;
        Ok(Self::new(handle))
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> OrmResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(OrmError::closed("dispatcher"))
        }
    }

    /// Run `work` in the background and return a handle to await its output.
    pub fn submit<F, T>(&self, work: F) -> OrmResult<TaskHandle<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.ensure_open()?;
        Ok(TaskHandle {
            inner: self.handle.spawn(work),
        })
    }

    /// Run `work` in the background without waiting for it.
    ///
    /// A panic inside `work` is logged at WARN.
    pub fn dispatch<F>(&self, work: F) -> OrmResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.ensure_open()?;
        let task = self.handle.spawn(work);
        self.handle.spawn(async move {
            if let Err(err) = task.await {
                tracing::warn!(target: "rowmap.dispatch", error = %err, "dispatched task failed");
            }
        });
        Ok(())
    }

    pub fn shutdown(&self) {
        self.open.store(false, Ordering::Release);
    }
}

/// Handle to a submitted task.
#[derive(Debug)]
pub struct TaskHandle<T> {
    inner: JoinHandle<T>,
}

impl<T> TaskHandle<T> {
    /// Wait for the task; a panic becomes [`OrmError::Task`].
    pub async fn wait(self) -> OrmResult<T> {
        self.inner.await.map_err(|e| OrmError::Task(e.to_string()))
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}
