//! Run a blocking query on its own thread and hand back exactly one result.
//!
//! One thread per call, no pool. There is no cancellation and no timeout: a
//! hung statfs on a dead network mount blocks its worker indefinitely.

use crate::error::{Error, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::warn;

/// The receiving end of one offloaded query.
#[derive(Debug)]
pub struct Pending<T> {
    rx: Receiver<Result<T>>,
}

impl<T> Pending<T> {
    /// Block until the worker finishes.
    pub fn wait(self) -> Result<T> {
        self.rx.recv().unwrap_or(Err(Error::WorkerLost))
    }

    /// Non-blocking poll. `None` while the worker is still running.
    pub fn try_take(&self) -> Option<Result<T>> {
        match self.rx.try_recv() {
            Ok(result)                       => Some(result),
            Err(TryRecvError::Empty)         => None,
            Err(TryRecvError::Disconnected)  => Some(Err(Error::WorkerLost)),
        }
    }
}

/// Start `op` on a fresh worker thread.
pub fn spawn<T, F>(name: &str, op: F) -> Pending<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);
    let spawned = thread::Builder::new()
        .name(format!("nixfs-{}", name))
        .spawn(move || {
            let _ = tx.send(run_guarded(op));
        });
    if let Err(e) = spawned {
        warn!("failed to spawn worker for {}: {}", name, e);
    }
    // On spawn failure the sender is dropped with the closure and
    // `wait` reports WorkerLost.
    Pending { rx }
}

/// Callback form: `done` runs exactly once with the single result.
///
/// It normally runs on the worker thread. If the worker cannot be started it
/// runs on the caller's thread with `Err(WorkerLost)`.
pub fn dispatch<T, F, C>(name: &str, op: F, done: C)
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
    C: FnOnce(Result<T>) + Send + 'static,
{
    let slot = Arc::new(Mutex::new(Some(done)));
    let worker_slot = Arc::clone(&slot);

    let spawned = thread::Builder::new()
        .name(format!("nixfs-{}", name))
        .spawn(move || {
            let result = run_guarded(op);
            if let Some(done) = take(&worker_slot) {
                done(result);
            }
        });
    if let Err(e) = spawned {
        warn!("failed to spawn worker for {}: {}", name, e);
        if let Some(done) = take(&slot) {
            done(Err(Error::WorkerLost));
        }
    }
}

/// Run `op`, turning a panic into `Err(WorkerLost)`.
fn run_guarded<T, F: FnOnce() -> Result<T>>(op: F) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or(Err(Error::WorkerLost))
}

fn take<C>(slot: &Mutex<Option<C>>) -> Option<C> {
    match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::time::Duration;

    #[test]
    fn wait_returns_the_value() {
        assert_eq!(spawn("t", || Ok(41 + 1)).wait().unwrap(), 42);
    }

    #[test]
    fn errors_pass_through() {
        let err = spawn::<(), _>("t", || Err(Error::invalid_argument("x"))).wait().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn panicking_worker_is_worker_lost() {
        let err = spawn::<(), _>("t", || panic!("boom")).wait().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WorkerLost);
    }

    #[test]
    fn panicking_dispatch_still_calls_back() {
        let (tx, rx) = mpsc::channel();
        dispatch::<(), _, _>("t", || panic!("boom"), move |r| { let _ = tx.send(r); });
        let err = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WorkerLost);
        assert!(rx.recv().is_err());
    }

    #[test]
    fn run_guarded_passes_values_and_catches_panics() {
        assert_eq!(run_guarded(|| Ok(3)).unwrap(), 3);
        let err = run_guarded::<u8, _>(|| panic!("boom")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WorkerLost);
    }

    #[test]
    fn try_take_polls_until_done() {
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let pending = spawn("t", move || {
            let _ = gate_rx.recv();
            Ok("done")
        });
        assert!(pending.try_take().is_none());
        gate_tx.send(()).unwrap();

        let mut result = None;
        for _ in 0..200 {
            result = pending.try_take();
            if result.is_some() { break; }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(result.unwrap().unwrap(), "done");
    }

    #[test]
    fn dispatch_invokes_callback_once() {
        let (tx, rx) = mpsc::channel();
        dispatch("t", || Ok(7u32), move |r| { let _ = tx.send(r); });
        assert_eq!(rx.recv().unwrap().unwrap(), 7);
        assert!(rx.recv().is_err());
    }
}
