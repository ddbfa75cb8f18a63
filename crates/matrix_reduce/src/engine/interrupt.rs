//! src/engine/interrupt.rs
//!
//! External interruption of a pending join barrier.
//!
//! An `Interrupter` is a cloneable handle: any thread holding a clone can call
//! `interrupt()`, and every coordinator currently blocked on a join observed
//! by that handle wakes up and fails with `ReduceError::Interrupted`.
//!
//! Internally the handle owns the only `Sender` of a zero-capacity channel.
//! Interrupting drops that sender, which disconnects the receiver; a
//! disconnected receiver is permanently ready in `select!`, so the signal is
//! sticky and wakes any number of waiters.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone)]
pub struct Interrupter {
    inner: Arc<InterruptInner>,
}

#[derive(Debug)]
struct InterruptInner {
    interrupted: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
    signal: Receiver<()>,
}

impl Interrupter {
    pub fn new() -> Self {
        let (tx, rx) = bounded(0);
        Self {
            inner: Arc::new(InterruptInner {
                interrupted: AtomicBool::new(false),
                trigger: Mutex::new(Some(tx)),
                signal: rx,
            }),
        }
    }

    /// Interrupts every current and future join observed by this handle.
    /// Idempotent.
    pub fn interrupt(&self) {
        self.inner.interrupted.store(true, Ordering::SeqCst);
        self.inner
            .trigger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_interrupted(&self) -> bool {
        self.inner.interrupted.load(Ordering::SeqCst)
    }

    /// Receiver that becomes ready (disconnected) once `interrupt` is called.
    pub(crate) fn signal(&self) -> &Receiver<()> {
        &self.inner.signal
    }
}

impl Default for Interrupter {
    fn default() -> Self {
        Self::new()
    }
}
