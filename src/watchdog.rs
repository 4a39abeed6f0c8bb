use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::work::InterruptHandle;

/// Deadline watchdog for a single bounded run
///
/// One timer thread per armed call, scoped to the lifetime of that call:
/// it blocks until either the deadline elapses or the cancel message
/// arrives. On deadline it sets the fired flag and, in preemptive mode,
/// invokes the work's interrupt handle. `disarm` (or `Drop`, on the unwind
/// path) cancels and joins the thread, so no timer outlives the call.
///
/// The fired flag has a single writer (the timer thread) and is read only
/// after the join, which orders the read after any write. The only
/// nondeterminism left is which side of the cancel/expiry race the timer
/// lands on when the work finishes at almost exactly the deadline; either
/// outcome is acceptable there.
pub(crate) struct Watchdog {
    fired: Arc<AtomicBool>,
    cancel_tx: mpsc::Sender<()>,
    timer: Option<JoinHandle<()>>,
    armed_at: Instant,
}

/// What the watchdog observed, reported once at disarm time
pub(crate) struct Disarmed {
    pub fired: bool,
    pub elapsed: Duration,
}

impl Watchdog {
    /// Arm a deadline timer; must be called before the work starts
    pub(crate) fn arm(deadline: Duration, interrupt: Option<InterruptHandle>) -> Self {
        let fired = Arc::new(AtomicBool::new(false));
        let (cancel_tx, cancel_rx) = mpsc::channel();

        let flag = Arc::clone(&fired);
        let timer = std::thread::spawn(move || {
            match cancel_rx.recv_timeout(deadline) {
                // Disarmed (or the guard was dropped) before the deadline.
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
                Err(RecvTimeoutError::Timeout) => {
                    flag.store(true, Ordering::SeqCst);
                    tracing::debug!(deadline_ms = deadline.as_millis() as u64, "deadline fired");
                    if let Some(handle) = interrupt {
                        handle.interrupt();
                    }
                }
            }
        });

        tracing::trace!(deadline_ms = deadline.as_millis() as u64, "watchdog armed");

        Self {
            fired,
            cancel_tx,
            timer: Some(timer),
            armed_at: Instant::now(),
        }
    }

    fn release(&mut self) {
        if let Some(timer) = self.timer.take() {
            // The send only fails if the timer already fired and exited.
            let _ = self.cancel_tx.send(());
            let _ = timer.join();
            tracing::trace!("watchdog disarmed");
        }
    }

    /// Cancel the timer, join it, and report what it observed
    pub(crate) fn disarm(mut self) -> Disarmed {
        self.release();
        Disarmed {
            fired: self.fired.load(Ordering::SeqCst),
            elapsed: self.armed_at.elapsed(),
        }
    }
}

impl Drop for Watchdog {
    // Unwind path: the work panicked before disarm. The timer still must
    // not be leaked.
    fn drop(&mut self) {
        self.release();
    }
}
