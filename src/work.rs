use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle capable of aborting a running computation from another thread
pub type InterruptHandle = Arc<dyn Interrupt>;

/// Abort capability for an in-progress computation
///
/// `interrupt()` is invoked from the watchdog thread when the deadline
/// fires, so implementations must be safe to call while the work is
/// executing on the caller's thread. It should make the work bail out as
/// soon as possible; it is never called more than once per bounded run.
pub trait Interrupt: Send + Sync {
    fn interrupt(&self);
}

/// A unit of work executed under limits
///
/// Plain closures implement this via the blanket impl below and run in
/// cooperative mode (no interrupt capability). Work that can be aborted
/// mid-flight advertises that by returning a handle from
/// `interrupt_handle`, which selects preemptive mode.
pub trait Work {
    type Output;

    /// Execute the work to completion (or until interrupted)
    fn run(self) -> Self::Output;

    /// Handle able to abort the running computation, if the work supports it
    ///
    /// Returning `None` (the default) selects the cooperative watchdog:
    /// the work is never aborted mid-flight, only its late result is
    /// discarded. CPU-bound work that is already running cannot be stopped
    /// in that mode.
    fn interrupt_handle(&self) -> Option<InterruptHandle> {
        None
    }
}

// Convenience: any closure is cooperative work
impl<F, R> Work for F
where
    F: FnOnce() -> R,
{
    type Output = R;

    fn run(self) -> R {
        self()
    }
}

/// Closure paired with the handle able to abort it
///
/// The caller is responsible for the pairing being real: the handle must
/// actually cause the closure to bail out, the way
/// [`StopFlag`] does for a checkpoint-polling loop.
pub struct InterruptibleFn<F> {
    handle: InterruptHandle,
    f: F,
}

impl<F> InterruptibleFn<F> {
    pub fn new(handle: InterruptHandle, f: F) -> Self {
        Self { handle, f }
    }
}

impl<F, R> Work for InterruptibleFn<F>
where
    F: FnOnce() -> R,
{
    type Output = R;

    fn run(self) -> R {
        (self.f)()
    }

    fn interrupt_handle(&self) -> Option<InterruptHandle> {
        Some(Arc::clone(&self.handle))
    }
}

/// Shared stop flag for checkpoint-polling work
///
/// The simplest interrupt mechanism: the watchdog sets the flag, the work
/// checks it at its own checkpoints and bails out. Clones share the same
/// underlying flag.
#[derive(Debug, Clone, Default)]
pub struct StopFlag {
    stopped: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the flag has been set
    pub fn is_set(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Interrupt handle that sets this flag
    pub fn handle(&self) -> InterruptHandle {
        Arc::new(self.clone())
    }
}

impl Interrupt for StopFlag {
    fn interrupt(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_cooperative() {
        let work = || 41 + 1;
        assert!(work.interrupt_handle().is_none());
        assert_eq!(work.run(), 42);
    }

    #[test]
    fn interruptible_fn_exposes_its_handle() {
        let flag = StopFlag::new();
        let observer = flag.clone();
        let work = InterruptibleFn::new(flag.handle(), move || observer.is_set());

        let handle = work.interrupt_handle().expect("should expose a handle");
        handle.interrupt();
        assert!(flag.is_set());
        assert!(work.run());
    }
}
