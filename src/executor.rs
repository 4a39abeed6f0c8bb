use crate::limits::ExecutionLimits;
use crate::outcome::{TimeoutError, TimeoutOutcome};
use crate::watchdog::Watchdog;
use crate::work::Work;

/// Runs units of work under a wall-clock deadline and an output cap
///
/// The call blocks on the caller's thread until the work completes or, in
/// preemptive mode, is aborted. One watchdog per call; no pool, no async
/// variant. A zero deadline disables the watchdog entirely.
#[derive(Debug, Clone)]
pub struct BoundedExecutor {
    limits: ExecutionLimits,
}

impl BoundedExecutor {
    pub fn new(limits: ExecutionLimits) -> Self {
        Self { limits }
    }

    /// The limits this executor enforces
    ///
    /// Callers use this to read back the advisory fields
    /// (`max_memory_bytes`, `max_steps`) they enforce themselves.
    pub fn limits(&self) -> &ExecutionLimits {
        &self.limits
    }

    /// Execute `work` under the configured limits
    ///
    /// Returns:
    /// - `Ok(TimeoutOutcome::Completed(value))` if the work finished in time
    /// - `Ok(TimeoutOutcome::TimedOut(err))` if the deadline elapsed; any
    ///   value or error the work produced after that point is discarded
    /// - `Err(e)` unchanged if the work failed before the deadline — this
    ///   call never wraps or swallows the work's own errors
    ///
    /// With a positive deadline the watchdog is armed strictly before the
    /// work starts and disarmed strictly after it returns, so the work is
    /// never running unmonitored. Whether the work can actually be aborted
    /// mid-flight depends on [`Work::interrupt_handle`]: without a handle
    /// the timeout is only detected once the work voluntarily returns.
    pub fn run<W, T, E>(&self, work: W) -> Result<TimeoutOutcome<T>, E>
    where
        W: Work<Output = Result<T, E>>,
    {
        let Some(deadline) = self.limits.deadline() else {
            // Timeout disabled: no watchdog, no extra failure mode.
            return work.run().map(TimeoutOutcome::Completed);
        };

        let watchdog = Watchdog::arm(deadline, work.interrupt_handle());
        let result = work.run();
        let report = watchdog.disarm();

        if report.fired {
            tracing::debug!(
                deadline_ms = self.limits.deadline_ms,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "bounded run timed out"
            );
            return Ok(TimeoutOutcome::TimedOut(TimeoutError {
                deadline_ms: self.limits.deadline_ms,
                elapsed: report.elapsed,
            }));
        }

        result.map(TimeoutOutcome::Completed)
    }

    /// Cap `output` to the configured byte budget
    ///
    /// See [`truncate_output`](crate::truncate_output).
    pub fn truncate_output(&self, output: &str) -> (String, bool) {
        crate::output::truncate_output(output, &self.limits)
    }
}
