//! Bounded execution primitives for agent tool runs
//!
//! This crate provides a single guard, [`BoundedExecutor`], that runs a
//! caller-supplied unit of work under a wall-clock deadline and caps the
//! size of the output it hands back. The orchestration around it (planning
//! loops, tool dispatch, retries) lives with the caller.
//!
//! Two watchdog modes, selected by what the work can do:
//! - preemptive, when the work exposes an [`InterruptHandle`] able to abort
//!   it mid-flight;
//! - cooperative, for plain closures — the deadline is detected only once
//!   the work returns, and already-running CPU-bound work is not stopped.

mod executor;
mod limits;
mod outcome;
mod output;
mod watchdog;
mod work;

pub use executor::BoundedExecutor;
pub use limits::ExecutionLimits;
pub use outcome::{TimeoutError, TimeoutOutcome};
pub use output::{TRUNCATION_MARKER, truncate_output, truncate_output_bytes};
pub use work::{Interrupt, InterruptHandle, InterruptibleFn, StopFlag, Work};
