use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Execution resource limits configuration
///
/// Only the deadline and the output cap are enforced by this crate.
/// `max_memory_bytes` and `max_steps` are carried for caller bookkeeping:
/// the orchestration layer accounts for them between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionLimits {
    /// Maximum wall-clock time in milliseconds (default: 30s, 0 = disabled)
    /// Total elapsed time including sleeps/I/O.
    pub deadline_ms: u64,
    /// Maximum memory in bytes (default: 128MB)
    /// Advisory only; not enforced at runtime.
    pub max_memory_bytes: usize,
    /// Maximum size of returned output in bytes (default: 64KB)
    /// Hard cap, enforced by [`truncate_output`](crate::truncate_output).
    pub max_output_bytes: usize,
    /// Maximum iteration count (default: 25)
    /// Advisory cap enforced by the caller's loop, not by this crate.
    pub max_steps: u32,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            deadline_ms: 30_000, // 30s total (anti-hang)
            max_memory_bytes: 128 * 1024 * 1024,
            max_output_bytes: 64 * 1024,
            max_steps: 25,
        }
    }
}

impl ExecutionLimits {
    /// Default limits with a specific wall-clock deadline
    pub fn with_deadline_ms(deadline_ms: u64) -> Self {
        Self {
            deadline_ms,
            ..Self::default()
        }
    }

    /// The wall-clock deadline, or `None` when the timeout is disabled (0)
    pub fn deadline(&self) -> Option<Duration> {
        match self.deadline_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_deadline_means_disabled() {
        let limits = ExecutionLimits::with_deadline_ms(0);
        assert_eq!(limits.deadline(), None);

        let limits = ExecutionLimits::with_deadline_ms(250);
        assert_eq!(limits.deadline(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let limits: ExecutionLimits =
            serde_json::from_str(r#"{"deadline_ms": 5000}"#).expect("should deserialize");

        assert_eq!(limits.deadline_ms, 5_000);
        assert_eq!(
            limits.max_output_bytes,
            ExecutionLimits::default().max_output_bytes
        );
        assert_eq!(limits.max_steps, ExecutionLimits::default().max_steps);
    }
}
