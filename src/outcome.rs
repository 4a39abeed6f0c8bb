use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Result of a bounded execution
///
/// A call to [`BoundedExecutor::run`](crate::BoundedExecutor::run) always
/// resolves to exactly one of these before returning control; there is no
/// partial or ambiguous state. Errors raised by the work itself are not
/// represented here — they propagate through the outer `Result` unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeoutOutcome<T> {
    /// The work finished within its deadline (or the deadline was disabled)
    Completed(T),
    /// The deadline elapsed; any result the work produced was discarded
    TimedOut(TimeoutError),
}

impl<T> TimeoutOutcome<T> {
    /// Returns true if the work completed within its deadline
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Returns true if the deadline elapsed
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    /// The completed value, if any
    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::TimedOut(_) => None,
        }
    }

    /// The timeout details, if the deadline elapsed
    pub fn timed_out(&self) -> Option<&TimeoutError> {
        match self {
            Self::Completed(_) => None,
            Self::TimedOut(err) => Some(err),
        }
    }
}

/// The wall-clock deadline elapsed before the work completed
///
/// Carries the configured budget alongside the measured elapsed time. In
/// cooperative mode `elapsed` reflects how long the work actually ran
/// before its result was discarded, so it can exceed `deadline_ms` by the
/// full overrun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutError {
    /// The configured wall-clock budget in milliseconds
    pub deadline_ms: u64,
    /// Wall time measured from arming the watchdog to resolving the outcome
    pub elapsed: Duration,
}

impl std::fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "work exceeded its {}ms deadline (ran {}ms)",
            self.deadline_ms,
            self.elapsed.as_millis()
        )
    }
}

impl std::error::Error for TimeoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_accessors() {
        let completed: TimeoutOutcome<u32> = TimeoutOutcome::Completed(7);
        assert!(completed.is_completed());
        assert!(!completed.is_timed_out());
        assert_eq!(completed.completed(), Some(7));

        let err = TimeoutError {
            deadline_ms: 100,
            elapsed: Duration::from_millis(150),
        };
        let timed_out: TimeoutOutcome<u32> = TimeoutOutcome::TimedOut(err.clone());
        assert!(timed_out.is_timed_out());
        assert_eq!(timed_out.timed_out(), Some(&err));
        assert_eq!(timed_out.completed(), None);
    }

    #[test]
    fn timeout_error_serializes_with_the_deadline_attached() {
        let err = TimeoutError {
            deadline_ms: 100,
            elapsed: Duration::from_millis(150),
        };

        let json = serde_json::to_value(&err).expect("should serialize");
        assert_eq!(json["deadline_ms"], 100);

        let back: TimeoutError = serde_json::from_value(json).expect("should deserialize");
        assert_eq!(back, err);
    }

    #[test]
    fn timeout_error_display() {
        let err = TimeoutError {
            deadline_ms: 50,
            elapsed: Duration::from_millis(212),
        };
        assert_eq!(err.to_string(), "work exceeded its 50ms deadline (ran 212ms)");
    }
}
