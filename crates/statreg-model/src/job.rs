//! Observed state of a backend import job.

use serde::{Deserialize, Serialize};

/// Lifecycle of a submitted import job as seen through polling.
///
/// The backend queue reports free-form state strings; anything that is
/// not a known terminal or waiting state is treated as still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Accepted but not yet picked up by a worker.
    Queued,
    /// Being processed.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
}

impl JobState {
    /// Maps a backend state string onto the job lifecycle.
    pub fn from_wire(state: &str) -> Self {
        match state {
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "queued" | "waiting" | "delayed" => Self::Queued,
            _ => Self::Running,
        }
    }

    /// True for [`JobState::Completed`] and [`JobState::Failed`].
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Snapshot of a backend import job, owned by the poller while active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportJob {
    /// Opaque identifier handed out on submission.
    pub id: String,
    /// Lifecycle state at the time of the poll.
    pub state: JobState,
    /// Explicit progress percentage, when the backend reports one.
    pub progress: Option<u8>,
    /// Label of the record currently being processed, when reported.
    pub current_item_label: Option<String>,
    /// Number of records committed, present once completed.
    pub result_count: Option<usize>,
    /// Failure reason, present once failed.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_states_map_onto_lifecycle() {
        assert_eq!(JobState::from_wire("completed"), JobState::Completed);
        assert_eq!(JobState::from_wire("failed"), JobState::Failed);
        assert_eq!(JobState::from_wire("waiting"), JobState::Queued);
        assert_eq!(JobState::from_wire("active"), JobState::Running);
        assert_eq!(JobState::from_wire("stalled"), JobState::Running);
    }

    #[test]
    fn only_completed_and_failed_are_terminal() {
        assert!(JobState::Completed.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(!JobState::Queued.is_terminal());
        assert!(!JobState::Running.is_terminal());
    }
}
