//! Wire types for the import endpoints.

use serde::Deserialize;

use statreg_model::{ImportJob, JobState, PreviewRecord};

/// Response of the header-reading operation.
#[derive(Debug, Deserialize)]
pub struct HeadersResponse {
    pub headers: Vec<String>,
}

/// Response of the preview operation.
#[derive(Debug, Deserialize)]
pub struct PreviewResponse {
    pub data: Vec<PreviewRecord>,
    #[serde(default)]
    pub total: Option<usize>,
}

/// Response of the commit operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub job_id: Option<String>,
}

/// Response of the job status operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub state: String,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub current_item_label: Option<String>,
    #[serde(default)]
    pub result: Option<JobResultPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The `result` object attached to a completed job.
#[derive(Debug, Deserialize)]
pub struct JobResultPayload {
    pub count: usize,
}

impl JobStatusResponse {
    /// Folds the wire shape into the model's job snapshot.
    pub fn into_job(self, id: &str) -> ImportJob {
        ImportJob {
            id: id.to_string(),
            state: JobState::from_wire(&self.state),
            progress: self.progress,
            current_item_label: self.current_item_label,
            result_count: self.result.map(|r| r.count),
            error: self.error,
        }
    }
}

/// Error body the backend attaches to non-success responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The most specific message available.
    pub fn message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_decodes_a_running_job() {
        let json = r#"{
            "jobId": "job-7",
            "state": "active",
            "progress": 40,
            "currentItemLabel": "Seán O'Brien",
            "lastChecked": "2025-06-01T10:00:00Z"
        }"#;
        let response: JobStatusResponse = serde_json::from_str(json).unwrap();
        let job = response.into_job("job-7");
        assert_eq!(job.state, JobState::Running);
        assert_eq!(job.progress, Some(40));
        assert_eq!(job.current_item_label.as_deref(), Some("Seán O'Brien"));
        assert_eq!(job.result_count, None);
    }

    #[test]
    fn status_response_decodes_a_completed_job() {
        let json = r#"{"state": "completed", "result": {"count": 12}}"#;
        let response: JobStatusResponse = serde_json::from_str(json).unwrap();
        let job = response.into_job("job-7");
        assert_eq!(job.state, JobState::Completed);
        assert_eq!(job.result_count, Some(12));
    }

    #[test]
    fn confirm_response_tolerates_missing_job_id() {
        let response: ConfirmResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.job_id, None);
    }

    #[test]
    fn error_body_prefers_the_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "No file uploaded", "message": "other"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("No file uploaded"));
    }
}
