//! Service abstraction over the four import operations.

use async_trait::async_trait;

use statreg_model::{ColumnMapping, ImportFile, ImportJob, PreviewRecord};

use crate::error::Result;

/// The import backend as the wizard sees it.
///
/// One implementation speaks HTTP; tests substitute scripted fakes.
/// Every method is a single round trip and holds no client-side state.
#[async_trait]
pub trait ImportService: Send + Sync {
    /// Reads the header row of the uploaded file.
    async fn read_headers(&self, file: &ImportFile) -> Result<Vec<String>>;

    /// Materializes the file into preview records under a mapping.
    async fn preview_import(
        &self,
        file: &ImportFile,
        mapping: &ColumnMapping,
    ) -> Result<Vec<PreviewRecord>>;

    /// Submits the file for durable processing; returns the job id.
    async fn confirm_import(&self, file: &ImportFile, mapping: &ColumnMapping) -> Result<String>;

    /// Polls the state of a submitted job.
    async fn job_status(&self, job_id: &str) -> Result<ImportJob>;
}
