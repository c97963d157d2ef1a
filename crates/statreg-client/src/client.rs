//! HTTP implementation of the import service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use statreg_model::{ColumnMapping, ImportFile, ImportJob, PreviewRecord};

use crate::api::ImportService;
use crate::endpoints::ImportEndpoints;
use crate::error::{ClientError, Result};
use crate::types::{
    ConfirmResponse, ErrorBody, HeadersResponse, JobStatusResponse, PreviewResponse,
};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Content type declared for the uploaded file part.
const FILE_MIME: &str = "text/csv";

/// Import client speaking the backend's multipart/JSON protocol.
pub struct HttpImportClient {
    http: Client,
    endpoints: ImportEndpoints,
}

impl HttpImportClient {
    /// Creates a client for one entity's endpoint set.
    pub fn new(endpoints: ImportEndpoints) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Network)?;
        Ok(Self { http, endpoints })
    }

    /// The endpoint set this client addresses.
    pub fn endpoints(&self) -> &ImportEndpoints {
        &self.endpoints
    }

    fn form(file: &ImportFile, mapping: Option<&ColumnMapping>) -> Result<Form> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(FILE_MIME)
            .map_err(ClientError::Network)?;
        let mut form = Form::new().part("file", part);
        if let Some(mapping) = mapping {
            form = form.text("mapping", serde_json::to_string(mapping)?);
        }
        Ok(form)
    }

    /// Turns a non-success response into the server's own message.
    async fn reject(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body
                .message()
                .unwrap_or_else(|| "unknown server error".to_string()),
            Err(_) => "unknown server error".to_string(),
        };
        ClientError::Api { status, message }
    }
}

#[async_trait]
impl ImportService for HttpImportClient {
    async fn read_headers(&self, file: &ImportFile) -> Result<Vec<String>> {
        let url = self.endpoints.read_headers();
        debug!(%url, file = %file.name, "reading file headers");

        let response = self
            .http
            .post(&url)
            .multipart(Self::form(file, None)?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let body: HeadersResponse = response.json().await?;
        debug!(count = body.headers.len(), "headers received");
        Ok(body.headers)
    }

    async fn preview_import(
        &self,
        file: &ImportFile,
        mapping: &ColumnMapping,
    ) -> Result<Vec<PreviewRecord>> {
        let url = self.endpoints.preview_import();
        debug!(%url, mapped_fields = mapping.len(), "requesting preview");

        let response = self
            .http
            .post(&url)
            .multipart(Self::form(file, Some(mapping))?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let body: PreviewResponse = response.json().await?;
        debug!(
            records = body.data.len(),
            total = body.total,
            "preview received"
        );
        Ok(body.data)
    }

    async fn confirm_import(&self, file: &ImportFile, mapping: &ColumnMapping) -> Result<String> {
        let url = self.endpoints.confirm_import();
        debug!(%url, file = %file.name, "submitting import");

        let response = self
            .http
            .post(&url)
            .multipart(Self::form(file, Some(mapping))?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let body: ConfirmResponse = response.json().await?;
        match (body.success, body.job_id) {
            (true, Some(job_id)) => {
                debug!(%job_id, "import job accepted");
                Ok(job_id)
            }
            _ => Err(ClientError::UnexpectedResponse {
                reason: body
                    .message
                    .unwrap_or_else(|| "import was not accepted".to_string()),
            }),
        }
    }

    async fn job_status(&self, job_id: &str) -> Result<ImportJob> {
        let url = self.endpoints.import_status(job_id);
        debug!(%url, "polling job status");

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::JobNotFound);
        }
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        let body: JobStatusResponse = response.json().await?;
        Ok(body.into_job(job_id))
    }
}
