//! Endpoint URL construction for the import operations.

/// The four import URLs for one entity type under one company.
///
/// Both the entity path segment and the company identifier belong to
/// the surrounding application; this type only assembles them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEndpoints {
    base_url: String,
    entity: String,
    company_id: String,
}

impl ImportEndpoints {
    /// Builds the endpoint set. A trailing slash on `base_url` is
    /// tolerated.
    pub fn new(
        base_url: impl Into<String>,
        entity: impl Into<String>,
        company_id: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            entity: entity.into(),
            company_id: company_id.into(),
        }
    }

    /// The entity path segment these endpoints address.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    fn root(&self) -> String {
        format!(
            "{}/statutory/{}/{}",
            self.base_url, self.entity, self.company_id
        )
    }

    /// URL of the header-reading operation.
    pub fn read_headers(&self) -> String {
        format!("{}/read-headers", self.root())
    }

    /// URL of the preview operation.
    pub fn preview_import(&self) -> String {
        format!("{}/preview-import", self.root())
    }

    /// URL of the commit operation.
    pub fn confirm_import(&self) -> String {
        format!("{}/confirm-import", self.root())
    }

    /// URL of the job status operation.
    pub fn import_status(&self, job_id: &str) -> String {
        format!("{}/import-status/{job_id}", self.root())
    }
}
