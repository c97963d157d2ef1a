//! The wizard's state and its pure transition function.
//!
//! Everything the UI would bind to lives in [`WizardState`], and every
//! change goes through [`WizardState::apply`] as an explicit
//! [`WizardEvent`]. The driver in [`crate::wizard`] performs the IO and
//! feeds the results in as events, so the whole step sequence is
//! testable without a renderer or a network.

use statreg_match::MappingState;
use statreg_model::{ImportFile, PreviewRecord, TargetSchema};

/// The five steps of the import flow, in user-facing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    /// Choose and upload a file.
    #[default]
    Upload,
    /// Match file columns to target fields.
    Map,
    /// Review the materialized records.
    Preview,
    /// Final confirmation before the commit.
    Confirm,
    /// Terminal success.
    Result,
}

impl Step {
    /// 1-based step number as shown in the step indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::Upload => 1,
            Self::Map => 2,
            Self::Preview => 3,
            Self::Confirm => 4,
            Self::Result => 5,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Upload | Self::Map => Self::Upload,
            Self::Preview => Self::Map,
            Self::Confirm => Self::Preview,
            Self::Result => Self::Confirm,
        }
    }
}

/// Everything that can happen to a wizard.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    /// The header read has been kicked off.
    UploadStarted,
    /// Headers arrived and the auto-mapper has run.
    FileAccepted {
        file: ImportFile,
        headers: Vec<String>,
        mapping: MappingState,
    },
    /// The file was rejected before or during the header read.
    FileRejected { message: String },
    /// The operator assigned or cleared a column by hand.
    MappingSet {
        key: String,
        header: Option<String>,
    },
    /// The preview request has been kicked off.
    PreviewStarted,
    /// Materialized records arrived and validated cleanly.
    PreviewReady { records: Vec<PreviewRecord> },
    /// The preview failed — transport, server, or row validation.
    PreviewRejected { message: String },
    /// The operator moved on from the preview to the confirmation.
    Advanced,
    /// The commit submission has been kicked off.
    SubmitStarted,
    /// The backend accepted the job.
    SubmitAccepted { job_id: String },
    /// The backend rejected the submission.
    SubmitRejected { message: String },
    /// A poll reported the job still running.
    JobProgress {
        progress: u8,
        current_item: Option<String>,
    },
    /// The job finished; `count` records were committed.
    JobCompleted { count: usize },
    /// The job failed with a user-facing message.
    JobFailed { message: String },
    /// One step back, no side effects.
    Back,
    /// Full reset; the wizard starts clean next time.
    Reset,
}

/// Single-owner snapshot of one import cycle.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    /// Target schema for this entity type. Survives resets.
    pub schema: TargetSchema,
    /// Current step.
    pub step: Step,
    /// The uploaded file, once accepted.
    pub file: Option<ImportFile>,
    /// Headers read from the file.
    pub headers: Vec<String>,
    /// Column assignment and confidence, operator-editable.
    pub mapping: MappingState,
    /// Records to be committed, as returned by the preview.
    pub preview: Vec<PreviewRecord>,
    /// Id of the active import job, if one has been submitted.
    pub job_id: Option<String>,
    /// Progress percentage shown while the job runs.
    pub progress: u8,
    /// Label of the record currently being imported, when reported.
    pub current_item: Option<String>,
    /// Committed record count, set on success.
    pub result_count: Option<usize>,
    /// Current user-facing error, if any.
    pub error: Option<String>,
    /// True while a network call or the commit is in flight.
    pub loading: bool,
}

impl WizardState {
    /// Fresh state for one entity's schema.
    pub fn new(schema: TargetSchema) -> Self {
        Self {
            schema,
            ..Self::default()
        }
    }

    /// True when the close affordance is available: never while work is
    /// in flight, except after a terminal success.
    pub fn can_close(&self) -> bool {
        !self.loading || self.result_count.is_some()
    }

    /// The transition function. Events that are illegal in the current
    /// state leave it unchanged.
    pub fn apply(mut self, event: WizardEvent) -> Self {
        match event {
            WizardEvent::UploadStarted => {
                if self.step == Step::Upload && !self.loading {
                    self.loading = true;
                    self.error = None;
                }
                self
            }
            WizardEvent::FileAccepted {
                file,
                headers,
                mapping,
            } => {
                if self.step == Step::Upload && self.loading {
                    self.file = Some(file);
                    self.headers = headers;
                    self.mapping = mapping;
                    self.step = Step::Map;
                    self.loading = false;
                }
                self
            }
            WizardEvent::FileRejected { message } => {
                if self.step == Step::Upload {
                    self.error = Some(message);
                    self.loading = false;
                }
                self
            }
            WizardEvent::MappingSet { key, header } => {
                if self.step == Step::Map && !self.loading {
                    match header {
                        Some(header) => self.mapping.set_manual(&key, &header),
                        None => self.mapping.clear(&key),
                    }
                }
                self
            }
            WizardEvent::PreviewStarted => {
                if self.step == Step::Map && !self.loading && self.mapping.is_complete(&self.schema)
                {
                    self.loading = true;
                    self.error = None;
                }
                self
            }
            WizardEvent::PreviewReady { records } => {
                if self.step == Step::Map && self.loading {
                    self.preview = records;
                    self.step = Step::Preview;
                    self.loading = false;
                }
                self
            }
            WizardEvent::PreviewRejected { message } => {
                if self.step == Step::Map {
                    self.error = Some(message);
                    self.loading = false;
                }
                self
            }
            WizardEvent::Advanced => {
                if self.step == Step::Preview && !self.loading {
                    self.step = Step::Confirm;
                }
                self
            }
            WizardEvent::SubmitStarted => {
                if self.step == Step::Confirm && !self.loading && self.job_id.is_none() {
                    self.loading = true;
                    self.error = None;
                    self.progress = 0;
                    self.current_item = None;
                }
                self
            }
            WizardEvent::SubmitAccepted { job_id } => {
                if self.step == Step::Confirm && self.loading && self.job_id.is_none() {
                    // Loading stays on: the commit is now in flight.
                    self.job_id = Some(job_id);
                }
                self
            }
            WizardEvent::SubmitRejected { message } => {
                if self.step == Step::Confirm {
                    self.error = Some(message);
                    self.loading = false;
                    self.job_id = None;
                }
                self
            }
            WizardEvent::JobProgress {
                progress,
                current_item,
            } => {
                if self.job_id.is_some() {
                    self.progress = self.progress.max(progress);
                    self.current_item = current_item;
                }
                self
            }
            WizardEvent::JobCompleted { count } => {
                if self.job_id.is_some() {
                    self.result_count = Some(count);
                    self.progress = 100;
                    self.current_item = None;
                    self.step = Step::Result;
                    self.loading = false;
                    self.job_id = None;
                }
                self
            }
            WizardEvent::JobFailed { message } => {
                if self.job_id.is_some() {
                    self.error = Some(message);
                    self.current_item = None;
                    self.step = Step::Confirm;
                    self.loading = false;
                    self.job_id = None;
                }
                self
            }
            WizardEvent::Back => {
                if self.step != Step::Upload && !self.loading {
                    self.step = self.step.previous();
                }
                self
            }
            WizardEvent::Reset => Self::new(self.schema),
        }
    }
}
