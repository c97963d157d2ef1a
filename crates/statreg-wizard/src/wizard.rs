//! The import wizard driver.
//!
//! Owns the state machine, the import service, and the poller for the
//! lifetime of one modal session. Methods perform the IO for a step and
//! feed the results through [`WizardState::apply`]; the host renders
//! [`ImportWizard::state`] and pumps poller events with
//! [`ImportWizard::run_until_settled`] or [`ImportWizard::apply_event`].

use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use statreg_client::ImportService;
use statreg_ingest::{check_extension, read_header_row};
use statreg_match::MappingState;
use statreg_model::{ImportFile, TargetSchema};
use statreg_validate::validate_records;

use crate::poller::{JobPoller, PollerConfig, PollerHandle};
use crate::state::{Step, WizardEvent, WizardState};

/// Called with the committed record count when an import succeeds.
///
/// Stands in for the surrounding application's toast-and-refresh
/// callbacks.
pub type SuccessHook = Box<dyn Fn(usize) + Send + Sync>;

/// Orchestrator for one Upload → Map → Preview → Confirm → Result run.
pub struct ImportWizard<S> {
    service: Arc<S>,
    state: WizardState,
    poller: Option<PollerHandle>,
    poller_config: PollerConfig,
    events_tx: mpsc::UnboundedSender<WizardEvent>,
    events_rx: mpsc::UnboundedReceiver<WizardEvent>,
    success_hook: Option<SuccessHook>,
}

impl<S: ImportService + 'static> ImportWizard<S> {
    /// Creates a wizard for one entity's schema.
    pub fn new(service: Arc<S>, schema: TargetSchema) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            service,
            state: WizardState::new(schema),
            poller: None,
            poller_config: PollerConfig::default(),
            events_tx,
            events_rx,
            success_hook: None,
        }
    }

    /// Overrides the poller's timing, mainly for tests.
    pub fn with_poller_config(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Registers the callback invoked once an import commits.
    pub fn on_success(mut self, hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.success_hook = Some(Box::new(hook));
        self
    }

    /// The current state, for rendering.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// True while a poll loop is alive.
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Step 1: accept a file, read its headers, run the auto-mapper.
    ///
    /// Input-format problems (extension, empty file, unparsable header
    /// row) surface immediately without touching the network.
    pub async fn select_file(&mut self, file: ImportFile) {
        if self.state.step != Step::Upload || self.state.loading {
            warn!("select_file ignored outside the upload step");
            return;
        }
        if let Err(err) = check_extension(&file) {
            self.apply(WizardEvent::FileRejected {
                message: err.to_string(),
            });
            return;
        }
        if let Err(err) = read_header_row(&file.bytes) {
            self.apply(WizardEvent::FileRejected {
                message: err.to_string(),
            });
            return;
        }

        self.apply(WizardEvent::UploadStarted);
        match self.service.read_headers(&file).await {
            Ok(headers) if !headers.is_empty() => {
                let mapping = MappingState::from_auto(&headers, &self.state.schema);
                debug!(
                    headers = headers.len(),
                    mapped = mapping.mapping.len(),
                    "file accepted"
                );
                self.apply(WizardEvent::FileAccepted {
                    file,
                    headers,
                    mapping,
                });
            }
            Ok(_) => self.apply(WizardEvent::FileRejected {
                message: "No headers found in file".to_string(),
            }),
            Err(err) => self.apply(WizardEvent::FileRejected {
                message: err.to_string(),
            }),
        }
    }

    /// Step 2: assign or clear one column by hand.
    pub fn map_column(&mut self, key: &str, header: Option<&str>) {
        self.apply(WizardEvent::MappingSet {
            key: key.to_string(),
            header: header.map(String::from),
        });
    }

    /// Step 2 → 3: materialize records and validate them.
    pub async fn preview(&mut self) {
        if self.state.step != Step::Map || self.state.loading {
            warn!("preview ignored outside the mapping step");
            return;
        }

        let unmapped = {
            let missing = self.state.mapping.unmapped_required(&self.state.schema);
            if missing.is_empty() {
                None
            } else {
                let labels: Vec<_> = missing.iter().map(|f| f.label.as_str()).collect();
                Some(format!(
                    "Please map the following columns: {}",
                    labels.join(", ")
                ))
            }
        };
        if let Some(message) = unmapped {
            self.apply(WizardEvent::PreviewRejected { message });
            return;
        }

        let Some(file) = self.state.file.clone() else {
            warn!("preview requested without a file");
            return;
        };
        let mapping = self.state.mapping.mapping.clone();

        self.apply(WizardEvent::PreviewStarted);
        match self.service.preview_import(&file, &mapping).await {
            Ok(records) if !records.is_empty() => {
                let today = Local::now().date_naive();
                match validate_records(&records, &self.state.schema, today) {
                    Ok(()) => self.apply(WizardEvent::PreviewReady { records }),
                    Err(failure) => self.apply(WizardEvent::PreviewRejected {
                        message: failure.to_string(),
                    }),
                }
            }
            Ok(_) => self.apply(WizardEvent::PreviewRejected {
                message: "No preview data returned".to_string(),
            }),
            Err(err) => self.apply(WizardEvent::PreviewRejected {
                message: err.to_string(),
            }),
        }
    }

    /// Step 3 → 4: move on to the confirmation.
    pub fn advance(&mut self) {
        self.apply(WizardEvent::Advanced);
    }

    /// One step back, no side effects.
    pub fn back(&mut self) {
        self.apply(WizardEvent::Back);
    }

    /// Step 4: submit the commit and start observing the job.
    ///
    /// At most one job is active per wizard; a second call while one is
    /// in flight is ignored.
    pub async fn confirm(&mut self) {
        if self.state.step != Step::Confirm || self.state.loading || self.state.job_id.is_some() {
            warn!("confirm ignored outside the confirmation step");
            return;
        }
        let Some(file) = self.state.file.clone() else {
            warn!("confirm requested without a file");
            return;
        };
        let mapping = self.state.mapping.mapping.clone();

        self.apply(WizardEvent::SubmitStarted);
        match self.service.confirm_import(&file, &mapping).await {
            Ok(job_id) => {
                info!(%job_id, "import submitted");
                self.apply(WizardEvent::SubmitAccepted {
                    job_id: job_id.clone(),
                });
                let poller = JobPoller::new(
                    Arc::clone(&self.service),
                    job_id,
                    self.state.preview.len(),
                    self.poller_config.clone(),
                );
                self.poller = Some(poller.spawn(self.events_tx.clone()));
            }
            Err(err) => self.apply(WizardEvent::SubmitRejected {
                message: err.to_string(),
            }),
        }
    }

    /// Applies one poller event, stopping the poller on terminal ones
    /// and firing the success hook on completion.
    pub fn apply_event(&mut self, event: WizardEvent) {
        match &event {
            WizardEvent::JobCompleted { count } => {
                let count = *count;
                self.stop_poller();
                if let Some(hook) = &self.success_hook {
                    hook(count);
                }
            }
            WizardEvent::JobFailed { .. } => self.stop_poller(),
            _ => {}
        }
        self.apply(event);
    }

    /// Pumps poller events until the active job reaches a terminal
    /// state. Returns immediately when no job is active.
    pub async fn run_until_settled(&mut self) {
        while self.state.job_id.is_some() {
            match self.events_rx.recv().await {
                Some(event) => self.apply_event(event),
                None => break,
            }
        }
    }

    /// Cancels the flow and resets for the next open.
    ///
    /// Refused while work is in flight, except after terminal success;
    /// an accepted close tears the poller down and leaves the wizard
    /// factory-clean.
    pub fn close(&mut self) -> bool {
        if !self.state.can_close() {
            debug!("close refused while loading");
            return false;
        }
        self.stop_poller();
        self.apply(WizardEvent::Reset);
        true
    }

    fn apply(&mut self, event: WizardEvent) {
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    fn stop_poller(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.stop();
        }
    }
}
