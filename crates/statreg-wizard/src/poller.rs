//! Background polling of a submitted import job.
//!
//! The poller is the sole owner of a job while it is active: a
//! fixed-period timer exists only while a job id is held, and every
//! path that ends polling — completion, failure, job loss, wizard
//! close — runs through the same abort-on-drop handle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval};
use tracing::{debug, info, warn};

use statreg_client::{ClientError, ImportService};
use statreg_model::JobState;

use crate::state::WizardEvent;

/// Fallback shown when a job fails without a server-supplied reason.
const GENERIC_FAILURE: &str = "Import failed. Please try again.";

/// Timing knobs for the poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Interval between status polls.
    pub period: Duration,
    /// How long an import is expected to take; drives synthesized
    /// progress when the backend reports none.
    pub expected_duration: Duration,
    /// Ceiling for synthesized progress. 100 is reserved for a
    /// confirmed terminal state.
    pub progress_cap: u8,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            expected_duration: Duration::from_secs(25),
            progress_cap: 99,
        }
    }
}

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    /// The job is still going; keep the timer alive.
    InProgress {
        progress: u8,
        current_item: Option<String>,
    },
    /// The job finished; `count` records were committed.
    Completed { count: usize },
    /// The job failed with a user-facing message.
    Failed { message: String },
}

impl PollStep {
    /// True for [`PollStep::Completed`] and [`PollStep::Failed`].
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress { .. })
    }
}

/// Polls one job until it reaches a terminal state.
pub struct JobPoller<S> {
    service: Arc<S>,
    job_id: String,
    /// Result count to report when the backend loses the job record.
    fallback_count: usize,
    config: PollerConfig,
    started: Instant,
    last_progress: u8,
}

impl<S: ImportService> JobPoller<S> {
    /// Creates a poller for a freshly submitted job.
    ///
    /// `fallback_count` is the preview record count, reported as the
    /// result if the job record disappears before completion is seen.
    pub fn new(
        service: Arc<S>,
        job_id: impl Into<String>,
        fallback_count: usize,
        config: PollerConfig,
    ) -> Self {
        Self {
            service,
            job_id: job_id.into(),
            fallback_count,
            config,
            started: Instant::now(),
            last_progress: 0,
        }
    }

    /// Progress estimated from wall-clock time since submission,
    /// capped below 100.
    fn synthesized_progress(&self) -> u8 {
        let elapsed = self.started.elapsed().as_secs_f64();
        let expected = self.config.expected_duration.as_secs_f64();
        if expected <= 0.0 {
            return self.config.progress_cap;
        }
        let percent = ((elapsed / expected) * 100.0).floor();
        let percent = percent.clamp(0.0, f64::from(self.config.progress_cap));
        percent as u8
    }

    /// Ratchets progress so it never decreases while the job runs.
    fn ratchet(&mut self, progress: u8) -> u8 {
        let progress = progress.max(self.last_progress);
        self.last_progress = progress;
        progress
    }

    /// Performs one status poll and classifies the result.
    ///
    /// Dual-sourced progress: an explicit value from the backend is
    /// trusted, otherwise one is synthesized from elapsed time. A
    /// not-found answer triggers exactly one immediate confirmation
    /// poll; unless that confirms anything other than completion, the
    /// job is presumed to have completed and the preview count stands
    /// in for the result.
    pub async fn poll_once(&mut self) -> PollStep {
        match self.service.job_status(&self.job_id).await {
            Ok(job) => match job.state {
                JobState::Completed => PollStep::Completed {
                    count: job.result_count.unwrap_or(self.fallback_count),
                },
                JobState::Failed => PollStep::Failed {
                    message: job
                        .error
                        .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
                },
                JobState::Queued | JobState::Running => {
                    let progress = job
                        .progress
                        .unwrap_or_else(|| self.synthesized_progress());
                    PollStep::InProgress {
                        progress: self.ratchet(progress),
                        current_item: job.current_item_label,
                    }
                }
            },
            Err(ClientError::JobNotFound) => self.confirm_lost_job().await,
            Err(err) => {
                // Transient transport problems never kill the poll loop.
                warn!(job_id = %self.job_id, error = %err, "status poll failed, continuing");
                let progress = self.synthesized_progress();
                PollStep::InProgress {
                    progress: self.ratchet(progress),
                    current_item: None,
                }
            }
        }
    }

    /// One confirmation poll after a not-found answer.
    ///
    /// Fast jobs can complete and be garbage-collected between polls,
    /// so absence is read as success rather than failure.
    async fn confirm_lost_job(&self) -> PollStep {
        debug!(job_id = %self.job_id, "job not found, confirming once");
        match self.service.job_status(&self.job_id).await {
            Ok(job) if job.state == JobState::Completed => PollStep::Completed {
                count: job.result_count.unwrap_or(self.fallback_count),
            },
            _ => {
                info!(
                    job_id = %self.job_id,
                    count = self.fallback_count,
                    "job record gone, presuming completion"
                );
                PollStep::Completed {
                    count: self.fallback_count,
                }
            }
        }
    }

    /// Runs the poll loop on its own task, forwarding each step into
    /// the wizard's event channel until a terminal step stops the timer.
    pub fn spawn(self, events: UnboundedSender<WizardEvent>) -> PollerHandle
    where
        S: 'static,
    {
        let task = tokio::spawn(async move {
            let mut poller = self;
            let mut tick = interval(poller.config.period);
            loop {
                tick.tick().await;
                match poller.poll_once().await {
                    PollStep::InProgress {
                        progress,
                        current_item,
                    } => {
                        let _ = events.send(WizardEvent::JobProgress {
                            progress,
                            current_item,
                        });
                    }
                    PollStep::Completed { count } => {
                        info!(job_id = %poller.job_id, count, "import job completed");
                        let _ = events.send(WizardEvent::JobCompleted { count });
                        break;
                    }
                    PollStep::Failed { message } => {
                        warn!(job_id = %poller.job_id, %message, "import job failed");
                        let _ = events.send(WizardEvent::JobFailed { message });
                        break;
                    }
                }
            }
        });
        PollerHandle { task }
    }
}

/// Owning handle for a running poll loop.
///
/// Dropping the handle aborts the task, so an abandoned wizard can
/// never leak a ticking timer.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stops polling immediately.
    pub fn stop(self) {
        self.task.abort();
    }

    /// True once the poll loop has exited on its own.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use statreg_client::{ClientError, Result as ClientResult};
    use statreg_model::{ColumnMapping, ImportFile, ImportJob, PreviewRecord};

    use super::*;

    /// Scripted service: each status poll pops the next canned answer.
    struct ScriptedService {
        statuses: Mutex<VecDeque<ClientResult<ImportJob>>>,
        status_calls: AtomicUsize,
    }

    impl ScriptedService {
        fn new(statuses: Vec<ClientResult<ImportJob>>) -> Self {
            Self {
                statuses: Mutex::new(statuses.into()),
                status_calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.status_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImportService for ScriptedService {
        async fn read_headers(&self, _file: &ImportFile) -> ClientResult<Vec<String>> {
            unimplemented!("not used by the poller")
        }

        async fn preview_import(
            &self,
            _file: &ImportFile,
            _mapping: &ColumnMapping,
        ) -> ClientResult<Vec<PreviewRecord>> {
            unimplemented!("not used by the poller")
        }

        async fn confirm_import(
            &self,
            _file: &ImportFile,
            _mapping: &ColumnMapping,
        ) -> ClientResult<String> {
            unimplemented!("not used by the poller")
        }

        async fn job_status(&self, job_id: &str) -> ClientResult<ImportJob> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            self.statuses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unscripted status poll for {job_id}"))
        }
    }

    fn job(state: JobState) -> ImportJob {
        ImportJob {
            id: "job-7".to_string(),
            state,
            progress: None,
            current_item_label: None,
            result_count: None,
            error: None,
        }
    }

    fn poller(service: ScriptedService) -> JobPoller<ScriptedService> {
        JobPoller::new(Arc::new(service), "job-7", 5, PollerConfig::default())
    }

    #[tokio::test]
    async fn explicit_progress_is_trusted() {
        let service = ScriptedService::new(vec![Ok(ImportJob {
            progress: Some(40),
            current_item_label: Some("Seán O'Brien".to_string()),
            ..job(JobState::Running)
        })]);
        let mut poller = poller(service);

        let step = poller.poll_once().await;
        assert_eq!(
            step,
            PollStep::InProgress {
                progress: 40,
                current_item: Some("Seán O'Brien".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn progress_never_decreases_while_running() {
        let service = ScriptedService::new(vec![
            Ok(ImportJob {
                progress: Some(40),
                ..job(JobState::Running)
            }),
            Ok(ImportJob {
                progress: Some(30),
                ..job(JobState::Running)
            }),
        ]);
        let mut poller = poller(service);

        poller.poll_once().await;
        let step = poller.poll_once().await;
        assert_eq!(
            step,
            PollStep::InProgress {
                progress: 40,
                current_item: None,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn synthesized_progress_tracks_elapsed_time() {
        let service = ScriptedService::new(vec![Ok(job(JobState::Running))]);
        let mut poller = poller(service);

        // 5 of 25 expected seconds elapsed: 20 percent.
        tokio::time::advance(Duration::from_secs(5)).await;
        let step = poller.poll_once().await;
        assert_eq!(
            step,
            PollStep::InProgress {
                progress: 20,
                current_item: None,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn synthesized_progress_caps_below_one_hundred() {
        let service = ScriptedService::new(vec![Ok(job(JobState::Running))]);
        let mut poller = poller(service);

        tokio::time::advance(Duration::from_secs(300)).await;
        let step = poller.poll_once().await;
        assert_eq!(
            step,
            PollStep::InProgress {
                progress: 99,
                current_item: None,
            }
        );
    }

    #[tokio::test]
    async fn completion_reports_the_server_count() {
        let service = ScriptedService::new(vec![Ok(ImportJob {
            result_count: Some(12),
            ..job(JobState::Completed)
        })]);
        let mut poller = poller(service);

        assert_eq!(poller.poll_once().await, PollStep::Completed { count: 12 });
    }

    #[tokio::test]
    async fn failure_propagates_the_server_message() {
        let service = ScriptedService::new(vec![Ok(ImportJob {
            error: Some("duplicate director".to_string()),
            ..job(JobState::Failed)
        })]);
        let mut poller = poller(service);

        assert_eq!(
            poller.poll_once().await,
            PollStep::Failed {
                message: "duplicate director".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn failure_without_a_message_uses_the_generic_one() {
        let service = ScriptedService::new(vec![Ok(job(JobState::Failed))]);
        let mut poller = poller(service);

        assert_eq!(
            poller.poll_once().await,
            PollStep::Failed {
                message: GENERIC_FAILURE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn double_not_found_presumes_success_with_the_preview_count() {
        let service = ScriptedService::new(vec![
            Err(ClientError::JobNotFound),
            Err(ClientError::JobNotFound),
        ]);
        let mut poller = poller(service);

        let step = poller.poll_once().await;
        assert_eq!(step, PollStep::Completed { count: 5 });
        assert_eq!(poller.service.calls(), 2);
    }

    #[tokio::test]
    async fn not_found_then_completed_uses_the_confirmed_count() {
        let service = ScriptedService::new(vec![
            Err(ClientError::JobNotFound),
            Ok(ImportJob {
                result_count: Some(12),
                ..job(JobState::Completed)
            }),
        ]);
        let mut poller = poller(service);

        assert_eq!(poller.poll_once().await, PollStep::Completed { count: 12 });
    }

    #[tokio::test(start_paused = true)]
    async fn transient_transport_errors_keep_the_poll_alive() {
        let service = ScriptedService::new(vec![
            Err(ClientError::Api {
                status: 500,
                message: "blip".to_string(),
            }),
            Ok(ImportJob {
                result_count: Some(3),
                ..job(JobState::Completed)
            }),
        ]);
        let mut poller = poller(service);

        tokio::time::advance(Duration::from_secs(5)).await;
        let step = poller.poll_once().await;
        assert!(!step.is_terminal());
        assert_eq!(poller.poll_once().await, PollStep::Completed { count: 3 });
    }
}
