//! The five-step import wizard.
//!
//! Ties the matcher, validator, and client together into the
//! Upload → Map → Preview → Confirm → Result flow: a pure state machine
//! in [`state`], the job poller in [`poller`], and the IO-performing
//! driver in [`wizard`].

pub mod poller;
pub mod state;
pub mod wizard;

pub use poller::{JobPoller, PollStep, PollerConfig, PollerHandle};
pub use state::{Step, WizardEvent, WizardState};
pub use wizard::ImportWizard;
