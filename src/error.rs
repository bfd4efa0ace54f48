//! Error types for the collaborator client and the wizard.

use thiserror::Error;

use crate::validation::ValidationErrors;
use crate::wizard::Step;

/// Failure talking to the strategy backend.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered with a non-zero envelope code.
    #[error("backend error {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("response had no {0}")]
    MissingData(&'static str),
}

/// Failure driving the wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("expected step {expected}, wizard is on {actual}")]
    WrongStep { expected: Step, actual: Step },

    #[error("a submission is already in progress")]
    SubmissionPending,

    #[error("wizard is closed")]
    Closed,
}
