//! Strategy configuration wizard for AI trading strategies.
//!
//! - Per-step form validation with translated messages
//! - Defaults derived between steps (strategy name, interval, symbols)
//! - Submission and prompt-template management against the strategy backend

pub mod api;
pub mod error;
pub mod models;
pub mod validation;
pub mod wizard;

pub use error::{ClientError, WizardError};
pub use wizard::{StrategyWizard, SubmitOutcome};
