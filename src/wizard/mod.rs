//! The strategy creation wizard and its helpers.

mod datetime;
mod naming;
mod orchestrator;
mod prompts;

#[cfg(test)]
pub(crate) mod testing;

pub use datetime::{format_timestamp, parse_date_time};
pub use naming::{default_strategy_name, unique_strategy_name};
pub use orchestrator::{
    Lookups, StepStatus, Step, StrategyDraft, StrategyWizard, SubmitOutcome, WizardMode,
};
pub use prompts::PromptLibrary;
