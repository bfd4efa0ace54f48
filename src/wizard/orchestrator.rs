//! Three-step strategy wizard.
//!
//! The wizard owns one form per step (model, exchange, trading parameters).
//! Advancing validates the current form; leaving the exchange step fills in
//! trading defaults derived from the first two steps. The final step submits
//! the composed payload.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::{StrategyApi, StrategyDetail};
use crate::error::{ClientError, WizardError};
use crate::models::{
    to_display_units, AssetClass, CreateStrategyRequest, StrategyPrompt, StrategyType,
    TradingConfig,
};
use crate::validation::{
    create_ai_model_schema, create_copy_trading_strategy_schema, create_exchange_schema,
    create_trading_strategy_schema, AiModelForm, ExchangeForm, TradingForm, TradingStrategySchema,
    Translator, ValidationErrors, Validator,
};

use super::naming::{default_strategy_name, unique_strategy_name};

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AiModel,
    Exchange,
    TradingConfig,
}

impl Step {
    /// 1-based position.
    pub fn number(&self) -> u8 {
        match self {
            Step::AiModel => 1,
            Step::Exchange => 2,
            Step::TradingConfig => 3,
        }
    }

    fn next(&self) -> Option<Step> {
        match self {
            Step::AiModel => Some(Step::Exchange),
            Step::Exchange => Some(Step::TradingConfig),
            Step::TradingConfig => None,
        }
    }

    fn previous(&self) -> Option<Step> {
        match self {
            Step::AiModel => None,
            Step::Exchange => Some(Step::AiModel),
            Step::TradingConfig => Some(Step::Exchange),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::AiModel => "AI model",
            Step::Exchange => "exchange",
            Step::TradingConfig => "trading config",
        };
        write!(f, "{} ({})", self.number(), name)
    }
}

/// What the current step is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Editing,
    Validating,
    Invalid,
    Submitted,
}

/// New strategy, or a copy of an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardMode {
    #[default]
    Create,
    Copy,
}

/// Everything the user has entered, one form per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyDraft {
    pub ai_model: AiModelForm,
    pub exchange: ExchangeForm,
    pub trading: TradingForm,
}

impl StrategyDraft {
    /// Draft pre-populated from a stored strategy. The stored interval is in
    /// seconds and is converted back to the unit the form edits in.
    pub fn from_detail(detail: &StrategyDetail) -> Self {
        let asset_class = detail.exchange_config.asset_class;
        let mut trading = detail.trading_config.clone();
        trading.decide_interval = trading
            .decide_interval
            .map(|seconds| to_display_units(asset_class, seconds));
        if trading.strategy_name.is_empty() {
            trading.strategy_name = detail.strategy_name.clone();
        }

        Self {
            ai_model: detail.llm_model_config.clone(),
            exchange: detail.exchange_config.clone(),
            trading,
        }
    }
}

/// Data fetched from the backend that leaving the exchange step depends on.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    /// Names of the user's existing strategies.
    pub existing_names: Vec<String>,
    /// Display name of the selected model, if the provider lists one.
    pub model_display_name: Option<String>,
}

/// Result of a submission the backend answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { strategy_id: String },
    Rejected { message: String },
}

pub struct StrategyWizard {
    translator: Arc<dyn Translator + Send + Sync>,
    mode: WizardMode,
    step: Step,
    open: bool,
    draft: StrategyDraft,
    initial: StrategyDraft,
    issues: ValidationErrors,
    submit_error: Option<String>,
    submitting: bool,
    submitted: bool,
    observed_type: StrategyType,
}

impl StrategyWizard {
    /// Open a wizard for a new strategy.
    pub fn new(translator: Arc<dyn Translator + Send + Sync>) -> Self {
        Self::with_draft(translator, WizardMode::Create, StrategyDraft::default())
    }

    /// Open a wizard that copies an existing strategy.
    pub fn for_copy(translator: Arc<dyn Translator + Send + Sync>, detail: &StrategyDetail) -> Self {
        Self::with_draft(translator, WizardMode::Copy, StrategyDraft::from_detail(detail))
    }

    fn with_draft(
        translator: Arc<dyn Translator + Send + Sync>,
        mode: WizardMode,
        draft: StrategyDraft,
    ) -> Self {
        let observed_type = draft.trading.strategy_type;
        Self {
            translator,
            mode,
            step: Step::AiModel,
            open: true,
            initial: draft.clone(),
            draft,
            issues: ValidationErrors::new(),
            submit_error: None,
            submitting: false,
            submitted: false,
            observed_type,
        }
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True while a create call is in flight; the advance control is disabled.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn status(&self) -> StepStatus {
        if self.is_submitting() {
            StepStatus::Validating
        } else if self.submitted {
            StepStatus::Submitted
        } else if !self.issues.is_empty() {
            StepStatus::Invalid
        } else {
            StepStatus::Editing
        }
    }

    pub fn draft(&self) -> &StrategyDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut StrategyDraft {
        &mut self.draft
    }

    /// Field issues from the last failed validation of the current step.
    pub fn issues(&self) -> &ValidationErrors {
        &self.issues
    }

    /// Message from the last rejected or failed submission.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Asset class the step 3 prompt list should be fetched for.
    pub fn prompt_asset_class(&self) -> AssetClass {
        self.draft.exchange.asset_class
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.open {
            Ok(())
        } else {
            Err(WizardError::Closed)
        }
    }

    fn ensure_step(&self, expected: Step) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn trading_schema(&self) -> TradingStrategySchema {
        let t = &*self.translator;
        let exchange = &self.draft.exchange;
        match self.mode {
            WizardMode::Create => {
                create_trading_strategy_schema(t, exchange.trading_mode, exchange.asset_class)
            }
            WizardMode::Copy => {
                create_copy_trading_strategy_schema(t, exchange.trading_mode, exchange.asset_class)
            }
        }
    }

    /// Record the outcome of validating the current step.
    fn checked<T>(&mut self, result: Result<T, ValidationErrors>) -> Result<T, WizardError> {
        match result {
            Ok(value) => {
                self.issues = ValidationErrors::new();
                Ok(value)
            }
            Err(errors) => {
                debug!(step = %self.step, issues = errors.issues.len(), "Step validation failed");
                self.issues = errors.clone();
                Err(errors.into())
            }
        }
    }

    /// Fetch what [`advance`](Self::advance) needs to leave the exchange step.
    pub async fn fetch_lookups(&self, api: &dyn StrategyApi) -> Result<Lookups, ClientError> {
        let ai_model = &self.draft.ai_model;
        let (strategies, provider) = futures::join!(
            api.list_strategies(),
            api.get_model_provider_detail(&ai_model.provider),
        );

        // The display name only feeds the default strategy name, which falls
        // back to the model id.
        let model_display_name = match provider {
            Ok(provider) => provider.display_name(&ai_model.model_id).map(str::to_string),
            Err(e) => {
                warn!(provider = %ai_model.provider, error = %e, "Provider detail lookup failed");
                None
            }
        };

        Ok(Lookups {
            existing_names: strategies?.into_iter().map(|s| s.strategy_name).collect(),
            model_display_name,
        })
    }

    /// Validate the current step and move to the next one.
    ///
    /// On failure the wizard stays put and the issues are kept for display.
    /// The last step is left through [`submit`](Self::submit) instead.
    pub fn advance(&mut self, lookups: &Lookups) -> Result<Step, WizardError> {
        self.ensure_open()?;
        if self.submitting {
            return Err(WizardError::SubmissionPending);
        }
        let Some(next) = self.step.next() else {
            return Err(WizardError::WrongStep {
                expected: Step::Exchange,
                actual: self.step,
            });
        };

        match self.step {
            Step::AiModel => {
                let schema = create_ai_model_schema(&*self.translator);
                let result = schema.validate(&self.draft.ai_model);
                self.checked(result)?;
            }
            Step::Exchange => {
                let schema = create_exchange_schema(&*self.translator);
                let result = schema.validate(&self.draft.exchange);
                let exchange = self.checked(result)?;
                self.apply_trading_defaults(&exchange.display_label(), lookups);
            }
            Step::TradingConfig => {}
        }

        info!(from = %self.step, to = %next, "Wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Defaults for step 3, derived when leaving step 2.
    fn apply_trading_defaults(&mut self, exchange_label: &str, lookups: &Lookups) {
        let model = lookups
            .model_display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.draft.ai_model.model_id.as_str());
        let base = default_strategy_name(model, exchange_label);
        let name = unique_strategy_name(&base, &lookups.existing_names);

        let asset_class = self.draft.exchange.asset_class;
        let trading = &mut self.draft.trading;
        trading.strategy_name = name;

        if self.mode == WizardMode::Copy {
            return;
        }
        trading.symbols = symbols_for(trading.strategy_type, asset_class);
        trading.template_id.clear();
        trading.decide_interval = Some(asset_class.default_decide_interval());
        self.observed_type = trading.strategy_type;
    }

    /// Go back one step. Nothing entered is discarded.
    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            debug!(from = %self.step, to = %previous, "Wizard went back");
            self.step = previous;
            self.issues = ValidationErrors::new();
            self.submit_error = None;
        }
        self.step
    }

    pub fn set_strategy_type(&mut self, strategy_type: StrategyType) {
        self.draft.trading.strategy_type = strategy_type;
        self.reconcile_strategy_type();
    }

    /// Single-symbol strategies keep only the first default symbol; switching
    /// back restores the full default set. Acts only on an actual change.
    fn reconcile_strategy_type(&mut self) -> bool {
        let current = self.draft.trading.strategy_type;
        if current == self.observed_type {
            return false;
        }
        self.observed_type = current;
        self.draft.trading.symbols = symbols_for(current, self.draft.exchange.asset_class);
        true
    }

    /// Apply the step 3 rules against the latest prompt list: pick the first
    /// template if none is selected yet, and follow strategy type changes.
    ///
    /// Returns true when the draft changed.
    pub fn reconcile(&mut self, prompts: &[StrategyPrompt]) -> bool {
        let mut changed = self.reconcile_strategy_type();

        if self.step == Step::TradingConfig
            && self.mode == WizardMode::Create
            && self.draft.trading.template_id.is_empty()
        {
            if let Some(first) = prompts.first() {
                debug!(template_id = %first.id, "Selected first prompt template");
                self.draft.trading.template_id = first.id.clone();
                changed = true;
            }
        }
        changed
    }

    /// Clear the template selection if it points at a deleted prompt.
    pub fn forget_template(&mut self, prompt_id: &str) -> bool {
        if self.draft.trading.template_id == prompt_id {
            self.draft.trading.template_id.clear();
            true
        } else {
            false
        }
    }

    /// Validate every step and compose the creation payload.
    pub fn compose_payload(&self) -> Result<CreateStrategyRequest, WizardError> {
        let t = &*self.translator;
        let ai_model = create_ai_model_schema(t).validate(&self.draft.ai_model)?;
        let exchange = create_exchange_schema(t).validate(&self.draft.exchange)?;
        let trading: TradingConfig = self.trading_schema().validate(&self.draft.trading)?;
        Ok(CreateStrategyRequest::compose(ai_model, exchange, &trading))
    }

    /// Validate the last step and submit the strategy.
    ///
    /// A rejection keeps the draft and the step. Success resets the draft to
    /// its initial state and closes the wizard.
    pub async fn submit(&mut self, api: &dyn StrategyApi) -> Result<SubmitOutcome, WizardError> {
        self.ensure_open()?;
        self.ensure_step(Step::TradingConfig)?;
        if self.submitting {
            return Err(WizardError::SubmissionPending);
        }

        let result = self.trading_schema().validate(&self.draft.trading);
        self.checked(result)?;
        let request = self.compose_payload()?;

        self.submit_error = None;
        let response = {
            let _in_flight = InFlight::raise(&mut self.submitting);
            api.create_strategy(&request).await
        };

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Strategy submission failed");
                self.submit_error = Some(e.to_string());
                return Err(e.into());
            }
        };

        if !response.is_success() {
            warn!(code = response.code, msg = %response.msg, "Strategy rejected");
            self.submit_error = Some(response.msg.clone());
            return Ok(SubmitOutcome::Rejected {
                message: response.msg,
            });
        }

        let strategy_id = response.data.map(|d| d.strategy_id).unwrap_or_default();
        info!(
            strategy_id = %strategy_id,
            strategy_name = %request.trading_config.strategy_name,
            "Strategy created"
        );
        self.reset();
        self.open = false;
        self.submitted = true;
        Ok(SubmitOutcome::Created { strategy_id })
    }

    fn reset(&mut self) {
        self.draft = self.initial.clone();
        self.observed_type = self.draft.trading.strategy_type;
        self.step = Step::AiModel;
        self.issues = ValidationErrors::new();
        self.submit_error = None;
        self.submitting = false;
    }

    /// Discard the draft and close.
    pub fn cancel(&mut self) {
        debug!(step = %self.step, "Wizard cancelled");
        self.reset();
        self.open = false;
    }

    /// Reopen at the first step.
    pub fn open(&mut self) {
        self.open = true;
        self.submitted = false;
        self.step = Step::AiModel;
    }
}

/// Keeps a busy flag raised while a backend call is in flight. Dropping the
/// call's future lowers it again.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

fn symbols_for(strategy_type: StrategyType, asset_class: AssetClass) -> Vec<String> {
    let mut symbols = asset_class.default_symbols();
    if strategy_type.is_single_symbol() {
        symbols.truncate(1);
    }
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExchangeFields, TradingMode, SECONDS_PER_DAY};
    use crate::validation::MessageCatalog;
    use crate::wizard::testing::FakeStrategyApi;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn wizard() -> StrategyWizard {
        StrategyWizard::new(Arc::new(MessageCatalog::english()))
    }

    fn fill_ai_model(wizard: &mut StrategyWizard) {
        wizard.draft_mut().ai_model = AiModelForm {
            provider: "openai".to_string(),
            model_id: "gpt-4".to_string(),
            api_key: "sk-test".to_string(),
        };
    }

    fn okx_exchange(asset_class: AssetClass) -> ExchangeForm {
        let mut form = ExchangeForm {
            trading_mode: TradingMode::Live,
            asset_class,
            ..ExchangeForm::default()
        };
        form.fields.exchange_id = "okx".to_string();
        form.fields.api_key = "a".to_string();
        form.fields.secret_key = "s".to_string();
        form.fields.passphrase = "p".to_string();
        form
    }

    async fn wizard_at_trading_step(
        api: &FakeStrategyApi,
        exchange: ExchangeForm,
    ) -> StrategyWizard {
        let mut wizard = wizard();
        fill_ai_model(&mut wizard);
        wizard.draft_mut().exchange = exchange;

        let lookups = wizard.fetch_lookups(api).await.unwrap();
        wizard.advance(&lookups).unwrap();
        wizard.advance(&lookups).unwrap();
        wizard
    }

    fn prompt(id: &str) -> StrategyPrompt {
        StrategyPrompt {
            id: id.to_string(),
            name: id.to_string(),
            content: String::new(),
            asset_class: None,
        }
    }

    #[test]
    fn test_invalid_step_blocks_advance() {
        let mut wizard = wizard();

        let err = wizard.advance(&Lookups::default()).unwrap_err();

        assert!(matches!(err, WizardError::Validation(_)));
        assert_eq!(wizard.step(), Step::AiModel);
        assert_eq!(wizard.status(), StepStatus::Invalid);
        assert_eq!(wizard.issues().issues.len(), 3);
    }

    #[tokio::test]
    async fn test_leaving_exchange_derives_unique_name() {
        let api = FakeStrategyApi::with_strategy_names(&["GPT-4-OKX", "GPT-4-OKX-1"]);
        let wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;

        let trading = &wizard.draft().trading;
        assert_eq!(wizard.step(), Step::TradingConfig);
        assert_eq!(trading.strategy_name, "GPT-4-OKX-2");
        assert_eq!(trading.decide_interval, Some(60));
        assert_eq!(trading.symbols, AssetClass::Crypto.default_symbols());
        assert!(trading.template_id.is_empty());
    }

    #[test]
    fn test_name_falls_back_to_model_id_and_mode_label() {
        let mut wizard = wizard();
        fill_ai_model(&mut wizard);

        wizard.advance(&Lookups::default()).unwrap();
        wizard.advance(&Lookups::default()).unwrap();

        assert_eq!(wizard.draft().trading.strategy_name, "gpt-4-Virtual");
    }

    #[tokio::test]
    async fn test_stock_defaults_and_payload_in_seconds() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Stock)).await;
        assert_eq!(wizard.draft().trading.decide_interval, Some(1));
        assert_eq!(wizard.draft().trading.symbols[0], "AAPL");

        wizard.draft_mut().trading.decide_interval = Some(30);
        wizard.reconcile(&[prompt("p-1")]);

        let payload = wizard.compose_payload().unwrap();
        assert_eq!(payload.trading_config.decide_interval, 30 * SECONDS_PER_DAY);
        assert_eq!(payload.trading_config.decide_interval, 2_592_000);
    }

    #[tokio::test]
    async fn test_crypto_interval_unchanged_in_payload() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;
        wizard.draft_mut().trading.decide_interval = Some(120);
        wizard.reconcile(&[prompt("p-1")]);

        let payload = wizard.compose_payload().unwrap();
        assert_eq!(payload.trading_config.decide_interval, 120);
    }

    #[tokio::test]
    async fn test_first_prompt_selected_once() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;

        assert!(!wizard.reconcile(&[]));
        assert!(wizard.draft().trading.template_id.is_empty());

        assert!(wizard.reconcile(&[prompt("p-1"), prompt("p-2")]));
        assert_eq!(wizard.draft().trading.template_id, "p-1");

        // a later list never overrides the selection
        assert!(!wizard.reconcile(&[prompt("p-9")]));
        assert_eq!(wizard.draft().trading.template_id, "p-1");

        assert!(wizard.forget_template("p-1"));
        assert!(wizard.reconcile(&[prompt("p-2")]));
        assert_eq!(wizard.draft().trading.template_id, "p-2");
    }

    #[tokio::test]
    async fn test_grid_collapses_and_restores_symbols() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;
        let defaults = AssetClass::Crypto.default_symbols();
        assert_eq!(wizard.draft().trading.symbols.len(), 5);

        wizard.set_strategy_type(StrategyType::GridStrategy);
        assert_eq!(wizard.draft().trading.symbols, vec![defaults[0].clone()]);

        wizard.set_strategy_type(StrategyType::PromptBasedStrategy);
        assert_eq!(wizard.draft().trading.symbols, defaults);
    }

    #[tokio::test]
    async fn test_type_change_through_draft_is_reconciled() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;
        wizard.draft_mut().trading.symbols = vec!["SOL-USDT".to_string()];

        // unchanged type leaves user symbols alone
        assert!(!wizard.reconcile(&[]));
        assert_eq!(wizard.draft().trading.symbols, vec!["SOL-USDT".to_string()]);

        wizard.draft_mut().trading.strategy_type = StrategyType::GridStrategy;
        assert!(wizard.reconcile(&[]));
        assert_eq!(wizard.draft().trading.symbols, vec!["BTC-USDT".to_string()]);
    }

    #[tokio::test]
    async fn test_back_keeps_entered_values() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;
        wizard.draft_mut().trading.initial_capital = Some(dec!(2500));

        assert_eq!(wizard.back(), Step::Exchange);
        assert_eq!(wizard.back(), Step::AiModel);
        assert_eq!(wizard.back(), Step::AiModel);

        assert_eq!(wizard.draft().ai_model.model_id, "gpt-4");
        assert_eq!(wizard.draft().exchange.fields.exchange_id, "okx");
        assert_eq!(wizard.draft().trading.initial_capital, Some(dec!(2500)));
    }

    #[tokio::test]
    async fn test_rejected_submission_keeps_draft() {
        let api = FakeStrategyApi::default();
        api.reject_creates(1001, "Insufficient balance");
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;
        wizard.reconcile(&[prompt("p-1")]);

        let outcome = wizard.submit(&api).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: "Insufficient balance".to_string()
            }
        );
        assert!(wizard.is_open());
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.step(), Step::TradingConfig);
        assert_eq!(wizard.submit_error(), Some("Insufficient balance"));
        assert_eq!(wizard.draft().trading.template_id, "p-1");
    }

    #[tokio::test]
    async fn test_successful_submission_resets_and_closes() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;
        wizard.reconcile(&[prompt("p-1")]);

        let outcome = wizard.submit(&api).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Created {
                strategy_id: "s-new".to_string()
            }
        );
        assert!(!wizard.is_open());
        assert_eq!(wizard.status(), StepStatus::Submitted);
        assert_eq!(wizard.step(), Step::AiModel);
        assert_eq!(wizard.draft(), &StrategyDraft::default());

        let created = api.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].trading_config.strategy_name, "GPT-4-OKX");
    }

    #[tokio::test]
    async fn test_abandoned_submission_allows_resubmit() {
        let slow_api = FakeStrategyApi {
            create_delay: Some(Duration::from_secs(30)),
            ..FakeStrategyApi::default()
        };
        let mut wizard = wizard_at_trading_step(&slow_api, okx_exchange(AssetClass::Crypto)).await;
        wizard.reconcile(&[prompt("p-1")]);

        let timed_out =
            tokio::time::timeout(Duration::from_millis(50), wizard.submit(&slow_api)).await;

        assert!(timed_out.is_err());
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.status(), StepStatus::Editing);
        assert_eq!(wizard.step(), Step::TradingConfig);
        assert_eq!(wizard.draft().trading.template_id, "p-1");

        let api = FakeStrategyApi::default();
        let outcome = wizard.submit(&api).await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Created {
                strategy_id: "s-new".to_string()
            }
        );
        assert_eq!(api.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_lookup_failure_falls_back_to_model_id() {
        let api = FakeStrategyApi::with_strategy_names(&["gpt-4-OKX"]);
        let mut wizard = wizard();
        fill_ai_model(&mut wizard);
        wizard.draft_mut().ai_model.provider = "anthropic".to_string();
        wizard.draft_mut().exchange = okx_exchange(AssetClass::Crypto);

        let lookups = wizard.fetch_lookups(&api).await.unwrap();
        assert_eq!(lookups.model_display_name, None);
        assert_eq!(lookups.existing_names, vec!["gpt-4-OKX".to_string()]);

        wizard.advance(&lookups).unwrap();
        wizard.advance(&lookups).unwrap();
        assert_eq!(wizard.step(), Step::TradingConfig);
        assert_eq!(wizard.draft().trading.strategy_name, "gpt-4-OKX-1");
    }

    #[tokio::test]
    async fn test_submit_requires_last_step_and_valid_form() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard();
        let err = wizard.submit(&api).await.unwrap_err();
        assert!(matches!(
            err,
            WizardError::WrongStep {
                expected: Step::TradingConfig,
                actual: Step::AiModel
            }
        ));

        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;
        let err = wizard.submit(&api).await.unwrap_err();
        assert!(matches!(err, WizardError::Validation(_)));
        assert!(wizard.issues().message_for("template_id").is_some());
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let api = FakeStrategyApi::default();
        let mut wizard = wizard_at_trading_step(&api, okx_exchange(AssetClass::Crypto)).await;

        wizard.cancel();
        assert!(!wizard.is_open());
        assert!(matches!(
            wizard.advance(&Lookups::default()),
            Err(WizardError::Closed)
        ));

        wizard.open();
        assert_eq!(wizard.step(), Step::AiModel);
        assert_eq!(wizard.draft(), &StrategyDraft::default());
    }

    #[tokio::test]
    async fn test_copy_keeps_trading_values_and_converts_interval() {
        let exchange = ExchangeForm {
            trading_mode: TradingMode::Virtual,
            asset_class: AssetClass::Stock,
            fields: ExchangeFields::default(),
        };
        let detail = StrategyDetail {
            strategy_id: "s-1".to_string(),
            strategy_name: "GPT-4-Virtual".to_string(),
            llm_model_config: AiModelForm {
                provider: "openai".to_string(),
                model_id: "gpt-4".to_string(),
                api_key: "sk".to_string(),
            },
            exchange_config: exchange,
            trading_config: TradingForm {
                symbols: vec!["TSLA".to_string()],
                prompt_name: "Value".to_string(),
                prompt: "Buy cheap".to_string(),
                decide_interval: Some(2 * SECONDS_PER_DAY),
                ..TradingForm::default()
            },
        };
        let api = FakeStrategyApi::with_strategy_names(&["GPT-4-Virtual"]);

        let mut wizard = StrategyWizard::for_copy(Arc::new(MessageCatalog::english()), &detail);
        assert_eq!(wizard.mode(), WizardMode::Copy);
        assert_eq!(wizard.draft().trading.decide_interval, Some(2));

        let lookups = wizard.fetch_lookups(&api).await.unwrap();
        wizard.advance(&lookups).unwrap();
        wizard.advance(&lookups).unwrap();

        let trading = &wizard.draft().trading;
        assert_eq!(trading.strategy_name, "GPT-4-Virtual-1");
        assert_eq!(trading.symbols, vec!["TSLA".to_string()]);

        // no template needed, and no auto-selection in copy mode
        assert!(!wizard.reconcile(&[prompt("p-1")]));
        let payload = wizard.compose_payload().unwrap();
        assert_eq!(payload.trading_config.decide_interval, 172_800);

        match wizard.submit(&api).await.unwrap() {
            SubmitOutcome::Created { .. } => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
        // reset returns to the copied draft, not an empty one
        assert_eq!(wizard.draft().trading.symbols, vec!["TSLA".to_string()]);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::Exchange.to_string(), "2 (exchange)");
        assert_eq!(Step::TradingConfig.number(), 3);
    }
}
