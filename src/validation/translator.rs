//! Message lookup for validation errors.

use std::collections::HashMap;

/// Resolves a message key to user-facing text.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Message keys used by the schema builders.
pub mod keys {
    pub const PROVIDER_REQUIRED: &str = "strategy.validation.provider.required";
    pub const MODEL_ID_REQUIRED: &str = "strategy.validation.model_id.required";
    pub const LLM_API_KEY_REQUIRED: &str = "strategy.validation.llm_api_key.required";

    pub const EXCHANGE_ID_REQUIRED: &str = "strategy.validation.exchange_id.required";
    pub const EXCHANGE_ID_UNSUPPORTED: &str = "strategy.validation.exchange_id.unsupported";
    pub const API_KEY_REQUIRED: &str = "strategy.validation.api_key.required";
    pub const SECRET_KEY_REQUIRED: &str = "strategy.validation.secret_key.required";
    pub const PASSPHRASE_REQUIRED: &str = "strategy.validation.passphrase.required";
    pub const WALLET_ADDRESS_REQUIRED: &str = "strategy.validation.wallet_address.required";
    pub const PRIVATE_KEY_REQUIRED: &str = "strategy.validation.private_key.required";

    pub const STRATEGY_NAME_REQUIRED: &str = "strategy.validation.strategy_name.required";
    pub const INITIAL_CAPITAL_REQUIRED: &str = "strategy.validation.initial_capital.required";
    pub const INITIAL_CAPITAL_MIN: &str = "strategy.validation.initial_capital.min";
    pub const MAX_LEVERAGE_REQUIRED: &str = "strategy.validation.max_leverage.required";
    pub const MAX_LEVERAGE_RANGE: &str = "strategy.validation.max_leverage.range";
    pub const SYMBOLS_REQUIRED: &str = "strategy.validation.symbols.required";
    pub const TEMPLATE_ID_REQUIRED: &str = "strategy.validation.template_id.required";
    pub const PROMPT_NAME_REQUIRED: &str = "strategy.validation.prompt_name.required";
    pub const PROMPT_REQUIRED: &str = "strategy.validation.prompt.required";

    pub const DECIDE_INTERVAL_REQUIRED: &str = "strategy.validation.decide_interval.required";
    pub const DECIDE_INTERVAL_MIN_SECONDS: &str = "strategy.validation.decide_interval.min_seconds";
    pub const DECIDE_INTERVAL_MAX_SECONDS: &str = "strategy.validation.decide_interval.max_seconds";
    pub const DECIDE_INTERVAL_MIN_DAYS: &str = "strategy.validation.decide_interval.min_days";
    pub const DECIDE_INTERVAL_MAX_DAYS: &str = "strategy.validation.decide_interval.max_days";

    pub const BACKTEST_START_REQUIRED: &str = "strategy.validation.backtest_start_ts.required";
    pub const BACKTEST_END_REQUIRED: &str = "strategy.validation.backtest_end_ts.required";
    pub const BACKTEST_RANGE_ORDER: &str = "strategy.validation.backtest_range.order";
}

/// In-memory key → message table. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English messages.
    pub fn english() -> Self {
        use keys::*;

        [
            (PROVIDER_REQUIRED, "Please select a model provider"),
            (MODEL_ID_REQUIRED, "Please select a model"),
            (LLM_API_KEY_REQUIRED, "Model API key is required"),
            (EXCHANGE_ID_REQUIRED, "Please select an exchange"),
            (EXCHANGE_ID_UNSUPPORTED, "This exchange is not supported for live trading"),
            (API_KEY_REQUIRED, "API key is required"),
            (SECRET_KEY_REQUIRED, "Secret key is required"),
            (PASSPHRASE_REQUIRED, "Passphrase is required"),
            (WALLET_ADDRESS_REQUIRED, "Wallet address is required"),
            (PRIVATE_KEY_REQUIRED, "Private key is required"),
            (STRATEGY_NAME_REQUIRED, "Strategy name is required"),
            (INITIAL_CAPITAL_REQUIRED, "Initial capital is required"),
            (INITIAL_CAPITAL_MIN, "Initial capital must be at least 1"),
            (MAX_LEVERAGE_REQUIRED, "Max leverage is required"),
            (MAX_LEVERAGE_RANGE, "Max leverage must be between 1 and 5"),
            (SYMBOLS_REQUIRED, "Select at least one symbol"),
            (TEMPLATE_ID_REQUIRED, "Please select a prompt template"),
            (PROMPT_NAME_REQUIRED, "Prompt name is required"),
            (PROMPT_REQUIRED, "Prompt is required"),
            (DECIDE_INTERVAL_REQUIRED, "Decision interval is required"),
            (DECIDE_INTERVAL_MIN_SECONDS, "Decision interval must be at least 10 seconds"),
            (DECIDE_INTERVAL_MAX_SECONDS, "Decision interval must be at most 3600 seconds"),
            (DECIDE_INTERVAL_MIN_DAYS, "Decision interval must be at least 1 day"),
            (DECIDE_INTERVAL_MAX_DAYS, "Decision interval must be at most 60 days"),
            (BACKTEST_START_REQUIRED, "Backtest start time is required"),
            (BACKTEST_END_REQUIRED, "Backtest end time is required"),
            (BACKTEST_RANGE_ORDER, "Backtest start time must be before end time"),
        ]
        .into_iter()
        .fold(Self::new(), |catalog, (key, message)| catalog.with(key, message))
    }

    /// Add or replace one message.
    pub fn with(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(key.into(), message.into());
        self
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_catalog_covers_known_keys() {
        let catalog = MessageCatalog::english();
        assert_eq!(
            catalog.translate(keys::PASSPHRASE_REQUIRED),
            "Passphrase is required"
        );
        assert_eq!(catalog.translate("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_closure_translator() {
        let upper = |key: &str| key.to_uppercase();
        assert_eq!(upper.translate("a.b"), "A.B");
    }

    #[test]
    fn test_override_message() {
        let catalog = MessageCatalog::english().with(keys::SYMBOLS_REQUIRED, "Pick a symbol");
        assert_eq!(catalog.translate(keys::SYMBOLS_REQUIRED), "Pick a symbol");
    }
}
