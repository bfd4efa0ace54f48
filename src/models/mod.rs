//! Data models for assets, exchanges, models, strategies and prompts.

mod asset;
mod exchange;
mod llm;
mod prompt;
mod strategy;

pub use asset::{
    resolve_limits, to_display_units, to_seconds, AssetClass, IntervalLimits, IntervalUnit,
    TradingMode, SECONDS_PER_DAY,
};
pub use exchange::{
    exchange_label, ApiKeyCredentials, CredentialField, ExchangeConfig, ExchangeConfigPayload,
    ExchangeFields, ExchangeId, LiveExchange, PassphraseCredentials,
};
pub use llm::{AiModelConfig, ModelInfo, ModelProviderDetail};
pub use prompt::{CreatePromptRequest, StrategyPrompt};
pub use strategy::{
    CreateStrategyRequest, CreatedStrategy, PromptSelection, StrategySummary, StrategyType,
    TradingConfig, TradingConfigPayload,
};
