//! Strategy configuration and the creation payload.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::asset::{to_seconds, AssetClass};
use super::exchange::ExchangeConfig;
use super::llm::AiModelConfig;

/// Decision engine behind a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StrategyType {
    #[default]
    PromptBasedStrategy,
    GridStrategy,
}

impl StrategyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyType::PromptBasedStrategy => "PromptBasedStrategy",
            StrategyType::GridStrategy => "GridStrategy",
        }
    }

    /// Grid strategies trade exactly one symbol.
    pub fn is_single_symbol(&self) -> bool {
        matches!(self, StrategyType::GridStrategy)
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "promptbasedstrategy" | "prompt" => Ok(StrategyType::PromptBasedStrategy),
            "gridstrategy" | "grid" => Ok(StrategyType::GridStrategy),
            other => Err(format!("unknown strategy type '{other}'")),
        }
    }
}

/// Where a strategy's prompt comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptSelection {
    /// A saved template, referenced by id.
    Template { template_id: String },
    /// Prompt text carried with the strategy (copying an existing strategy).
    Inline { prompt_name: String, prompt: String },
}

/// Validated trading configuration, with the decision interval in display units.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingConfig {
    pub strategy_type: StrategyType,
    pub strategy_name: String,
    pub initial_capital: Decimal,
    pub max_leverage: Decimal,
    pub symbols: Vec<String>,
    pub prompt: PromptSelection,
    pub decide_interval: u64,
    pub backtest_start_ts: Option<i64>,
    pub backtest_end_ts: Option<i64>,
}

impl TradingConfig {
    /// Wire form, with the decision interval converted to seconds.
    pub fn to_payload(&self, asset_class: AssetClass) -> TradingConfigPayload {
        TradingConfigPayload {
            strategy_type: self.strategy_type,
            strategy_name: self.strategy_name.clone(),
            initial_capital: self.initial_capital,
            max_leverage: self.max_leverage,
            symbols: self.symbols.clone(),
            prompt: self.prompt.clone(),
            decide_interval: to_seconds(asset_class, self.decide_interval),
            backtest_start_ts: self.backtest_start_ts,
            backtest_end_ts: self.backtest_end_ts,
        }
    }
}

/// Trading configuration as transmitted; `decide_interval` is in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingConfigPayload {
    pub strategy_type: StrategyType,
    pub strategy_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_capital: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_leverage: Decimal,
    pub symbols: Vec<String>,
    #[serde(flatten)]
    pub prompt: PromptSelection,
    pub decide_interval: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtest_start_ts: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtest_end_ts: Option<i64>,
}

/// Body of the create-strategy call.
#[derive(Debug, Clone, Serialize)]
pub struct CreateStrategyRequest {
    pub llm_model_config: AiModelConfig,
    pub exchange_config: ExchangeConfig,
    pub trading_config: TradingConfigPayload,
}

impl CreateStrategyRequest {
    /// Compose the payload from the three validated steps.
    pub fn compose(
        llm_model_config: AiModelConfig,
        exchange_config: ExchangeConfig,
        trading_config: &TradingConfig,
    ) -> Self {
        let trading_config = trading_config.to_payload(exchange_config.asset_class());
        Self {
            llm_model_config,
            exchange_config,
            trading_config,
        }
    }
}

/// An existing strategy, as listed by the strategy query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy_id: String,
    pub strategy_name: String,
    #[serde(default)]
    pub status: String,
}

/// Data returned by a successful create-strategy call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatedStrategy {
    #[serde(default)]
    pub strategy_id: String,
}
