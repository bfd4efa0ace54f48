//! Raw form state for each wizard step.
//!
//! Forms hold exactly what the user has typed so far. Nothing here is
//! guaranteed valid; the schemas turn a form into its validated config.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::{AssetClass, ExchangeFields, StrategyType, TradingMode};

/// Step 1: model provider, model and key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiModelForm {
    pub provider: String,
    pub model_id: String,
    pub api_key: String,
}

/// Step 2: trading mode, asset class and exchange credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeForm {
    pub trading_mode: TradingMode,
    pub asset_class: AssetClass,
    #[serde(flatten)]
    pub fields: ExchangeFields,
}

/// Step 3: trading parameters.
///
/// `decide_interval` is in the display unit of the selected asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingForm {
    pub strategy_type: StrategyType,
    pub strategy_name: String,
    pub initial_capital: Option<Decimal>,
    pub max_leverage: Option<Decimal>,
    pub symbols: Vec<String>,
    pub template_id: String,
    pub prompt_name: String,
    pub prompt: String,
    pub decide_interval: Option<u64>,
    pub backtest_start_ts: Option<i64>,
    pub backtest_end_ts: Option<i64>,
}

impl Default for TradingForm {
    fn default() -> Self {
        let asset_class = AssetClass::default();
        Self {
            strategy_type: StrategyType::default(),
            strategy_name: String::new(),
            initial_capital: Some(dec!(1000)),
            max_leverage: Some(dec!(2)),
            symbols: asset_class.default_symbols(),
            template_id: String::new(),
            prompt_name: String::new(),
            prompt: String::new(),
            decide_interval: Some(asset_class.default_decide_interval()),
            backtest_start_ts: None,
            backtest_end_ts: None,
        }
    }
}

impl TradingForm {
    /// Take values from `defaults` wherever this form is still blank.
    pub fn fill_blanks_from(&mut self, defaults: &TradingForm) {
        if self.strategy_name.is_empty() {
            self.strategy_name = defaults.strategy_name.clone();
        }
        if self.symbols.is_empty() {
            self.symbols = defaults.symbols.clone();
        }
        if self.template_id.is_empty() {
            self.template_id = defaults.template_id.clone();
        }
        self.initial_capital = self.initial_capital.or(defaults.initial_capital);
        self.max_leverage = self.max_leverage.or(defaults.max_leverage);
        self.decide_interval = self.decide_interval.or(defaults.decide_interval);
        self.backtest_start_ts = self.backtest_start_ts.or(defaults.backtest_start_ts);
        self.backtest_end_ts = self.backtest_end_ts.or(defaults.backtest_end_ts);
    }
}
