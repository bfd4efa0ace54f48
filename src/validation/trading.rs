//! Schemas for the trading-configuration step.
//!
//! The decision interval is checked in the unit the user edits it in (days for
//! stocks, seconds for crypto). Converting to seconds happens when the payload
//! is composed, not here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    resolve_limits, AssetClass, IntervalLimits, IntervalUnit, PromptSelection, TradingConfig,
    TradingMode,
};

use super::forms::TradingForm;
use super::issue::{require_text, ValidationErrors, Validator};
use super::translator::{keys, Translator};

const MIN_CAPITAL: Decimal = dec!(1);
const MIN_LEVERAGE: Decimal = dec!(1);
const MAX_LEVERAGE: Decimal = dec!(5);

#[derive(Debug, Clone)]
enum PromptRule {
    Template {
        required: String,
    },
    Inline {
        name_required: String,
        prompt_required: String,
    },
}

#[derive(Debug, Clone)]
struct IntervalRule {
    limits: IntervalLimits,
    required: String,
    below_min: String,
    above_max: String,
}

/// Whole-object check that only exists in backtest mode.
#[derive(Debug, Clone)]
struct BacktestRangeRule {
    start_required: String,
    end_required: String,
    out_of_order: String,
}

/// Trading-configuration schema, built for one trading mode and asset class.
#[derive(Debug, Clone)]
pub struct TradingStrategySchema {
    strategy_name_required: String,
    capital_required: String,
    capital_min: String,
    leverage_required: String,
    leverage_range: String,
    symbols_required: String,
    interval: IntervalRule,
    prompt: PromptRule,
    backtest_range: Option<BacktestRangeRule>,
}

/// Schema for a new strategy whose prompt is a saved template.
pub fn create_trading_strategy_schema<T: Translator + ?Sized>(
    t: &T,
    trading_mode: TradingMode,
    asset_class: AssetClass,
) -> TradingStrategySchema {
    build(
        t,
        trading_mode,
        asset_class,
        PromptRule::Template {
            required: t.translate(keys::TEMPLATE_ID_REQUIRED),
        },
    )
}

/// Schema for a copy of an existing strategy, which carries its prompt inline.
pub fn create_copy_trading_strategy_schema<T: Translator + ?Sized>(
    t: &T,
    trading_mode: TradingMode,
    asset_class: AssetClass,
) -> TradingStrategySchema {
    build(
        t,
        trading_mode,
        asset_class,
        PromptRule::Inline {
            name_required: t.translate(keys::PROMPT_NAME_REQUIRED),
            prompt_required: t.translate(keys::PROMPT_REQUIRED),
        },
    )
}

fn build<T: Translator + ?Sized>(
    t: &T,
    trading_mode: TradingMode,
    asset_class: AssetClass,
    prompt: PromptRule,
) -> TradingStrategySchema {
    let limits = resolve_limits(asset_class);
    let (min_key, max_key) = match limits.unit {
        IntervalUnit::Days => (keys::DECIDE_INTERVAL_MIN_DAYS, keys::DECIDE_INTERVAL_MAX_DAYS),
        IntervalUnit::Seconds => (
            keys::DECIDE_INTERVAL_MIN_SECONDS,
            keys::DECIDE_INTERVAL_MAX_SECONDS,
        ),
    };

    let backtest_range = (trading_mode == TradingMode::Backtest).then(|| BacktestRangeRule {
        start_required: t.translate(keys::BACKTEST_START_REQUIRED),
        end_required: t.translate(keys::BACKTEST_END_REQUIRED),
        out_of_order: t.translate(keys::BACKTEST_RANGE_ORDER),
    });

    TradingStrategySchema {
        strategy_name_required: t.translate(keys::STRATEGY_NAME_REQUIRED),
        capital_required: t.translate(keys::INITIAL_CAPITAL_REQUIRED),
        capital_min: t.translate(keys::INITIAL_CAPITAL_MIN),
        leverage_required: t.translate(keys::MAX_LEVERAGE_REQUIRED),
        leverage_range: t.translate(keys::MAX_LEVERAGE_RANGE),
        symbols_required: t.translate(keys::SYMBOLS_REQUIRED),
        interval: IntervalRule {
            limits,
            required: t.translate(keys::DECIDE_INTERVAL_REQUIRED),
            below_min: t.translate(min_key),
            above_max: t.translate(max_key),
        },
        prompt,
        backtest_range,
    }
}

impl TradingStrategySchema {
    /// Bounds the decision interval is checked against.
    pub fn interval_limits(&self) -> IntervalLimits {
        self.interval.limits
    }

    fn check_prompt(&self, form: &TradingForm, errors: &mut ValidationErrors) -> PromptSelection {
        match &self.prompt {
            PromptRule::Template { required } => {
                require_text(errors, "template_id", &form.template_id, required);
                PromptSelection::Template {
                    template_id: form.template_id.clone(),
                }
            }
            PromptRule::Inline {
                name_required,
                prompt_required,
            } => {
                require_text(errors, "prompt_name", &form.prompt_name, name_required);
                require_text(errors, "prompt", &form.prompt, prompt_required);
                PromptSelection::Inline {
                    prompt_name: form.prompt_name.clone(),
                    prompt: form.prompt.clone(),
                }
            }
        }
    }

    fn check_interval(&self, value: Option<u64>, errors: &mut ValidationErrors) -> u64 {
        let rule = &self.interval;
        match value {
            None => {
                errors.push("decide_interval", &rule.required);
                0
            }
            Some(v) if v < rule.limits.min => {
                errors.push("decide_interval", &rule.below_min);
                v
            }
            Some(v) if v > rule.limits.max => {
                errors.push("decide_interval", &rule.above_max);
                v
            }
            Some(v) => v,
        }
    }

    fn check_backtest_range(&self, config: &TradingConfig) -> Result<(), ValidationErrors> {
        let Some(rule) = &self.backtest_range else {
            return Ok(());
        };

        let mut errors = ValidationErrors::new();
        match (config.backtest_start_ts, config.backtest_end_ts) {
            (Some(start), Some(end)) if start >= end => {
                errors.push("backtest_end_ts", &rule.out_of_order);
            }
            (Some(_), Some(_)) => {}
            (start, end) => {
                if start.is_none() {
                    errors.push("backtest_start_ts", &rule.start_required);
                }
                if end.is_none() {
                    errors.push("backtest_end_ts", &rule.end_required);
                }
            }
        }
        errors.into_result(())
    }
}

/// Trimmed, non-blank symbols in first-seen order without duplicates.
fn normalize_symbols(symbols: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(symbols.len());
    for symbol in symbols.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !out.iter().any(|seen| seen == symbol) {
            out.push(symbol.to_string());
        }
    }
    out
}

impl Validator for TradingStrategySchema {
    type Candidate = TradingForm;
    type Output = TradingConfig;

    fn validate(&self, form: &TradingForm) -> Result<TradingConfig, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        require_text(
            &mut errors,
            "strategy_name",
            &form.strategy_name,
            &self.strategy_name_required,
        );

        let initial_capital = match form.initial_capital {
            None => {
                errors.push("initial_capital", &self.capital_required);
                Decimal::ZERO
            }
            Some(c) if c < MIN_CAPITAL => {
                errors.push("initial_capital", &self.capital_min);
                c
            }
            Some(c) => c,
        };

        let max_leverage = match form.max_leverage {
            None => {
                errors.push("max_leverage", &self.leverage_required);
                Decimal::ZERO
            }
            Some(l) if l < MIN_LEVERAGE || l > MAX_LEVERAGE => {
                errors.push("max_leverage", &self.leverage_range);
                l
            }
            Some(l) => l,
        };

        let symbols = normalize_symbols(&form.symbols);
        if symbols.is_empty() {
            errors.push("symbols", &self.symbols_required);
        }

        let prompt = self.check_prompt(form, &mut errors);
        let decide_interval = self.check_interval(form.decide_interval, &mut errors);

        // Time range only travels with backtests.
        let in_backtest = self.backtest_range.is_some();
        let config = TradingConfig {
            strategy_type: form.strategy_type,
            strategy_name: form.strategy_name.clone(),
            initial_capital,
            max_leverage,
            symbols,
            prompt,
            decide_interval,
            backtest_start_ts: form.backtest_start_ts.filter(|_| in_backtest),
            backtest_end_ts: form.backtest_end_ts.filter(|_| in_backtest),
        };

        let config = errors.into_result(config)?;
        self.check_backtest_range(&config)?;
        Ok(config)
    }
}
