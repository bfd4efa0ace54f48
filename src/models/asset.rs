//! Asset classes, trading modes and the decision-interval unit table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Seconds in one day; stock intervals are edited in days and stored in seconds.
pub const SECONDS_PER_DAY: u64 = 86_400;

const CRYPTO_SYMBOLS: [&str; 5] = ["BTC-USDT", "ETH-USDT", "SOL-USDT", "DOGE-USDT", "XRP-USDT"];
const STOCK_SYMBOLS: [&str; 5] = ["AAPL", "MSFT", "NVDA", "GOOGL", "AMZN"];

/// Market a strategy trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    #[default]
    Crypto,
    Stock,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Crypto => "crypto",
            AssetClass::Stock => "stock",
        }
    }

    /// Default symbol universe offered when a strategy is created.
    pub fn default_symbols(&self) -> Vec<String> {
        let symbols: &[&str] = match self {
            AssetClass::Crypto => &CRYPTO_SYMBOLS,
            AssetClass::Stock => &STOCK_SYMBOLS,
        };
        symbols.iter().map(|s| s.to_string()).collect()
    }

    /// Default decision interval, in the display unit of this asset class.
    pub fn default_decide_interval(&self) -> u64 {
        match self {
            AssetClass::Crypto => 60,
            AssetClass::Stock => 1,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crypto" => Ok(AssetClass::Crypto),
            "stock" => Ok(AssetClass::Stock),
            other => Err(format!("unknown asset class '{other}' (expected crypto or stock)")),
        }
    }
}

/// Where orders go: nowhere (virtual), historical replay (backtest) or a real exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    #[default]
    Virtual,
    Backtest,
    Live,
}

impl TradingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingMode::Virtual => "virtual",
            TradingMode::Backtest => "backtest",
            TradingMode::Live => "live",
        }
    }

    /// Label used when no exchange is attached to the strategy.
    pub fn display_label(&self) -> &'static str {
        match self {
            TradingMode::Virtual => "Virtual",
            TradingMode::Backtest => "Backtest",
            TradingMode::Live => "Live",
        }
    }
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "virtual" => Ok(TradingMode::Virtual),
            "backtest" => Ok(TradingMode::Backtest),
            "live" => Ok(TradingMode::Live),
            other => Err(format!(
                "unknown trading mode '{other}' (expected virtual, backtest or live)"
            )),
        }
    }
}

/// Unit the decision interval is edited in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Seconds,
    Days,
}

impl IntervalUnit {
    /// Number of seconds in one unit.
    pub fn seconds(&self) -> u64 {
        match self {
            IntervalUnit::Seconds => 1,
            IntervalUnit::Days => SECONDS_PER_DAY,
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalUnit::Seconds => f.pad("seconds"),
            IntervalUnit::Days => f.pad("days"),
        }
    }
}

/// Inclusive bounds for the decision interval, in `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalLimits {
    pub min: u64,
    pub max: u64,
    pub unit: IntervalUnit,
}

impl IntervalLimits {
    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Interval bounds for an asset class.
pub fn resolve_limits(asset_class: AssetClass) -> IntervalLimits {
    match asset_class {
        AssetClass::Crypto => IntervalLimits {
            min: 10,
            max: 3600,
            unit: IntervalUnit::Seconds,
        },
        AssetClass::Stock => IntervalLimits {
            min: 1,
            max: 60,
            unit: IntervalUnit::Days,
        },
    }
}

/// Convert an interval from display units to seconds.
pub fn to_seconds(asset_class: AssetClass, display_value: u64) -> u64 {
    display_value.saturating_mul(resolve_limits(asset_class).unit.seconds())
}

/// Convert a stored interval (seconds) back to display units.
///
/// Partial days are floored, never below the asset class minimum.
pub fn to_display_units(asset_class: AssetClass, seconds: u64) -> u64 {
    let limits = resolve_limits(asset_class);
    (seconds / limits.unit.seconds()).max(limits.min)
}
