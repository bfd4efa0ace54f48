//! Exchange connection settings.
//!
//! A validated [`ExchangeConfig`] is a closed variant per trading mode and, for
//! live trading, per exchange. Holding a `LiveExchange::Okx` means the
//! passphrase is there; holding a `LiveExchange::Hyperliquid` means the wallet
//! and key are there. On the wire the config is sent flat.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::asset::{AssetClass, TradingMode};

/// Exchanges supported for live trading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeId {
    Hyperliquid,
    Okx,
    CoinbaseExchange,
    Binance,
    BlockchainCom,
    Gate,
    Mexc,
}

/// A credential input on the exchange step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    ApiKey,
    SecretKey,
    Passphrase,
    WalletAddress,
    PrivateKey,
}

impl CredentialField {
    /// Field name as it appears in forms and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialField::ApiKey => "api_key",
            CredentialField::SecretKey => "secret_key",
            CredentialField::Passphrase => "passphrase",
            CredentialField::WalletAddress => "wallet_address",
            CredentialField::PrivateKey => "private_key",
        }
    }
}

impl ExchangeId {
    pub const ALL: [ExchangeId; 7] = [
        ExchangeId::Hyperliquid,
        ExchangeId::Okx,
        ExchangeId::CoinbaseExchange,
        ExchangeId::Binance,
        ExchangeId::BlockchainCom,
        ExchangeId::Gate,
        ExchangeId::Mexc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeId::Hyperliquid => "hyperliquid",
            ExchangeId::Okx => "okx",
            ExchangeId::CoinbaseExchange => "coinbaseexchange",
            ExchangeId::Binance => "binance",
            ExchangeId::BlockchainCom => "blockchaincom",
            ExchangeId::Gate => "gate",
            ExchangeId::Mexc => "mexc",
        }
    }

    /// Human-readable exchange name.
    pub fn display_label(&self) -> &'static str {
        match self {
            ExchangeId::Hyperliquid => "Hyperliquid",
            ExchangeId::Okx => "OKX",
            ExchangeId::CoinbaseExchange => "Coinbase",
            ExchangeId::Binance => "Binance",
            ExchangeId::BlockchainCom => "Blockchain.com",
            ExchangeId::Gate => "Gate.io",
            ExchangeId::Mexc => "MEXC",
        }
    }

    /// Credentials that must be non-empty to trade live on this exchange.
    pub fn required_credentials(&self) -> &'static [CredentialField] {
        use CredentialField::*;
        match self {
            ExchangeId::Hyperliquid => &[WalletAddress, PrivateKey],
            ExchangeId::Okx | ExchangeId::CoinbaseExchange => &[ApiKey, SecretKey, Passphrase],
            ExchangeId::Binance | ExchangeId::BlockchainCom | ExchangeId::Gate | ExchangeId::Mexc => {
                &[ApiKey, SecretKey]
            }
        }
    }
}

impl fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExchangeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExchangeId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("unsupported exchange '{s}'"))
    }
}

/// The full set of exchange fields, all plain strings.
///
/// This is what virtual and backtest strategies carry, and the flat shape every
/// config is transmitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeFields {
    pub exchange_id: String,
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
    pub wallet_address: String,
    pub private_key: String,
}

impl ExchangeFields {
    /// Value of one credential input.
    pub fn credential(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::ApiKey => &self.api_key,
            CredentialField::SecretKey => &self.secret_key,
            CredentialField::Passphrase => &self.passphrase,
            CredentialField::WalletAddress => &self.wallet_address,
            CredentialField::PrivateKey => &self.private_key,
        }
    }
}

/// API key and secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyCredentials {
    pub api_key: String,
    pub secret_key: String,
}

/// API key, secret and passphrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassphraseCredentials {
    pub api_key: String,
    pub secret_key: String,
    pub passphrase: String,
}

/// A live exchange together with the credentials it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveExchange {
    Hyperliquid {
        wallet_address: String,
        private_key: String,
    },
    Okx(PassphraseCredentials),
    CoinbaseExchange(PassphraseCredentials),
    Binance(ApiKeyCredentials),
    BlockchainCom(ApiKeyCredentials),
    Gate(ApiKeyCredentials),
    Mexc(ApiKeyCredentials),
}

impl LiveExchange {
    pub fn exchange_id(&self) -> ExchangeId {
        match self {
            LiveExchange::Hyperliquid { .. } => ExchangeId::Hyperliquid,
            LiveExchange::Okx(_) => ExchangeId::Okx,
            LiveExchange::CoinbaseExchange(_) => ExchangeId::CoinbaseExchange,
            LiveExchange::Binance(_) => ExchangeId::Binance,
            LiveExchange::BlockchainCom(_) => ExchangeId::BlockchainCom,
            LiveExchange::Gate(_) => ExchangeId::Gate,
            LiveExchange::Mexc(_) => ExchangeId::Mexc,
        }
    }

    fn to_fields(&self) -> ExchangeFields {
        let exchange_id = self.exchange_id().as_str().to_string();
        match self {
            LiveExchange::Hyperliquid {
                wallet_address,
                private_key,
            } => ExchangeFields {
                exchange_id,
                wallet_address: wallet_address.clone(),
                private_key: private_key.clone(),
                ..Default::default()
            },
            LiveExchange::Okx(c) | LiveExchange::CoinbaseExchange(c) => ExchangeFields {
                exchange_id,
                api_key: c.api_key.clone(),
                secret_key: c.secret_key.clone(),
                passphrase: c.passphrase.clone(),
                ..Default::default()
            },
            LiveExchange::Binance(c)
            | LiveExchange::BlockchainCom(c)
            | LiveExchange::Gate(c)
            | LiveExchange::Mexc(c) => ExchangeFields {
                exchange_id,
                api_key: c.api_key.clone(),
                secret_key: c.secret_key.clone(),
                ..Default::default()
            },
        }
    }
}

/// Validated exchange configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ExchangeConfigPayload")]
pub enum ExchangeConfig {
    Virtual {
        asset_class: AssetClass,
        fields: ExchangeFields,
    },
    Backtest {
        asset_class: AssetClass,
        fields: ExchangeFields,
    },
    Live {
        asset_class: AssetClass,
        exchange: LiveExchange,
    },
}

impl ExchangeConfig {
    pub fn trading_mode(&self) -> TradingMode {
        match self {
            ExchangeConfig::Virtual { .. } => TradingMode::Virtual,
            ExchangeConfig::Backtest { .. } => TradingMode::Backtest,
            ExchangeConfig::Live { .. } => TradingMode::Live,
        }
    }

    pub fn asset_class(&self) -> AssetClass {
        match self {
            ExchangeConfig::Virtual { asset_class, .. }
            | ExchangeConfig::Backtest { asset_class, .. }
            | ExchangeConfig::Live { asset_class, .. } => *asset_class,
        }
    }

    /// Label used when naming a strategy after its exchange.
    pub fn display_label(&self) -> String {
        match self {
            ExchangeConfig::Live { exchange, .. } => exchange.exchange_id().display_label().to_string(),
            ExchangeConfig::Virtual { fields, .. } | ExchangeConfig::Backtest { fields, .. } => {
                exchange_label(&fields.exchange_id, self.trading_mode())
            }
        }
    }
}

/// Label for a possibly empty, possibly unknown exchange id.
pub fn exchange_label(exchange_id: &str, trading_mode: TradingMode) -> String {
    let trimmed = exchange_id.trim();
    if trimmed.is_empty() {
        return trading_mode.display_label().to_string();
    }
    match trimmed.parse::<ExchangeId>() {
        Ok(id) => id.display_label().to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Flat wire shape of an exchange config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfigPayload {
    pub trading_mode: TradingMode,
    pub asset_class: AssetClass,
    #[serde(flatten)]
    pub fields: ExchangeFields,
}

impl From<ExchangeConfig> for ExchangeConfigPayload {
    fn from(config: ExchangeConfig) -> Self {
        let trading_mode = config.trading_mode();
        match config {
            ExchangeConfig::Virtual {
                asset_class,
                fields,
            }
            | ExchangeConfig::Backtest {
                asset_class,
                fields,
            } => Self {
                trading_mode,
                asset_class,
                fields,
            },
            ExchangeConfig::Live {
                asset_class,
                exchange,
            } => Self {
                trading_mode,
                asset_class,
                fields: exchange.to_fields(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_okx_serializes_flat() {
        let config = ExchangeConfig::Live {
            asset_class: AssetClass::Crypto,
            exchange: LiveExchange::Okx(PassphraseCredentials {
                api_key: "a".to_string(),
                secret_key: "s".to_string(),
                passphrase: "p".to_string(),
            }),
        };

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["trading_mode"], "live");
        assert_eq!(json["asset_class"], "crypto");
        assert_eq!(json["exchange_id"], "okx");
        assert_eq!(json["passphrase"], "p");
        assert_eq!(json["wallet_address"], "");
    }

    #[test]
    fn test_exchange_labels() {
        assert_eq!(exchange_label("okx", TradingMode::Live), "OKX");
        assert_eq!(exchange_label("", TradingMode::Virtual), "Virtual");
        assert_eq!(exchange_label("kraken", TradingMode::Backtest), "kraken");
    }

    #[test]
    fn test_required_credentials_by_exchange() {
        assert_eq!(ExchangeId::Hyperliquid.required_credentials().len(), 2);
        assert!(ExchangeId::Okx
            .required_credentials()
            .contains(&CredentialField::Passphrase));
        assert!(!ExchangeId::Binance
            .required_credentials()
            .contains(&CredentialField::Passphrase));
        assert_eq!("CoinbaseExchange".parse::<ExchangeId>().unwrap(), ExchangeId::CoinbaseExchange);
    }
}
