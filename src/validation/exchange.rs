//! Schema for the exchange step.
//!
//! Dispatches on the trading mode first and, for live trading, on the
//! exchange, then applies that variant's required credentials.

use crate::models::{
    ApiKeyCredentials, CredentialField, ExchangeConfig, ExchangeFields, ExchangeId, LiveExchange,
    PassphraseCredentials, TradingMode,
};

use super::forms::ExchangeForm;
use super::issue::{ValidationErrors, Validator};
use super::translator::{keys, Translator};

/// Exchange credentials schema.
#[derive(Debug, Clone)]
pub struct ExchangeSchema {
    exchange_required: String,
    exchange_unsupported: String,
    api_key_required: String,
    secret_key_required: String,
    passphrase_required: String,
    wallet_address_required: String,
    private_key_required: String,
}

/// Build the exchange schema.
pub fn create_exchange_schema<T: Translator + ?Sized>(t: &T) -> ExchangeSchema {
    ExchangeSchema {
        exchange_required: t.translate(keys::EXCHANGE_ID_REQUIRED),
        exchange_unsupported: t.translate(keys::EXCHANGE_ID_UNSUPPORTED),
        api_key_required: t.translate(keys::API_KEY_REQUIRED),
        secret_key_required: t.translate(keys::SECRET_KEY_REQUIRED),
        passphrase_required: t.translate(keys::PASSPHRASE_REQUIRED),
        wallet_address_required: t.translate(keys::WALLET_ADDRESS_REQUIRED),
        private_key_required: t.translate(keys::PRIVATE_KEY_REQUIRED),
    }
}

impl ExchangeSchema {
    fn missing_message(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::ApiKey => &self.api_key_required,
            CredentialField::SecretKey => &self.secret_key_required,
            CredentialField::Passphrase => &self.passphrase_required,
            CredentialField::WalletAddress => &self.wallet_address_required,
            CredentialField::PrivateKey => &self.private_key_required,
        }
    }

    fn validate_live(&self, fields: &ExchangeFields) -> Result<LiveExchange, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if fields.exchange_id.is_empty() {
            errors.push("exchange_id", &self.exchange_required);
            return Err(errors);
        }
        let exchange_id = match fields.exchange_id.parse::<ExchangeId>() {
            Ok(id) => id,
            Err(_) => {
                errors.push("exchange_id", &self.exchange_unsupported);
                return Err(errors);
            }
        };

        for &field in exchange_id.required_credentials() {
            if fields.credential(field).is_empty() {
                errors.push(field.as_str(), self.missing_message(field));
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let api_key = || ApiKeyCredentials {
            api_key: fields.api_key.clone(),
            secret_key: fields.secret_key.clone(),
        };
        let with_passphrase = || PassphraseCredentials {
            api_key: fields.api_key.clone(),
            secret_key: fields.secret_key.clone(),
            passphrase: fields.passphrase.clone(),
        };

        Ok(match exchange_id {
            ExchangeId::Hyperliquid => LiveExchange::Hyperliquid {
                wallet_address: fields.wallet_address.clone(),
                private_key: fields.private_key.clone(),
            },
            ExchangeId::Okx => LiveExchange::Okx(with_passphrase()),
            ExchangeId::CoinbaseExchange => LiveExchange::CoinbaseExchange(with_passphrase()),
            ExchangeId::Binance => LiveExchange::Binance(api_key()),
            ExchangeId::BlockchainCom => LiveExchange::BlockchainCom(api_key()),
            ExchangeId::Gate => LiveExchange::Gate(api_key()),
            ExchangeId::Mexc => LiveExchange::Mexc(api_key()),
        })
    }
}

impl Validator for ExchangeSchema {
    type Candidate = ExchangeForm;
    type Output = ExchangeConfig;

    fn validate(&self, form: &ExchangeForm) -> Result<ExchangeConfig, ValidationErrors> {
        let asset_class = form.asset_class;
        match form.trading_mode {
            TradingMode::Virtual => Ok(ExchangeConfig::Virtual {
                asset_class,
                fields: form.fields.clone(),
            }),
            TradingMode::Backtest => Ok(ExchangeConfig::Backtest {
                asset_class,
                fields: form.fields.clone(),
            }),
            TradingMode::Live => Ok(ExchangeConfig::Live {
                asset_class,
                exchange: self.validate_live(&form.fields)?,
            }),
        }
    }
}
