//! Response types for the strategy backend.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::validation::{AiModelForm, ExchangeForm, TradingForm};

/// Envelope every backend response is wrapped in. `code == 0` means success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Payload of a successful response.
    pub fn into_data(self, what: &'static str) -> Result<T, ClientError> {
        if !self.is_success() {
            return Err(ClientError::Api {
                code: self.code,
                msg: self.msg,
            });
        }
        self.data.ok_or(ClientError::MissingData(what))
    }

    /// Success check for responses whose payload is irrelevant.
    pub fn into_unit(self) -> Result<(), ClientError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ClientError::Api {
                code: self.code,
                msg: self.msg,
            })
        }
    }
}

/// A stored strategy, as returned by the detail endpoint.
///
/// The trading section is read with the form shape; its `decide_interval` is
/// in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyDetail {
    pub strategy_id: String,
    #[serde(default)]
    pub strategy_name: String,
    #[serde(default)]
    pub llm_model_config: AiModelForm,
    #[serde(default)]
    pub exchange_config: ExchangeForm,
    #[serde(default)]
    pub trading_config: TradingForm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_and_failure() {
        let ok: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"code":0,"msg":"ok","data":["a"]}"#).unwrap();
        assert_eq!(ok.into_data("names").unwrap(), vec!["a".to_string()]);

        let failed: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"code":40001,"msg":"name taken"}"#).unwrap();
        match failed.into_data("names") {
            Err(ClientError::Api { code, msg }) => {
                assert_eq!(code, 40001);
                assert_eq!(msg, "name taken");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let empty: ApiResponse<Vec<String>> = serde_json::from_str(r#"{"code":0}"#).unwrap();
        assert!(matches!(
            empty.into_data("names"),
            Err(ClientError::MissingData("names"))
        ));
    }

    #[test]
    fn test_strategy_detail_reads_partial_sections() {
        let detail: StrategyDetail = serde_json::from_str(
            r#"{
                "strategy_id": "s-1",
                "strategy_name": "GPT-4-OKX",
                "exchange_config": {"trading_mode": "live", "asset_class": "stock", "exchange_id": "okx"},
                "trading_config": {"decide_interval": 172800, "prompt": "Buy dips"}
            }"#,
        )
        .unwrap();

        assert_eq!(detail.exchange_config.fields.exchange_id, "okx");
        assert_eq!(detail.trading_config.decide_interval, Some(172_800));
        assert_eq!(detail.llm_model_config.provider, "");
    }
}
