//! Strategy backend client.

use async_trait::async_trait;
use backoff::{future::retry_notify, ExponentialBackoff};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::models::{
    AssetClass, CreatePromptRequest, CreateStrategyRequest, CreatedStrategy, ModelProviderDetail,
    StrategyPrompt, StrategySummary,
};

use super::config::ClientConfig;
use super::types::{ApiResponse, StrategyDetail};

/// Operations the wizard needs from the strategy backend.
#[async_trait]
pub trait StrategyApi: Send + Sync {
    /// All strategies the user already has.
    async fn list_strategies(&self) -> Result<Vec<StrategySummary>, ClientError>;

    async fn get_strategy_detail(&self, strategy_id: &str) -> Result<StrategyDetail, ClientError>;

    async fn get_model_provider_detail(
        &self,
        provider: &str,
    ) -> Result<ModelProviderDetail, ClientError>;

    /// Saved prompt templates, optionally restricted to one asset class.
    async fn list_strategy_prompts(
        &self,
        asset_class: Option<AssetClass>,
    ) -> Result<Vec<StrategyPrompt>, ClientError>;

    async fn create_strategy_prompt(
        &self,
        request: &CreatePromptRequest,
    ) -> Result<StrategyPrompt, ClientError>;

    async fn delete_strategy_prompt(&self, prompt_id: &str) -> Result<(), ClientError>;

    /// Submit a strategy. The envelope is returned as-is so the caller can
    /// surface a rejection message.
    async fn create_strategy(
        &self,
        request: &CreateStrategyRequest,
    ) -> Result<ApiResponse<CreatedStrategy>, ClientError>;
}

/// JSON-over-HTTP implementation of [`StrategyApi`].
pub struct HttpStrategyClient {
    client: Client,
    config: ClientConfig,
}

impl HttpStrategyClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.config.base_url, path)
    }

    /// GET with retries on transient failures.
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse<T>, ClientError> {
        let policy = ExponentialBackoff {
            max_elapsed_time: Some(self.config.max_retry_elapsed),
            ..ExponentialBackoff::default()
        };

        retry_notify(
            policy,
            move || async move {
                debug!(url = %url, "GET");
                let response = self
                    .client
                    .get(url)
                    .query(query)
                    .send()
                    .await
                    .map_err(|e| classify(ClientError::Http(e)))?;
                read_envelope(response).await.map_err(classify)
            },
            |err: ClientError, wait: Duration| {
                warn!(url = %url, error = %err, retry_in_ms = wait.as_millis() as u64, "Retrying request");
            },
        )
        .await
    }
}

/// Connection failures, timeouts and 5xx responses are worth retrying.
fn is_transient(err: &ClientError) -> bool {
    match err {
        ClientError::Http(e) => e.is_connect() || e.is_timeout(),
        ClientError::Status { status, .. } => *status >= 500,
        ClientError::Api { .. } | ClientError::MissingData(_) => false,
    }
}

fn classify(err: ClientError) -> backoff::Error<ClientError> {
    if is_transient(&err) {
        backoff::Error::transient(err)
    } else {
        backoff::Error::permanent(err)
    }
}

async fn read_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

#[async_trait]
impl StrategyApi for HttpStrategyClient {
    async fn list_strategies(&self) -> Result<Vec<StrategySummary>, ClientError> {
        self.get_envelope(&self.url("/strategies"), &[])
            .await?
            .into_data("strategies")
    }

    async fn get_strategy_detail(&self, strategy_id: &str) -> Result<StrategyDetail, ClientError> {
        self.get_envelope(&self.url(&format!("/strategies/{strategy_id}")), &[])
            .await?
            .into_data("strategy detail")
    }

    async fn get_model_provider_detail(
        &self,
        provider: &str,
    ) -> Result<ModelProviderDetail, ClientError> {
        self.get_envelope(&self.url(&format!("/models/providers/{provider}")), &[])
            .await?
            .into_data("model provider")
    }

    async fn list_strategy_prompts(
        &self,
        asset_class: Option<AssetClass>,
    ) -> Result<Vec<StrategyPrompt>, ClientError> {
        let url = self.url("/strategies/prompts");
        let query: Vec<(&str, &str)> = asset_class
            .map(|a| ("asset_class", a.as_str()))
            .into_iter()
            .collect();

        self.get_envelope(&url, &query)
            .await?
            .into_data("prompts")
    }

    async fn create_strategy_prompt(
        &self,
        request: &CreatePromptRequest,
    ) -> Result<StrategyPrompt, ClientError> {
        let url = self.url("/strategies/prompts");
        debug!(url = %url, name = %request.name, "Creating prompt");

        let response = self.client.post(&url).json(request).send().await?;
        read_envelope(response).await?.into_data("prompt")
    }

    async fn delete_strategy_prompt(&self, prompt_id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("/strategies/prompts/{prompt_id}"));
        debug!(url = %url, "Deleting prompt");

        let response = self.client.delete(&url).send().await?;
        read_envelope::<serde_json::Value>(response)
            .await?
            .into_unit()
    }

    async fn create_strategy(
        &self,
        request: &CreateStrategyRequest,
    ) -> Result<ApiResponse<CreatedStrategy>, ClientError> {
        let url = self.url("/strategies/create");
        debug!(
            url = %url,
            strategy_name = %request.trading_config.strategy_name,
            "Creating strategy"
        );

        let response = self.client.post(&url).json(request).send().await?;
        read_envelope(response).await
    }
}
