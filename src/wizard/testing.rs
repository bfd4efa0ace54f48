//! In-memory backend used by the wizard tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiResponse, StrategyApi, StrategyDetail};
use crate::error::ClientError;
use crate::models::{
    AssetClass, CreatePromptRequest, CreateStrategyRequest, CreatedStrategy, ModelInfo,
    ModelProviderDetail, StrategyPrompt, StrategySummary,
};

pub(crate) struct FakeStrategyApi {
    pub strategies: Vec<StrategySummary>,
    pub provider: ModelProviderDetail,
    pub details: Vec<StrategyDetail>,
    pub prompts: Mutex<Vec<StrategyPrompt>>,
    pub create_response: Mutex<ApiResponse<CreatedStrategy>>,
    pub created: Mutex<Vec<CreateStrategyRequest>>,
    pub fail_deletes: bool,
    pub create_delay: Option<Duration>,
}

impl Default for FakeStrategyApi {
    fn default() -> Self {
        Self {
            strategies: Vec::new(),
            provider: ModelProviderDetail {
                provider: "openai".to_string(),
                models: vec![ModelInfo {
                    model_id: "gpt-4".to_string(),
                    model_name: "GPT-4".to_string(),
                }],
            },
            details: Vec::new(),
            prompts: Mutex::new(Vec::new()),
            create_response: Mutex::new(ApiResponse {
                code: 0,
                msg: "ok".to_string(),
                data: Some(CreatedStrategy {
                    strategy_id: "s-new".to_string(),
                }),
            }),
            created: Mutex::new(Vec::new()),
            fail_deletes: false,
            create_delay: None,
        }
    }
}

impl FakeStrategyApi {
    pub fn with_strategy_names(names: &[&str]) -> Self {
        Self {
            strategies: names
                .iter()
                .enumerate()
                .map(|(i, name)| StrategySummary {
                    strategy_id: format!("s-{i}"),
                    strategy_name: name.to_string(),
                    status: "running".to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn reject_creates(&self, code: i64, msg: &str) {
        *self.create_response.lock().unwrap() = ApiResponse {
            code,
            msg: msg.to_string(),
            data: None,
        };
    }

    pub fn add_prompt(&self, id: &str, name: &str, asset_class: Option<AssetClass>) {
        self.prompts.lock().unwrap().push(StrategyPrompt {
            id: id.to_string(),
            name: name.to_string(),
            content: format!("{name} prompt"),
            asset_class,
        });
    }
}

#[async_trait]
impl StrategyApi for FakeStrategyApi {
    async fn list_strategies(&self) -> Result<Vec<StrategySummary>, ClientError> {
        Ok(self.strategies.clone())
    }

    async fn get_strategy_detail(&self, strategy_id: &str) -> Result<StrategyDetail, ClientError> {
        self.details
            .iter()
            .find(|d| d.strategy_id == strategy_id)
            .cloned()
            .ok_or(ClientError::MissingData("strategy detail"))
    }

    async fn get_model_provider_detail(
        &self,
        provider: &str,
    ) -> Result<ModelProviderDetail, ClientError> {
        if provider == self.provider.provider {
            Ok(self.provider.clone())
        } else {
            Err(ClientError::Api {
                code: 404,
                msg: format!("unknown provider {provider}"),
            })
        }
    }

    async fn list_strategy_prompts(
        &self,
        asset_class: Option<AssetClass>,
    ) -> Result<Vec<StrategyPrompt>, ClientError> {
        let prompts = self.prompts.lock().unwrap();
        Ok(prompts
            .iter()
            .filter(|p| asset_class.is_none() || p.asset_class.is_none() || p.asset_class == asset_class)
            .cloned()
            .collect())
    }

    async fn create_strategy_prompt(
        &self,
        request: &CreatePromptRequest,
    ) -> Result<StrategyPrompt, ClientError> {
        let mut prompts = self.prompts.lock().unwrap();
        let prompt = StrategyPrompt {
            id: format!("p-{}", prompts.len() + 1),
            name: request.name.clone(),
            content: request.content.clone(),
            asset_class: request.asset_class,
        };
        prompts.push(prompt.clone());
        Ok(prompt)
    }

    async fn delete_strategy_prompt(&self, prompt_id: &str) -> Result<(), ClientError> {
        if self.fail_deletes {
            return Err(ClientError::Api {
                code: 500,
                msg: "delete failed".to_string(),
            });
        }
        self.prompts.lock().unwrap().retain(|p| p.id != prompt_id);
        Ok(())
    }

    async fn create_strategy(
        &self,
        request: &CreateStrategyRequest,
    ) -> Result<ApiResponse<CreatedStrategy>, ClientError> {
        if let Some(delay) = self.create_delay {
            tokio::time::sleep(delay).await;
        }
        self.created.lock().unwrap().push(request.clone());
        Ok(self.create_response.lock().unwrap().clone())
    }
}
