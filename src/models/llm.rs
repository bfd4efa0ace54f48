//! Language-model provider settings.

use serde::{Deserialize, Serialize};

/// Validated credentials for the model that drives a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiModelConfig {
    pub provider: String,
    pub model_id: String,
    pub api_key: String,
}

/// A model offered by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_id: String,
    #[serde(default)]
    pub model_name: String,
}

/// Provider detail as returned by the model-provider query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelProviderDetail {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

impl ModelProviderDetail {
    /// Display name of a model, if the provider lists it with one.
    pub fn display_name(&self, model_id: &str) -> Option<&str> {
        self.models
            .iter()
            .find(|m| m.model_id == model_id)
            .map(|m| m.model_name.as_str())
            .filter(|name| !name.is_empty())
    }
}
