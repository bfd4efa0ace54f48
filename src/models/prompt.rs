//! Strategy prompt templates.

use serde::{Deserialize, Serialize};

use super::asset::AssetClass;

/// A saved, reusable prompt used by prompt-based strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyPrompt {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<AssetClass>,
}

/// Body of the create-prompt call.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePromptRequest {
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<AssetClass>,
}
