//! Saved prompt templates.

use tracing::{info, warn};

use crate::api::StrategyApi;
use crate::error::{ClientError, WizardError};
use crate::models::{AssetClass, CreatePromptRequest, StrategyPrompt};
use crate::validation::{keys, Translator, ValidationErrors};

use super::orchestrator::StrategyWizard;

/// List, create and delete prompt templates through the backend.
pub struct PromptLibrary<'a> {
    api: &'a dyn StrategyApi,
    translator: &'a dyn Translator,
}

impl<'a> PromptLibrary<'a> {
    pub fn new(api: &'a dyn StrategyApi, translator: &'a dyn Translator) -> Self {
        Self { api, translator }
    }

    pub async fn list(
        &self,
        asset_class: Option<AssetClass>,
    ) -> Result<Vec<StrategyPrompt>, ClientError> {
        self.api.list_strategy_prompts(asset_class).await
    }

    /// Save a new template. Name and content must not be blank.
    pub async fn create(
        &self,
        name: &str,
        content: &str,
        asset_class: Option<AssetClass>,
    ) -> Result<StrategyPrompt, WizardError> {
        let mut errors = ValidationErrors::new();
        if name.trim().is_empty() {
            errors.push("name", self.translator.translate(keys::PROMPT_NAME_REQUIRED));
        }
        if content.trim().is_empty() {
            errors.push("content", self.translator.translate(keys::PROMPT_REQUIRED));
        }
        errors.into_result(())?;

        let request = CreatePromptRequest {
            name: name.trim().to_string(),
            content: content.to_string(),
            asset_class,
        };
        let prompt = self.api.create_strategy_prompt(&request).await?;
        info!(prompt_id = %prompt.id, name = %prompt.name, "Prompt created");
        Ok(prompt)
    }

    /// Delete a template. Failures are logged and returned.
    pub async fn delete(&self, prompt_id: &str) -> Result<(), ClientError> {
        match self.api.delete_strategy_prompt(prompt_id).await {
            Ok(()) => {
                info!(prompt_id = %prompt_id, "Prompt deleted");
                Ok(())
            }
            Err(e) => {
                warn!(prompt_id = %prompt_id, error = %e, "Failed to delete prompt");
                Err(e)
            }
        }
    }

    /// Delete a template and drop it from the wizard's selection.
    pub async fn delete_selected(
        &self,
        prompt_id: &str,
        wizard: &mut StrategyWizard,
    ) -> Result<(), ClientError> {
        self.delete(prompt_id).await?;
        wizard.forget_template(prompt_id);
        Ok(())
    }
}
