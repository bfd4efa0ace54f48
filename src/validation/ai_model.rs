//! Schema for the model-provider step.

use crate::models::AiModelConfig;

use super::forms::AiModelForm;
use super::issue::{require_text, ValidationErrors, Validator};
use super::translator::{keys, Translator};

/// Requires provider, model and API key.
#[derive(Debug, Clone)]
pub struct AiModelSchema {
    provider_required: String,
    model_id_required: String,
    api_key_required: String,
}

/// Build the model-provider schema.
pub fn create_ai_model_schema<T: Translator + ?Sized>(t: &T) -> AiModelSchema {
    AiModelSchema {
        provider_required: t.translate(keys::PROVIDER_REQUIRED),
        model_id_required: t.translate(keys::MODEL_ID_REQUIRED),
        api_key_required: t.translate(keys::LLM_API_KEY_REQUIRED),
    }
}

impl Validator for AiModelSchema {
    type Candidate = AiModelForm;
    type Output = AiModelConfig;

    fn validate(&self, form: &AiModelForm) -> Result<AiModelConfig, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "provider", &form.provider, &self.provider_required);
        require_text(&mut errors, "model_id", &form.model_id, &self.model_id_required);
        require_text(&mut errors, "api_key", &form.api_key, &self.api_key_required);

        errors.into_result(AiModelConfig {
            provider: form.provider.clone(),
            model_id: form.model_id.clone(),
            api_key: form.api_key.clone(),
        })
    }
}
