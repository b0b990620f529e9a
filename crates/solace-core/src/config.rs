//! Credential configuration for remote completion providers.

use serde::{Deserialize, Serialize};

/// Root configuration structure for secret.json
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiConfig>,
}

/// OpenAI API configuration
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}
