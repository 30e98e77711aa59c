use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider a model is served by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModelProvider {
    OpenAi,
    OpenRouter,
    Together,
    Anthropic,
    Custom,
    Other(String),
}

impl ModelProvider {
    pub fn as_str(&self) -> &str {
        match self {
            ModelProvider::OpenAi => "openai",
            ModelProvider::OpenRouter => "openrouter",
            ModelProvider::Together => "together",
            ModelProvider::Anthropic => "anthropic",
            ModelProvider::Custom => "custom",
            ModelProvider::Other(s) => s,
        }
    }

    /// Parse user input, ignoring case and surrounding whitespace.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "openai" => ModelProvider::OpenAi,
            "openrouter" => ModelProvider::OpenRouter,
            "together" => ModelProvider::Together,
            "anthropic" => ModelProvider::Anthropic,
            "custom" => ModelProvider::Custom,
            _ => ModelProvider::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for ModelProvider {
    fn from(s: String) -> Self {
        ModelProvider::parse(&s)
    }
}

impl From<ModelProvider> for String {
    fn from(p: ModelProvider) -> Self {
        p.as_str().to_string()
    }
}

impl fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-defined provider/model configuration stored by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomModel {
    /// Assigned by the service; empty on create requests
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub model_name: String,
    pub provider: ModelProvider,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub max_tokens: u32,
    #[serde(default)]
    pub api_key_env_var: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseModelConfig {
    pub provider: ModelProvider,
    pub model_name: String,
    pub max_tokens: u32,
    pub api_key_env_var: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelRole {
    #[serde(rename = "planner")]
    Planner,
    #[serde(rename = "summarizer")]
    PlanSummary,
    #[serde(rename = "builder")]
    Builder,
    #[serde(rename = "names")]
    Name,
    #[serde(rename = "commit-messages")]
    CommitMsg,
    #[serde(rename = "exec-status")]
    ExecStatus,
}

impl ModelRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Planner => "planner",
            ModelRole::PlanSummary => "summarizer",
            ModelRole::Builder => "builder",
            ModelRole::Name => "names",
            ModelRole::CommitMsg => "commit-messages",
            ModelRole::ExecStatus => "exec-status",
        }
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRoleConfig {
    pub role: ModelRole,
    pub base_model_config: BaseModelConfig,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerRoleConfig {
    #[serde(flatten)]
    pub model_role_config: ModelRoleConfig,
    pub max_convo_tokens: u32,
    pub reserved_output_tokens: u32,
}

/// Model assignments for every role a plan uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub planner: PlannerRoleConfig,
    pub plan_summary: ModelRoleConfig,
    pub builder: ModelRoleConfig,
    pub namer: ModelRoleConfig,
    pub commit_msg: ModelRoleConfig,
    pub exec_status: ModelRoleConfig,
}

impl ModelSet {
    /// Every role paired with its config, in display order.
    pub fn roles(&self) -> [(ModelRole, &ModelRoleConfig); 6] {
        [
            (ModelRole::Planner, &self.planner.model_role_config),
            (ModelRole::PlanSummary, &self.plan_summary),
            (ModelRole::Builder, &self.builder),
            (ModelRole::Name, &self.namer),
            (ModelRole::CommitMsg, &self.commit_msg),
            (ModelRole::ExecStatus, &self.exec_status),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOverrides {
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub max_convo_tokens: Option<u32>,
    #[serde(default)]
    pub reserved_output_tokens: Option<u32>,
}

/// Per-plan settings as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSettings {
    #[serde(default)]
    pub model_set: Option<ModelSet>,
    #[serde(default)]
    pub model_overrides: ModelOverrides,
}
