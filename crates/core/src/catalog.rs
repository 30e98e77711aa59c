//! Built-in model catalogue and the default model set.

use crate::models::{
    BaseModelConfig, ModelProvider, ModelRole, ModelRoleConfig, ModelSet, PlannerRoleConfig,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const TOGETHER_BASE_URL: &str = "https://api.together.xyz/v1";

const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
const OPENROUTER_KEY_VAR: &str = "OPENROUTER_API_KEY";
const TOGETHER_KEY_VAR: &str = "TOGETHERAI_API_KEY";

fn base(provider: ModelProvider, model_name: &str, max_tokens: u32) -> BaseModelConfig {
    let (base_url, key_var) = match provider {
        ModelProvider::OpenRouter => (OPENROUTER_BASE_URL, OPENROUTER_KEY_VAR),
        ModelProvider::Together => (TOGETHER_BASE_URL, TOGETHER_KEY_VAR),
        _ => (OPENAI_BASE_URL, OPENAI_KEY_VAR),
    };
    BaseModelConfig {
        provider,
        model_name: model_name.to_string(),
        max_tokens,
        api_key_env_var: key_var.to_string(),
        base_url: base_url.to_string(),
    }
}

/// Models the service supports without any custom configuration.
pub fn available_models() -> Vec<BaseModelConfig> {
    vec![
        base(ModelProvider::OpenAi, "gpt-4o", 128_000),
        base(ModelProvider::OpenAi, "gpt-4-turbo", 128_000),
        base(ModelProvider::OpenAi, "gpt-4o-mini", 128_000),
        base(ModelProvider::OpenAi, "gpt-3.5-turbo", 16_385),
        base(ModelProvider::OpenRouter, "anthropic/claude-3.5-sonnet", 200_000),
        base(ModelProvider::OpenRouter, "anthropic/claude-3-opus", 200_000),
        base(ModelProvider::OpenRouter, "anthropic/claude-3-haiku", 200_000),
        base(ModelProvider::OpenRouter, "google/gemini-pro-1.5", 1_000_000),
        base(
            ModelProvider::Together,
            "mistralai/Mixtral-8x22B-Instruct-v0.1",
            65_536,
        ),
        base(
            ModelProvider::Together,
            "meta-llama/Llama-3-70b-chat-hf",
            8_192,
        ),
    ]
}

fn role(role: ModelRole, config: BaseModelConfig, temperature: f32, top_p: f32) -> ModelRoleConfig {
    ModelRoleConfig {
        role,
        base_model_config: config,
        temperature,
        top_p,
    }
}

/// Model set used when a plan has not chosen one.
pub fn default_model_set() -> ModelSet {
    let gpt4o = base(ModelProvider::OpenAi, "gpt-4o", 128_000);
    let gpt4o_mini = base(ModelProvider::OpenAi, "gpt-4o-mini", 128_000);

    ModelSet {
        name: "OpenAI Defaults".to_string(),
        description: "OpenAI GPT-4o for heavy lifting, GPT-4o mini for lighter tasks".to_string(),
        planner: PlannerRoleConfig {
            model_role_config: role(ModelRole::Planner, gpt4o.clone(), 0.3, 0.3),
            max_convo_tokens: 10_000,
            reserved_output_tokens: 4_096,
        },
        plan_summary: role(ModelRole::PlanSummary, gpt4o.clone(), 0.2, 0.2),
        builder: role(ModelRole::Builder, gpt4o, 0.1, 0.1),
        namer: role(ModelRole::Name, gpt4o_mini.clone(), 0.8, 0.5),
        commit_msg: role(ModelRole::CommitMsg, gpt4o_mini.clone(), 0.8, 0.5),
        exec_status: role(ModelRole::ExecStatus, gpt4o_mini, 0.1, 0.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_assigns_every_role() {
        let set = default_model_set();
        for (role, config) in set.roles() {
            assert_eq!(config.role, role);
            assert!(!config.base_model_config.model_name.is_empty());
        }
        assert!(set.planner.reserved_output_tokens < set.planner.model_role_config.base_model_config.max_tokens);
    }

    #[test]
    fn catalogue_entries_carry_provider_defaults() {
        let models = available_models();
        assert!(!models.is_empty());
        let together = models
            .iter()
            .find(|m| m.provider == ModelProvider::Together)
            .unwrap();
        assert_eq!(together.base_url, TOGETHER_BASE_URL);
        assert_eq!(together.api_key_env_var, TOGETHER_KEY_VAR);
    }
}
