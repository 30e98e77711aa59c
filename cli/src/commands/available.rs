use anyhow::{Context, Result};
use modelctl_core::catalog::available_models;
use modelctl_core::models::BaseModelConfig;
use modelctl_core::{ApiClient, CustomModel};

use crate::term;

pub async fn execute<C>(client: &C, plan_id: Option<&str>, custom_only: bool) -> Result<()>
where
    C: ApiClient + ?Sized,
{
    if plan_id.is_none() {
        println!("No current plan");
        return Ok(());
    }

    let custom_models = term::with_spinner("", client.list_custom_models())
        .await
        .context("Error fetching custom models")?;

    if !custom_only {
        term::print_table(
            "Built-in Models",
            &["Provider", "Name", "Max Tokens", "API Key Env Var", "Url"],
            &built_in_rows(&available_models()),
        );
    }

    if !custom_models.is_empty() {
        term::print_table(
            "Custom Models",
            &["#", "Name", "Provider", "Max Tokens", "API Key Env Var", "Url"],
            &custom_rows(&custom_models),
        );
    } else if custom_only {
        println!("No custom models");
        println!();
    }

    if custom_only {
        term::print_cmds(&["models", "models create"]);
    } else {
        term::print_cmds(&["models available --custom", "models", "models create"]);
    }

    Ok(())
}

fn built_in_rows(models: &[BaseModelConfig]) -> Vec<Vec<String>> {
    models
        .iter()
        .map(|m| {
            vec![
                m.provider.to_string(),
                m.model_name.clone(),
                m.max_tokens.to_string(),
                m.api_key_env_var.clone(),
                m.base_url.clone(),
            ]
        })
        .collect()
}

/// Rows numbered from 1; the number is what `models delete` accepts.
fn custom_rows(models: &[CustomModel]) -> Vec<Vec<String>> {
    models
        .iter()
        .enumerate()
        .map(|(i, m)| {
            vec![
                (i + 1).to_string(),
                m.model_name.clone(),
                m.provider.to_string(),
                m.max_tokens.to_string(),
                m.api_key_env_var.clone(),
                m.base_url.clone(),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{model, FakeClient};
    use modelctl_core::ModelProvider;

    #[tokio::test]
    async fn no_current_plan_lists_nothing() {
        let client = FakeClient::with_models(vec![model("gpt", "a")]);
        execute(&client, None, false).await.unwrap();
        execute(&client, None, true).await.unwrap();
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn custom_only_with_empty_list_succeeds() {
        let client = FakeClient::default();
        execute(&client, Some("plan-1"), true).await.unwrap();
        assert_eq!(client.calls(), vec!["list"]);
    }

    #[tokio::test]
    async fn full_listing_fetches_custom_models_once() {
        let client = FakeClient::with_models(vec![model("gpt", "a"), model("claude", "b")]);
        execute(&client, Some("plan-1"), false).await.unwrap();
        assert_eq!(client.calls(), vec!["list"]);
    }

    #[test]
    fn custom_rows_are_numbered_in_list_order() {
        let model = |name: &str| CustomModel {
            id: format!("id-{name}"),
            model_name: name.to_string(),
            provider: ModelProvider::OpenRouter,
            base_url: "https://openrouter.ai/api/v1".to_string(),
            max_tokens: 1000,
            api_key_env_var: "OPENROUTER_API_KEY".to_string(),
            description: String::new(),
            created_at: None,
            updated_at: None,
        };
        let rows = custom_rows(&[model("gpt"), model("claude")]);
        assert_eq!(rows[0][..3], ["1", "gpt", "openrouter"]);
        assert_eq!(rows[1][..2], ["2", "claude"]);
    }
}
