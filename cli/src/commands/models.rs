use anyhow::{Context, Result};
use modelctl_core::catalog::default_model_set;
use modelctl_core::models::ModelOverrides;
use modelctl_core::{ApiClient, ModelSet};

use crate::term;

pub async fn execute<C>(client: &C, plan_id: Option<&str>, branch: &str) -> Result<()>
where
    C: ApiClient + ?Sized,
{
    let Some(plan_id) = plan_id else {
        println!("No current plan");
        println!("\nRun `modelctl config project.plan_id <id>` to choose one.");
        return Ok(());
    };

    let settings = term::with_spinner("", client.get_settings(plan_id, branch))
        .await
        .context("Error getting settings")?;

    let model_set = settings.model_set.unwrap_or_else(default_model_set);

    print_model_set(&model_set);
    print_overrides(&settings.model_overrides);

    term::print_cmds(&["models available", "models create"]);

    Ok(())
}

fn print_model_set(set: &ModelSet) {
    term::print_table(
        "Current Model Set",
        &[set.name.as_str()],
        &[vec![set.description.as_str()]],
    );

    let rows: Vec<Vec<String>> = set
        .roles()
        .iter()
        .map(|(role, config)| {
            vec![
                role.to_string(),
                config.base_model_config.provider.to_string(),
                config.base_model_config.model_name.clone(),
                format!("{:.1}", config.temperature),
                format!("{:.1}", config.top_p),
            ]
        })
        .collect();
    term::print_table(
        "Models",
        &["Role", "Provider", "Model", "Temperature", "Top P"],
        &rows,
    );

    term::print_table(
        "Planner Defaults",
        &["Max Tokens", "Max Convo Tokens", "Reserved Output Tokens"],
        &[vec![
            set.planner
                .model_role_config
                .base_model_config
                .max_tokens
                .to_string(),
            set.planner.max_convo_tokens.to_string(),
            set.planner.reserved_output_tokens.to_string(),
        ]],
    );
}

fn override_rows(overrides: &ModelOverrides) -> Vec<Vec<String>> {
    let show = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "no override".to_string());
    vec![
        vec!["Max Tokens".to_string(), show(overrides.max_tokens)],
        vec!["Max Convo Tokens".to_string(), show(overrides.max_convo_tokens)],
        vec![
            "Reserved Output Tokens".to_string(),
            show(overrides.reserved_output_tokens),
        ],
    ]
}

fn print_overrides(overrides: &ModelOverrides) {
    term::print_table("Planner Overrides", &["Name", "Value"], &override_rows(overrides));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::FakeClient;

    #[tokio::test]
    async fn no_current_plan_skips_settings_call() {
        let client = FakeClient::default();
        execute(&client, None, "main").await.unwrap();
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn plan_without_model_set_uses_default() {
        let client = FakeClient::default();
        execute(&client, Some("plan-1"), "main").await.unwrap();
        assert_eq!(client.calls(), vec!["settings"]);
    }

    #[test]
    fn unset_overrides_are_labelled() {
        let overrides = ModelOverrides {
            max_tokens: Some(64_000),
            ..Default::default()
        };
        let rows = override_rows(&overrides);
        assert_eq!(rows[0][1], "64000");
        assert_eq!(rows[1][1], "no override");
        assert_eq!(rows[2][1], "no override");
    }
}
