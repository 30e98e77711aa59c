use anyhow::{Context, Result};
use modelctl_core::{ApiClient, CustomModel, ModelProvider};

use crate::term;

pub async fn execute<C>(client: &C, prompter: &mut term::Prompter) -> Result<()>
where
    C: ApiClient + ?Sized,
{
    let model = prompt_custom_model(prompter)?;

    term::with_spinner("Creating model...", client.create_custom_model(&model))
        .await
        .context("Error creating model")?;

    println!("Model created successfully.");
    Ok(())
}

fn prompt_custom_model(prompter: &mut term::Prompter) -> Result<CustomModel> {
    let model_name = prompter
        .input("Enter model name", false)
        .context("Error reading model name")?;
    let provider = prompter
        .input("Enter provider", false)
        .context("Error reading provider")?;
    let base_url = prompter
        .input("Enter base URL", false)
        .context("Error reading base URL")?;
    let max_tokens = prompter
        .input("Enter max tokens", false)
        .context("Error reading max tokens")?;
    let max_tokens = parse_max_tokens(&max_tokens)?;
    let api_key_env_var = prompter
        .input("Enter API key environment variable", false)
        .context("Error reading API key environment variable")?;
    let description = prompter
        .input("Enter description (optional)", true)
        .context("Error reading description")?;

    Ok(CustomModel {
        id: String::new(),
        model_name,
        provider: ModelProvider::parse(&provider),
        base_url,
        max_tokens,
        api_key_env_var,
        description,
        created_at: None,
        updated_at: None,
    })
}

fn parse_max_tokens(input: &str) -> Result<u32> {
    let n: u32 = input
        .trim()
        .parse()
        .with_context(|| format!("Invalid number for max tokens: '{}'", input))?;
    if n == 0 {
        anyhow::bail!("Invalid number for max tokens: must be greater than zero");
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::FakeClient;
    use std::io::Cursor;

    fn answers(input: &'static str) -> term::Prompter {
        term::Prompter::with_reader(Cursor::new(input))
    }

    #[tokio::test]
    async fn piped_answers_create_the_model() {
        let client = FakeClient::default();
        let mut prompter = answers(
            "mixtral\nopenrouter\nhttps://openrouter.ai/api/v1\n32000\nOPENROUTER_API_KEY\n\n",
        );
        execute(&client, &mut prompter).await.unwrap();

        let created = client.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].model_name, "mixtral");
        assert_eq!(created[0].provider, ModelProvider::OpenRouter);
        assert_eq!(created[0].max_tokens, 32000);
        assert_eq!(created[0].description, "");
        assert!(created[0].id.is_empty());
    }

    #[tokio::test]
    async fn bad_max_tokens_stops_before_create() {
        let client = FakeClient::default();
        let mut prompter = answers("mixtral\nopenrouter\nhttps://x\nlots\nKEY\n\n");
        let err = execute(&client, &mut prompter).await.unwrap_err();
        assert!(err.to_string().contains("Invalid number for max tokens"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_required_answer_is_an_error() {
        let client = FakeClient::default();
        let mut prompter = answers("mixtral\n");
        let err = execute(&client, &mut prompter).await.unwrap_err();
        assert!(err.to_string().contains("Error reading provider"));
        assert!(client.calls().is_empty());
    }

    #[test]
    fn max_tokens_must_be_positive_integer() {
        assert_eq!(parse_max_tokens("8192").unwrap(), 8192);
        assert_eq!(parse_max_tokens(" 4096 ").unwrap(), 4096);
        assert!(parse_max_tokens("0").is_err());
        assert!(parse_max_tokens("-1").is_err());
        assert!(parse_max_tokens("lots").is_err());
    }
}
