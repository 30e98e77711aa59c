use anyhow::{Context, Result};
use modelctl_core::{select_model, ApiClient, Selection, SelectionPrompt};

use crate::term;

pub async fn execute<C, P>(client: &C, token: Option<&str>, prompt: &mut P) -> Result<()>
where
    C: ApiClient + ?Sized,
    P: SelectionPrompt + ?Sized,
{
    let models = term::with_spinner("Fetching custom models...", client.list_custom_models())
        .await
        .context("Error fetching custom models")?;

    let model = match select_model(token, &models, prompt)? {
        Selection::Selected(model) => model,
        Selection::NoModels => {
            println!("No custom models available to delete.");
            return Ok(());
        }
    };

    tracing::debug!("deleting custom model {} ({})", model.model_name, model.id);
    term::with_spinner(
        &format!("Deleting model '{}'...", model.model_name),
        client.delete_custom_model(&model.id),
    )
    .await
    .context("Error deleting custom model")?;

    println!("Custom model '{}' deleted successfully.", model.model_name);
    Ok(())
}
