//! Resolve a user-supplied index or name to one custom model.
//!
//! Lookup order:
//! 1. A token that parses as an integer in `1..=len` selects by 1-based
//!    position, even when another model is literally named that number.
//! 2. Otherwise the first model whose name equals the token exactly.
//! 3. Otherwise the user picks from a numbered list.
//!
//! Positions refer to the list as fetched for this invocation only.

use thiserror::Error;

use crate::models::CustomModel;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Failed to read selection: {0}")]
    Prompt(#[from] std::io::Error),
}

/// One entry of the interactive pick list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<'a> {
    /// 1-based position shown to the user
    pub number: usize,
    pub name: &'a str,
}

/// Asks the user to pick one of the numbered choices and returns the raw line.
pub trait SelectionPrompt {
    fn select(&mut self, choices: &[Choice<'_>]) -> std::io::Result<String>;
}

#[derive(Debug, PartialEq)]
pub enum Selection<'a> {
    Selected(&'a CustomModel),
    /// The list was empty; nothing was asked.
    NoModels,
}

/// Resolve `token` without prompting.
pub fn resolve_token<'a>(token: Option<&str>, models: &'a [CustomModel]) -> Option<&'a CustomModel> {
    let token = token?;

    if let Some(index) = parse_index(token, models.len()) {
        return Some(&models[index]);
    }

    models.iter().find(|m| m.model_name == token)
}

/// Resolve `token`, falling back to `prompt` when it names no model.
pub fn select_model<'a, P>(
    token: Option<&str>,
    models: &'a [CustomModel],
    prompt: &mut P,
) -> Result<Selection<'a>, SelectionError>
where
    P: SelectionPrompt + ?Sized,
{
    if models.is_empty() {
        return Ok(Selection::NoModels);
    }

    if let Some(model) = resolve_token(token, models) {
        tracing::debug!("resolved {:?} to model '{}'", token, model.model_name);
        return Ok(Selection::Selected(model));
    }

    let choices: Vec<Choice<'_>> = models
        .iter()
        .enumerate()
        .map(|(i, m)| Choice {
            number: i + 1,
            name: &m.model_name,
        })
        .collect();

    let input = prompt.select(&choices)?;
    let index = parse_selection(&input, models.len())?;
    Ok(Selection::Selected(&models[index]))
}

/// Parse an interactive answer into a 0-based index.
pub fn parse_selection(input: &str, len: usize) -> Result<usize, SelectionError> {
    let trimmed = input.trim();
    parse_index(trimmed, len).ok_or_else(|| {
        SelectionError::InvalidSelection(format!(
            "'{}' is not a number between 1 and {}",
            trimmed, len
        ))
    })
}

/// 1-based `token` to 0-based index, if in range.
fn parse_index(token: &str, len: usize) -> Option<usize> {
    let n: i64 = token.parse().ok()?;
    if n < 1 {
        return None;
    }
    let n = usize::try_from(n).ok()?;
    (n <= len).then(|| n - 1)
}
