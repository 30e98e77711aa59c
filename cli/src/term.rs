//! Terminal helpers: spinners, prompts, tables and command hints.

use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use modelctl_core::{Choice, SelectionPrompt};
use std::future::Future;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::time::Duration;

/// Show a spinner with `message` while `fut` runs.
pub async fn with_spinner<F, T>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let out = fut.await;
    pb.finish_and_clear();
    out
}

/// Line input from the user. Uses dialoguer on a terminal and plain line
/// reads otherwise, so answers can be piped in.
pub struct Prompter {
    piped: Option<Box<dyn BufRead>>,
}

impl Prompter {
    pub fn stdin() -> Self {
        let attended = io::stdin().is_terminal() && console::Term::stderr().is_term();
        if attended {
            Self { piped: None }
        } else {
            Self::with_reader(BufReader::new(io::stdin()))
        }
    }

    pub fn with_reader(reader: impl BufRead + 'static) -> Self {
        Self {
            piped: Some(Box::new(reader)),
        }
    }

    /// Read one trimmed line. Empty answers are only accepted when `allow_empty`.
    pub fn line(&mut self, prompt: &str, allow_empty: bool) -> io::Result<String> {
        let Some(reader) = self.piped.as_mut() else {
            let value: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(allow_empty)
                .interact_text()
                .map_err(io::Error::other)?;
            return Ok(value.trim().to_string());
        };

        print!("{}: ", prompt);
        io::stdout().flush()?;

        let mut buf = String::new();
        reader.read_line(&mut buf)?;
        let value = buf.trim().to_string();
        if value.is_empty() && !allow_empty {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}: a value is required", prompt),
            ));
        }
        Ok(value)
    }

    pub fn input(&mut self, prompt: &str, allow_empty: bool) -> Result<String> {
        Ok(self.line(prompt, allow_empty)?)
    }
}

/// Numbered pick list read through a [`Prompter`].
pub struct NumberedPrompt {
    header: String,
    prompter: Prompter,
}

impl NumberedPrompt {
    pub fn new(header: impl Into<String>, prompter: Prompter) -> Self {
        Self {
            header: header.into(),
            prompter,
        }
    }
}

impl SelectionPrompt for NumberedPrompt {
    fn select(&mut self, choices: &[Choice<'_>]) -> io::Result<String> {
        println!("{}", self.header);
        for choice in choices {
            println!("{}: {}", choice.number, choice.name);
        }

        // Empty or EOF is left for the caller to reject as an invalid selection
        self.prompter.line("Number", true)
    }
}

/// Left-aligned columns sized to their widest cell, with a rule under the header.
pub fn format_table<S: AsRef<str>>(headers: &[&str], rows: &[Vec<S>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.as_ref().chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(|c| c.as_ref()).collect()));
        out.push('\n');
    }
    out
}

pub fn print_table<S: AsRef<str>>(title: &str, headers: &[&str], rows: &[Vec<S>]) {
    println!("{}", title);
    print!("{}", format_table(headers, rows));
    println!();
}

/// Suggest follow-up commands.
pub fn print_cmds(cmds: &[&str]) {
    for cmd in cmds {
        println!("Run `modelctl {}`", cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fit_widest_cell() {
        let rows = vec![
            vec!["1".to_string(), "gpt".to_string()],
            vec!["2".to_string(), "claude-long".to_string()],
        ];
        let table = format_table(&["#", "Name"], &rows);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "#  Name");
        assert_eq!(lines[1], "-".repeat(1 + 2 + 11));
        assert_eq!(lines[2], "1  gpt");
        assert_eq!(lines[3], "2  claude-long");
    }

    #[test]
    fn empty_table_has_header_only() {
        let rows: Vec<Vec<String>> = Vec::new();
        let table = format_table(&["Name", "Value"], &rows);
        assert_eq!(table.lines().count(), 2);
    }

    fn piped(input: &'static str) -> Prompter {
        Prompter::with_reader(io::Cursor::new(input))
    }

    #[test]
    fn numbered_prompt_reads_piped_answer() {
        let mut prompt = NumberedPrompt::new("Select a model to delete:", piped("2\n"));
        let choices = [
            Choice { number: 1, name: "gpt" },
            Choice { number: 2, name: "claude" },
        ];
        assert_eq!(prompt.select(&choices).unwrap(), "2");
    }

    #[test]
    fn numbered_prompt_returns_empty_at_eof() {
        let mut prompt = NumberedPrompt::new("Pick:", piped(""));
        let choices = [Choice { number: 1, name: "gpt" }];
        assert_eq!(prompt.select(&choices).unwrap(), "");
    }

    #[test]
    fn piped_lines_are_read_in_order() {
        let mut prompter = piped("  first \n\nthird\n");
        assert_eq!(prompter.input("a", false).unwrap(), "first");
        assert_eq!(prompter.input("b", true).unwrap(), "");
        assert_eq!(prompter.input("c", false).unwrap(), "third");
    }

    #[test]
    fn piped_empty_answer_is_rejected_when_required() {
        let mut prompter = piped("\n");
        let err = prompter.line("Enter model name", false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("Enter model name"));
    }

    #[tokio::test]
    async fn spinner_returns_future_output() {
        let value = with_spinner("working", async { 41 + 1 }).await;
        assert_eq!(value, 42);
    }
}
