mod commands;
mod term;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modelctl")]
#[command(author, version, about = "Manage model settings and custom models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show model settings for the current plan
    Models {
        #[command(subcommand)]
        command: Option<ModelsCommand>,
    },

    /// View or set configuration
    Config {
        /// Config key (e.g., "api.url", "project.plan_id")
        key: Option<String>,

        /// Value to set (if omitted, shows current value)
        value: Option<String>,
    },
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// List all available models
    Available {
        /// List custom models only
        #[arg(short, long)]
        custom: bool,
    },

    /// Create a custom model
    Create,

    /// Delete a custom model by name or index
    #[command(alias = "rm")]
    Delete {
        /// Model name, or its number from `models available`
        #[arg(value_name = "NAME_OR_INDEX")]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so tables and prompts stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{}", error_line(&err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Models { command } => {
            let (config, client) = commands::connect()?;
            let plan_id = config.current_plan();

            match command {
                None => {
                    commands::models::execute(&client, plan_id, &config.project.branch).await?;
                }
                Some(ModelsCommand::Available { custom }) => {
                    commands::available::execute(&client, plan_id, custom).await?;
                }
                Some(ModelsCommand::Create) => {
                    let mut prompter = term::Prompter::stdin();
                    commands::create::execute(&client, &mut prompter).await?;
                }
                Some(ModelsCommand::Delete { model }) => {
                    let mut prompt =
                        term::NumberedPrompt::new("Select a model to delete:", term::Prompter::stdin());
                    commands::delete::execute(&client, model.as_deref(), &mut prompt).await?;
                }
            }
        }
        Commands::Config { key, value } => {
            commands::config::execute(key.as_deref(), value.as_deref()).await?;
        }
    }

    Ok(())
}

/// One line with the context chain joined by `: `.
fn error_line(err: &anyhow::Error) -> String {
    format!("Error: {:#}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn error_line_joins_context_chain() {
        let err = anyhow!("connection refused").context("Error fetching custom models");
        assert_eq!(
            error_line(&err),
            "Error: Error fetching custom models: connection refused"
        );
    }

    #[test]
    fn delete_accepts_name_or_index() {
        let cli = Cli::try_parse_from(["modelctl", "models", "rm", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Models {
                command: Some(ModelsCommand::Delete { model: Some(ref m) })
            } if m == "2"
        ));

        let cli = Cli::try_parse_from(["modelctl", "models", "available", "-c"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Models {
                command: Some(ModelsCommand::Available { custom: true })
            }
        ));
    }
}
