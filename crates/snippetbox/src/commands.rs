use anyhow::{anyhow, Result};
use snippetbox_storage::Storage;

use crate::cli::{Commands, OutputFormat};
use crate::error::InvalidInput;
use crate::output::{print_items, print_snippet};

const MAX_TITLE_CHARS: usize = 100;

pub async fn handle(
    storage: &dyn Storage,
    command: Commands,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match command {
        Commands::Create {
            title,
            content,
            expires,
        } => {
            validate_new_snippet(&title, &content)?;

            let id = storage.insert(&title, &content, expires).await?;
            tracing::info!(%id, expires_days = expires, "snippet created");

            if !quiet {
                match format {
                    OutputFormat::Table => println!("{}", id),
                    OutputFormat::Json => println!("{}", serde_json::json!({ "id": id })),
                }
            }
        }

        Commands::Show { id } => {
            let snippet = storage.get(id).await?;
            print_snippet(&snippet, format);
        }

        Commands::Latest => {
            let snippets = storage.latest().await?;
            tracing::debug!(count = snippets.len(), "fetched latest snippets");
            if snippets.is_empty() && !quiet && matches!(format, OutputFormat::Table) {
                eprintln!("No snippets");
            } else {
                print_items(&snippets, format);
            }
        }

        Commands::Config => {
            return Err(anyhow!("config does not use the database"));
        }
    }

    Ok(())
}

/// Caller-side checks; the store itself accepts any text
fn validate_new_snippet(title: &str, content: &str) -> Result<(), InvalidInput> {
    if title.trim().is_empty() {
        return Err(InvalidInput("title must not be blank".into()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(InvalidInput(format!(
            "title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }
    if content.trim().is_empty() {
        return Err(InvalidInput("content must not be blank".into()));
    }
    Ok(())
}
