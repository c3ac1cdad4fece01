//! Binary object CLI commands.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use clap::{Args, Subcommand};

use vaultkeep_core::error::AppError;

use vaultkeep_client::VaultClient;

/// Arguments for `vault object`
#[derive(Debug, Args)]
pub struct ObjectArgs {
    /// Object subcommand
    #[command(subcommand)]
    pub command: ObjectCommand,
}

/// Object subcommands
#[derive(Debug, Subcommand)]
pub enum ObjectCommand {
    /// Upload a local file
    Upload {
        /// Path of the file to upload
        path: PathBuf,
        /// Stored object name (defaults to the file name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Download an object
    Download {
        /// Stored object name
        name: String,
        /// Output path (defaults to the object name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List stored objects and usage
    List,
    /// Delete one object
    Delete {
        /// Stored object name
        name: String,
    },
}

/// Execute object commands
pub async fn execute(args: &ObjectArgs, client: &VaultClient) -> Result<(), AppError> {
    match &args.command {
        ObjectCommand::Upload { path, name } => {
            let name = match name {
                Some(name) => name.clone(),
                None => file_name(path)?,
            };
            let data = tokio::fs::read(path)
                .await
                .map_err(|e| AppError::validation(format!("Cannot read {}: {e}", path.display())))?;
            let bytes = data.len();

            client.upload_object(&name, Bytes::from(data)).await?;
            println!("Uploaded '{}' ({} bytes)", name, bytes);
        }
        ObjectCommand::Download { name, output } => {
            let data = client.download_object(name).await?;
            let output = output.clone().unwrap_or_else(|| PathBuf::from(name));

            tokio::fs::write(&output, &data).await.map_err(|e| {
                AppError::internal(format!("Cannot write {}: {e}", output.display()))
            })?;
            println!("Downloaded '{}' to {} ({} bytes)", name, output.display(), data.len());
        }
        ObjectCommand::List => {
            let listing = client.list_objects().await?;
            for name in &listing.objects {
                println!("{}", name);
            }
            println!("{} bytes used", listing.used_bytes);
        }
        ObjectCommand::Delete { name } => {
            client.delete_object(name).await?;
            println!("Deleted '{}'", name);
        }
    }
    Ok(())
}

fn file_name(path: &Path) -> Result<String, AppError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
        .ok_or_else(|| AppError::validation(format!("Invalid file name: {}", path.display())))
}
