//! CLI command definitions and dispatch.

pub mod auth;
pub mod objects;
pub mod secrets;

use clap::{Parser, Subcommand};

use vaultkeep_core::error::AppError;

use vaultkeep_client::VaultClient;

/// VaultKeep: personal secret and object vault
#[derive(Debug, Parser)]
#[command(name = "vault", version, about, long_about = None)]
pub struct Cli {
    /// Server base URL
    #[arg(short, long, default_value = "http://127.0.0.1:8743")]
    pub server: String,

    /// Path to the saved session token
    #[arg(long, default_value = ".vaultkeep-session")]
    pub session: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a new account
    Register(auth::RegisterArgs),
    /// Log in to an existing account
    Login(auth::LoginArgs),
    /// Credential secrets
    Credential(secrets::CredentialArgs),
    /// Text note secrets
    Note(secrets::NoteArgs),
    /// Payment card secrets
    Card(secrets::CardArgs),
    /// Binary object storage
    Object(objects::ObjectArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let client = VaultClient::new(self.server.clone());

        // Auth commands establish the session; everything else resumes it.
        match &self.command {
            Commands::Register(args) => auth::register(args, &client, &self.session).await,
            Commands::Login(args) => auth::login(args, &client, &self.session).await,
            Commands::Credential(args) => {
                auth::resume_session(&client, &self.session).await?;
                secrets::credential(args, &client).await
            }
            Commands::Note(args) => {
                auth::resume_session(&client, &self.session).await?;
                secrets::note(args, &client).await
            }
            Commands::Card(args) => {
                auth::resume_session(&client, &self.session).await?;
                secrets::card(args, &client).await
            }
            Commands::Object(args) => {
                auth::resume_session(&client, &self.session).await?;
                objects::execute(args, &client).await
            }
        }
    }
}
