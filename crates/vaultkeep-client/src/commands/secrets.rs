//! Structured secret CLI commands.

use clap::{Args, Subcommand};

use vaultkeep_core::error::AppError;
use vaultkeep_entity::secret::{CardEntry, CredentialEntry, NoteEntry};

use vaultkeep_client::VaultClient;

/// Arguments for `vault credential`
#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Credential subcommand
    #[command(subcommand)]
    pub command: CredentialCommand,
}

/// Credential subcommands
#[derive(Debug, Subcommand)]
pub enum CredentialCommand {
    /// Store a credential pair
    Add {
        /// Resource the credentials belong to
        resource: String,
        /// Login at the resource
        login: String,
        /// Password at the resource
        password: String,
        /// Free-form metadata
        #[arg(short, long, default_value = "")]
        metadata: String,
    },
    /// Show one credential
    Get {
        /// Resource name
        resource: String,
    },
    /// List stored credentials
    List,
    /// Delete one credential
    Delete {
        /// Resource name
        resource: String,
    },
}

/// Execute credential commands
pub async fn credential(args: &CredentialArgs, client: &VaultClient) -> Result<(), AppError> {
    match &args.command {
        CredentialCommand::Add {
            resource,
            login,
            password,
            metadata,
        } => {
            let entry = CredentialEntry {
                account_id: 0,
                resource: resource.clone(),
                login: login.clone(),
                password: password.clone(),
                metadata: metadata.clone(),
            };
            client.create_credential(&entry).await?;
            println!("Stored credential for '{}'", resource);
        }
        CredentialCommand::Get { resource } => {
            let entry = client.get_credential(resource).await?;
            println!("{}: {} / {}", entry.resource, entry.login, entry.password);
            if !entry.metadata.is_empty() {
                println!("  {}", entry.metadata);
            }
        }
        CredentialCommand::List => {
            for entry in client.list_credentials().await? {
                println!("{}: {}", entry.resource, entry.login);
            }
        }
        CredentialCommand::Delete { resource } => {
            client.delete_credential(resource).await?;
            println!("Deleted credential for '{}'", resource);
        }
    }
    Ok(())
}

/// Arguments for `vault note`
#[derive(Debug, Args)]
pub struct NoteArgs {
    /// Note subcommand
    #[command(subcommand)]
    pub command: NoteCommand,
}

/// Note subcommands
#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Store a text note
    Add {
        /// Unique label
        label: String,
        /// Note body
        body: String,
        /// Free-form metadata
        #[arg(short, long, default_value = "")]
        metadata: String,
    },
    /// Show one note
    Get {
        /// Note label
        label: String,
    },
    /// List stored notes
    List,
    /// Delete one note
    Delete {
        /// Note label
        label: String,
    },
}

/// Execute note commands
pub async fn note(args: &NoteArgs, client: &VaultClient) -> Result<(), AppError> {
    match &args.command {
        NoteCommand::Add {
            label,
            body,
            metadata,
        } => {
            let entry = NoteEntry {
                account_id: 0,
                label: label.clone(),
                body: body.clone(),
                metadata: metadata.clone(),
            };
            client.create_note(&entry).await?;
            println!("Stored note '{}'", label);
        }
        NoteCommand::Get { label } => {
            let entry = client.get_note(label).await?;
            println!("{}", entry.body);
        }
        NoteCommand::List => {
            for entry in client.list_notes().await? {
                println!("{}", entry.label);
            }
        }
        NoteCommand::Delete { label } => {
            client.delete_note(label).await?;
            println!("Deleted note '{}'", label);
        }
    }
    Ok(())
}

/// Arguments for `vault card`
#[derive(Debug, Args)]
pub struct CardArgs {
    /// Card subcommand
    #[command(subcommand)]
    pub command: CardCommand,
}

/// Card subcommands
#[derive(Debug, Subcommand)]
pub enum CardCommand {
    /// Store a payment card
    Add {
        /// Card number
        number: String,
        /// Cardholder name
        cardholder: String,
        /// Expiration (MM/YY)
        expires_at: String,
        /// Verification value
        cvv: String,
        /// Free-form metadata
        #[arg(short, long, default_value = "")]
        metadata: String,
    },
    /// Show one card
    Get {
        /// Card number
        number: String,
    },
    /// List stored cards
    List,
    /// Delete one card
    Delete {
        /// Card number
        number: String,
    },
}

/// Execute card commands
pub async fn card(args: &CardArgs, client: &VaultClient) -> Result<(), AppError> {
    match &args.command {
        CardCommand::Add {
            number,
            cardholder,
            expires_at,
            cvv,
            metadata,
        } => {
            let entry = CardEntry {
                account_id: 0,
                number: number.clone(),
                cardholder: cardholder.clone(),
                expires_at: expires_at.clone(),
                cvv: cvv.clone(),
                metadata: metadata.clone(),
            };
            client.create_card(&entry).await?;
            println!("Stored card ending in {}", tail(number));
        }
        CardCommand::Get { number } => {
            let entry = client.get_card(number).await?;
            println!(
                "{} - {} (expires {})",
                entry.number, entry.cardholder, entry.expires_at
            );
        }
        CardCommand::List => {
            for entry in client.list_cards().await? {
                println!("{} - {}", tail(&entry.number), entry.cardholder);
            }
        }
        CardCommand::Delete { number } => {
            client.delete_card(number).await?;
            println!("Deleted card ending in {}", tail(number));
        }
    }
    Ok(())
}

fn tail(number: &str) -> &str {
    let len = number.len();
    if len > 4 { &number[len - 4..] } else { number }
}
