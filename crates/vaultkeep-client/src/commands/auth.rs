//! Registration, login, and session persistence.

use clap::Args;
use dialoguer::Password;

use vaultkeep_core::error::AppError;
use vaultkeep_entity::tier::SubscriptionTier;

use vaultkeep_client::VaultClient;

/// Arguments for `vault register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Login name
    pub login: String,
    /// Subscription tier (UNKNOWN, REGULAR, PREMIUM)
    #[arg(short, long, default_value = "REGULAR")]
    pub tier: SubscriptionTier,
}

/// Arguments for `vault login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login name
    pub login: String,
}

/// Register a new account, prompting for the password.
pub async fn register(
    args: &RegisterArgs,
    client: &VaultClient,
    session_path: &str,
) -> Result<(), AppError> {
    let password = prompt_password(true)?;
    let token = client.register(&args.login, &password, args.tier).await?;
    save_session(session_path, &token)?;

    println!("Registered '{}' ({} tier)", args.login, args.tier);
    Ok(())
}

/// Log in to an existing account, prompting for the password.
pub async fn login(
    args: &LoginArgs,
    client: &VaultClient,
    session_path: &str,
) -> Result<(), AppError> {
    let password = prompt_password(false)?;
    let token = client.login(&args.login, &password).await?;
    save_session(session_path, &token)?;

    println!("Logged in as '{}'", args.login);
    Ok(())
}

/// Seed the client with the saved session token.
pub async fn resume_session(client: &VaultClient, session_path: &str) -> Result<(), AppError> {
    let token = std::fs::read_to_string(session_path).map_err(|_| {
        AppError::authentication("No saved session; run `vault login` first")
    })?;
    client.set_token(token.trim().to_string()).await;
    Ok(())
}

fn prompt_password(confirm: bool) -> Result<String, AppError> {
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt
        .interact()
        .map_err(|e| AppError::internal(format!("Password prompt failed: {e}")))
}

fn save_session(session_path: &str, token: &str) -> Result<(), AppError> {
    std::fs::write(session_path, token)
        .map_err(|e| AppError::internal(format!("Failed to save session: {e}")))
}
