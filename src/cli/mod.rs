//! Command-line entry points for operating fitrec.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

use fitrec_auth::{JwksVerifier, create_access_token};
use fitrec_config::{AppConfig, JwtConfig};
use fitrec_core::{AppError, generate_uuids, hash_password};

#[derive(Debug, Parser)]
#[command(name = "fitrec")]
#[command(about = "fitrec - backend utilities for fitness record collection", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the service could start: configuration and identity provider keys
    Validate {
        /// Don't download the identity provider's key set
        #[arg(long)]
        skip_jwks: bool,
    },
    /// Print freshly generated UUIDs
    Uuid {
        /// How many to generate (1-1024)
        #[arg(short = 'n', long, default_value = "1")]
        count: i64,
    },
    /// Issue an identity token signed with the configured secret
    Token {
        /// User ID to put in the `sub` claim
        #[arg(short = 'u', long)]
        user_id: Uuid,

        /// User type/role ID to put in the `rol` claim
        #[arg(short = 'r', long, default_value = "0")]
        role: i32,
    },
    /// Print a bcrypt hash of a password
    HashPassword { password: String },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Validate { skip_jwks } => handle_validate(skip_jwks).await,
        Commands::Uuid { count } => handle_uuid(count),
        Commands::Token { user_id, role } => handle_token(user_id, role),
        Commands::HashPassword { password } => handle_hash_password(&password),
    }
}

async fn handle_validate(skip_jwks: bool) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Configuration is incomplete")?;
    info!("Configuration loaded");

    if !skip_jwks {
        let verifier = JwksVerifier::from_config(&config.auth0)
            .await
            .map_err(AppError::into_error)?;
        info!(keys = verifier.key_count(), audience = %verifier.audience(), "JWKS reachable");
    }

    println!("✅ Configuration valid");
    Ok(())
}

fn handle_uuid(count: i64) -> anyhow::Result<()> {
    for id in generate_uuids(count)? {
        println!("{}", id);
    }
    Ok(())
}

fn handle_token(user_id: Uuid, role: i32) -> anyhow::Result<()> {
    let config = JwtConfig::from_env()?;
    let token = create_access_token(user_id, role, &config).map_err(AppError::into_error)?;
    println!("{}", token);
    Ok(())
}

fn handle_hash_password(password: &str) -> anyhow::Result<()> {
    let hash = hash_password(password).map_err(AppError::into_error)?;
    println!("{}", hash);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_command() {
        let cli = Cli::try_parse_from(["fitrec", "uuid", "--count", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Uuid { count: 3 }));
    }

    #[test]
    fn test_parse_uuid_default_count() {
        let cli = Cli::try_parse_from(["fitrec", "uuid"]).unwrap();
        assert!(matches!(cli.command, Commands::Uuid { count: 1 }));
    }

    #[test]
    fn test_parse_token_requires_uuid() {
        assert!(Cli::try_parse_from(["fitrec", "token", "--user-id", "nope"]).is_err());

        let user_id = Uuid::new_v4().to_string();
        let cli = Cli::try_parse_from(["fitrec", "token", "-u", &user_id, "-r", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::Token { role: 2, .. }));
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["fitrec", "validate", "--skip-jwks"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { skip_jwks: true }));
    }

    #[test]
    fn test_uuid_count_out_of_range() {
        let err = handle_uuid(0).unwrap_err();
        assert!(err.to_string().contains("cannot be below 1"));
    }
}
