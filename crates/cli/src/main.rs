//! Textile Hub CLI - database migrations and profile tools.
//!
//! # Usage
//!
//! ```bash
//! # Run hub schema migrations
//! th-cli migrate
//!
//! # Inspect profiles
//! th-cli profiles show prof-123
//! th-cli profiles list --take 20 --last-name okafor
//!
//! # Moderate profiles
//! th-cli profiles block prof-123
//! th-cli profiles unblock prof-123
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `profiles` - Show, list, block and unblock user profiles

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use textile_hub_core::UserStatus;

mod commands;

#[derive(Parser)]
#[command(name = "th-cli")]
#[command(author, version, about = "Textile Hub CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect and moderate user profiles
    Profiles {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show one profile with resolved products and purchase history
    Show {
        /// Profile id
        id: String,
    },
    /// List profiles with purchase summaries
    List {
        /// Number of matching profiles to skip
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        skip: i64,

        /// Page size (defaults to `ADMIN_DEFAULT_PAGE_SIZE`, capped at `ADMIN_MAX_PAGE_SIZE`)
        #[arg(long, allow_negative_numbers = true)]
        take: Option<i64>,

        /// First name substring (case-insensitive)
        #[arg(long)]
        first_name: Option<String>,

        /// Last name substring (case-insensitive)
        #[arg(long)]
        last_name: Option<String>,

        /// Email substring (case-insensitive)
        #[arg(long)]
        email: Option<String>,
    },
    /// Block a profile
    Block {
        /// Profile id
        id: String,
    },
    /// Unblock a profile
    Unblock {
        /// Profile id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Profiles { action } => match action {
            ProfileAction::Show { id } => commands::profiles::show(&id).await?,
            ProfileAction::List {
                skip,
                take,
                first_name,
                last_name,
                email,
            } => {
                commands::profiles::list(commands::profiles::ListOptions {
                    skip,
                    take,
                    first_name,
                    last_name,
                    email,
                })
                .await?;
            }
            ProfileAction::Block { id } => {
                commands::profiles::set_status(&id, UserStatus::Blocked).await?;
            }
            ProfileAction::Unblock { id } => {
                commands::profiles::set_status(&id, UserStatus::Active).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_profiles_list() {
        let cli = Cli::try_parse_from([
            "th-cli", "profiles", "list", "--skip", "5", "--take", "20", "--email", "example",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::Profiles {
            action:
                ProfileAction::List {
                    skip, take, email, ..
                },
        } = cli.command
        else {
            panic!("expected profiles list");
        };
        assert_eq!(skip, 5);
        assert_eq!(take, Some(20));
        assert_eq!(email.as_deref(), Some("example"));
    }
}
