//! vault-pay command-line tool.
//!
//! Links users to vaulted payment methods and charges them from the shell.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vault_pay_braintree::BraintreeClient;
use vault_pay_core::{UserId, VaultId};
use vault_pay_service::{ServiceConfig, VaultService};
use vault_pay_store::RocksStore;

/// Manage vaulted payment methods and charges.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Override the data directory (defaults to `DATA_DIR`).
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Link a vaulted payment method to a user.
    Link {
        /// The user.
        #[arg(long)]
        user: UserId,
        /// The processor's vault id.
        #[arg(long)]
        vault_id: VaultId,
    },
    /// Remove a user's vaulted payment method.
    Revoke {
        /// The user.
        #[arg(long)]
        user: UserId,
    },
    /// Show a user's vault record.
    Show {
        /// The user.
        #[arg(long)]
        user: UserId,
    },
    /// Charge a user's vaulted payment method.
    Charge {
        /// The user.
        #[arg(long)]
        user: UserId,
        /// Amount in dollars; rounded to cents half-to-even.
        #[arg(long)]
        amount: Decimal,
    },
    /// List a user's charges, newest first.
    History {
        /// The user.
        #[arg(long)]
        user: UserId,
        /// Maximum number of charges to list.
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Number of charges to skip.
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vault_pay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = ServiceConfig::from_env();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    tracing::debug!(
        data_dir = %config.data_dir,
        braintree_gateway_url = ?config.braintree_gateway_url,
        braintree_configured = %config.has_braintree(),
        "Configuration loaded"
    );

    tracing::info!(path = %config.data_dir, "Opening RocksDB store");
    let store = Arc::new(RocksStore::open(&config.data_dir)?);

    // Only charging talks to the gateway.
    let service = if matches!(args.command, Command::Charge { .. }) {
        let (gateway_url, credentials, options) = config.braintree()?;
        let processor = Arc::new(BraintreeClient::new(gateway_url, credentials, options)?);
        VaultService::new(store, processor)
    } else {
        VaultService::without_processor(store)
    };

    match args.command {
        Command::Link { user, vault_id } => {
            let record = service.link_vault(user, vault_id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Revoke { user } => {
            let record = service.revoke_vault(&user)?;
            println!("revoked {} ({})", record, record.vault_id);
        }
        Command::Show { user } => match service.find_by_user(&user)? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("no vault linked for {user}"),
        },
        Command::Charge { user, amount } => {
            let log = service.charge_user(&user, amount).await?;
            println!("{log}");
        }
        Command::History {
            user,
            limit,
            offset,
        } => {
            for log in service.charge_history(&user, limit, offset)? {
                println!("{}  {}", log.timestamp.to_rfc3339(), log);
            }
        }
    }

    Ok(())
}
