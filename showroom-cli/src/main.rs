use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use showroom_core::{AppSnapshot, Assistant, InventoryFacts, format_usd};

mod chat;
mod inventory;
mod state;

#[derive(Parser, Debug)]
#[command(name = "showroom", version, about = "Dealership chat assistant CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat session (TUI)
    Chat {
        /// Vehicle inventory JSON array (default: profile setting, then the
        /// built-in demo lot)
        #[arg(long)]
        inventory: Option<PathBuf>,

        /// Start the session logged in with this email
        #[arg(long)]
        login: Option<String>,
    },

    /// One-shot question, reply printed to stdout
    Ask {
        message: String,

        #[arg(long)]
        inventory: Option<PathBuf>,
    },

    /// Print the derived facts for an inventory file
    Inventory {
        #[arg(long)]
        inventory: Option<PathBuf>,
    },

    /// Show or update the persisted session defaults
    Profile {
        /// Default login email for chat sessions
        #[arg(long)]
        email: Option<String>,

        /// Default inventory JSON file
        #[arg(long)]
        inventory: Option<PathBuf>,
    },
}

/// Explicit flag, then profile default, then the built-in demo lot.
fn resolve_inventory(flag: Option<PathBuf>, profile: &state::Profile) -> Option<PathBuf> {
    flag.or_else(|| profile.inventory_file.as_ref().map(PathBuf::from))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Chat { inventory, login } => {
            let profile = state::read_profile()?;
            let path = resolve_inventory(inventory, &profile);
            let vehicles = inventory::load(path.as_deref())?;
            let login = login.or(profile.email);
            chat::run_chat(vehicles, login)?;
        }

        Command::Ask { message, inventory } => {
            let profile = state::read_profile()?;
            let path = resolve_inventory(inventory, &profile);
            let vehicles = inventory::load(path.as_deref())?;
            let snapshot = AppSnapshot {
                vehicles,
                ..Default::default()
            };
            let mut assistant = Assistant::new();
            println!("{}", assistant.generate_response(&message, &snapshot));
        }

        Command::Inventory { inventory } => {
            let profile = state::read_profile()?;
            let path = resolve_inventory(inventory, &profile);
            let vehicles = inventory::load(path.as_deref())?;
            let facts = InventoryFacts::compute(&vehicles);

            println!("{} vehicles", vehicles.len());
            println!("Brands: {}", facts.brands.join(", "));
            if let Some(stats) = facts.price_stats {
                println!(
                    "Price range: {} - {} (avg {})",
                    format_usd(u64::from(stats.min)),
                    format_usd(u64::from(stats.max)),
                    format_usd(u64::from(stats.average))
                );
            }
            println!("Popular picks:");
            for v in &facts.popular {
                println!("  {}", v.listing_label());
            }
        }

        Command::Profile { email, inventory } => {
            let mut profile = state::read_profile()?;
            let updating = email.is_some() || inventory.is_some();

            if let Some(email) = email {
                profile.email = Some(email);
            }
            if let Some(path) = inventory {
                profile.inventory_file = Some(path.display().to_string());
            }
            if updating {
                if profile.created_at_utc.is_none() {
                    profile.created_at_utc = Some(chrono::Utc::now().to_rfc3339());
                }
                state::write_profile(&profile)?;
            }

            println!("email: {}", profile.email.as_deref().unwrap_or("(not set)"));
            println!(
                "inventory: {}",
                profile.inventory_file.as_deref().unwrap_or("(demo lot)")
            );
        }
    }

    Ok(())
}
