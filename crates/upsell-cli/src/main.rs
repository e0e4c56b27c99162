mod catalog;
mod slots;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use upsell_catalog::CatalogClient;
use upsell_core::DiscountKind;
use upsell_store::{FileSessionStorage, Store};

#[derive(Debug, Parser)]
#[command(name = "upsell")]
#[command(about = "Pick upsell products and variants from the catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the slot list (the default)
    Show,
    /// Search the catalog and print the matching products
    Search {
        /// Search term; empty lists everything
        #[arg(default_value = "")]
        term: String,
    },
    /// Append an empty slot
    AddSlot,
    /// Remove the slot at INDEX (the first slot cannot be removed)
    RemoveSlot { index: usize },
    /// Move a slot to another position
    MoveSlot { from: usize, to: usize },
    /// Put a catalog product into a slot
    Pick {
        slot: usize,
        product_id: i64,
        /// Keep only these variants, in this order (repeatable)
        #[arg(long = "variant")]
        variants: Vec<i64>,
    },
    /// Move a selected variant inside a slot
    MoveVariant { slot: usize, from: usize, to: usize },
    /// Deselect one variant of a slot
    RemoveVariant { slot: usize, variant_id: i64 },
    /// Set the discount of a slot
    Discount {
        slot: usize,
        value: String,
        #[arg(long, default_value = "flat")]
        kind: DiscountKind,
    },
    /// Remove the discount of a slot
    ClearDiscount { slot: usize },
    /// Forget the saved selection
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = upsell_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut store = Store::hydrate(FileSessionStorage::new(config.session_dir.clone()));
    tracing::debug!(
        env = ?config.env,
        slots = store.state().slot_count(),
        "session loaded"
    );

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => slots::run_show(store.state()),
        Commands::Search { term } => {
            let client = CatalogClient::from_config(&config)?;
            catalog::run_search(&mut store, &client, &term).await?;
        }
        Commands::AddSlot => slots::run_add_slot(&mut store)?,
        Commands::RemoveSlot { index } => slots::run_remove_slot(&mut store, index)?,
        Commands::MoveSlot { from, to } => slots::run_move_slot(&mut store, from, to)?,
        Commands::Pick {
            slot,
            product_id,
            variants,
        } => {
            let client = CatalogClient::from_config(&config)?;
            catalog::run_pick(&mut store, &client, slot, product_id, &variants).await?;
        }
        Commands::MoveVariant { slot, from, to } => {
            slots::run_move_variant(&mut store, slot, from, to)?;
        }
        Commands::RemoveVariant { slot, variant_id } => {
            slots::run_remove_variant(&mut store, slot, variant_id)?;
        }
        Commands::Discount { slot, value, kind } => {
            slots::run_discount(&mut store, slot, &value, kind)?;
        }
        Commands::ClearDiscount { slot } => slots::run_clear_discount(&mut store, slot)?,
        Commands::Reset => slots::run_reset(&mut store)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
