//! Catalog-backed commands: `search` and `pick`.
//!
//! `pick` drives the same staging flow as the picker dialog: open on a slot,
//! fetch the current search term, select the product, narrow its variants,
//! then save.

use upsell_catalog::CatalogSource;
use upsell_core::CatalogItem;
use upsell_store::{PickerDialog, SearchStatus, SessionStorage, Store};

/// Search the catalog, save the term and results for the next `pick`, and
/// print the result list.
///
/// # Errors
///
/// Returns an error if the catalog request fails or the session cannot be
/// written.
pub(crate) async fn run_search<S, C>(
    store: &mut Store<S>,
    source: &C,
    term: &str,
) -> anyhow::Result<()>
where
    S: SessionStorage,
    C: CatalogSource,
{
    store.search(source, term).await;
    ensure_loaded(store)?;
    store.persist()?;

    let items = store.state().items();
    if items.is_empty() {
        println!("no products match \"{term}\"");
        return Ok(());
    }
    print_items(items);
    Ok(())
}

/// Stage `product_id` for the slot at `slot` and save it.
///
/// With no `variants`, a newly staged product keeps all of its variants and a
/// product already in the slot keeps its current selection. Otherwise the
/// selection is narrowed to exactly `variants`, in the order given. Repeated
/// ids count once.
///
/// # Errors
///
/// Returns an error if the slot does not exist, the catalog request fails,
/// the product is not in the results, or a variant is not the product's.
pub(crate) async fn run_pick<S, C>(
    store: &mut Store<S>,
    source: &C,
    slot: usize,
    product_id: i64,
    variants: &[i64],
) -> anyhow::Result<()>
where
    S: SessionStorage,
    C: CatalogSource,
{
    let mut dialog = PickerDialog::new();
    dialog.open(store.state(), slot)?;

    let term = store.state().search_term().to_owned();
    store.fetch_catalog(source, &term).await;
    ensure_loaded(store)?;

    // Re-clicking an already staged product would unstage it.
    if !dialog.is_item_staged(product_id) {
        dialog.select_item(store.state().items(), product_id)?;
    }

    if !variants.is_empty() {
        let staged: Vec<i64> = dialog
            .staged()
            .map(|s| s.variants().to_vec())
            .unwrap_or_default();
        for id in staged {
            dialog.toggle_variant(id)?;
        }
        let mut wanted: Vec<i64> = Vec::with_capacity(variants.len());
        for &id in variants {
            if !wanted.contains(&id) {
                wanted.push(id);
            }
        }
        for id in wanted {
            dialog.toggle_variant(id)?;
        }
    }

    let index = dialog.save(store)?;
    let picked = dialog_summary(store, index);
    println!("slot {index}: {picked}");
    Ok(())
}

fn ensure_loaded<S: SessionStorage>(store: &Store<S>) -> anyhow::Result<()> {
    let state = store.state();
    if state.status() == SearchStatus::Failed {
        anyhow::bail!(
            "catalog search failed: {}",
            state.error().unwrap_or("An error occurred")
        );
    }
    Ok(())
}

fn dialog_summary<S: SessionStorage>(store: &Store<S>, index: usize) -> String {
    store
        .state()
        .slot(index)
        .and_then(|s| s.product.as_ref())
        .map_or_else(String::new, |p| {
            format!("{} ({} variants)", p.title(), p.selected_variants.len())
        })
}

fn print_items(items: &[CatalogItem]) {
    println!("{:<10}{:<10}{:<12}TITLE", "PRODUCT", "VARIANT", "PRICE");
    for item in items {
        println!("{:<10}{:<10}{:<12}{}", item.id, "", "", item.title);
        for variant in &item.variants {
            println!(
                "{:<10}{:<10}{:<12}{}",
                "",
                variant.id,
                variant.price.as_str(),
                variant.title
            );
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
