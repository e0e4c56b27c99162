//! Slot list commands. These never touch the catalog.

use upsell_core::{Discount, DiscountKind, Slot};
use upsell_store::{SessionStorage, Store, StoreState};

/// Print every slot with its selected variants and discounted prices.
pub(crate) fn run_show(state: &StoreState) {
    for (index, slot) in state.slots().iter().enumerate() {
        print_slot(index, slot);
    }
}

fn print_slot(index: usize, slot: &Slot) {
    let Some(product) = &slot.product else {
        println!("{index}. (empty)");
        return;
    };

    match &slot.discount {
        Some(discount) => println!("{index}. {} [{discount}]", product.title()),
        None => println!("{index}. {}", product.title()),
    }
    for variant in product.selected_variant_details() {
        let price = variant.price.as_decimal();
        match (price, &slot.discount) {
            (Some(price), Some(discount)) => println!(
                "     - {} ({})  {} -> {}",
                variant.title,
                variant.id,
                price,
                discount.apply(price)
            ),
            _ => println!(
                "     - {} ({})  {}",
                variant.title,
                variant.id,
                variant.price.as_str()
            ),
        }
    }
}

/// # Errors
///
/// Returns an error if the snapshot cannot be written.
pub(crate) fn run_add_slot<S: SessionStorage>(store: &mut Store<S>) -> anyhow::Result<()> {
    store.add_slot()?;
    println!("added slot {}", store.state().slot_count() - 1);
    Ok(())
}

/// # Errors
///
/// Returns an error for the first slot or an index past the end.
pub(crate) fn run_remove_slot<S: SessionStorage>(
    store: &mut Store<S>,
    index: usize,
) -> anyhow::Result<()> {
    store.remove_slot(index)?;
    println!("removed slot {index}");
    Ok(())
}

/// # Errors
///
/// Returns an error if either position is out of range.
pub(crate) fn run_move_slot<S: SessionStorage>(
    store: &mut Store<S>,
    from: usize,
    to: usize,
) -> anyhow::Result<()> {
    store.move_slot(from, to)?;
    run_show(store.state());
    Ok(())
}

/// # Errors
///
/// Returns an error if the slot is empty or a position is out of range.
pub(crate) fn run_move_variant<S: SessionStorage>(
    store: &mut Store<S>,
    slot: usize,
    from: usize,
    to: usize,
) -> anyhow::Result<()> {
    store.move_variant(slot, from, to)?;
    if let Some(s) = store.state().slot(slot) {
        print_slot(slot, s);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the variant is not selected or is the last one.
pub(crate) fn run_remove_variant<S: SessionStorage>(
    store: &mut Store<S>,
    slot: usize,
    variant_id: i64,
) -> anyhow::Result<()> {
    store.remove_variant(slot, variant_id)?;
    if let Some(s) = store.state().slot(slot) {
        print_slot(slot, s);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error for an invalid value or a slot without a product.
pub(crate) fn run_discount<S: SessionStorage>(
    store: &mut Store<S>,
    slot: usize,
    value: &str,
    kind: DiscountKind,
) -> anyhow::Result<()> {
    let discount = Discount::parse(value, kind)?;
    store.set_discount(slot, Some(discount))?;
    println!("slot {slot}: {discount}");
    Ok(())
}

/// # Errors
///
/// Returns an error if the slot does not exist.
pub(crate) fn run_clear_discount<S: SessionStorage>(
    store: &mut Store<S>,
    slot: usize,
) -> anyhow::Result<()> {
    store.set_discount(slot, None)?;
    println!("slot {slot}: no discount");
    Ok(())
}

/// # Errors
///
/// Returns an error if the saved snapshot cannot be removed.
pub(crate) fn run_reset<S: SessionStorage>(store: &mut Store<S>) -> anyhow::Result<()> {
    store.reset()?;
    println!("selection cleared");
    Ok(())
}
