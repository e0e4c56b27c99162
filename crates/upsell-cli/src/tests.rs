use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["upsell"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_search_with_term() {
    let cli = Cli::try_parse_from(["upsell", "search", "mug"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Search { term }) if term == "mug"));
}

#[test]
fn search_term_defaults_to_empty() {
    let cli = Cli::try_parse_from(["upsell", "search"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Search { term }) if term.is_empty()));
}

#[test]
fn parses_move_slot() {
    let cli =
        Cli::try_parse_from(["upsell", "move-slot", "0", "2"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::MoveSlot { from: 0, to: 2 })
    ));
}

#[test]
fn parses_pick_without_variants() {
    let cli = Cli::try_parse_from(["upsell", "pick", "1", "77"]).expect("expected valid cli args");
    match cli.command {
        Some(Commands::Pick {
            slot,
            product_id,
            variants,
        }) => {
            assert_eq!(slot, 1);
            assert_eq!(product_id, 77);
            assert!(variants.is_empty());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_pick_with_repeated_variants_in_order() {
    let cli = Cli::try_parse_from([
        "upsell",
        "pick",
        "0",
        "77",
        "--variant",
        "3",
        "--variant",
        "1",
    ])
    .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Pick { variants, .. }) => assert_eq!(variants, vec![3, 1]),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_discount_kind() {
    let cli = Cli::try_parse_from(["upsell", "discount", "0", "15", "--kind", "percentage"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Discount {
            slot: 0,
            kind: DiscountKind::Percentage,
            ..
        })
    ));
}

#[test]
fn discount_kind_defaults_to_flat() {
    let cli =
        Cli::try_parse_from(["upsell", "discount", "2", "5"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Discount {
            kind: DiscountKind::Flat,
            ..
        })
    ));
}

#[test]
fn rejects_unknown_discount_kind() {
    let result = Cli::try_parse_from(["upsell", "discount", "0", "5", "--kind", "bogus"]);
    assert!(result.is_err());
}

#[test]
fn rejects_negative_slot_index() {
    let result = Cli::try_parse_from(["upsell", "remove-slot", "-1"]);
    assert!(result.is_err());
}

#[test]
fn parses_remove_variant() {
    let cli = Cli::try_parse_from(["upsell", "remove-variant", "1", "4402"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::RemoveVariant {
            slot: 1,
            variant_id: 4402
        })
    ));
}

#[test]
fn parses_reset() {
    let cli = Cli::try_parse_from(["upsell", "reset"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Reset)));
}
