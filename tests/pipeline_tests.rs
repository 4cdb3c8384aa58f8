//! Whole-deck passes: alignment with deck order, seeding and manual stores.

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use spotdeck::{
    DeckRenderer, LayoutMode, LayoutOverrideStore, RenderConfig, SpotError, SymbolCatalog,
    SymbolOverride, generate_deck,
};

fn catalog(count: usize) -> SymbolCatalog {
    SymbolCatalog::from_rgba(
        (0..count)
            .map(|i| RgbaImage::from_pixel(8, 8, Rgba([(i * 30) as u8, 80, 160, 255])))
            .collect(),
    )
}

fn config(seed: u64) -> RenderConfig {
    RenderConfig {
        symbols_per_card: 3,
        card_size: 300,
        seed: Some(seed),
        ..RenderConfig::default()
    }
}

#[test]
fn rendered_cards_follow_deck_order() {
    let deck = generate_deck(3).unwrap();
    let renderer = DeckRenderer::from_config(&config(7)).unwrap();
    let rendered = renderer.render(&deck, &catalog(7), None).unwrap();

    assert_eq!(rendered.cards.len(), deck.len());
    for (idx, (card, rendered_card)) in deck.cards().iter().zip(&rendered.cards).enumerate() {
        assert_eq!(rendered_card.index, idx);
        assert_eq!(rendered_card.image.dimensions(), (300, 300));
        for placement in &rendered_card.layout {
            assert!(card.contains(placement.symbol));
        }
        assert_eq!(
            rendered_card.layout.len() + rendered_card.unplaced.len(),
            card.len()
        );
    }

    let exported = rendered.export().unwrap();
    assert_eq!(exported.len(), deck.len());
    assert_eq!(exported[0].name, "card_1.png");
    assert_eq!(exported[6].name, "card_7.png");
}

#[test]
fn same_seed_gives_identical_cards() {
    let deck = generate_deck(3).unwrap();
    let catalog = catalog(7);
    let first = DeckRenderer::from_config(&config(42))
        .unwrap()
        .render(&deck, &catalog, None)
        .unwrap();
    let second = DeckRenderer::from_config(&config(42))
        .unwrap()
        .render(&deck, &catalog, None)
        .unwrap();
    assert_eq!(first.images(), second.images());
    assert_eq!(first.unplaced(), second.unplaced());
}

#[test]
fn each_card_has_its_own_random_stream() {
    let deck = generate_deck(4).unwrap();
    let renderer = DeckRenderer::from_config(&RenderConfig {
        seed: Some(3),
        ..RenderConfig::default()
    })
    .unwrap();
    let whole = renderer.layout_deck(&deck, None).unwrap();
    let single = renderer.layout_card(5, &deck.cards()[5], None).unwrap();
    assert_eq!(whole[5], single);
    assert_eq!(renderer.seed(), 3);
}

#[test]
fn angular_mode_places_every_symbol() {
    let deck = generate_deck(8).unwrap();
    let renderer = DeckRenderer::from_config(&RenderConfig {
        symbols_per_card: 8,
        layout_mode: LayoutMode::Angular,
        ..RenderConfig::default()
    })
    .unwrap();
    let outcomes = renderer.layout_deck(&deck, None).unwrap();
    assert_eq!(outcomes.len(), 57);
    assert!(outcomes.iter().all(|o| o.is_complete() && o.layout.len() == 8));
}

#[test]
fn too_few_images_fail_before_rendering() {
    let deck = generate_deck(3).unwrap();
    let renderer = DeckRenderer::from_config(&config(1)).unwrap();
    let err = renderer.render(&deck, &catalog(5), None).unwrap_err();
    assert!(matches!(
        err,
        SpotError::InsufficientSymbols {
            required: 7,
            supplied: 5
        }
    ));
}

#[test]
fn manual_store_drives_the_layout() {
    let deck = generate_deck(3).unwrap();
    let renderer = DeckRenderer::from_config(&config(9)).unwrap();
    let mut store = LayoutOverrideStore::for_deck(&deck);
    store.set(
        2,
        1,
        SymbolOverride {
            x: 150.0,
            y: 150.0,
            size: 40,
        },
    );

    let rendered = renderer.render(&deck, &catalog(7), Some(&store)).unwrap();
    assert!(rendered.is_complete());
    let placement = rendered.cards[2].layout[1];
    assert_eq!(placement.symbol, deck.cards()[2].symbols()[1]);
    assert_eq!(
        (placement.center_x, placement.center_y, placement.edge),
        (150.0, 150.0, 40)
    );
}

#[test]
fn manual_store_from_another_deck_is_rejected() {
    let deck = generate_deck(3).unwrap();
    let other = generate_deck(4).unwrap();
    let renderer = DeckRenderer::from_config(&config(9)).unwrap();
    let store = LayoutOverrideStore::for_deck(&other);
    let err = renderer.render(&deck, &catalog(7), Some(&store)).unwrap_err();
    assert!(matches!(err, SpotError::DeckMismatch { .. }));
}
