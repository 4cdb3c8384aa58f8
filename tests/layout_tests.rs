//! Automatic layouts: ring geometry, collision avoidance, size degradation and seeding.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use spotdeck::{
    AngularLayout, CanvasSpec, Card, CollisionAvoidingLayout, LayoutMode, LayoutParams,
    LayoutStrategy, SpotError, auto_layout, generate_deck, seeded_rng,
};

fn canvas() -> CanvasSpec {
    CanvasSpec::new(500, 3, 20).unwrap()
}

#[test]
fn size_tiers_step_down_to_the_floor() {
    let params = LayoutParams::default();
    assert_eq!(params.size_tiers(), vec![80, 70, 60, 50, 40, 30, 20]);

    let uneven = LayoutParams {
        default_symbol_size: 85,
        ..LayoutParams::default()
    };
    assert_eq!(uneven.size_tiers(), vec![85, 75, 65, 55, 45, 35, 25, 20]);

    let single = LayoutParams {
        default_symbol_size: 20,
        ..LayoutParams::default()
    };
    assert_eq!(single.size_tiers(), vec![20]);
}

#[test]
fn angular_layout_spaces_symbols_evenly() {
    let canvas = canvas();
    let params = LayoutParams {
        overlap_pct: 0,
        ..LayoutParams::default()
    };
    let card = Card::new(vec![3, 9, 4, 12]);
    let outcome = auto_layout(
        &card,
        LayoutMode::Angular,
        &canvas,
        &params,
        &mut seeded_rng(0),
    )
    .unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.layout.len(), 4);
    let (cx, cy) = canvas.center();
    let ring = canvas.inscribed_radius() - 40.0;
    for (i, placement) in outcome.layout.iter().enumerate() {
        assert_eq!(placement.symbol, card.symbols()[i]);
        assert_eq!(placement.edge, 80);
        let distance = (placement.center_x - cx).hypot(placement.center_y - cy);
        assert!((distance - ring).abs() < 1e-9);
    }
    // First symbol sits at angle zero, to the right of centre.
    assert!((outcome.layout[0].center_x - (cx + ring)).abs() < 1e-9);
    assert!((outcome.layout[0].center_y - cy).abs() < 1e-9);
    // Outer edge touches the inscribed circle along the radial direction.
    assert!((outcome.layout[0].bounding_box().right - (cx + canvas.inscribed_radius())).abs() < 1e-9);
}

#[test]
fn overlap_percentage_inflates_the_ring() {
    let canvas = canvas();
    let flush = AngularLayout {
        edge: 80,
        overlap_pct: 0,
    };
    let pushed = AngularLayout {
        edge: 80,
        overlap_pct: 50,
    };
    assert!((pushed.ring_radius(&canvas) - 1.5 * flush.ring_radius(&canvas)).abs() < 1e-9);
}

#[test]
fn random_layout_is_reproducible_under_a_seed() {
    let deck = generate_deck(6).unwrap();
    let canvas = canvas();
    let params = LayoutParams::default();
    for card in deck.cards().iter().take(5) {
        let first = auto_layout(
            card,
            LayoutMode::RandomCollisionAvoiding,
            &canvas,
            &params,
            &mut seeded_rng(1234),
        )
        .unwrap();
        let second = auto_layout(
            card,
            LayoutMode::RandomCollisionAvoiding,
            &canvas,
            &params,
            &mut seeded_rng(1234),
        )
        .unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn symbols_that_never_fit_are_reported() {
    let canvas = CanvasSpec::new(300, 0, 20).unwrap();
    let params = LayoutParams {
        default_symbol_size: 250,
        min_symbol_size: 250,
        ..LayoutParams::default()
    };
    let card = Card::new(vec![0, 1, 2]);
    let outcome = CollisionAvoidingLayout::new(params).layout(&card, &canvas, &mut seeded_rng(5));
    assert!(outcome.layout.is_empty());
    assert_eq!(outcome.unplaced, vec![0, 1, 2]);

    let err = outcome.into_complete(4).unwrap_err();
    assert!(matches!(
        err,
        SpotError::PlacementFailure { card: 4, ref unplaced } if unplaced == &vec![0, 1, 2]
    ));
}

#[test]
fn earlier_symbols_get_first_pick() {
    // Only one 150 px square fits inside a 130 px radius.
    let canvas = CanvasSpec::new(300, 0, 20).unwrap();
    let params = LayoutParams {
        default_symbol_size: 150,
        min_symbol_size: 150,
        ..LayoutParams::default()
    };
    let card = Card::new(vec![7, 8, 9]);
    let outcome = CollisionAvoidingLayout::new(params).layout(&card, &canvas, &mut seeded_rng(11));
    assert_eq!(outcome.layout.len(), 1);
    assert_eq!(outcome.layout[0].symbol, 7);
    assert_eq!(outcome.unplaced, vec![8, 9]);
}

#[test]
fn invalid_parameters_are_rejected() {
    let card = Card::new(vec![0, 1, 2]);
    let params = LayoutParams {
        size_decrement: 0,
        ..LayoutParams::default()
    };
    let err = auto_layout(
        &card,
        LayoutMode::RandomCollisionAvoiding,
        &canvas(),
        &params,
        &mut seeded_rng(0),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SpotError::InvalidParameter {
            parameter: "size_decrement",
            ..
        }
    ));
}

proptest! {
    #[test]
    fn random_layout_is_contained_and_collision_free(seed in any::<u64>(), n in 3usize..=8) {
        let canvas = canvas();
        let params = LayoutParams::default();
        let card = Card::new((0..n).collect());
        let outcome = auto_layout(
            &card,
            LayoutMode::RandomCollisionAvoiding,
            &canvas,
            &params,
            &mut seeded_rng(seed),
        )
        .unwrap();

        prop_assert_eq!(outcome.layout.len() + outcome.unplaced.len(), n);
        for placement in &outcome.layout {
            prop_assert!(canvas.contains_box(&placement.bounding_box()));
            prop_assert!(placement.edge >= params.min_symbol_size);
            prop_assert!(placement.edge <= params.default_symbol_size);
        }
        for (i, a) in outcome.layout.iter().enumerate() {
            for b in &outcome.layout[i + 1..] {
                prop_assert!(!a.bounding_box().overlaps(&b.bounding_box()));
            }
        }
        // Placed symbols keep card order.
        let placed: Vec<usize> = outcome.layout.iter().map(|p| p.symbol).collect();
        let mut sorted = placed.clone();
        sorted.sort_unstable();
        prop_assert_eq!(placed, sorted);
    }
}
