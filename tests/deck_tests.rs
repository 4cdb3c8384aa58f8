//! Deck construction: shape, the pairwise-intersection property and persistence.

use pretty_assertions::assert_eq;
use spotdeck::{Deck, SpotError, generate_deck, generate_deck_unchecked, total_symbols};

fn assert_pairwise_single_match(deck: &Deck) {
    let cards = deck.cards();
    for (i, a) in cards.iter().enumerate() {
        for (j, b) in cards.iter().enumerate().skip(i + 1) {
            assert_eq!(
                a.shared_with(b).len(),
                1,
                "cards {i} and {j} must share exactly one symbol"
            );
        }
    }
}

#[test]
fn three_symbols_per_card_builds_the_fano_plane() {
    let deck = generate_deck(3).unwrap();
    let cards: Vec<Vec<usize>> = deck.cards().iter().map(|c| c.symbols().to_vec()).collect();
    assert_eq!(
        cards,
        vec![
            vec![0, 1, 2],
            vec![0, 3, 4],
            vec![0, 5, 6],
            vec![1, 3, 5],
            vec![1, 4, 6],
            vec![2, 3, 6],
            vec![2, 4, 5],
        ]
    );
    assert_eq!(deck.total_symbols(), 7);
    assert_pairwise_single_match(&deck);
}

#[test]
fn four_symbols_per_card_has_thirteen_cards() {
    let deck = generate_deck(4).unwrap();
    assert_eq!(deck.len(), 13);
    assert_eq!(deck.total_symbols(), 13);
    assert!(deck.cards().iter().all(|c| c.len() == 4));
    assert!(deck.header.verified);
}

#[test]
fn prime_power_orders_satisfy_the_invariant() {
    // Order 4 (n = 5) needs GF(4) arithmetic rather than residues mod 4.
    for n in [3, 4, 5, 6, 8, 9] {
        let deck = generate_deck(n).unwrap();
        let total = total_symbols(n);
        assert_eq!(deck.len(), total, "n = {n}");
        for card in deck.cards() {
            assert_eq!(card.len(), n);
            assert!(card.symbols().iter().all(|&s| s < total));
            let mut distinct = card.symbols().to_vec();
            distinct.sort_unstable();
            distinct.dedup();
            assert_eq!(distinct.len(), n, "symbols on a card are distinct");
        }
        assert!(deck.missing_symbols().is_empty(), "n = {n}");
        assert_pairwise_single_match(&deck);
    }
}

#[test]
fn pencil_cards_share_the_marker_symbol() {
    let deck = generate_deck(5).unwrap();
    for card in &deck.cards()[..5] {
        assert_eq!(card.marker(), Some(0));
    }
    for card in &deck.cards()[5..] {
        assert_ne!(card.marker(), Some(0));
    }
}

#[test]
fn order_six_is_degenerate() {
    let err = generate_deck(7).unwrap_err();
    assert!(matches!(err, SpotError::DegenerateDesign { .. }), "{err}");

    let raw = generate_deck_unchecked(7).unwrap();
    assert_eq!(raw.len(), 43);
    assert!(raw.cards().iter().all(|c| c.len() == 7));
    assert!(!raw.header.verified);
    assert!(raw.verify().is_err());
}

#[test]
fn too_few_symbols_is_rejected() {
    for n in [0, 1, 2] {
        let err = generate_deck(n).unwrap_err();
        assert!(
            matches!(err, SpotError::InvalidParameter { parameter: "n", .. }),
            "n = {n}: {err}"
        );
    }
}

#[test]
fn save_and_load_preserve_cards_and_digest() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.jsonl");
    let deck = generate_deck(4).unwrap();
    deck.save(&path).unwrap();

    let loaded = Deck::load(&path).unwrap();
    assert_eq!(loaded.cards(), deck.cards());
    assert_eq!(loaded.symbols_per_card(), 4);
    assert_eq!(loaded.total_symbols(), 13);
    assert!(loaded.header.verified);
    assert_eq!(loaded.digest(), deck.digest());
}

#[test]
fn digest_distinguishes_decks() {
    let a = generate_deck(3).unwrap();
    let b = generate_deck(4).unwrap();
    let again = generate_deck(3).unwrap();
    assert_ne!(a.digest(), b.digest());
    assert_eq!(a.digest(), again.digest());
    assert_eq!(a.digest().len(), 64);
}

#[test]
fn loading_rejects_cards_of_the_wrong_length() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.jsonl");
    generate_deck(3).unwrap().save(&path).unwrap();
    let mut raw = std::fs::read_to_string(&path).unwrap();
    raw.push_str("{\"kind\":\"card\",\"symbols\":[0,1]}\n");
    std::fs::write(&path, raw).unwrap();

    assert!(Deck::load(&path).is_err());
}

#[test]
fn loading_rejects_a_short_deck() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.jsonl");
    generate_deck(3).unwrap().save(&path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let kept: Vec<&str> = raw.lines().take(7).collect();
    std::fs::write(&path, kept.join("\n")).unwrap();

    assert!(matches!(
        Deck::load(&path),
        Err(SpotError::InvalidParameter { parameter: "deck", .. })
    ));
}

#[test]
fn loading_rejects_an_inconsistent_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.jsonl");
    generate_deck(3).unwrap().save(&path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, raw.replace("\"total_symbols\":7", "\"total_symbols\":9")).unwrap();

    assert!(Deck::load(&path).is_err());
}

#[test]
fn tampered_deck_loses_its_verified_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deck.jsonl");
    generate_deck(3).unwrap().save(&path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = raw.lines().map(str::to_owned).collect();
    // Duplicate the first card over the second.
    lines[2] = lines[1].clone();
    std::fs::write(&path, lines.join("\n")).unwrap();

    let loaded = Deck::load(&path).unwrap();
    assert_eq!(loaded.len(), 7);
    assert!(!loaded.header.verified);
    assert!(loaded.verify().is_err());
}
