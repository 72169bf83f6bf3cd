use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn item(id: i64, rarity: Rarity) -> GachaItem {
    GachaItem {
        id,
        rarity,
        title: format!("item-{id}"),
        caption: String::new(),
    }
}

fn zero_weights() -> RarityWeights {
    RarityWeights {
        common: 0,
        rare: 0,
        epic: 0,
        legendary: 0,
        mythic: 0,
    }
}

#[test]
fn default_weights_match_shipped_tuning() {
    let weights = RarityWeights::default();
    assert_eq!(weights.common, 55);
    assert_eq!(weights.rare, 25);
    assert_eq!(weights.epic, 12);
    assert_eq!(weights.legendary, 6);
    assert_eq!(weights.mythic, 2);
}

#[test]
fn from_rows_overlays_defaults() {
    let rows = vec![
        RarityWeightRow {
            rarity: Rarity::Common,
            weight: 10,
        },
        RarityWeightRow {
            rarity: Rarity::Mythic,
            weight: 90,
        },
    ];
    let weights = RarityWeights::from_rows(&rows);
    assert_eq!(weights.common, 10);
    assert_eq!(weights.mythic, 90);
    assert_eq!(weights.rare, 25);
}

#[test]
fn zero_weight_tier_is_never_drawn() {
    let mut weights = zero_weights();
    weights.rare = 100;
    let available = [Rarity::Common, Rarity::Rare];

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        assert_eq!(draw_rarity(&weights, &available, &mut rng), Rarity::Rare);
    }
}

#[test]
fn all_zero_weights_fall_back_to_first_available() {
    let weights = zero_weights();
    let mut rng = StdRng::seed_from_u64(1);

    let available = [Rarity::Common, Rarity::Epic];
    assert_eq!(draw_rarity(&weights, &available, &mut rng), Rarity::Common);

    // Slice order does not matter; canonical order decides "first".
    let shuffled = [Rarity::Mythic, Rarity::Epic];
    assert_eq!(draw_rarity(&weights, &shuffled, &mut rng), Rarity::Epic);
}

#[test]
fn empty_available_subset_falls_back_to_common() {
    let weights = RarityWeights::default();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(draw_rarity(&weights, &[], &mut rng), Rarity::Common);
}

#[test]
fn absent_tiers_do_not_contribute_weight() {
    // Common has the dominant weight but no items; rare and mythic split
    // the roll between themselves only.
    let weights = RarityWeights {
        common: 1000,
        rare: 1,
        epic: 0,
        legendary: 0,
        mythic: 1,
    };
    let available = [Rarity::Rare, Rarity::Mythic];

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let drawn = draw_rarity(&weights, &available, &mut rng);
        assert!(drawn == Rarity::Rare || drawn == Rarity::Mythic);
    }
}

#[test]
fn draw_item_requires_items() {
    let mut rng = StdRng::seed_from_u64(3);
    let err = draw_item(&[], &RarityWeights::default(), &mut rng).unwrap_err();
    assert_eq!(err, GachaDrawError::NoItems);
}

#[test]
fn draw_item_picks_within_rolled_rarity() {
    let items = vec![
        item(1, Rarity::Common),
        item(2, Rarity::Common),
        item(3, Rarity::Rare),
    ];
    let mut weights = zero_weights();
    weights.rare = 50;

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let outcome = draw_item(&items, &weights, &mut rng).unwrap();
        assert_eq!(outcome.rarity, Rarity::Rare);
        assert_eq!(outcome.item.id, 3);
    }
}

#[test]
fn draw_item_covers_full_pool_over_time() {
    let items = vec![
        item(1, Rarity::Common),
        item(2, Rarity::Common),
        item(3, Rarity::Common),
    ];
    let weights = RarityWeights::default();

    let mut rng = StdRng::seed_from_u64(99);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let outcome = draw_item(&items, &weights, &mut rng).unwrap();
        seen.insert(outcome.item.id);
    }
    assert_eq!(seen.len(), 3);
}
