use super::test_db;
use crate::site_settings::{CosmicSettings, LayoutSettings, LetterSettings};

#[test]
fn test_cosmic_defaults_then_upsert() {
    let db = test_db();
    let defaults = db.get_cosmic_settings().unwrap();
    assert_eq!(defaults, CosmicSettings::default());

    let updated = CosmicSettings {
        intro_title: "Two Years".into(),
        intro_subtitle: "and counting".into(),
        timeline_title: "Milestones".into(),
        date1: "2024-02-14".into(),
        caption1: "first hello".into(),
        date2: "2025-02-14".into(),
        caption2: "still here".into(),
    };
    db.update_cosmic_settings(&updated).unwrap();
    assert_eq!(db.get_cosmic_settings().unwrap(), updated);

    // Second write overwrites the singleton row.
    let mut second = updated.clone();
    second.caption2 = "forever".into();
    db.update_cosmic_settings(&second).unwrap();
    assert_eq!(db.get_cosmic_settings().unwrap().caption2, "forever");
}

#[test]
fn test_layout_defaults_then_upsert() {
    let db = test_db();
    assert_eq!(db.get_layout_settings().unwrap(), LayoutSettings::default());

    db.update_layout_settings(&LayoutSettings {
        journey_columns: 3,
        gacha_columns: 4,
    })
    .unwrap();
    let got = db.get_layout_settings().unwrap();
    assert_eq!(got.journey_columns, 3);
    assert_eq!(got.gacha_columns, 4);
}

#[test]
fn test_letter_voucher_is_sticky() {
    let db = test_db();
    db.update_letter_settings(&LetterSettings {
        title: "Dear you".into(),
        body1: "a".into(),
        body2: "b".into(),
        voucher: Some("one free hug".into()),
        button_text: "Open".into(),
        footer: "xoxo".into(),
    })
    .unwrap();

    // An update without a voucher keeps the stored one.
    db.update_letter_settings(&LetterSettings {
        title: "Dear you, again".into(),
        body1: "a".into(),
        body2: "b".into(),
        voucher: None,
        button_text: "Open".into(),
        footer: "xoxo".into(),
    })
    .unwrap();

    let got = db.get_letter_settings().unwrap();
    assert_eq!(got.title, "Dear you, again");
    assert_eq!(got.voucher.as_deref(), Some("one free hug"));
}
