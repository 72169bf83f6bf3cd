use super::test_db;
use crate::gacha_state::DEFAULT_COINS;
use crate::pictures::{NewPicture, PictureSource};
use crate::rarity::Rarity;

#[test]
fn test_gacha_item_crud() {
    let db = test_db();
    let id = db
        .create_gacha_item(Rarity::Legendary, "Golden Memory", "our first trip")
        .unwrap();

    let items = db.get_all_gacha_items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].rarity, Rarity::Legendary);
    assert_eq!(items[0].title, "Golden Memory");

    assert!(
        db.update_gacha_item(id, Rarity::Mythic, "Golden Memory", "updated")
            .unwrap()
    );
    let item = db.get_gacha_item(id).unwrap().unwrap();
    assert_eq!(item.rarity, Rarity::Mythic);
    assert_eq!(item.caption, "updated");

    assert!(!db.update_gacha_item(9999, Rarity::Common, "x", "y").unwrap());

    db.delete_gacha_item(id).unwrap();
    assert!(db.get_all_gacha_items().unwrap().is_empty());
}

#[test]
fn test_delete_item_detaches_pictures() {
    let db = test_db();
    let item = db.create_gacha_item(Rarity::Common, "t", "c").unwrap();
    let picture = db
        .add_picture(&NewPicture {
            filename: "a.jpg",
            original_name: None,
            mime_type: None,
            size: 0,
            stored_path: "/data/images/a.jpg",
            source: PictureSource::ManualUpload,
            gacha_id: Some(item),
        })
        .unwrap();

    db.delete_gacha_item(item).unwrap();

    // The picture survives with its slot reference cleared.
    let got = db.get_picture(picture).unwrap().unwrap();
    assert_eq!(got.gacha_id, None);
}

#[test]
fn test_rarity_weight_upsert() {
    let db = test_db();
    assert!(db.get_rarity_weight(Rarity::Rare).unwrap().is_none());

    db.set_rarity_weight(Rarity::Rare, 40).unwrap();
    assert_eq!(db.get_rarity_weight(Rarity::Rare).unwrap(), Some(40));

    db.set_rarity_weight(Rarity::Rare, 10).unwrap();
    assert_eq!(db.get_rarity_weight(Rarity::Rare).unwrap(), Some(10));

    db.set_rarity_weight(Rarity::Common, 55).unwrap();
    let rows = db.get_rarity_weights().unwrap();
    assert_eq!(rows.len(), 2);
    // Ordered by rarity name.
    assert_eq!(rows[0].rarity, Rarity::Common);
    assert_eq!(rows[1].rarity, Rarity::Rare);
}

#[test]
fn test_coins_default_on_first_read() {
    let db = test_db();
    let admin = db.create_admin("alice", "h").unwrap();
    assert_eq!(db.get_coins(admin).unwrap(), DEFAULT_COINS);
}

#[test]
fn test_coins_never_negative() {
    let db = test_db();
    let admin = db.create_admin("alice", "h").unwrap();

    assert_eq!(db.set_coins(admin, 0).unwrap(), 0);
    assert_eq!(db.adjust_coins(admin, -1).unwrap(), 0);
    assert_eq!(db.set_coins(admin, -5).unwrap(), 0);
}

#[test]
fn test_adjust_coins_returns_post_update_value() {
    let db = test_db();
    let admin = db.create_admin("alice", "h").unwrap();

    // First adjustment seeds the default row, then applies the delta.
    assert_eq!(db.adjust_coins(admin, -1).unwrap(), DEFAULT_COINS - 1);
    assert_eq!(db.adjust_coins(admin, 3).unwrap(), DEFAULT_COINS + 2);
    assert_eq!(db.get_coins(admin).unwrap(), DEFAULT_COINS + 2);
}

#[test]
fn test_results_are_idempotent() {
    let db = test_db();
    let admin = db.create_admin("alice", "h").unwrap();
    let item = db.create_gacha_item(Rarity::Common, "t", "c").unwrap();

    assert!(db.record_gacha_result(admin, item).unwrap());
    assert!(!db.record_gacha_result(admin, item).unwrap());

    assert_eq!(db.get_collected_item_ids(admin).unwrap(), vec![item]);
}

#[test]
fn test_results_are_per_admin() {
    let db = test_db();
    let alice = db.create_admin("alice", "h").unwrap();
    let bob = db.create_admin("bob", "h").unwrap();
    let item = db.create_gacha_item(Rarity::Common, "t", "c").unwrap();

    db.record_gacha_result(alice, item).unwrap();
    assert_eq!(db.get_collected_item_ids(alice).unwrap(), vec![item]);
    assert!(db.get_collected_item_ids(bob).unwrap().is_empty());
}
