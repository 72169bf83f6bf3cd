use super::test_db;
use crate::Database;
use crate::pictures::{NewPicture, PictureSource};
use crate::rarity::Rarity;

fn add_picture(db: &Database, filename: &str, gacha_id: Option<i64>) -> i64 {
    db.add_picture(&NewPicture {
        filename,
        original_name: Some(filename),
        mime_type: Some("image/jpeg"),
        size: 123,
        stored_path: &format!("/data/images/{filename}"),
        source: PictureSource::ManualUpload,
        gacha_id,
    })
    .unwrap()
}

#[test]
fn test_picture_round_trip() {
    let db = test_db();
    let id = add_picture(&db, "a.jpg", None);

    let picture = db.get_picture(id).unwrap().unwrap();
    assert_eq!(picture.filename, "a.jpg");
    assert_eq!(picture.original_name.as_deref(), Some("a.jpg"));
    assert_eq!(picture.source, PictureSource::ManualUpload);
    assert_eq!(picture.gacha_id, None);

    db.delete_picture(id).unwrap();
    assert!(db.get_picture(id).unwrap().is_none());
}

#[test]
fn test_source_is_persisted() {
    let db = test_db();
    let id = db
        .add_picture(&NewPicture {
            filename: "cap.jpg",
            original_name: Some("capture-1.jpg"),
            mime_type: Some("image/jpeg"),
            size: 1,
            stored_path: "/data/images/cap.jpg",
            source: PictureSource::AutoCapture,
            gacha_id: None,
        })
        .unwrap();
    let picture = db.get_picture(id).unwrap().unwrap();
    assert_eq!(picture.source, PictureSource::AutoCapture);
}

#[test]
fn test_recent_ordering_and_limit() {
    let db = test_db();
    // CURRENT_TIMESTAMP has second resolution; id is the tiebreak.
    let a = add_picture(&db, "a.jpg", None);
    let b = add_picture(&db, "b.jpg", None);
    let c = add_picture(&db, "c.jpg", None);

    let recent = db.get_recent_pictures(10).unwrap();
    let ids: Vec<i64> = recent.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![c, b, a]);

    assert_eq!(db.get_recent_pictures(2).unwrap().len(), 2);
}

#[test]
fn test_filter_by_gacha() {
    let db = test_db();
    let item = db.create_gacha_item(Rarity::Common, "t", "c").unwrap();
    add_picture(&db, "a.jpg", Some(item));
    add_picture(&db, "b.jpg", None);

    let filtered = db.get_pictures_by_gacha(item, 100).unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].filename, "a.jpg");
}

#[test]
fn test_assign_picture() {
    let db = test_db();
    let item = db.create_gacha_item(Rarity::Rare, "t", "c").unwrap();
    let id = add_picture(&db, "a.jpg", None);

    assert!(db.assign_picture(id, Some(item)).unwrap());
    assert_eq!(db.get_picture(id).unwrap().unwrap().gacha_id, Some(item));

    assert!(db.assign_picture(id, None).unwrap());
    assert_eq!(db.get_picture(id).unwrap().unwrap().gacha_id, None);

    assert!(!db.assign_picture(9999, Some(item)).unwrap());
}

#[test]
fn test_least_loaded_prefers_emptiest_slot() {
    let db = test_db();
    let a = db.create_gacha_item(Rarity::Epic, "A", "c").unwrap();
    let b = db.create_gacha_item(Rarity::Epic, "B", "c").unwrap();

    add_picture(&db, "1.jpg", Some(a));
    add_picture(&db, "2.jpg", Some(a));

    assert_eq!(db.least_loaded_gacha_item(Rarity::Epic).unwrap(), Some(b));
}

#[test]
fn test_least_loaded_ties_break_by_lowest_id() {
    let db = test_db();
    let a = db.create_gacha_item(Rarity::Epic, "A", "c").unwrap();
    let _b = db.create_gacha_item(Rarity::Epic, "B", "c").unwrap();
    assert_eq!(db.least_loaded_gacha_item(Rarity::Epic).unwrap(), Some(a));
}

#[test]
fn test_least_loaded_empty_rarity() {
    let db = test_db();
    assert_eq!(db.least_loaded_gacha_item(Rarity::Mythic).unwrap(), None);
}
