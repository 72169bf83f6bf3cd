use super::test_db;
use crate::journey::JourneyCategory;

#[test]
fn test_journey_crud() {
    let db = test_db();
    let id = db
        .create_journey_item(
            JourneyCategory::Sweet,
            "First date",
            "the rain, the umbrella",
            Some("journey-1.jpg"),
            Some("/data/images/journey/journey-1.jpg"),
        )
        .unwrap();

    let items = db.get_all_journey_items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, JourneyCategory::Sweet);
    assert_eq!(items[0].filename.as_deref(), Some("journey-1.jpg"));

    db.delete_journey_item(id).unwrap();
    assert!(db.get_all_journey_items().unwrap().is_empty());
}

#[test]
fn test_update_without_file_keeps_previous_one() {
    let db = test_db();
    let id = db
        .create_journey_item(
            JourneyCategory::Funny,
            "Karaoke",
            "off key",
            Some("journey-1.jpg"),
            Some("/data/images/journey/journey-1.jpg"),
        )
        .unwrap();

    assert!(
        db.update_journey_item(id, JourneyCategory::Funny, "Karaoke night", "off key", None, None)
            .unwrap()
    );

    let item = db.get_journey_item(id).unwrap().unwrap();
    assert_eq!(item.title, "Karaoke night");
    assert_eq!(item.filename.as_deref(), Some("journey-1.jpg"));
}

#[test]
fn test_update_with_file_replaces_reference() {
    let db = test_db();
    let id = db
        .create_journey_item(JourneyCategory::Sweet, "t", "c", None, None)
        .unwrap();

    assert!(
        db.update_journey_item(
            id,
            JourneyCategory::Sweet,
            "t",
            "c",
            Some("journey-2.jpg"),
            Some("/data/images/journey/journey-2.jpg"),
        )
        .unwrap()
    );
    let item = db.get_journey_item(id).unwrap().unwrap();
    assert_eq!(item.filename.as_deref(), Some("journey-2.jpg"));
}

#[test]
fn test_update_missing_item_reports_false() {
    let db = test_db();
    assert!(
        !db.update_journey_item(42, JourneyCategory::Sweet, "t", "c", None, None)
            .unwrap()
    );
}
