use super::test_db;
use crate::password::{hash_password, verify_password};
use crate::sessions::SESSION_DAYS;

const DAY_SECS: i64 = 24 * 60 * 60;

#[test]
fn test_admin_crud() {
    let db = test_db();
    let id = db.create_admin("alice", &hash_password("pw")).unwrap();
    assert!(id > 0);

    let admins = db.get_all_admins().unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].username, "alice");

    assert_eq!(db.first_admin_id().unwrap(), Some(id));

    db.delete_admin(id).unwrap();
    assert!(db.get_all_admins().unwrap().is_empty());
    assert_eq!(db.first_admin_id().unwrap(), None);
}

#[test]
fn test_duplicate_username_rejected() {
    let db = test_db();
    db.create_admin("alice", "h").unwrap();
    let err = db.create_admin("alice", "h").unwrap_err();
    assert!(matches!(err, crate::DbError::InvalidData(_)));
}

#[test]
fn test_login_credentials_lookup() {
    let db = test_db();
    let stored = hash_password("secret");
    db.create_admin("bob", &stored).unwrap();

    let creds = db.get_admin_credentials("bob").unwrap().unwrap();
    assert!(verify_password("secret", &creds.password_hash));
    assert!(!verify_password("wrong", &creds.password_hash));

    assert!(db.get_admin_credentials("nobody").unwrap().is_none());
}

#[test]
fn test_session_round_trip() {
    let db = test_db();
    let id = db.create_admin("alice", "h").unwrap();

    let session = db.create_session(id).unwrap();
    assert_eq!(session.token.len(), 64); // 256-bit hex

    let admin = db.get_admin_by_token(&session.token).unwrap().unwrap();
    assert_eq!(admin.id, id);
    assert_eq!(admin.username, "alice");

    assert!(db.get_admin_by_token("not-a-token").unwrap().is_none());
}

#[test]
fn test_session_tokens_are_unique() {
    let db = test_db();
    let id = db.create_admin("alice", "h").unwrap();
    let a = db.create_session(id).unwrap();
    let b = db.create_session(id).unwrap();
    assert_ne!(a.token, b.token);
}

#[test]
fn test_session_expiry_boundary() {
    let db = test_db();
    let id = db.create_admin("alice", "h").unwrap();

    let now = 1_700_000_000;
    let session = db.create_session_at(id, now).unwrap();
    assert_eq!(session.expires_at, now + SESSION_DAYS * DAY_SECS);

    // Usable strictly before expiry, rejected at and after it.
    assert!(
        db.get_admin_by_token_at(&session.token, session.expires_at - 1)
            .unwrap()
            .is_some()
    );
    assert!(
        db.get_admin_by_token_at(&session.token, session.expires_at)
            .unwrap()
            .is_none()
    );
    assert!(
        db.get_admin_by_token_at(&session.token, session.expires_at + 1)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_login_purges_expired_sessions() {
    let db = test_db();
    let id = db.create_admin("alice", "h").unwrap();

    let now = 1_700_000_000;
    db.create_session_at(id, now).unwrap();
    db.create_session_at(id, now).unwrap();
    assert_eq!(db.session_count(id).unwrap(), 2);

    // A login well past expiry sweeps the dead rows, leaving only itself.
    let later = now + (SESSION_DAYS + 1) * DAY_SECS;
    db.create_session_at(id, later).unwrap();
    assert_eq!(db.session_count(id).unwrap(), 1);
}
