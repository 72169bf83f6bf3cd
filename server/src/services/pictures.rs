//! Uploaded image storage service.
//!
//! Files land under the configured storage root (journey files in a
//! `journey/` subdirectory) with collision-resistant generated names, so
//! concurrent uploads never need coordination.

use std::path::{Path, PathBuf};

use keepsake_db::Database;
use keepsake_db::pictures::{NewPicture, Picture, PictureSource};

const MAX_EXT_LEN: usize = 8; // includes the dot

#[derive(Debug, thiserror::Error)]
pub enum PictureError {
    #[error("Picture not found: {0}")]
    NotFound(i64),
    #[error("Stored file missing: {0}")]
    FileMissing(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Db(#[from] keepsake_db::DbError),
}

/// Build a stored filename from a timestamp, a random suffix, and the
/// original extension lowered and capped in length.
pub fn generate_filename(prefix: Option<&str>, original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .map(|mut e| {
            e.truncate(MAX_EXT_LEN);
            e
        })
        .unwrap_or_default();

    let stamp = chrono::Utc::now().timestamp_millis();
    let suffix = nanoid::nanoid!(8);
    match prefix {
        Some(prefix) => format!("{prefix}-{stamp}-{suffix}{ext}"),
        None => format!("{stamp}-{suffix}{ext}"),
    }
}

#[derive(Clone)]
pub struct PictureService {
    db: Database,
    storage_dir: PathBuf,
}

impl PictureService {
    pub fn new(db: Database, storage_dir: PathBuf) -> Self {
        Self { db, storage_dir }
    }

    fn journey_dir(&self) -> PathBuf {
        self.storage_dir.join("journey")
    }

    /// Persist an uploaded picture: bytes to disk, metadata to the store.
    /// Returns the new picture id.
    pub fn save_picture(
        &self,
        original_name: &str,
        mime_type: Option<&str>,
        data: &[u8],
        source: PictureSource,
        gacha_id: Option<i64>,
    ) -> Result<i64, PictureError> {
        std::fs::create_dir_all(&self.storage_dir)?;

        let filename = generate_filename(None, original_name);
        let stored_path = self.storage_dir.join(&filename);
        std::fs::write(&stored_path, data)?;

        let id = self.db.add_picture(&NewPicture {
            filename: &filename,
            original_name: (!original_name.is_empty()).then_some(original_name),
            mime_type,
            size: data.len() as i64,
            stored_path: &stored_path.to_string_lossy(),
            source,
            gacha_id,
        })?;

        tracing::info!(id, filename = %filename, "Picture saved");
        Ok(id)
    }

    /// Persist a journey image; the row itself is managed by the caller.
    /// Returns `(filename, stored_path)`.
    pub fn save_journey_file(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> Result<(String, String), PictureError> {
        let dir = self.journey_dir();
        std::fs::create_dir_all(&dir)?;

        let filename = generate_filename(Some("journey"), original_name);
        let stored_path = dir.join(&filename);
        std::fs::write(&stored_path, data)?;

        tracing::info!(filename = %filename, "Journey file saved");
        Ok((filename, stored_path.to_string_lossy().into_owned()))
    }

    /// Resolve a picture to its on-disk file, falling back to the storage
    /// root + filename for rows imported without a stored path.
    pub fn picture_file(&self, id: i64) -> Result<(PathBuf, Picture), PictureError> {
        let picture = self.db.get_picture(id)?.ok_or(PictureError::NotFound(id))?;
        let path = if picture.stored_path.is_empty() {
            self.storage_dir.join(&picture.filename)
        } else {
            PathBuf::from(&picture.stored_path)
        };
        if !path.exists() {
            return Err(PictureError::FileMissing(picture.filename.clone()));
        }
        Ok((path, picture))
    }

    /// Delete the row and its file; a missing file is not an error.
    pub fn delete_picture(&self, id: i64) -> Result<(), PictureError> {
        let picture = self.db.get_picture(id)?.ok_or(PictureError::NotFound(id))?;
        if !picture.stored_path.is_empty() {
            let _ = std::fs::remove_file(&picture.stored_path);
        }
        self.db.delete_picture(id)?;
        tracing::info!(id, "Picture deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "keepsake-test-{tag}-{}",
            nanoid::nanoid!(6)
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn service(tag: &str) -> PictureService {
        let db = Database::open_in_memory().unwrap();
        PictureService::new(db, temp_storage(tag))
    }

    #[test]
    fn generated_names_carry_capped_extension() {
        let name = generate_filename(None, "photo.JPEG");
        assert!(name.ends_with(".jpeg"));

        let long = generate_filename(None, "weird.superlongext");
        let ext = long.rsplit_once('.').unwrap().1;
        assert!(ext.len() <= MAX_EXT_LEN - 1);

        let bare = generate_filename(None, "no-extension");
        assert!(!bare.contains('.'));

        let journey = generate_filename(Some("journey"), "a.png");
        assert!(journey.starts_with("journey-"));
        assert!(journey.ends_with(".png"));
    }

    #[test]
    fn generated_names_do_not_collide() {
        let a = generate_filename(None, "a.jpg");
        let b = generate_filename(None, "a.jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn save_and_read_back() {
        let svc = service("save");
        let id = svc
            .save_picture("cat.jpg", Some("image/jpeg"), b"bytes", PictureSource::ManualUpload, None)
            .unwrap();

        let (path, picture) = svc.picture_file(id).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"bytes");
        assert_eq!(picture.original_name.as_deref(), Some("cat.jpg"));
        assert_eq!(picture.size, 5);
    }

    #[test]
    fn delete_removes_row_and_file() {
        let svc = service("delete");
        let id = svc
            .save_picture("cat.jpg", None, b"x", PictureSource::ManualUpload, None)
            .unwrap();
        let (path, _) = svc.picture_file(id).unwrap();

        svc.delete_picture(id).unwrap();
        assert!(!path.exists());
        assert!(matches!(
            svc.picture_file(id),
            Err(PictureError::NotFound(_))
        ));
    }

    #[test]
    fn missing_picture_is_not_found() {
        let svc = service("missing");
        assert!(matches!(svc.picture_file(99), Err(PictureError::NotFound(99))));
    }
}
