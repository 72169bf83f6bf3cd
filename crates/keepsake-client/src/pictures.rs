//! Picture listing, sequential bulk upload, and the admin-view refresh loop.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use keepsake_db::pictures::PictureSource;
use keepsake_db::rarity::Rarity;

use crate::ClientError;
use crate::session::AdminClient;

/// Largest number of files one batch upload will send.
pub const MAX_UPLOAD_BATCH: usize = 50;

/// How often the admin view refreshes its picture listing.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PictureSummary {
    pub id: i64,
    pub original_name: Option<String>,
    pub created_at: String,
    pub gacha_id: Option<i64>,
    #[serde(default)]
    pub source: Option<PictureSource>,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct PictureList {
    items: Vec<PictureSummary>,
}

/// One file queued for batch upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Per-file outcome of a batch upload.
#[derive(Debug)]
pub struct UploadReport {
    pub uploaded: Vec<i64>,
    pub failed: Vec<(String, ClientError)>,
    /// Files beyond the batch cap that were never attempted.
    pub skipped: usize,
}

/// Split a batch at the upload cap.
fn cap_batch<T>(files: &[T]) -> (&[T], usize) {
    let take = files.len().min(MAX_UPLOAD_BATCH);
    (&files[..take], files.len() - take)
}

/// Collision-avoiding rename applied before upload, mirroring what the
/// admin view does to files picked from a local folder.
fn batch_filename(index: usize, original: &str) -> String {
    format!("{}-{index}-{original}", chrono::Utc::now().timestamp_millis())
}

impl AdminClient {
    pub async fn list_pictures(
        &self,
        gacha_id: Option<i64>,
    ) -> Result<Vec<PictureSummary>, ClientError> {
        let path = match gacha_id {
            Some(id) => format!("/api/pictures?gachaId={id}"),
            None => "/api/pictures".to_string(),
        };
        let value = self.get_json(&path).await?;
        let list: PictureList = serde_json::from_value(value)?;
        Ok(list.items)
    }

    /// Upload a single picture; returns the new picture id.
    pub async fn upload_picture(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        source: PictureSource,
        gacha_id: Option<i64>,
    ) -> Result<i64, ClientError> {
        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string()),
            )
            .text("source", source.as_str());
        if let Some(id) = gacha_id {
            form = form.text("gachaId", id.to_string());
        }

        let value = self.post_multipart("/api/pictures", form).await?;
        value
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| ClientError::Api {
                status: 200,
                message: "upload response missing id".into(),
            })
    }

    /// Upload up to [`MAX_UPLOAD_BATCH`] files, one at a time to bound
    /// server load. A failed file is reported and the rest still upload;
    /// files beyond the cap are counted as skipped.
    pub async fn upload_batch(&self, files: &[UploadFile]) -> UploadReport {
        let (batch, skipped) = cap_batch(files);
        if skipped > 0 {
            tracing::warn!(skipped, "Upload batch truncated to {MAX_UPLOAD_BATCH} files");
        }

        let mut report = UploadReport {
            uploaded: Vec::new(),
            failed: Vec::new(),
            skipped,
        };

        for (index, file) in batch.iter().enumerate() {
            let renamed = batch_filename(index, &file.name);
            match self
                .upload_picture(&renamed, file.bytes.clone(), PictureSource::ManualUpload, None)
                .await
            {
                Ok(id) => report.uploaded.push(id),
                Err(e) => {
                    tracing::warn!(file = %file.name, "Upload failed: {e}");
                    report.failed.push((file.name.clone(), e));
                }
            }
        }

        report
    }

    /// Assign a picture to the least-loaded item of a rarity.
    /// Returns the chosen gacha item id.
    pub async fn assign_picture_rarity(
        &self,
        picture_id: i64,
        rarity: Rarity,
    ) -> Result<i64, ClientError> {
        let value = self
            .post_json(
                "/api/pictures/assign",
                &json!({ "id": picture_id, "rarity": rarity.as_str() }),
            )
            .await?;
        value
            .get("gachaId")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| ClientError::Api {
                status: 200,
                message: "assign response missing gachaId".into(),
            })
    }

    /// Assign a picture to a specific gacha item.
    pub async fn assign_picture_item(
        &self,
        picture_id: i64,
        gacha_id: i64,
    ) -> Result<(), ClientError> {
        self.post_json(
            "/api/pictures/assign",
            &json!({ "id": picture_id, "gachaId": gacha_id }),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_picture(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("/api/pictures?id={id}")).await?;
        Ok(())
    }
}

async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// Periodically refresh the picture listing while the admin view is active.
///
/// Each successful fetch is published on `tx`; cancel `shutdown` on view
/// teardown to stop the loop. The loop also ends on its own when the
/// session expires, since every caller then needs a fresh login anyway.
pub async fn picture_refresh_loop(
    client: &AdminClient,
    interval: Duration,
    shutdown: CancellationToken,
    tx: watch::Sender<Vec<PictureSummary>>,
) {
    loop {
        match client.list_pictures(None).await {
            Ok(pictures) => {
                let _ = tx.send(pictures);
            }
            Err(ClientError::Unauthorized) => {
                tracing::warn!("Session expired, stopping picture refresh");
                return;
            }
            Err(e) => tracing::warn!("Picture refresh failed: {e}"),
        }

        if sleep_or_cancel(&shutdown, interval).await {
            tracing::info!("Picture refresh loop stopped");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_is_capped_at_fifty() {
        let files: Vec<u8> = (0..60).collect();
        let (batch, skipped) = cap_batch(&files);
        assert_eq!(batch.len(), 50);
        assert_eq!(skipped, 10);
    }

    #[test]
    fn small_batches_are_untouched() {
        let files = [1, 2, 3];
        let (batch, skipped) = cap_batch(&files);
        assert_eq!(batch.len(), 3);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn batch_rename_keeps_original_name_visible() {
        let renamed = batch_filename(4, "holiday.jpg");
        assert!(renamed.ends_with("-4-holiday.jpg"));
    }

    #[test]
    fn picture_summary_deserializes_api_shape() {
        let value = serde_json::json!({
            "id": 3,
            "originalName": "cat.jpg",
            "createdAt": "2026-01-01 00:00:00",
            "gachaId": null,
            "source": "manual-upload",
            "url": "/api/files/3?token=t",
        });
        let summary: PictureSummary = serde_json::from_value(value).unwrap();
        assert_eq!(summary.id, 3);
        assert_eq!(summary.source, Some(PictureSource::ManualUpload));
        assert_eq!(summary.gacha_id, None);
    }
}
