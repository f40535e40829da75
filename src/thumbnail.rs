//! Book cover thumbnails.
//!
//! Rows are recycled as the user scrolls, so a download may finish after its
//! row has moved on to another book. [`ThumbnailSlots`] remembers which URL
//! each row currently wants; a finished download is applied only if the row
//! still wants that URL and the bytes are an image. Everything else is
//! dropped without an error.

use crate::error::{AppError, Result};
use crate::results::RowPath;
use crate::settings::SettingsProvider;
use bytes::Bytes;
use image::ImageFormat;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// A download a row asked for.
#[derive(Debug, Clone)]
pub struct ThumbnailRequest {
    pub path: RowPath,
    pub url: String,
    /// Cancelled when the row is released or asks for another URL.
    pub cancel: CancellationToken,
}

/// A downloaded, recognised image ready to display.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub path: RowPath,
    pub format: ImageFormat,
    pub bytes: Bytes,
}

#[derive(Debug)]
struct Slot {
    url: String,
    cancel: CancellationToken,
}

/// Which thumbnail URL each visible row wants.
#[derive(Debug, Default)]
pub struct ThumbnailSlots {
    slots: HashMap<RowPath, Slot>,
}

impl ThumbnailSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register that `path` now shows the book whose cover is at `url`.
    ///
    /// Returns the download to start, or `None` when data saver is on or the
    /// URL is empty. A previous download for the same row is cancelled.
    pub fn request(
        &mut self,
        path: RowPath,
        url: &str,
        settings: &dyn SettingsProvider,
    ) -> Option<ThumbnailRequest> {
        self.release(path);
        if settings.data_saver_enabled() || url.is_empty() {
            return None;
        }
        let cancel = CancellationToken::new();
        self.slots.insert(
            path,
            Slot {
                url: url.to_string(),
                cancel: cancel.clone(),
            },
        );
        Some(ThumbnailRequest {
            path,
            url: url.to_string(),
            cancel,
        })
    }

    /// Hand back a finished download.
    ///
    /// Returns the thumbnail if `path` still wants `url` and `bytes` sniff as
    /// an image; the slot is then done. Otherwise returns `None`.
    pub fn accept(&mut self, path: RowPath, url: &str, bytes: Bytes) -> Option<Thumbnail> {
        if self.slots.get(&path).is_none_or(|slot| slot.url != url) {
            tracing::trace!(?path, "thumbnail for a recycled row dropped");
            return None;
        }
        let format = match image::guess_format(&bytes) {
            Ok(format) => format,
            Err(e) => {
                tracing::debug!(?path, "thumbnail is not an image: {e}");
                return None;
            }
        };
        self.slots.remove(&path);
        Some(Thumbnail {
            path,
            format,
            bytes,
        })
    }

    /// The row scrolled away: cancel its download.
    pub fn release(&mut self, path: RowPath) {
        if let Some(slot) = self.slots.remove(&path) {
            slot.cancel.cancel();
        }
    }

    /// Cancel every download, e.g. when a new search starts.
    pub fn clear(&mut self) {
        for (_, slot) in self.slots.drain() {
            slot.cancel.cancel();
        }
    }

    /// The URL `path` is waiting for.
    pub fn wanted(&self, path: RowPath) -> Option<&str> {
        self.slots.get(&path).map(|slot| slot.url.as_str())
    }

    pub fn pending(&self) -> usize {
        self.slots.len()
    }
}

/// Downloads thumbnails with a shared HTTP client.
#[derive(Debug, Clone)]
pub struct ThumbnailLoader {
    http: reqwest::Client,
}

impl ThumbnailLoader {
    /// Use `http`, normally the search client's, so both share a pool.
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Download the bytes for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Thumbnail`] if the download was cancelled, failed,
    /// or returned a non-success status.
    pub async fn fetch(&self, request: &ThumbnailRequest) -> Result<Bytes> {
        tokio::select! {
            biased;
            () = request.cancel.cancelled() => {
                Err(AppError::Thumbnail("cancelled".into()))
            }
            result = self.download(&request.url) => result,
        }
    }

    async fn download(&self, url: &str) -> Result<Bytes> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Thumbnail(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Thumbnail(format!("HTTP {}", status.as_u16())));
        }
        response
            .bytes()
            .await
            .map_err(|e| AppError::Thumbnail(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0\0\x10JFIF\0";

    fn path(row: usize) -> RowPath {
        RowPath::new(0, row)
    }

    #[test]
    fn data_saver_skips_downloads() {
        let mut slots = ThumbnailSlots::new();
        let saver = Settings {
            data_saver: true,
            ..Default::default()
        };
        assert!(slots.request(path(0), "https://img/a.jpg", &saver).is_none());
        assert_eq!(slots.pending(), 0);
    }

    #[test]
    fn empty_url_skipped() {
        let mut slots = ThumbnailSlots::new();
        assert!(slots.request(path(0), "", &Settings::default()).is_none());
    }

    #[test]
    fn accepts_wanted_image() {
        let mut slots = ThumbnailSlots::new();
        let req = slots
            .request(path(0), "https://img/a.png", &Settings::default())
            .unwrap();
        let thumb = slots
            .accept(req.path, &req.url, Bytes::from_static(PNG))
            .unwrap();
        assert_eq!(thumb.format, ImageFormat::Png);
        assert_eq!(slots.pending(), 0);
    }

    #[test]
    fn recycled_row_discards_old_url() {
        let mut slots = ThumbnailSlots::new();
        let old = slots
            .request(path(0), "https://img/old.jpg", &Settings::default())
            .unwrap();
        slots.request(path(0), "https://img/new.jpg", &Settings::default());
        assert!(old.cancel.is_cancelled());
        assert!(slots
            .accept(path(0), "https://img/old.jpg", Bytes::from_static(JPEG))
            .is_none());
        assert_eq!(slots.wanted(path(0)), Some("https://img/new.jpg"));
        let thumb = slots
            .accept(path(0), "https://img/new.jpg", Bytes::from_static(JPEG))
            .unwrap();
        assert_eq!(thumb.format, ImageFormat::Jpeg);
    }

    #[test]
    fn non_image_bytes_rejected() {
        let mut slots = ThumbnailSlots::new();
        slots.request(path(1), "https://img/a", &Settings::default());
        assert!(slots
            .accept(path(1), "https://img/a", Bytes::from_static(b"<html>"))
            .is_none());
        // Slot still waits; a retry may yet deliver an image.
        assert_eq!(slots.wanted(path(1)), Some("https://img/a"));
    }

    #[test]
    fn release_cancels() {
        let mut slots = ThumbnailSlots::new();
        let req = slots
            .request(path(2), "https://img/a.png", &Settings::default())
            .unwrap();
        slots.release(path(2));
        assert!(req.cancel.is_cancelled());
        assert!(slots
            .accept(path(2), "https://img/a.png", Bytes::from_static(PNG))
            .is_none());
    }

    #[test]
    fn clear_cancels_everything() {
        let mut slots = ThumbnailSlots::new();
        let a = slots
            .request(path(0), "https://img/a", &Settings::default())
            .unwrap();
        let b = slots
            .request(path(1), "https://img/b", &Settings::default())
            .unwrap();
        slots.clear();
        assert!(a.cancel.is_cancelled() && b.cancel.is_cancelled());
        assert_eq!(slots.pending(), 0);
    }

    #[tokio::test]
    async fn cancelled_fetch_returns_error() {
        let loader = ThumbnailLoader::new(reqwest::Client::new());
        let mut slots = ThumbnailSlots::new();
        let req = slots
            .request(path(0), "http://127.0.0.1:9/never.png", &Settings::default())
            .unwrap();
        req.cancel.cancel();
        let err = loader.fetch(&req).await.unwrap_err();
        assert!(matches!(err, AppError::Thumbnail(_)));
    }
}
