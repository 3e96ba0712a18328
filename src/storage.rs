//! Disk-backed media store for profile and listing images
//!
//! Files are written under the configured media root with randomised
//! names and served read-only at `/media` by the static-file layer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Image extension from an uploaded file name, if acceptable
pub fn image_extension(file_name: &str) -> Option<&str> {
    let ext = file_name.rsplit_once('.')?.1;
    ALLOWED_EXTENSIONS
        .iter()
        .find(|allowed| allowed.eq_ignore_ascii_case(ext))
        .copied()
}

pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("failed to create media root {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Persist an uploaded image; returns its public URL path
    pub async fn save(&self, dir: &str, file_name: &str, bytes: &[u8]) -> Result<String> {
        let ext = image_extension(file_name)
            .with_context(|| format!("unsupported image type: {file_name}"))?;

        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();
        let relative = format!("{dir}/{token}.{ext}");

        let target_dir = self.root.join(dir);
        tokio::fs::create_dir_all(&target_dir)
            .await
            .with_context(|| format!("failed to create {}", target_dir.display()))?;
        tokio::fs::write(self.root.join(&relative), bytes)
            .await
            .context("failed to write uploaded image")?;

        Ok(format!("/media/{relative}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_allow_list() {
        assert_eq!(image_extension("room.jpg"), Some("jpg"));
        assert_eq!(image_extension("room.PNG"), Some("png"));
        assert_eq!(image_extension("room.webp"), Some("webp"));
        assert_eq!(image_extension("notes.pdf"), None);
        assert_eq!(image_extension("no-extension"), None);
    }

    #[tokio::test]
    async fn save_writes_under_root_and_returns_public_url() {
        let root = std::env::temp_dir().join(format!("pgfinder-media-{}", uuid::Uuid::new_v4()));
        let store = MediaStore::new(&root).unwrap();

        let url = store.save("properties", "room.jpg", b"fakebytes").await.unwrap();
        assert!(url.starts_with("/media/properties/"));
        assert!(url.ends_with(".jpg"));

        let on_disk = root.join(url.trim_start_matches("/media/"));
        assert_eq!(tokio::fs::read(on_disk).await.unwrap(), b"fakebytes");

        tokio::fs::remove_dir_all(root).await.ok();
    }
}
