//! Image uploads stored under the public directory.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// MIME types accepted for uploads.
pub const ALLOWED_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Where an upload belongs; decides the directory and file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Tour images, `uploads/`.
    Tour,
    /// Team portraits, `uploads/team/`.
    Team,
    /// Site logos, `uploads/logos/`.
    Logo,
}

impl UploadKind {
    fn subdir(self) -> &'static str {
        match self {
            Self::Tour => "",
            Self::Team => "team",
            Self::Logo => "logos",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Tour => "tour",
            Self::Team => "team",
            Self::Logo => "logo",
        }
    }
}

/// A file received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name the client sent.
    pub file_name: Option<String>,
    /// Declared content type.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// The declared content type, or a guess from the file name when the
    /// client sent none or a generic one.
    #[must_use]
    pub fn effective_type(&self) -> Option<String> {
        match self.content_type.as_deref() {
            Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => {
                Some(ct.to_ascii_lowercase())
            }
            _ => self
                .file_name
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first_raw())
                .map(ToString::to_string),
        }
    }
}

/// Writes accepted images below `<public_dir>/uploads`.
#[derive(Debug, Clone)]
pub struct UploadStore {
    public_dir: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    /// Create a store rooted at the public directory.
    #[must_use]
    pub fn new(public_dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            public_dir: public_dir.into(),
            max_bytes,
        }
    }

    /// Largest accepted file in bytes.
    #[must_use]
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Directory files of `kind` are written to.
    #[must_use]
    pub fn directory(&self, kind: UploadKind) -> PathBuf {
        let base = self.public_dir.join("uploads");
        match kind.subdir() {
            "" => base,
            sub => base.join(sub),
        }
    }

    /// Check type and size without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an upload error for a non-image type or an oversized file.
    pub fn check(&self, file: &UploadedFile) -> Result<String> {
        let mime = file
            .effective_type()
            .filter(|m| ALLOWED_TYPES.contains(&m.as_str()))
            .ok_or_else(|| {
                Error::upload_rejected("Only image files are allowed (JPEG, PNG, GIF, WebP)")
            })?;
        if file.bytes.len() > self.max_bytes {
            return Err(Error::upload_too_large(self.max_bytes));
        }
        if file.bytes.is_empty() {
            return Err(Error::upload_rejected("Uploaded file is empty"));
        }
        Ok(mime)
    }

    /// Store an image and return its public path, e.g. `/uploads/team/team-...jpg`.
    ///
    /// # Errors
    ///
    /// Returns an upload error for a rejected file, or an I/O error when the
    /// directory or file cannot be written.
    pub async fn save(&self, kind: UploadKind, file: &UploadedFile) -> Result<String> {
        let mime = self.check(file)?;
        let dir = self.directory(kind);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| Error::DirectoryCreate {
                path: dir.clone(),
                source,
            })?;

        let name = unique_name(kind.prefix(), &mime);
        tokio::fs::write(dir.join(&name), &file.bytes).await?;

        let public_path = match kind.subdir() {
            "" => format!("/uploads/{name}"),
            sub => format!("/uploads/{sub}/{name}"),
        };
        info!("Stored upload {} ({} bytes)", public_path, file.bytes.len());
        Ok(public_path)
    }

    /// Remove a file stored by [`UploadStore::save`], given its public path.
    /// Paths outside the uploads directory are ignored.
    pub async fn discard(&self, public_path: &str) {
        let Some(relative) = public_path.strip_prefix("/uploads/") else {
            return;
        };
        if relative.split('/').any(|part| part.is_empty() || part == "..") {
            return;
        }
        let path = self.public_dir.join("uploads").join(relative);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => info!("Discarded upload {}", public_path),
            Err(e) => warn!("Failed to discard upload {}: {}", path.display(), e),
        }
    }
}

/// `<prefix>-<millis>-<random>.<ext>`
fn unique_name(prefix: &str, mime: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let random: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{prefix}-{millis}-{random}.{}", extension(mime))
}

/// Extension for an accepted image type. The client's file name is never
/// used, so a stored file is always served as an image.
fn extension(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str, len: usize) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.to_string()),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89; len],
        }
    }

    fn temp_public_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("soultrip_uploads_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn test_extension_follows_type() {
        assert_eq!(extension("image/jpeg"), "jpg");
        assert_eq!(extension("image/jpg"), "jpg");
        assert_eq!(extension("image/webp"), "webp");
        assert_eq!(extension("image/gif"), "gif");
    }

    #[test]
    fn test_unique_name_shape() {
        let name = unique_name("team", "image/png");
        let parts: Vec<&str> = name.trim_end_matches(".png").split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "team");
        assert!(parts[1].parse::<u128>().is_ok());
        assert!(parts[2].parse::<u32>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn test_check_rejects_non_images() {
        let store = UploadStore::new("public", 1024);
        let file = UploadedFile {
            file_name: Some("notes.txt".to_string()),
            content_type: Some("text/plain".to_string()),
            bytes: b"hello".to_vec(),
        };
        assert!(matches!(
            store.check(&file),
            Err(Error::UploadRejected { too_large: false, .. })
        ));
    }

    #[test]
    fn test_check_rejects_large_files() {
        let store = UploadStore::new("public", 10);
        assert!(matches!(
            store.check(&png("big.png", 11)),
            Err(Error::UploadRejected { too_large: true, .. })
        ));
        assert!(store.check(&png("ok.png", 10)).is_ok());
    }

    #[test]
    fn test_type_guessed_from_name() {
        let file = UploadedFile {
            file_name: Some("logo.webp".to_string()),
            content_type: Some("application/octet-stream".to_string()),
            bytes: vec![1],
        };
        assert_eq!(file.effective_type().as_deref(), Some("image/webp"));
    }

    #[tokio::test]
    async fn test_save_writes_under_kind_directory() {
        let public = temp_public_dir("save");
        let store = UploadStore::new(&public, 1024);

        let path = store.save(UploadKind::Logo, &png("brand.png", 4)).await.unwrap();
        assert!(path.starts_with("/uploads/logos/logo-"));
        assert!(path.ends_with(".png"));

        let on_disk = public.join(path.trim_start_matches('/'));
        assert_eq!(std::fs::read(&on_disk).unwrap().len(), 4);

        let tour = store.save(UploadKind::Tour, &png("a.png", 1)).await.unwrap();
        assert!(tour.starts_with("/uploads/tour-"));

        let _ = std::fs::remove_dir_all(&public);
    }

    #[tokio::test]
    async fn test_discard_removes_stored_file() {
        let public = temp_public_dir("discard");
        let store = UploadStore::new(&public, 1024);

        let path = store.save(UploadKind::Team, &png("me.png", 2)).await.unwrap();
        let on_disk = public.join(path.trim_start_matches('/'));
        assert!(on_disk.exists());

        store.discard("/uploads/../config.toml").await;
        store.discard(&path).await;
        assert!(!on_disk.exists());

        let _ = std::fs::remove_dir_all(&public);
    }

    #[tokio::test]
    async fn test_save_ignores_client_extension() {
        let public = temp_public_dir("html");
        let store = UploadStore::new(&public, 1024);
        let file = UploadedFile {
            file_name: Some("page.html".to_string()),
            content_type: Some("image/png".to_string()),
            bytes: b"<script>alert(1)</script>".to_vec(),
        };

        let path = store.save(UploadKind::Tour, &file).await.unwrap();
        assert!(path.ends_with(".png"));
        assert_eq!(
            mime_guess::from_path(&path).first_raw(),
            Some("image/png")
        );

        let _ = std::fs::remove_dir_all(&public);
    }
}
