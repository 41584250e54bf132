//! Reference image input
//!
//! Loads the optional image the user points --image at, bounds its size,
//! and prepares the base64 payload for the inline request part and the
//! wallpaper archive entry.

use base64::Engine;
use std::fs;
use std::path::Path;

/// Hard bound on the reference image, matching what the model accepts
/// inline without a separate upload.
pub const MAX_IMAGE_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Base64-encoded file contents.
    pub data: String,
    pub mime_type: String,
    /// Original file name, reused for the wallpaper archive entry.
    pub name: String,
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

impl UploadedImage {
    /// Load an image from disk, rejecting unsupported types and anything
    /// over `MAX_IMAGE_BYTES` before the bytes are read into memory.
    pub fn load(path: &Path) -> Result<UploadedImage, String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("Invalid image path: {}", path.display()))?
            .to_string();

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let mime_type = mime_for_extension(ext).ok_or_else(|| {
            format!(
                "Unsupported image type {:?} (use png, jpg, webp or gif)",
                ext
            )
        })?;

        let meta = fs::metadata(path)
            .map_err(|e| format!("Failed to read image {}: {}", path.display(), e))?;
        if meta.len() > MAX_IMAGE_BYTES {
            return Err(format!(
                "Image is too large ({} bytes, limit {} bytes)",
                meta.len(),
                MAX_IMAGE_BYTES
            ));
        }

        let bytes = fs::read(path)
            .map_err(|e| format!("Failed to read image {}: {}", path.display(), e))?;
        let data = base64::engine::general_purpose::STANDARD.encode(&bytes);

        Ok(UploadedImage {
            data,
            mime_type: mime_type.to_string(),
            name,
        })
    }

    /// Decode back to raw bytes for the archive entry.
    pub fn decode(&self) -> Result<Vec<u8>, String> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| format!("Failed to decode image data: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension("PNG"), Some("image/png"));
        assert_eq!(mime_for_extension("jpeg"), Some("image/jpeg"));
        assert_eq!(mime_for_extension("bmp"), None);
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.png");
        let bytes = b"\x89PNG\r\n\x1a\nfake";
        fs::File::create(&path)
            .unwrap()
            .write_all(bytes)
            .unwrap();

        let image = UploadedImage::load(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.name, "wall.png");
        assert_eq!(image.decode().unwrap(), bytes);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.tiff");
        fs::write(&path, b"data").unwrap();
        let err = UploadedImage::load(&path).unwrap_err();
        assert!(err.contains("Unsupported image type"));
    }

    #[test]
    fn test_load_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.png");
        let file = fs::File::create(&path).unwrap();
        file.set_len(MAX_IMAGE_BYTES + 1).unwrap();
        let err = UploadedImage::load(&path).unwrap_err();
        assert!(err.contains("too large"));
    }
}
