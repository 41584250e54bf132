//! Zip packaging of the rendered file set
//!
//! Assembles every rendered fragment, plus the optional reference image as
//! a wallpaper entry, into one deflate-compressed zip. On failure the
//! partially written archive is removed so no broken file is offered.

use crate::image::UploadedImage;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const WALLPAPER_DIR: &str = "wallpaper";

/// Write the file set (and optional image) as a zip at `out`.
pub fn write_zip(
    out: &Path,
    files: &[(String, String)],
    image: Option<&UploadedImage>,
) -> Result<()> {
    let result = try_write_zip(out, files, image);
    if result.is_err() {
        let _ = fs::remove_file(out);
    }
    result
}

fn try_write_zip(
    out: &Path,
    files: &[(String, String)],
    image: Option<&UploadedImage>,
) -> Result<()> {
    let file = fs::File::create(out)
        .with_context(|| format!("failed to create archive {}", out.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (path, content) in files {
        zip.start_file(path.as_str(), options)
            .with_context(|| format!("failed to add {} to archive", path))?;
        zip.write_all(content.as_bytes())
            .with_context(|| format!("failed to write {} to archive", path))?;
    }

    if let Some(image) = image {
        let bytes = image
            .decode()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to decode reference image")?;
        let entry = format!("{}/{}", WALLPAPER_DIR, image.name);
        zip.start_file(entry.as_str(), options)
            .context("failed to add wallpaper to archive")?;
        zip.write_all(&bytes)
            .context("failed to write wallpaper to archive")?;
    }

    zip.finish().context("failed to finalize archive")?;
    Ok(())
}

/// Materialize the same file set as a directory tree instead of a zip.
pub fn write_dir(root: &Path, files: &[(String, String)]) -> Result<()> {
    for (path, content) in files {
        let target = root.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&target, content)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use std::io::Read;

    fn files() -> Vec<(String, String)> {
        vec![
            ("alacritty/colors.toml".to_string(), "[colors]\n".to_string()),
            ("dunst/dunstrc".to_string(), "[global]\n".to_string()),
        ]
    }

    #[test]
    fn test_write_zip_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("theme.zip");
        let image = UploadedImage {
            data: base64::engine::general_purpose::STANDARD.encode(b"imagebytes"),
            mime_type: "image/png".to_string(),
            name: "wall.png".to_string(),
        };
        write_zip(&out, &files(), Some(&image)).unwrap();

        let mut archive = zip::ZipArchive::new(fs::File::open(&out).unwrap()).unwrap();
        assert_eq!(archive.len(), 3);
        let mut entry = archive.by_name("alacritty/colors.toml").unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "[colors]\n");
        drop(entry);
        assert!(archive.by_name("wallpaper/wall.png").is_ok());
    }

    #[test]
    fn test_write_zip_without_image() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("theme.zip");
        write_zip(&out, &files(), None).unwrap();
        let archive = zip::ZipArchive::new(fs::File::open(&out).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_failed_zip_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("theme.zip");
        let image = UploadedImage {
            data: "%%% not base64 %%%".to_string(),
            mime_type: "image/png".to_string(),
            name: "wall.png".to_string(),
        };
        assert!(write_zip(&out, &files(), Some(&image)).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_write_dir_materializes_tree() {
        let dir = tempfile::tempdir().unwrap();
        write_dir(dir.path(), &files()).unwrap();
        let content = fs::read_to_string(dir.path().join("alacritty/colors.toml")).unwrap();
        assert_eq!(content, "[colors]\n");
        assert!(dir.path().join("dunst/dunstrc").exists());
    }
}
