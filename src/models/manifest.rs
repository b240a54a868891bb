//! Media manifest data structures
//!
//! This module contains the core data structures for loading and resolving
//! manifest.json files, which name the session's media assets.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Embedded default manifest as fallback
const EMBEDDED_MANIFEST: &str = include_str!("../../assets/manifest.json");

/// Errors raised while loading a manifest at startup.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("manifest lists no images")]
    NoImages,
}

/// The static asset set: one audio file, one video file, and an ordered
/// sequence of images (insertion order is display order).
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MediaManifest {
    pub audio: String,
    pub video: String,
    pub images: Vec<String>,
}

/// Manifest entries resolved to concrete filesystem paths.
#[derive(Debug, Clone)]
pub struct ResolvedMedia {
    pub music: PathBuf,
    pub video: PathBuf,
    pub photos: Vec<PathBuf>,
}

impl MediaManifest {
    /// Parse manifest JSON, rejecting an empty image list.
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let manifest: MediaManifest = serde_json::from_str(content)?;
        if manifest.images.is_empty() {
            return Err(ManifestError::NoImages);
        }
        Ok(manifest)
    }

    /// Load a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Find the manifest in order of priority:
    /// 1. Explicit path from the command line (all errors are fatal)
    /// 2. `<assets_dir>/manifest.json` if present (malformed is fatal)
    /// 3. Embedded fallback
    ///
    /// Returns the manifest and the path it came from, `None` for embedded.
    pub fn find(
        assets_dir: &Path,
        explicit: Option<&Path>,
    ) -> Result<(Self, Option<PathBuf>), ManifestError> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let default_path = assets_dir.join("manifest.json");
        if default_path.exists() {
            return Ok((Self::load(&default_path)?, Some(default_path)));
        }

        Ok((Self::parse(EMBEDDED_MANIFEST)?, None))
    }

    pub fn photo_count(&self) -> usize {
        self.images.len()
    }

    /// Resolve every entry against the assets directory. Absolute entries
    /// are kept as-is; a leading `/` on an otherwise bare name is treated
    /// as relative so manifests written for a web root still resolve.
    pub fn resolve(&self, assets_dir: &Path) -> ResolvedMedia {
        ResolvedMedia {
            music: resolve_entry(assets_dir, &self.audio),
            video: resolve_entry(assets_dir, &self.video),
            photos: self
                .images
                .iter()
                .map(|entry| resolve_entry(assets_dir, entry))
                .collect(),
        }
    }
}

fn resolve_entry(assets_dir: &Path, entry: &str) -> PathBuf {
    let path = Path::new(entry);
    if path.is_absolute() && path.exists() {
        return path.to_path_buf();
    }
    assets_dir.join(entry.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_temp_manifest_file(content: &str) -> (tempfile::NamedTempFile, PathBuf) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        let path = file.path().to_path_buf();
        (file, path)
    }

    #[test]
    fn test_parse_success() {
        let json = r#"{
            "audio": "song.mp3",
            "video": "video.mp4",
            "images": ["pic1.jpg", "pic2.jpg", "pic3.jpg"]
        }"#;
        let manifest = MediaManifest::parse(json).unwrap();
        assert_eq!(manifest.audio, "song.mp3");
        assert_eq!(manifest.video, "video.mp4");
        assert_eq!(manifest.photo_count(), 3);
        assert_eq!(manifest.images[0], "pic1.jpg");
    }

    #[test]
    fn test_parse_missing_field() {
        let json = r#"{"audio": "song.mp3", "images": ["pic1.jpg"]}"#;
        let result = MediaManifest::parse(json);
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = MediaManifest::parse("{ invalid json }");
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn test_parse_empty_images_rejected() {
        let json = r#"{"audio": "a.mp3", "video": "v.mp4", "images": []}"#;
        let result = MediaManifest::parse(json);
        assert!(matches!(result, Err(ManifestError::NoImages)));
    }

    #[test]
    fn test_load_success() {
        let json = r#"{"audio": "a.mp3", "video": "v.mp4", "images": ["p.jpg"]}"#;
        let (_file, path) = create_temp_manifest_file(json);
        let manifest = MediaManifest::load(&path).unwrap();
        assert_eq!(manifest.audio, "a.mp3");
    }

    #[test]
    fn test_load_file_not_found() {
        let path = PathBuf::from("/nonexistent/path/manifest.json");
        let result = MediaManifest::load(&path);
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }

    #[test]
    fn test_embedded_manifest_parses() {
        let manifest = MediaManifest::parse(EMBEDDED_MANIFEST).unwrap();
        assert!(!manifest.audio.is_empty());
        assert!(!manifest.video.is_empty());
        assert!(manifest.photo_count() >= 1);
    }

    #[test]
    fn test_find_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("manifest.json"),
            r#"{"audio": "default.mp3", "video": "v.mp4", "images": ["p.jpg"]}"#,
        )
        .unwrap();
        let explicit = dir.path().join("other.json");
        std::fs::write(
            &explicit,
            r#"{"audio": "explicit.mp3", "video": "v.mp4", "images": ["p.jpg"]}"#,
        )
        .unwrap();

        let (manifest, source) = MediaManifest::find(dir.path(), Some(&explicit)).unwrap();
        assert_eq!(manifest.audio, "explicit.mp3");
        assert_eq!(source, Some(explicit));
    }

    #[test]
    fn test_find_explicit_path_errors_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let result = MediaManifest::find(dir.path(), Some(&missing));
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }

    #[test]
    fn test_find_uses_assets_dir_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("manifest.json"),
            r#"{"audio": "local.mp3", "video": "v.mp4", "images": ["p.jpg"]}"#,
        )
        .unwrap();

        let (manifest, source) = MediaManifest::find(dir.path(), None).unwrap();
        assert_eq!(manifest.audio, "local.mp3");
        assert_eq!(source, Some(dir.path().join("manifest.json")));
    }

    #[test]
    fn test_find_malformed_default_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("manifest.json"), "{ nope").unwrap();
        let result = MediaManifest::find(dir.path(), None);
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn test_find_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let (manifest, source) = MediaManifest::find(dir.path(), None).unwrap();
        assert!(source.is_none());
        assert!(!manifest.audio.is_empty());
    }

    #[test]
    fn test_resolve_joins_relative_entries() {
        let manifest = MediaManifest::parse(
            r#"{"audio": "song.mp3", "video": "clips/video.mp4", "images": ["pics/one.jpg"]}"#,
        )
        .unwrap();
        let resolved = manifest.resolve(Path::new("/data/assets"));
        assert_eq!(resolved.music, PathBuf::from("/data/assets/song.mp3"));
        assert_eq!(resolved.video, PathBuf::from("/data/assets/clips/video.mp4"));
        assert_eq!(resolved.photos[0], PathBuf::from("/data/assets/pics/one.jpg"));
    }

    #[test]
    fn test_resolve_web_style_entries() {
        // Leading slash the way a web manifest writes it, but no such
        // file at the filesystem root: resolves under the assets dir.
        let manifest = MediaManifest::parse(
            r#"{"audio": "/song.mp3", "video": "/video.mp4", "images": ["/pic1.jpg"]}"#,
        )
        .unwrap();
        let resolved = manifest.resolve(Path::new("/data/assets"));
        assert_eq!(resolved.music, PathBuf::from("/data/assets/song.mp3"));
        assert_eq!(resolved.photos[0], PathBuf::from("/data/assets/pic1.jpg"));
    }

    #[test]
    fn test_resolve_keeps_existing_absolute_entries() {
        let dir = tempfile::tempdir().unwrap();
        let abs = dir.path().join("real.mp3");
        std::fs::write(&abs, b"x").unwrap();
        let json = format!(
            r#"{{"audio": "{}", "video": "v.mp4", "images": ["p.jpg"]}}"#,
            abs.display()
        );
        let manifest = MediaManifest::parse(&json).unwrap();
        let resolved = manifest.resolve(Path::new("/data/assets"));
        assert_eq!(resolved.music, abs);
    }
}
