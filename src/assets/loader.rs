//! Asset loader: directory enumeration and encoded text reads.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use thiserror::Error;
use walkdir::WalkDir;

// ---------------------------------------------------------------------------
// AssetError
// ---------------------------------------------------------------------------

/// Errors raised while loading voice assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The voice directory does not exist or is not a directory.  Fatal for
    /// the whole index build.
    #[error("voice directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The configured transcript encoding label is not known.
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contains byte sequences that are invalid in the encoding.
    #[error("{} is not valid {encoding}", .path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    #[error("cannot list {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },
}

impl AssetError {
    /// `true` when the error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AssetError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

// ---------------------------------------------------------------------------
// AssetLoader trait
// ---------------------------------------------------------------------------

/// File-system access needed by the index builder.
pub trait AssetLoader {
    /// Files directly inside `dir` whose extension equals `extension`
    /// (case-insensitive), sorted by file name.
    fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, AssetError>;

    /// Read `path` fully and decode it with `encoding`.
    fn read_text(&self, path: &Path, encoding: &'static Encoding) -> Result<String, AssetError>;
}

// ---------------------------------------------------------------------------
// FsAssetLoader
// ---------------------------------------------------------------------------

/// [`AssetLoader`] over the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetLoader;

impl AssetLoader for FsAssetLoader {
    fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, AssetError> {
        if !dir.is_dir() {
            return Err(AssetError::DirectoryNotFound(dir.to_path_buf()));
        }
        let extension = extension.trim_start_matches('.');

        let mut result = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Depth 0 is `dir` itself: nothing can be listed.
                Err(e) if e.depth() == 0 => {
                    return Err(AssetError::Walk {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    log::warn!("assets: skipping unreadable entry in {}: {e}", dir.display());
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    fn read_text(&self, path: &Path, encoding: &'static Encoding) -> Result<String, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (text, used, had_errors) = encoding.decode(&bytes);
        if had_errors {
            return Err(AssetError::Decode {
                path: path.to_path_buf(),
                encoding: used.name(),
            });
        }
        Ok(text.into_owned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::SHIFT_JIS;
    use tempfile::tempdir;

    #[test]
    fn lists_matching_files_sorted_and_case_insensitive() {
        let dir = tempdir().expect("temp dir");
        for name in ["b.wav", "a.WAV", "c.txt", "d.wav.bak"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.wav")).unwrap();

        let files = FsAssetLoader.list_files(dir.path(), "wav").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.WAV", "b.wav"]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_skipped() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("001.wav"), b"").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.wav"), dir.path().join("002.wav"))
            .unwrap();

        let files = FsAssetLoader.list_files(dir.path(), "wav").unwrap();
        assert_eq!(files, vec![dir.path().join("001.wav")]);
    }

    #[test]
    fn does_not_descend_into_subdirectories() {
        let dir = tempdir().expect("temp dir");
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("x.wav"), b"").unwrap();
        assert!(FsAssetLoader.list_files(dir.path(), ".wav").unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_fatal() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("Voice");
        assert!(matches!(
            FsAssetLoader.list_files(&missing, "wav"),
            Err(AssetError::DirectoryNotFound(p)) if p == missing
        ));
    }

    #[test]
    fn decodes_shift_jis() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("a.txt");
        let (bytes, _, _) = SHIFT_JIS.encode("こんにちは、世界");
        std::fs::write(&path, &bytes).unwrap();

        let text = FsAssetLoader.read_text(&path, SHIFT_JIS).unwrap();
        assert_eq!(text, "こんにちは、世界");
    }

    #[test]
    fn invalid_bytes_are_a_decode_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0x82, 0xFF, 0xFF]).unwrap();
        assert!(matches!(
            FsAssetLoader.read_text(&path, SHIFT_JIS),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let err = FsAssetLoader
            .read_text(&dir.path().join("nope.txt"), SHIFT_JIS)
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
