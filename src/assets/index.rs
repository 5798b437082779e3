//! Transcript → audio index over a voice directory.
//!
//! # Duplicate transcripts
//!
//! Two recordings with identical transcript text cannot both be keys.  Audio
//! files are registered in file-name order and the **first** one wins; each
//! later duplicate is skipped and reported as
//! [`AssetDiagnostic::DuplicateTranscript`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

use super::{AssetError, AssetLoader};
use crate::caption::normalize_transcript;
use crate::config::AssetConfig;

// ---------------------------------------------------------------------------
// AssetLayout
// ---------------------------------------------------------------------------

/// How audio files and transcript sidecars are named and encoded.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    /// Audio extension without the dot (e.g. `"wav"`).
    pub audio_extension: String,
    /// Transcript extension without the dot (e.g. `"txt"`).
    pub transcript_extension: String,
    pub encoding: &'static Encoding,
}

impl AssetLayout {
    /// Resolve the encoding label from config.
    ///
    /// # Errors
    ///
    /// [`AssetError::UnknownEncoding`] when the label is not a WHATWG
    /// encoding label.
    pub fn from_config(config: &AssetConfig) -> Result<Self, AssetError> {
        let encoding = Encoding::for_label(config.encoding.as_bytes())
            .ok_or_else(|| AssetError::UnknownEncoding(config.encoding.clone()))?;
        Ok(Self {
            audio_extension: config.audio_extension.trim_start_matches('.').to_string(),
            transcript_extension: config
                .transcript_extension
                .trim_start_matches('.')
                .to_string(),
            encoding,
        })
    }

    /// Sidecar transcript path for `audio`: same directory and stem.
    pub fn transcript_path(&self, audio: &Path) -> PathBuf {
        audio.with_extension(&self.transcript_extension)
    }
}

// ---------------------------------------------------------------------------
// AssetPair / AssetIndex
// ---------------------------------------------------------------------------

/// One voice recording and its normalised transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPair {
    pub transcript_text: String,
    pub audio_path: PathBuf,
}

/// Key-unique mapping from transcript text to asset.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    entries: HashMap<String, AssetPair>,
}

impl AssetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pair` unless its transcript is already taken.  Returns the
    /// already-registered pair on conflict.
    pub fn insert(&mut self, pair: AssetPair) -> Result<(), &AssetPair> {
        use std::collections::hash_map::Entry;
        match self.entries.entry(pair.transcript_text.clone()) {
            Entry::Occupied(existing) => Err(&*existing.into_mut()),
            Entry::Vacant(slot) => {
                slot.insert(pair);
                Ok(())
            }
        }
    }

    /// Exact, whole-string lookup.
    pub fn get(&self, transcript: &str) -> Option<&AssetPair> {
        self.entries.get(transcript)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Per-item problems found while indexing.  None of them abort the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetDiagnostic {
    /// An audio file has no transcript sidecar.
    MissingTranscript {
        audio_path: PathBuf,
        transcript_path: PathBuf,
    },
    /// The sidecar exists but could not be read or decoded.
    UnreadableTranscript { audio_path: PathBuf, reason: String },
    /// The transcript text is already registered by an earlier file.
    DuplicateTranscript {
        transcript_text: String,
        kept: PathBuf,
        ignored: PathBuf,
    },
}

impl std::fmt::Display for AssetDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetDiagnostic::MissingTranscript {
                audio_path,
                transcript_path,
            } => write!(
                f,
                "{}: transcript {} is missing",
                audio_path.display(),
                transcript_path.display()
            ),
            AssetDiagnostic::UnreadableTranscript { audio_path, reason } => {
                write!(f, "{}: {reason}", audio_path.display())
            }
            AssetDiagnostic::DuplicateTranscript {
                transcript_text,
                kept,
                ignored,
            } => write!(
                f,
                "{}: transcript {transcript_text:?} already used by {}; ignored",
                ignored.display(),
                kept.display()
            ),
        }
    }
}

/// Output of [`build_index`].
#[derive(Debug, Clone, Default)]
pub struct IndexResult {
    pub index: AssetIndex,
    /// Audio files discovered, whether or not they made it into the index.
    pub audio_files_found: usize,
    pub diagnostics: Vec<AssetDiagnostic>,
}

// ---------------------------------------------------------------------------
// build_index
// ---------------------------------------------------------------------------

/// Scan `dir` and index every audio file by its transcript.
///
/// # Errors
///
/// Only directory-level failures are returned (e.g.
/// [`AssetError::DirectoryNotFound`]).  Per-file problems end up in
/// [`IndexResult::diagnostics`].
pub fn build_index(
    loader: &dyn AssetLoader,
    dir: &Path,
    layout: &AssetLayout,
) -> Result<IndexResult, AssetError> {
    let audio_files = loader.list_files(dir, &layout.audio_extension)?;
    let mut result = IndexResult {
        audio_files_found: audio_files.len(),
        ..IndexResult::default()
    };

    for audio_path in audio_files {
        let transcript_path = layout.transcript_path(&audio_path);
        let raw = match loader.read_text(&transcript_path, layout.encoding) {
            Ok(raw) => raw,
            Err(e) => {
                let diagnostic = if e.is_not_found() {
                    AssetDiagnostic::MissingTranscript {
                        audio_path,
                        transcript_path,
                    }
                } else {
                    AssetDiagnostic::UnreadableTranscript {
                        audio_path,
                        reason: e.to_string(),
                    }
                };
                log::warn!("assets: skipping {diagnostic}");
                result.diagnostics.push(diagnostic);
                continue;
            }
        };

        let pair = AssetPair {
            transcript_text: normalize_transcript(&raw),
            audio_path,
        };
        let ignored = pair.audio_path.clone();
        if let Err(existing) = result.index.insert(pair) {
            let diagnostic = AssetDiagnostic::DuplicateTranscript {
                transcript_text: existing.transcript_text.clone(),
                kept: existing.audio_path.clone(),
                ignored,
            };
            log::warn!("assets: {diagnostic}");
            result.diagnostics.push(diagnostic);
        }
    }

    log::info!(
        "assets: indexed {} of {} audio files in {}",
        result.index.len(),
        result.audio_files_found,
        dir.display()
    );
    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
