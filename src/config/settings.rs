//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::duration::DurationModel;

// ---------------------------------------------------------------------------
// CaptionConfig
// ---------------------------------------------------------------------------

/// Label convention used by the host editor for caption events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Literal prefix carried by every caption event's take name.  Only
    /// events whose name starts with it take part in estimation or matching.
    pub label_prefix: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            label_prefix: "Sony タイトルおよびテキスト ".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// TransliterationProvider
// ---------------------------------------------------------------------------

/// Selects which back end turns caption text into a phonetic transcription.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransliterationProvider {
    /// Offline kana pass-through.  Fails on kanji, which degrades the
    /// estimate to overhead-only for that caption.
    Kana,
    /// Remote furigana service (JSON-RPC over HTTPS).
    Furigana,
}

impl Default for TransliterationProvider {
    fn default() -> Self {
        Self::Kana
    }
}

// ---------------------------------------------------------------------------
// TransliterationConfig
// ---------------------------------------------------------------------------

/// Settings for the transliteration service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransliterationConfig {
    /// Which back end to use.
    pub provider: TransliterationProvider,
    /// Endpoint of the furigana service.
    pub base_url: String,
    /// Application id sent with every furigana request.  `None` leaves the
    /// header out, which the public service rejects.
    pub app_id: Option<String>,
    /// Maximum seconds to wait for a single response.
    pub timeout_secs: u64,
}

impl Default for TransliterationConfig {
    fn default() -> Self {
        Self {
            provider: TransliterationProvider::default(),
            base_url: "https://jlp.yahooapis.jp/FuriganaService/V2/furigana".into(),
            app_id: None,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// AssetConfig
// ---------------------------------------------------------------------------

/// Voice asset directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory name, relative to the project file, holding the voice
    /// recordings.
    pub voice_dir_name: String,
    /// Extension of the audio files (without the dot).
    pub audio_extension: String,
    /// Extension of the transcript sidecars (without the dot).
    pub transcript_extension: String,
    /// WHATWG label of the transcript encoding.
    pub encoding: String,
    /// Track that receives voice audio when the selected track is not an
    /// audio track.
    pub voice_track_name: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            voice_dir_name: "Voice".into(),
            audio_extension: "wav".into(),
            transcript_extension: "txt".into(),
            encoding: "Shift_JIS".into(),
            voice_track_name: "Voiceroid2".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use caption_voice::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Caption label convention.
    pub caption: CaptionConfig,
    /// Timing model used by the duration estimator.
    pub duration: DurationModel,
    /// Transliteration back end settings.
    pub transliteration: TransliterationConfig,
    /// Voice asset layout.
    pub assets: AssetConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// so callers never need to special-case a missing file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// A default `AppConfig` survives a TOML round trip.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.caption.label_prefix, loaded.caption.label_prefix);
        assert_eq!(original.duration, loaded.duration);
        assert_eq!(
            original.transliteration.provider,
            loaded.transliteration.provider
        );
        assert_eq!(
            original.transliteration.base_url,
            loaded.transliteration.base_url
        );
        assert_eq!(original.transliteration.app_id, loaded.transliteration.app_id);
        assert_eq!(original.assets.encoding, loaded.assets.encoding);
        assert_eq!(
            original.assets.voice_track_name,
            loaded.assets.voice_track_name
        );
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.duration, DurationModel::default());
        assert_eq!(config.assets.audio_extension, "wav");
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.caption.label_prefix, "Sony タイトルおよびテキスト ");
        assert_eq!(cfg.duration.per_unit_ms, 115);
        assert_eq!(cfg.duration.per_pause_ms, 200);
        assert_eq!(cfg.duration.fixed_overhead_ms, 500);
        assert_eq!(cfg.transliteration.provider, TransliterationProvider::Kana);
        assert_eq!(cfg.transliteration.timeout_secs, 10);
        assert!(cfg.transliteration.app_id.is_none());
        assert_eq!(cfg.assets.voice_dir_name, "Voice");
        assert_eq!(cfg.assets.transcript_extension, "txt");
        assert_eq!(cfg.assets.encoding, "Shift_JIS");
        assert_eq!(cfg.assets.voice_track_name, "Voiceroid2");
    }

    /// A partial file only overrides the tables it names.
    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[duration]\nper_unit_ms = 100\nper_pause_ms = 250\nfixed_overhead_ms = 0\n",
        )
        .expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.duration.per_unit_ms, 100);
        assert_eq!(cfg.duration.per_pause_ms, 250);
        assert_eq!(cfg.duration.fixed_overhead_ms, 0);
        assert_eq!(cfg.assets.voice_track_name, "Voiceroid2");
    }

    #[test]
    fn single_key_tables_keep_sibling_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("sparse.toml");
        std::fs::write(
            &path,
            "[assets]\nvoice_track_name = \"Narration\"\n\n\
             [transliteration]\nprovider = \"Furigana\"\n\n\
             [caption]\nlabel_prefix = \"TEXT: \"\n",
        )
        .expect("write");

        let cfg = AppConfig::load_from(&path).expect("load");
        assert_eq!(cfg.assets.voice_track_name, "Narration");
        assert_eq!(cfg.assets.voice_dir_name, "Voice");
        assert_eq!(cfg.assets.encoding, "Shift_JIS");
        assert_eq!(cfg.transliteration.provider, TransliterationProvider::Furigana);
        assert_eq!(cfg.transliteration.timeout_secs, 10);
        assert!(cfg.transliteration.app_id.is_none());
        assert_eq!(cfg.caption.label_prefix, "TEXT: ");
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.caption.label_prefix = "TEXT: ".into();
        cfg.transliteration.provider = TransliterationProvider::Furigana;
        cfg.transliteration.app_id = Some("app-123".into());
        cfg.assets.encoding = "UTF-8".into();

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.caption.label_prefix, "TEXT: ");
        assert_eq!(
            loaded.transliteration.provider,
            TransliterationProvider::Furigana
        );
        assert_eq!(loaded.transliteration.app_id, Some("app-123".into()));
        assert_eq!(loaded.assets.encoding, "UTF-8");
    }
}
