//! Spoken-duration estimation for caption text.
//!
//! # Architecture
//!
//! ```text
//! caption body ──▶ Transliterator (trait) ──▶ PhoneticTranscription
//!                        │ Err                        │
//!                        ▼                            ▼
//!                  warn + empty ──────────▶ DurationModel::duration_of
//!                                                     │
//!                                                     ▼
//!                                               Milliseconds
//! ```
//!
//! * [`Transliterator`]: capability that turns text into phonetic units.
//!   [`KanaTransliterator`] works offline; [`FuriganaTransliterator`] calls a
//!   remote reading service.
//! * [`DurationModel`]: immutable per-unit timing constants.
//! * [`DurationEstimator`]: combines both and never fails; a transliteration
//!   error degrades the estimate to the fixed overhead.
//!
//! # Quick start
//!
//! ```rust
//! use caption_voice::duration::{DurationEstimator, DurationModel, KanaTransliterator};
//!
//! let estimator = DurationEstimator::new(Box::new(KanaTransliterator), DurationModel::default());
//! // 5 kana × 115 ms + 1 comma × 200 ms + 500 ms overhead
//! assert_eq!(estimator.estimate("あいう、えお").as_millis(), 1275);
//! ```

pub mod estimator;
pub mod furigana;
pub mod kana;
pub mod model;
pub mod transliterate;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use estimator::{CancelFlag, DurationEstimate, DurationEstimator};
pub use furigana::FuriganaTransliterator;
pub use kana::KanaTransliterator;
pub use model::{DurationModel, Milliseconds, UnitCounts};
pub use transliterate::{PhoneticTranscription, TransliterationError, Transliterator};

#[cfg(test)]
pub use transliterate::MockTransliterator;
