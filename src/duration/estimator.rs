//! Duration estimator: caption body → transcription → milliseconds.
//!
//! The transliteration call is the only fallible step, and its failure is
//! handled here: the estimator logs a warning and times an empty
//! transcription instead, so a missing reading service never blocks a batch.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::{
    DurationModel, FuriganaTransliterator, KanaTransliterator, Milliseconds,
    PhoneticTranscription, Transliterator, UnitCounts,
};
use crate::caption::EligibleCaption;
use crate::config::{AppConfig, TransliterationProvider};

// ---------------------------------------------------------------------------
// CancelFlag
// ---------------------------------------------------------------------------

/// Shared cancellation flag, checked between captions.
///
/// Cheap to clone; every clone observes the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// DurationEstimate
// ---------------------------------------------------------------------------

/// Full breakdown of one estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationEstimate {
    pub transcription: PhoneticTranscription,
    pub counts: UnitCounts,
    pub duration: Milliseconds,
    /// `true` when transliteration failed and the duration was computed from
    /// an empty transcription.
    pub degraded: bool,
}

// ---------------------------------------------------------------------------
// DurationEstimator
// ---------------------------------------------------------------------------

pub struct DurationEstimator {
    transliterator: Box<dyn Transliterator>,
    model: DurationModel,
}

impl std::fmt::Debug for DurationEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurationEstimator")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl DurationEstimator {
    pub fn new(transliterator: Box<dyn Transliterator>, model: DurationModel) -> Self {
        Self {
            transliterator,
            model,
        }
    }

    /// Build the estimator selected by `config.transliteration.provider`.
    pub fn from_config(config: &AppConfig) -> Self {
        let transliterator: Box<dyn Transliterator> = match config.transliteration.provider {
            TransliterationProvider::Kana => Box::new(KanaTransliterator),
            TransliterationProvider::Furigana => {
                Box::new(FuriganaTransliterator::from_config(&config.transliteration))
            }
        };
        Self::new(transliterator, config.duration)
    }

    pub fn model(&self) -> &DurationModel {
        &self.model
    }

    /// Estimated spoken duration of `text` (label already stripped).
    /// Never fails.
    pub fn estimate(&self, text: &str) -> Milliseconds {
        self.breakdown(text).duration
    }

    /// Like [`estimate`](Self::estimate), keeping the intermediate values.
    pub fn breakdown(&self, text: &str) -> DurationEstimate {
        let (transcription, degraded) = match self.transliterator.transliterate(text) {
            Ok(transcription) => (transcription, false),
            Err(e) => {
                log::warn!(
                    "transliteration failed for {text:?} ({e}); estimating overhead only"
                );
                (PhoneticTranscription::empty(), true)
            }
        };

        let counts = UnitCounts::of(&transcription);
        let duration = self.model.duration_of_counts(counts);
        log::debug!(
            "estimate: {text:?} → {transcription:?} ({} units, {} commas, {} spaces) = {} ms",
            counts.total,
            counts.commas,
            counts.spaces,
            duration.as_millis()
        );

        DurationEstimate {
            transcription,
            counts,
            duration,
            degraded,
        }
    }

    /// Estimate every caption in input order.
    ///
    /// Stops early, returning the estimates made so far, once `cancel` is
    /// set.  The flag is checked before each caption.
    pub fn estimate_all(
        &self,
        captions: &[EligibleCaption],
        cancel: Option<&CancelFlag>,
    ) -> Vec<(EligibleCaption, DurationEstimate)> {
        let mut out = Vec::with_capacity(captions.len());
        for caption in captions {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                log::info!(
                    "estimate: cancelled after {} of {} captions",
                    out.len(),
                    captions.len()
                );
                break;
            }
            out.push((caption.clone(), self.breakdown(&caption.text)));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
