//! Timing model: phonetic units → milliseconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PhoneticTranscription;

// ---------------------------------------------------------------------------
// Milliseconds
// ---------------------------------------------------------------------------

/// A non-negative duration in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Milliseconds(pub u64);

impl Milliseconds {
    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl fmt::Display for Milliseconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.as_secs_f64())
    }
}

// ---------------------------------------------------------------------------
// Unit classification
// ---------------------------------------------------------------------------

/// Latin comma and ideographic comma.
const COMMAS: [char; 2] = [',', '\u{3001}'];
/// ASCII space and ideographic space.
const SPACES: [char; 2] = [' ', '\u{3000}'];

/// Unit counts of one transcription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitCounts {
    /// Every phonetic unit (Unicode scalar value), separators included.
    pub total: u64,
    pub commas: u64,
    pub spaces: u64,
}

impl UnitCounts {
    /// Count the units of `transcription`.  Counts characters, never bytes:
    /// a kana is one unit even though UTF-8 encodes it in three bytes.
    pub fn of(transcription: &PhoneticTranscription) -> Self {
        transcription
            .as_str()
            .chars()
            .fold(Self::default(), |mut acc, c| {
                acc.total += 1;
                if COMMAS.contains(&c) {
                    acc.commas += 1;
                } else if SPACES.contains(&c) {
                    acc.spaces += 1;
                }
                acc
            })
    }

    /// Units that are neither commas nor spaces.
    pub fn timed(&self) -> u64 {
        self.total
            .saturating_sub(self.commas)
            .saturating_sub(self.spaces)
    }
}

// ---------------------------------------------------------------------------
// DurationModel
// ---------------------------------------------------------------------------

/// Per-unit timing constants.
///
/// ```text
/// duration = timed_units × per_unit_ms + commas × per_pause_ms + fixed_overhead_ms
/// ```
///
/// Spaces are excluded from the timed units and cost nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationModel {
    /// Cost of one spoken unit.
    pub per_unit_ms: u64,
    /// Cost of one comma pause.
    pub per_pause_ms: u64,
    /// Flat padding added to every estimate.
    pub fixed_overhead_ms: u64,
}

impl Default for DurationModel {
    fn default() -> Self {
        Self {
            per_unit_ms: 115,
            per_pause_ms: 200,
            fixed_overhead_ms: 500,
        }
    }
}

impl DurationModel {
    pub fn duration_of_counts(&self, counts: UnitCounts) -> Milliseconds {
        let units = counts.timed().saturating_mul(self.per_unit_ms);
        let pauses = counts.commas.saturating_mul(self.per_pause_ms);
        Milliseconds(
            units
                .saturating_add(pauses)
                .saturating_add(self.fixed_overhead_ms),
        )
    }

    pub fn duration_of(&self, transcription: &PhoneticTranscription) -> Milliseconds {
        self.duration_of_counts(UnitCounts::of(transcription))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
