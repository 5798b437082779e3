//! Caption ↔ asset matching and insertion planning.

use std::collections::HashSet;
use std::path::PathBuf;

use super::{AssetIndex, AssetPair};
use crate::caption::{strip_newlines, EligibleCaption};
use crate::timeline::{EventId, Position, TimelineError, TimelineReader, TrackId};

// ---------------------------------------------------------------------------
// MatchResult
// ---------------------------------------------------------------------------

/// A caption bound to the recording of its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBinding {
    pub caption: EligibleCaption,
    pub asset: AssetPair,
}

/// Captions that found an asset, in input order.  Each caption appears at
/// most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    bindings: Vec<AssetBinding>,
}

impl MatchResult {
    pub fn bindings(&self) -> &[AssetBinding] {
        &self.bindings
    }

    pub fn get(&self, id: EventId) -> Option<&AssetPair> {
        self.bindings
            .iter()
            .find(|b| b.caption.id() == id)
            .map(|b| &b.asset)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetBinding> {
        self.bindings.iter()
    }
}

impl<'a> IntoIterator for &'a MatchResult {
    type Item = &'a AssetBinding;
    type IntoIter = std::slice::Iter<'a, AssetBinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

// ---------------------------------------------------------------------------
// match_captions
// ---------------------------------------------------------------------------

/// Bind every caption whose body exactly equals an indexed transcript.
///
/// Captions without a match are left out silently; whether an empty result
/// is a problem is the caller's decision.
pub fn match_captions(captions: &[EligibleCaption], index: &AssetIndex) -> MatchResult {
    let mut seen = HashSet::new();
    let bindings = captions
        .iter()
        .filter(|caption| seen.insert(caption.id()))
        .filter_map(|caption| {
            let key = strip_newlines(&caption.text);
            index.get(&key).map(|asset| AssetBinding {
                caption: caption.clone(),
                asset: asset.clone(),
            })
        })
        .collect::<Vec<_>>();

    log::debug!(
        "match: {} of {} captions have a voice asset",
        bindings.len(),
        captions.len()
    );
    MatchResult { bindings }
}

// ---------------------------------------------------------------------------
// plan_insertions
// ---------------------------------------------------------------------------

/// One audio event to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPlanItem {
    /// Caption the audio belongs to.
    pub caption: EventId,
    pub audio_path: PathBuf,
    pub track: TrackId,
    /// Start of the caption event.
    pub position: Position,
}

/// Place each matched asset on `track` at its caption's start position.
///
/// Reads the timeline only; applying the plan is the caller's job.
pub fn plan_insertions(
    matches: &MatchResult,
    track: TrackId,
    timeline: &dyn TimelineReader,
) -> Result<Vec<InsertionPlanItem>, TimelineError> {
    matches
        .iter()
        .map(|binding| {
            Ok(InsertionPlanItem {
                caption: binding.caption.id(),
                audio_path: binding.asset.audio_path.clone(),
                track,
                position: timeline.event_start(binding.caption.id())?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
