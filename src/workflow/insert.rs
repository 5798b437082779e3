//! Insert recorded voice files under their captions.

use std::path::Path;

use super::{Outcome, WorkflowError};
use crate::assets::{
    build_index, match_captions, plan_insertions, AssetDiagnostic, AssetLayout, AssetLoader,
    InsertionPlanItem, MatchResult,
};
use crate::caption::LabelFilter;
use crate::timeline::{Confirm, TimelineReader, TimelineWriter, TrackInfo};

// ---------------------------------------------------------------------------
// Plan / report
// ---------------------------------------------------------------------------

/// Everything needed to insert the matched audio, computed without touching
/// the timeline.
#[derive(Debug, Clone)]
pub struct InsertionPlan {
    pub track: TrackInfo,
    pub matches: MatchResult,
    /// One item per binding in `matches`, same order.
    pub items: Vec<InsertionPlanItem>,
    /// Per-file problems found while indexing the voice directory.
    pub diagnostics: Vec<AssetDiagnostic>,
}

impl InsertionPlan {
    /// Text shown in the confirmation prompt.
    pub fn message(&self) -> String {
        let mut message = format!(
            "Audio track: {}  No. {}\n",
            self.track.name,
            self.track.index + 1
        );
        for binding in &self.matches {
            let file = binding
                .asset
                .audio_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| binding.asset.audio_path.display().to_string());
            message.push_str(&format!(
                "Audio file: {file}  Text: {}\n",
                binding.caption.text
            ));
        }
        message.push_str("Insert these voice files?");
        message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InsertReport {
    pub inserted: usize,
    /// Items whose audio was already on the track at that position.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// VoiceInserter
// ---------------------------------------------------------------------------

pub struct VoiceInserter<'a> {
    labels: &'a LabelFilter,
    layout: &'a AssetLayout,
    loader: &'a dyn AssetLoader,
    voice_track_name: String,
}

impl<'a> VoiceInserter<'a> {
    pub fn new(
        labels: &'a LabelFilter,
        layout: &'a AssetLayout,
        loader: &'a dyn AssetLoader,
        voice_track_name: impl Into<String>,
    ) -> Self {
        Self {
            labels,
            layout,
            loader,
            voice_track_name: voice_track_name.into(),
        }
    }

    /// Pick the destination track: the selected track when it is an audio
    /// track, otherwise the track named after the voice engine.
    pub fn resolve_track(&self, timeline: &dyn TimelineReader) -> Result<TrackInfo, WorkflowError> {
        let selected = timeline.selected_track();
        if let Some(track) = selected.as_ref().filter(|t| t.is_audio()) {
            return Ok(track.clone());
        }

        match timeline.track_named(&self.voice_track_name) {
            Some(track) if track.is_audio() => Ok(track),
            Some(track) => Err(WorkflowError::NotAudioTrack(track.name)),
            None => match selected {
                Some(track) => Err(WorkflowError::NotAudioTrack(track.name)),
                None => Err(WorkflowError::NoTrackSelected(self.voice_track_name.clone())),
            },
        }
    }

    /// Index `voice_dir`, match it against the selected captions and place
    /// each match on the resolved track.  Reads the timeline only.
    ///
    /// Checks run in this order, stopping at the first failure: eligible
    /// captions, destination track, voice directory, audio files present,
    /// at least one match.
    pub fn plan(
        &self,
        timeline: &dyn TimelineReader,
        voice_dir: &Path,
    ) -> Result<InsertionPlan, WorkflowError> {
        let captions = self.labels.eligible(&timeline.selected_captions());
        if captions.is_empty() {
            log::debug!(
                "insert: no selected event starts with {:?}",
                self.labels.prefix()
            );
            return Err(WorkflowError::NoCaptionsSelected);
        }

        let track = self.resolve_track(timeline)?;
        log::debug!("insert: destination {} ({})", track.name, track.id);

        let indexed = build_index(self.loader, voice_dir, self.layout)?;
        if indexed.audio_files_found == 0 {
            return Err(WorkflowError::NoAudioFiles(voice_dir.to_path_buf()));
        }

        let matches = match_captions(&captions, &indexed.index);
        if matches.is_empty() {
            return Err(WorkflowError::NoMatchingAssets(voice_dir.to_path_buf()));
        }

        let items = plan_insertions(&matches, track.id, timeline)?;
        Ok(InsertionPlan {
            track,
            matches,
            items,
            diagnostics: indexed.diagnostics,
        })
    }

    /// Insert the planned audio.  Items already present on the track at the
    /// same position are skipped, so applying a plan twice is harmless.
    pub fn apply<T>(plan: &InsertionPlan, timeline: &mut T) -> Result<InsertReport, WorkflowError>
    where
        T: TimelineReader + TimelineWriter,
    {
        let mut report = InsertReport::default();
        for item in &plan.items {
            if timeline.has_media_at(item.track, item.position, &item.audio_path) {
                log::debug!(
                    "insert: {} already at {}; skipped",
                    item.audio_path.display(),
                    item.position
                );
                report.skipped += 1;
                continue;
            }
            timeline.insert_audio(item.track, item.position, &item.audio_path)?;
            report.inserted += 1;
        }
        log::info!(
            "insert: {} voice files inserted on {} ({} already present)",
            report.inserted,
            plan.track.name,
            report.skipped
        );
        Ok(report)
    }

    /// Plan, confirm, apply.
    pub fn run<T>(
        &self,
        timeline: &mut T,
        voice_dir: &Path,
        confirm: &dyn Confirm,
    ) -> Result<Outcome<InsertReport>, WorkflowError>
    where
        T: TimelineReader + TimelineWriter,
    {
        let plan = self.plan(&*timeline, voice_dir)?;
        if !confirm.confirm(&plan.message())? {
            log::info!("insert: declined by user");
            return Ok(Outcome::Declined);
        }
        Self::apply(&plan, timeline).map(Outcome::Applied)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
