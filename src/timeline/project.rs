//! JSON project file timeline.
//!
//! A project file lists tracks, each with its events:
//!
//! ```json
//! {
//!   "tracks": [
//!     {
//!       "name": "Titles",
//!       "media_type": "video",
//!       "events": [
//!         { "name": "Sony タイトルおよびテキスト こんにちは", "start_ms": 0,
//!           "length_ms": 3000, "selected": true }
//!       ]
//!     },
//!     { "name": "Voiceroid2", "media_type": "audio", "selected": true }
//!   ]
//! }
//! ```
//!
//! Event ids are assigned in file order when the project is opened and stay
//! stable for the lifetime of the [`ProjectTimeline`]; inserted audio events
//! get fresh ids at the end.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    EventId, MediaType, Position, TimelineError, TimelineReader, TimelineWriter, TrackId,
    TrackInfo,
};
use crate::caption::Caption;
use crate::duration::Milliseconds;

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

/// Root of a project file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub tracks: Vec<TrackEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEntry {
    pub name: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub events: Vec<EventEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    /// Active take name.  Caption events carry the label prefix here.
    pub name: String,
    pub start_ms: u64,
    /// `None` for media whose length the editor determines on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_ms: Option<u64>,
    #[serde(default)]
    pub selected: bool,
    /// Media file backing the event, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// ProjectTimeline
// ---------------------------------------------------------------------------

/// [`TimelineReader`] + [`TimelineWriter`] over a [`Project`].
#[derive(Debug, Clone)]
pub struct ProjectTimeline {
    project: Project,
    path: Option<PathBuf>,
    /// `EventId(n)` → `(track index, event index)`.
    events: Vec<(usize, usize)>,
}

impl ProjectTimeline {
    /// Wrap an in-memory project with no backing file.
    pub fn new(project: Project) -> Self {
        let events = project
            .tracks
            .iter()
            .enumerate()
            .flat_map(|(t, track)| (0..track.events.len()).map(move |e| (t, e)))
            .collect();
        Self {
            project,
            path: None,
            events,
        }
    }

    /// Read a project file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TimelineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let project: Project = serde_json::from_str(&content)?;
        log::debug!(
            "project: opened {} ({} tracks)",
            path.display(),
            project.tracks.len()
        );
        let mut timeline = Self::new(project);
        timeline.path = Some(path.to_path_buf());
        Ok(timeline)
    }

    /// Write the project back to the file it was opened from.  A timeline
    /// built with [`ProjectTimeline::new`] has nowhere to save and is left
    /// untouched.
    pub fn save(&self) -> Result<(), TimelineError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&self.project)?;
        std::fs::write(path, content)?;
        log::info!("project: saved {}", path.display());
        Ok(())
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory containing the project file.
    pub fn project_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }

    fn locate(&self, id: EventId) -> Result<(usize, usize), TimelineError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|n| self.events.get(n).copied())
            .ok_or(TimelineError::UnknownEvent(id))
    }

    fn event(&self, id: EventId) -> Result<&EventEntry, TimelineError> {
        let (t, e) = self.locate(id)?;
        Ok(&self.project.tracks[t].events[e])
    }

    fn track_info(&self, index: usize) -> Option<TrackInfo> {
        self.project.tracks.get(index).map(|track| TrackInfo {
            id: TrackId(index),
            name: track.name.clone(),
            index,
            media_type: track.media_type,
        })
    }
}

impl TimelineReader for ProjectTimeline {
    fn selected_captions(&self) -> Vec<Caption> {
        self.events
            .iter()
            .enumerate()
            .filter_map(|(n, &(t, e))| {
                let event = &self.project.tracks[t].events[e];
                event
                    .selected
                    .then(|| Caption::new(EventId(n as u64), event.name.clone()))
            })
            .collect()
    }

    fn event_start(&self, id: EventId) -> Result<Position, TimelineError> {
        self.event(id).map(|e| Position(e.start_ms))
    }

    fn track(&self, id: TrackId) -> Result<TrackInfo, TimelineError> {
        self.track_info(id.0).ok_or(TimelineError::UnknownTrack(id))
    }

    fn selected_track(&self) -> Option<TrackInfo> {
        let index = self.project.tracks.iter().position(|t| t.selected)?;
        self.track_info(index)
    }

    fn track_named(&self, name: &str) -> Option<TrackInfo> {
        let index = self.project.tracks.iter().position(|t| t.name == name)?;
        self.track_info(index)
    }

    fn has_media_at(&self, track: TrackId, position: Position, audio: &Path) -> bool {
        self.project.tracks.get(track.0).is_some_and(|t| {
            t.events
                .iter()
                .any(|e| e.start_ms == position.0 && e.media.as_deref() == Some(audio))
        })
    }
}

impl TimelineWriter for ProjectTimeline {
    fn set_event_length(
        &mut self,
        id: EventId,
        length: Milliseconds,
    ) -> Result<(), TimelineError> {
        let (t, e) = self.locate(id)?;
        self.project.tracks[t].events[e].length_ms = Some(length.as_millis());
        Ok(())
    }

    fn insert_audio(
        &mut self,
        track: TrackId,
        position: Position,
        audio: &Path,
    ) -> Result<(), TimelineError> {
        let entry = self
            .project
            .tracks
            .get_mut(track.0)
            .ok_or(TimelineError::UnknownTrack(track))?;
        if entry.media_type != MediaType::Audio {
            return Err(TimelineError::NotAudioTrack(entry.name.clone()));
        }

        let name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| audio.display().to_string());

        entry.events.push(EventEntry {
            name,
            start_ms: position.0,
            length_ms: None,
            selected: false,
            media: Some(audio.to_path_buf()),
        });
        self.events.push((track.0, entry.events.len() - 1));
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

    fn event(name: &str, start_ms: u64, selected: bool) -> EventEntry {
        EventEntry {
            name: name.into(),
            start_ms,
            length_ms: Some(1000),
            selected,
            media: None,
        }
    }

    fn sample() -> ProjectTimeline {
        ProjectTimeline::new(Project {
            tracks: vec![
                TrackEntry {
                    name: "Titles".into(),
                    media_type: MediaType::Video,
                    selected: false,
                    events: vec![event("a", 0, true), event("b", 2000, false)],
                },
                TrackEntry {
                    name: "Voice".into(),
                    media_type: MediaType::Audio,
                    selected: true,
                    events: vec![event("c", 5000, true)],
                },
            ],
        })
    }

    #[test]
    fn selected_captions_span_all_tracks() {
        let tl = sample();
        let captions = tl.selected_captions();
        assert_eq!(captions.len(), 2);
        assert_eq!(captions[0].raw_text, "a");
        assert_eq!(captions[1].raw_text, "c");
        assert_eq!(tl.event_start(captions[1].id).unwrap(), Position(5000));
    }

    #[test]
    fn unknown_event_is_an_error() {
        let tl = sample();
        assert!(matches!(
            tl.event_start(EventId(99)),
            Err(TimelineError::UnknownEvent(EventId(99)))
        ));
    }

    #[test]
    fn track_lookup() {
        let tl = sample();
        let selected = tl.selected_track().unwrap();
        assert_eq!(selected.name, "Voice");
        assert!(selected.is_audio());
        assert_eq!(tl.track_named("Titles").unwrap().id, TrackId(0));
        assert!(tl.track_named("Missing").is_none());
        assert_eq!(tl.track_media_type(TrackId(0)).unwrap(), MediaType::Video);
        assert!(tl.track(TrackId(7)).is_err());
    }

    #[test]
    fn set_event_length_updates_entry() {
        let mut tl = sample();
        let id = tl.selected_captions()[0].id;
        tl.set_event_length(id, Milliseconds(1275)).unwrap();
        assert_eq!(tl.project().tracks[0].events[0].length_ms, Some(1275));
    }

    #[test]
    fn insert_audio_appends_event_and_is_visible() {
        let mut tl = sample();
        let audio = Path::new("/voice/001.wav");
        assert!(!tl.has_media_at(TrackId(1), Position(2000), audio));

        tl.insert_audio(TrackId(1), Position(2000), audio).unwrap();

        assert!(tl.has_media_at(TrackId(1), Position(2000), audio));
        let inserted = tl.project().tracks[1].events.last().unwrap();
        assert_eq!(inserted.name, "001.wav");
        assert_eq!(inserted.length_ms, None);
        // Inserted events get their own id.
        assert_eq!(tl.event_start(EventId(3)).unwrap(), Position(2000));
    }

    #[test]
    fn insert_audio_into_video_track_fails() {
        let mut tl = sample();
        let err = tl
            .insert_audio(TrackId(0), Position(0), Path::new("x.wav"))
            .unwrap_err();
        assert!(matches!(err, TimelineError::NotAudioTrack(name) if name == "Titles"));
    }

    #[test]
    fn open_and_save_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("project.json");
        std::fs::write(
            &path,
            r#"{"tracks":[{"name":"Titles","media_type":"video",
                "events":[{"name":"x","start_ms":10,"selected":true}]}]}"#,
        )
        .unwrap();

        let mut tl = ProjectTimeline::open(&path).unwrap();
        assert_eq!(tl.project_dir(), Some(dir.path()));
        let id = tl.selected_captions()[0].id;
        tl.set_event_length(id, Milliseconds(700)).unwrap();
        tl.save().unwrap();

        let reopened = ProjectTimeline::open(&path).unwrap();
        assert_eq!(reopened.project().tracks[0].events[0].length_ms, Some(700));
    }

    #[test]
    fn open_invalid_json_is_parse_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ProjectTimeline::open(&path),
            Err(TimelineError::Parse(_))
        ));
    }
}
