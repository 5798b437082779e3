//! Timeline collaborator interface.
//!
//! The host editor owns the project/track/event model.  The core only needs
//! a narrow view of it:
//!
//! * [`TimelineReader`]: selected captions, event start positions and track
//!   metadata.
//! * [`TimelineWriter`]: the two mutations the workflows perform (resize a
//!   caption, insert an audio event).  Writers are only called after the
//!   user confirmed the change.
//! * [`Confirm`]: the yes/no prompt shown before any mutation.
//!
//! [`ProjectTimeline`] implements both traits over a JSON project file so
//! the workflows can run from the command line.

pub mod confirm;
pub mod project;

pub use confirm::{AutoConfirm, Confirm, ConfirmError, PromptConfirm};
pub use project::{EventEntry, Project, ProjectTimeline, TrackEntry};

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::caption::Caption;
use crate::duration::Milliseconds;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Opaque handle to a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event #{}", self.0)
    }
}

/// Opaque handle to a timeline track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub usize);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track #{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Position on the timeline, in milliseconds from the project start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position(pub u64);

impl Position {
    pub fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} s", self.0 as f64 / 1000.0)
    }
}

// ---------------------------------------------------------------------------
// Tracks
// ---------------------------------------------------------------------------

/// Media type of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Audio,
    Video,
    Other,
}

/// Read-only description of a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub id: TrackId,
    pub name: String,
    /// Zero-based index in the project's track list.
    pub index: usize,
    pub media_type: MediaType,
}

impl TrackInfo {
    pub fn is_audio(&self) -> bool {
        self.media_type == MediaType::Audio
    }
}

// ---------------------------------------------------------------------------
// TimelineError
// ---------------------------------------------------------------------------

/// Errors raised by a timeline implementation.
#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("unknown {0}")]
    UnknownEvent(EventId),

    #[error("unknown {0}")]
    UnknownTrack(TrackId),

    /// Audio can only be inserted into audio tracks.
    #[error("track '{0}' is not an audio track")]
    NotAudioTrack(String),

    #[error("project file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid project file: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Read side of the host timeline.
pub trait TimelineReader {
    /// Every selected event, across all tracks, in track order.  Label
    /// filtering is the caller's job.
    fn selected_captions(&self) -> Vec<Caption>;

    fn event_start(&self, id: EventId) -> Result<Position, TimelineError>;

    fn track(&self, id: TrackId) -> Result<TrackInfo, TimelineError>;

    /// The first selected track, if any.
    fn selected_track(&self) -> Option<TrackInfo>;

    /// The first track whose name equals `name`.
    fn track_named(&self, name: &str) -> Option<TrackInfo>;

    /// Whether `track` already holds an event for `audio` starting at
    /// `position`.  Used to keep audio insertion idempotent.
    fn has_media_at(&self, track: TrackId, position: Position, audio: &Path) -> bool;

    fn track_media_type(&self, id: TrackId) -> Result<MediaType, TimelineError> {
        self.track(id).map(|t| t.media_type)
    }
}

/// Write side of the host timeline.
pub trait TimelineWriter {
    fn set_event_length(&mut self, id: EventId, length: Milliseconds)
        -> Result<(), TimelineError>;

    fn insert_audio(
        &mut self,
        track: TrackId,
        position: Position,
        audio: &Path,
    ) -> Result<(), TimelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_displays_seconds() {
        assert_eq!(Position(1275).to_string(), "1.275 s");
        assert_eq!(Position(0).to_string(), "0.000 s");
    }

    #[test]
    fn media_type_serialises_lowercase() {
        let json = serde_json::to_string(&MediaType::Audio).unwrap();
        assert_eq!(json, "\"audio\"");
        let back: MediaType = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(back, MediaType::Video);
    }

    #[test]
    fn timeline_error_display_names_the_track() {
        let e = TimelineError::NotAudioTrack("Titles".into());
        assert!(e.to_string().contains("Titles"));
    }
}
