//! Caption events and the text helpers shared by estimation and matching.
//!
//! A [`Caption`] is a snapshot of one timeline text event: an opaque
//! [`EventId`] handle plus the raw take name as the host editor shows it.
//! Raw names carry a fixed label prefix; [`LabelFilter`] decides which events
//! are captions at all and strips the prefix before any text is compared or
//! transliterated.

pub mod label;
pub mod normalize;

pub use label::LabelFilter;
pub use normalize::{normalize_transcript, strip_newlines};

use crate::timeline::EventId;

// ---------------------------------------------------------------------------
// Caption
// ---------------------------------------------------------------------------

/// One caption event, read from the timeline.
///
/// The core never mutates a `Caption`; resizing or inserting audio goes
/// through the timeline writer after confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Handle of the underlying timeline event.
    pub id: EventId,
    /// Take name exactly as read from the timeline, label included.
    pub raw_text: String,
}

impl Caption {
    pub fn new(id: EventId, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            raw_text: raw_text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// EligibleCaption
// ---------------------------------------------------------------------------

/// A caption that carried the label prefix, paired with its stripped body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleCaption {
    pub caption: Caption,
    /// Caption body with the label removed.  This is the text that gets
    /// transliterated and compared against voice transcripts.
    pub text: String,
}

impl EligibleCaption {
    pub fn id(&self) -> EventId {
        self.caption.id
    }
}
