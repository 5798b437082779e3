//! Caption label convention.
//!
//! The host editor names every text event `"<label><body>"`.  Events without
//! the label are not captions (video clips, audio, other generated media)
//! and must be filtered out before estimation or matching.

use super::{Caption, EligibleCaption};

/// Filters caption events by label prefix and strips the prefix.
///
/// # Examples
///
/// ```
/// use caption_voice::caption::{Caption, LabelFilter};
/// use caption_voice::timeline::EventId;
///
/// let filter = LabelFilter::new("TEXT: ");
/// assert_eq!(filter.strip("TEXT: hello"), Some("hello"));
/// assert_eq!(filter.strip("clip.mp4"), None);
///
/// let captions = vec![
///     Caption::new(EventId(1), "TEXT: hello"),
///     Caption::new(EventId(2), "clip.mp4"),
/// ];
/// let eligible = filter.eligible(&captions);
/// assert_eq!(eligible.len(), 1);
/// assert_eq!(eligible[0].text, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFilter {
    prefix: String,
}

impl LabelFilter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the caption body when `raw` starts with the label, `None`
    /// otherwise.
    pub fn strip<'a>(&self, raw: &'a str) -> Option<&'a str> {
        raw.strip_prefix(self.prefix.as_str())
    }

    pub fn is_eligible(&self, raw: &str) -> bool {
        self.strip(raw).is_some()
    }

    /// Keep only labelled captions, in input order, with their bodies
    /// stripped.
    pub fn eligible(&self, captions: &[Caption]) -> Vec<EligibleCaption> {
        captions
            .iter()
            .filter_map(|caption| {
                self.strip(&caption.raw_text).map(|body| EligibleCaption {
                    caption: caption.clone(),
                    text: body.to_string(),
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
