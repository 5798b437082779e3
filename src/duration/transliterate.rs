//! Transliteration capability: display text → phonetic transcription.
//!
//! [`Transliterator`] is object-safe and `Send + Sync` so the estimator can
//! hold any implementation behind a `Box<dyn Transliterator>` and tests can
//! substitute [`MockTransliterator`].

use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// PhoneticTranscription
// ---------------------------------------------------------------------------

/// Phonetic units (kana plus literal comma/space separators) derived from a
/// caption's text.  Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhoneticTranscription(String);

impl PhoneticTranscription {
    pub fn new(units: impl Into<String>) -> Self {
        Self(units.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneticTranscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// TransliterationError
// ---------------------------------------------------------------------------

/// Failures of a transliteration back end.
#[derive(Debug, Clone, Error)]
pub enum TransliterationError {
    /// The back end could not be reached or refused the request.
    #[error("transliteration service unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete within the configured timeout.
    #[error("transliteration request timed out")]
    Timeout,

    /// The back end has no reading for a character of the input.
    #[error("no reading for {ch:?}")]
    Unsupported { ch: char },

    /// The back end answered with something that is not a reading.
    #[error("malformed transliteration response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TransliterationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransliterationError::Timeout
        } else {
            TransliterationError::Unavailable(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Transliterator trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for transliteration back ends.
///
/// Implementations have no side effects beyond the call itself; the same
/// input may be transliterated any number of times.
pub trait Transliterator: Send + Sync {
    fn transliterate(&self, text: &str) -> Result<PhoneticTranscription, TransliterationError>;
}

// Compile-time assertion: Box<dyn Transliterator> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn Transliterator>) {}
};

// ---------------------------------------------------------------------------
// MockTransliterator  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a pre-configured response and counts calls.
#[cfg(test)]
pub struct MockTransliterator {
    response: Result<PhoneticTranscription, TransliterationError>,
    calls: std::sync::atomic::AtomicUsize,
    cancel_on_call: Option<super::CancelFlag>,
}

#[cfg(test)]
impl MockTransliterator {
    /// Create a mock that always returns `Ok(units)`.
    pub fn ok(units: impl Into<String>) -> Self {
        Self {
            response: Ok(PhoneticTranscription::new(units)),
            calls: Default::default(),
            cancel_on_call: None,
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: TransliterationError) -> Self {
        Self {
            response: Err(error),
            calls: Default::default(),
            cancel_on_call: None,
        }
    }

    /// Set `flag` from inside every call, as a user pressing cancel
    /// mid-batch would.
    pub fn cancelling(mut self, flag: super::CancelFlag) -> Self {
        self.cancel_on_call = Some(flag);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl Transliterator for MockTransliterator {
    fn transliterate(&self, _text: &str) -> Result<PhoneticTranscription, TransliterationError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if let Some(flag) = &self.cancel_on_call {
            flag.cancel();
        }
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ok_returns_configured_units() {
        let t = MockTransliterator::ok("こんにちは");
        assert_eq!(t.transliterate("今日は").unwrap().as_str(), "こんにちは");
        assert_eq!(t.calls(), 1);
    }

    #[test]
    fn mock_err_returns_configured_error() {
        let t = MockTransliterator::err(TransliterationError::Timeout);
        assert!(matches!(
            t.transliterate("x").unwrap_err(),
            TransliterationError::Timeout
        ));
    }

    #[test]
    fn box_dyn_transliterator_compiles() {
        let t: Box<dyn Transliterator> = Box::new(MockTransliterator::ok("a"));
        let _ = t.transliterate("a");
    }

    #[test]
    fn unsupported_display_names_the_character() {
        let e = TransliterationError::Unsupported { ch: '漢' };
        let msg = e.to_string();
        assert!(msg.contains('漢'), "unexpected message: {msg}");
    }

    #[test]
    fn empty_transcription() {
        assert!(PhoneticTranscription::empty().is_empty());
        assert_eq!(PhoneticTranscription::new("ア").to_string(), "ア");
    }
}
