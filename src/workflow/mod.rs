//! User-triggered workflows over the timeline.
//!
//! Both workflows follow the same shape:
//!
//! ```text
//! selected events ──▶ LabelFilter ──▶ preconditions ──▶ plan (pure)
//!                                          │ Err                │
//!                                          ▼                    ▼
//!                                   WorkflowError       confirm(message)
//!                                   (nothing mutated)     │ no    │ yes
//!                                                         ▼       ▼
//!                                                     Declined  apply
//! ```
//!
//! * [`Resizer`]: estimates spoken durations and resizes caption events.
//! * [`VoiceInserter`]: matches captions to voice recordings and inserts
//!   the audio at each caption's start.
//!
//! Precondition failures ([`WorkflowError::is_configuration`]) and declined
//! confirmations leave the timeline untouched.

pub mod error;
pub mod insert;
pub mod resize;

pub use error::WorkflowError;
pub use insert::{InsertReport, InsertionPlan, VoiceInserter};
pub use resize::{ResizeItem, ResizePlan, ResizeReport, Resizer};

/// Result of a workflow that reached the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The user accepted and the change was applied.
    Applied(T),
    /// The user declined; nothing was changed.
    Declined,
}
