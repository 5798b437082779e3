//! Workflow error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::AssetError;
use crate::timeline::{ConfirmError, TimelineError};

/// Errors that abort a workflow.
///
/// Configuration errors are raised before any mutation and describe
/// something the user can fix (select captions, pick an audio track, record
/// voices).  The rest are fatal.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("no caption events are selected")]
    NoCaptionsSelected,

    #[error("no track is selected and no track named '{0}' exists")]
    NoTrackSelected(String),

    #[error("track '{0}' is not an audio track")]
    NotAudioTrack(String),

    #[error("no audio files in {}", .0.display())]
    NoAudioFiles(PathBuf),

    #[error("none of the selected captions has a voice file in {}", .0.display())]
    NoMatchingAssets(PathBuf),

    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Timeline(#[from] TimelineError),

    #[error(transparent)]
    Confirm(#[from] ConfirmError),
}

impl WorkflowError {
    /// `true` for precondition failures the user can fix by changing the
    /// selection or the voice directory.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            WorkflowError::NoCaptionsSelected
                | WorkflowError::NoTrackSelected(_)
                | WorkflowError::NotAudioTrack(_)
                | WorkflowError::NoAudioFiles(_)
                | WorkflowError::NoMatchingAssets(_)
        )
    }
}
