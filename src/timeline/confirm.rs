//! Confirmation capability shown before any timeline mutation.

use thiserror::Error;

/// Raised when no confirmation can be obtained at all (e.g. stdin is not a
/// terminal).  This is fatal for the workflow, unlike a "no" answer.
#[derive(Debug, Error)]
#[error("confirmation prompt unavailable: {0}")]
pub struct ConfirmError(pub String);

/// Ask the user to accept a change.
pub trait Confirm {
    /// Returns `Ok(true)` only when the user explicitly accepted `message`.
    fn confirm(&self, message: &str) -> Result<bool, ConfirmError>;
}

// ---------------------------------------------------------------------------
// PromptConfirm
// ---------------------------------------------------------------------------

/// Terminal prompt backed by `dialoguer`.  Defaults to "no", so pressing
/// enter cancels.
#[derive(Debug, Clone, Default)]
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, message: &str) -> Result<bool, ConfirmError> {
        dialoguer::Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| ConfirmError(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// AutoConfirm
// ---------------------------------------------------------------------------

/// Accepts everything.  Used for `--yes` and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&self, message: &str) -> Result<bool, ConfirmError> {
        log::info!("auto-confirmed:\n{message}");
        Ok(true)
    }
}
