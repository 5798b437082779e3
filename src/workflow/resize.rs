//! Resize caption events to their estimated spoken duration.

use super::{Outcome, WorkflowError};
use crate::caption::{EligibleCaption, LabelFilter};
use crate::duration::{CancelFlag, DurationEstimate, DurationEstimator};
use crate::timeline::{Confirm, TimelineReader, TimelineWriter};

// ---------------------------------------------------------------------------
// Plan / report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeItem {
    pub caption: EligibleCaption,
    pub estimate: DurationEstimate,
}

/// New lengths for every eligible selected caption, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizePlan {
    pub items: Vec<ResizeItem>,
}

impl ResizePlan {
    /// Text shown in the confirmation prompt.
    pub fn message(&self) -> String {
        let mut message = String::new();
        for item in &self.items {
            message.push_str(&format!(
                "Text: {}  Length: {}\n",
                item.caption.text, item.estimate.duration
            ));
        }
        message.push_str("Resize these captions?");
        message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeReport {
    pub resized: usize,
    /// Captions whose transliteration failed and got the overhead-only
    /// length.
    pub degraded: usize,
}

// ---------------------------------------------------------------------------
// Resizer
// ---------------------------------------------------------------------------

pub struct Resizer<'a> {
    estimator: &'a DurationEstimator,
    labels: &'a LabelFilter,
    cancel: Option<CancelFlag>,
}

impl<'a> Resizer<'a> {
    pub fn new(estimator: &'a DurationEstimator, labels: &'a LabelFilter) -> Self {
        Self {
            estimator,
            labels,
            cancel: None,
        }
    }

    /// Check `cancel` between captions while estimating.
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Estimate every selected caption.  Reads the timeline only.
    ///
    /// # Errors
    ///
    /// * [`WorkflowError::NoCaptionsSelected`]: no selected event carries
    ///   the caption label.
    /// * [`WorkflowError::Cancelled`]: the cancel flag was set.
    pub fn plan(&self, timeline: &dyn TimelineReader) -> Result<ResizePlan, WorkflowError> {
        let captions = self.labels.eligible(&timeline.selected_captions());
        if captions.is_empty() {
            log::debug!(
                "resize: no selected event starts with {:?}",
                self.labels.prefix()
            );
            return Err(WorkflowError::NoCaptionsSelected);
        }

        let estimates = self.estimator.estimate_all(&captions, self.cancel.as_ref());
        if self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled) {
            return Err(WorkflowError::Cancelled);
        }

        Ok(ResizePlan {
            items: estimates
                .into_iter()
                .map(|(caption, estimate)| ResizeItem { caption, estimate })
                .collect(),
        })
    }

    /// Write the planned lengths.
    pub fn apply(
        plan: &ResizePlan,
        timeline: &mut dyn TimelineWriter,
    ) -> Result<ResizeReport, WorkflowError> {
        let mut report = ResizeReport::default();
        for item in &plan.items {
            timeline.set_event_length(item.caption.id(), item.estimate.duration)?;
            report.resized += 1;
            if item.estimate.degraded {
                report.degraded += 1;
            }
        }
        log::info!(
            "resize: {} captions resized ({} without a reading)",
            report.resized,
            report.degraded
        );
        Ok(report)
    }

    /// Plan, confirm, apply.
    pub fn run<T>(
        &self,
        timeline: &mut T,
        confirm: &dyn Confirm,
    ) -> Result<Outcome<ResizeReport>, WorkflowError>
    where
        T: TimelineReader + TimelineWriter,
    {
        let plan = self.plan(&*timeline)?;
        if !confirm.confirm(&plan.message())? {
            log::info!("resize: declined by user");
            return Ok(Outcome::Declined);
        }
        Self::apply(&plan, timeline).map(Outcome::Applied)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
