//! Date ranges, resolved windows, and the date coherence validator.
//!
//! A node's `DateRange` may be absent, partial, or complete. Only complete
//! ranges (a `Window`) constrain or are constrained by ancestors. Candidates
//! arriving from a mutation must be all-or-nothing: a single-sided candidate
//! is rejected before any containment check runs.

use std::fmt;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::NodeKind;

/// Optional start/end pair as stored on a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with neither side set.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// The complete window, if both sides are set.
    #[must_use]
    pub const fn window(&self) -> Option<Window> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(Window { start, end }),
            _ => None,
        }
    }
}

impl From<Window> for DateRange {
    fn from(window: Window) -> Self {
        Self::new(window.start, window.end)
    }
}

/// A complete, concrete date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// An existing child window checked when its parent's window changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildWindow {
    pub kind: NodeKind,
    pub id: String,
    pub window: Window,
}

/// Rejection reasons from the date coherence validator.
///
/// The first four display strings are surfaced verbatim to callers as form
/// errors and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("both dates required together")]
    BothRequired,

    #[error("start must precede end")]
    StartAfterEnd,

    #[error("start must be within parent period")]
    StartOutsideParent,

    #[error("end must be within parent period")]
    EndOutsideParent,

    /// Narrowing a window would leave an existing child outside it.
    #[error("new period {window} excludes {kind} {id} ({child})")]
    ShrinkConflict {
        kind: NodeKind,
        id: String,
        child: Window,
        window: Window,
    },

    /// Dates were supplied for a kind that does not carry them.
    #[error("{0} does not carry a date range")]
    Undated(NodeKind),
}

impl DateError {
    /// Whether this rejection comes from an ancestor edit colliding with a child.
    #[must_use]
    pub const fn is_shrink_conflict(&self) -> bool {
        matches!(self, Self::ShrinkConflict { .. })
    }
}

/// Validate a candidate range for a node of `kind` against its resolved
/// ancestor window.
///
/// Returns the accepted window (`None` when the candidate clears the dates).
/// The same rules apply to creates and updates of every dated kind.
///
/// # Errors
///
/// Returns the first `DateError` rule the candidate breaks.
pub fn validate_node_dates(
    kind: NodeKind,
    candidate: &DateRange,
    ancestor: Option<&Window>,
) -> Result<Option<Window>, DateError> {
    if candidate.is_empty() {
        return Ok(None);
    }
    if !kind.is_dated() {
        return Err(DateError::Undated(kind));
    }
    let window = candidate.window().ok_or(DateError::BothRequired)?;
    if window.start > window.end {
        return Err(DateError::StartAfterEnd);
    }
    if let Some(ancestor) = ancestor {
        if window.start < ancestor.start {
            return Err(DateError::StartOutsideParent);
        }
        if window.end > ancestor.end {
            return Err(DateError::EndOutsideParent);
        }
    }
    Ok(Some(window))
}

/// Check that a node's new window still contains each direct child's window.
///
/// Only one level is scanned; deeper descendants re-validate on their own edits.
/// Clearing the window (`None`) never conflicts.
///
/// # Errors
///
/// Returns `DateError::ShrinkConflict` naming the first child left outside.
pub fn validate_ancestor_shrink(
    new_window: Option<&Window>,
    children: &[ChildWindow],
) -> Result<(), DateError> {
    let Some(window) = new_window else {
        return Ok(());
    };
    match children.iter().find(|child| !window.contains(&child.window)) {
        Some(child) => Err(DateError::ShrinkConflict {
            kind: child.kind,
            id: child.id.clone(),
            child: child.window,
            window: *window,
        }),
        None => Ok(()),
    }
}
