//! Outcome, opportunity, and solution update builder.

use serde::{Deserialize, Serialize};

use canopy_core::dates::DateRange;

use super::{DatedPatch, double_option};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,
}

impl NodeUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.dates.is_none()
    }

    pub(crate) fn apply(
        &self,
        title: &mut String,
        description: &mut Option<String>,
        dates: &mut DateRange,
    ) {
        if let Some(new_title) = &self.title {
            title.clone_from(new_title);
        }
        if let Some(new_description) = &self.description {
            description.clone_from(new_description);
        }
        if let Some(new_dates) = self.dates {
            *dates = new_dates;
        }
    }
}

impl DatedPatch for NodeUpdate {
    fn dates(&self) -> Option<&DateRange> {
        self.dates.as_ref()
    }
}

pub struct NodeUpdateBuilder(NodeUpdate);

impl NodeUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(NodeUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    /// Set or clear (`DateRange::none()`) the node's dates.
    #[must_use]
    pub const fn dates(mut self, dates: DateRange) -> Self {
        self.0.dates = Some(dates);
        self
    }

    #[must_use]
    pub fn build(self) -> NodeUpdate {
        self.0
    }
}

impl Default for NodeUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
