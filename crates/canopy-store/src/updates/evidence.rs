//! Evidence update builder.

use serde::{Deserialize, Serialize};

use canopy_core::entities::Evidence;
use canopy_core::enums::EvidenceQuality;

use super::double_option;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<EvidenceQuality>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<Option<String>>,
}

impl EvidenceUpdate {
    pub(crate) fn apply(&self, evidence: &mut Evidence) {
        if let Some(quality) = self.quality {
            evidence.quality = quality;
        }
        if let Some(note) = &self.note {
            evidence.note.clone_from(note);
        }
    }
}

pub struct EvidenceUpdateBuilder(EvidenceUpdate);

impl EvidenceUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EvidenceUpdate::default())
    }

    #[must_use]
    pub const fn quality(mut self, quality: EvidenceQuality) -> Self {
        self.0.quality = Some(quality);
        self
    }

    #[must_use]
    pub fn note(mut self, note: Option<String>) -> Self {
        self.0.note = Some(note);
        self
    }

    #[must_use]
    pub fn build(self) -> EvidenceUpdate {
        self.0
    }
}

impl Default for EvidenceUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
