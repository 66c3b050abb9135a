//! Evidence repository.

use canopy_core::entities::Evidence;
use canopy_core::enums::{EvidenceQuality, NodeKind};
use canopy_core::responses::DeleteResponse;

use crate::error::StoreError;
use crate::node::NodeData;
use crate::service::CanopyService;
use crate::updates::EvidenceUpdate;

impl CanopyService {
    /// Attach evidence to a test.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` unless `test_id` is a test.
    pub fn add_evidence(
        &mut self,
        test_id: &str,
        quality: EvidenceQuality,
        note: Option<&str>,
    ) -> Result<Evidence, StoreError> {
        let now = self.now();
        let evidence = Evidence {
            id: self.new_id(NodeKind::Evidence)?,
            test_id: test_id.to_string(),
            quality,
            note: note.map(String::from),
            created_at: now,
        };
        self.create_node(Some(test_id), NodeData::Evidence(evidence), now)?
            .into_evidence()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown test.
    pub fn list_evidence(&self, test_id: &str) -> Result<Vec<Evidence>, StoreError> {
        self.child_nodes(test_id, NodeKind::Evidence)?
            .into_iter()
            .map(NodeData::into_evidence)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn update_evidence(&mut self, id: &str, update: &EvidenceUpdate) -> Result<Evidence, StoreError> {
        let data = serde_json::to_value(update)?;
        self.update_node(NodeKind::Evidence, id, data, None)?
            .into_evidence()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn delete_evidence(&mut self, id: &str) -> Result<DeleteResponse, StoreError> {
        self.delete_node(NodeKind::Evidence, id)
    }
}
