//! Per-kind repository methods on [`CanopyService`].
//!
//! Each file adds an `impl CanopyService` block for one node kind. They all
//! funnel into the generic create/update/delete/move operations in
//! `service.rs`, so validation and trail recording happen in one place.

pub mod confidence;
pub mod evidence;
pub mod kpi;
pub mod opportunity;
pub mod outcome;
pub mod solution;
pub mod test_node;
pub mod tree;

use serde::Serialize;

use canopy_core::enums::NodeKind;

use crate::error::StoreError;
use crate::node::NodeData;
use crate::service::CanopyService;
use crate::updates::DatedPatch;

impl CanopyService {
    /// Serialize a dated patch and route it through `update_node`.
    pub(crate) fn patch_dated<P: Serialize + DatedPatch>(
        &mut self,
        kind: NodeKind,
        id: &str,
        patch: &P,
    ) -> Result<NodeData, StoreError> {
        let data = serde_json::to_value(patch)?;
        self.update_node(kind, id, data, patch.dates())
    }
}
