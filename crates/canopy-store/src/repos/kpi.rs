//! KPI repository. KPIs are tracked alongside tests but never scored.

use canopy_core::entities::Kpi;
use canopy_core::enums::NodeKind;
use canopy_core::responses::DeleteResponse;

use crate::error::StoreError;
use crate::node::NodeData;
use crate::service::CanopyService;
use crate::updates::KpiUpdate;

impl CanopyService {
    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` unless `test_id` is a test.
    pub fn add_kpi(
        &mut self,
        test_id: &str,
        name: &str,
        current: Option<f64>,
        target: Option<f64>,
        unit: Option<&str>,
    ) -> Result<Kpi, StoreError> {
        let now = self.now();
        let kpi = Kpi {
            id: self.new_id(NodeKind::Kpi)?,
            test_id: test_id.to_string(),
            name: name.to_string(),
            current,
            target,
            unit: unit.map(String::from),
        };
        self.create_node(Some(test_id), NodeData::Kpi(kpi), now)?
            .into_kpi()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown test.
    pub fn list_kpis(&self, test_id: &str) -> Result<Vec<Kpi>, StoreError> {
        self.child_nodes(test_id, NodeKind::Kpi)?
            .into_iter()
            .map(NodeData::into_kpi)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn update_kpi(&mut self, id: &str, update: &KpiUpdate) -> Result<Kpi, StoreError> {
        let data = serde_json::to_value(update)?;
        self.update_node(NodeKind::Kpi, id, data, None)?.into_kpi()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn delete_kpi(&mut self, id: &str) -> Result<DeleteResponse, StoreError> {
        self.delete_node(NodeKind::Kpi, id)
    }
}
