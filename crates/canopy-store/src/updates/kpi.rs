//! KPI update builder.

use serde::{Deserialize, Serialize};

use canopy_core::entities::Kpi;

use super::double_option;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub current: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit: Option<Option<String>>,
}

impl KpiUpdate {
    pub(crate) fn apply(&self, kpi: &mut Kpi) {
        if let Some(name) = &self.name {
            kpi.name.clone_from(name);
        }
        if let Some(current) = self.current {
            kpi.current = current;
        }
        if let Some(target) = self.target {
            kpi.target = target;
        }
        if let Some(unit) = &self.unit {
            kpi.unit.clone_from(unit);
        }
    }
}

pub struct KpiUpdateBuilder(KpiUpdate);

impl KpiUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(KpiUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn current(mut self, current: Option<f64>) -> Self {
        self.0.current = Some(current);
        self
    }

    #[must_use]
    pub const fn target(mut self, target: Option<f64>) -> Self {
        self.0.target = Some(target);
        self
    }

    #[must_use]
    pub fn unit(mut self, unit: Option<String>) -> Self {
        self.0.unit = Some(unit);
        self
    }

    #[must_use]
    pub fn build(self) -> KpiUpdate {
        self.0
    }
}

impl Default for KpiUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
