//! Central schema registry for all Canopy types.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Named JSON Schemas for every node kind, the trail envelope, and the
/// response types `cnp` prints.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // Nodes
        register!(schemas, "outcome", canopy_core::entities::Outcome);
        register!(schemas, "opportunity", canopy_core::entities::Opportunity);
        register!(schemas, "solution", canopy_core::entities::Solution);
        register!(schemas, "test", canopy_core::entities::Test);
        register!(schemas, "evidence", canopy_core::entities::Evidence);
        register!(schemas, "kpi", canopy_core::entities::Kpi);
        register!(schemas, "date_range", canopy_core::dates::DateRange);

        // Trail
        register!(schemas, "trail_operation", canopy_core::trail::TrailOperation);

        // Confidence
        register!(schemas, "score_result", canopy_confidence::ScoreResult);
        register!(schemas, "rollup_score", canopy_confidence::RollupScore);
        register!(
            schemas,
            "confidence_report",
            canopy_confidence::ConfidenceReport
        );

        // Responses
        register!(
            schemas,
            "rebuild_response",
            canopy_core::responses::RebuildResponse
        );
        register!(
            schemas,
            "import_response",
            canopy_core::responses::ImportResponse
        );
        register!(
            schemas,
            "delete_response",
            canopy_core::responses::DeleteResponse
        );

        Self { schemas }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
