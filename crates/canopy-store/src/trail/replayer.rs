//! Trail replay.
//!
//! Rebuilds a node store from recorded operations. Replay goes through the
//! same `NodeStore::apply` as live mutations, so a trail that replays cleanly
//! produces exactly the tree that recorded it.

use std::time::Instant;

use canopy_core::enums::TrailOp;
use canopy_core::responses::RebuildResponse;
use canopy_core::trail::TrailOperation;
use canopy_schema::SchemaRegistry;

use crate::error::StoreError;
use crate::service::CanopyService;
use crate::store::NodeStore;

/// Counters from one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub operations_replayed: u32,
    pub nodes_created: u32,
}

pub struct TrailReplayer;

impl TrailReplayer {
    /// Replay `operations` into a fresh store.
    ///
    /// With `schema`, every create body must validate against its kind's
    /// schema or the replay aborts.
    ///
    /// # Errors
    ///
    /// Returns the first error any operation raises. Structural errors are
    /// logged at error level.
    pub fn replay(
        operations: &[TrailOperation],
        schema: Option<&SchemaRegistry>,
    ) -> Result<(NodeStore, ReplayStats), StoreError> {
        let mut store = NodeStore::new();
        let mut stats = ReplayStats::default();

        for op in operations {
            if let Some(schema) = schema {
                if op.op == TrailOp::Create {
                    schema.validate(op.entity.as_str(), &op.data).map_err(|e| {
                        StoreError::Trail(format!(
                            "create {} {} failed schema validation: {e}",
                            op.entity, op.id
                        ))
                    })?;
                }
            }

            store.apply(op).inspect_err(|e| {
                if e.is_structural() {
                    tracing::error!(op = %op.op, entity = %op.entity, id = %op.id, error = %e, "structural violation during replay");
                }
            })?;

            stats.operations_replayed += 1;
            if op.op == TrailOp::Create {
                stats.nodes_created += 1;
            }
        }

        Ok((store, stats))
    }

    /// Reload the service's repository and swap in a freshly replayed store.
    /// The current store is kept if replay fails.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` from loading or replaying the trail.
    pub fn rebuild(service: &mut CanopyService, strict: bool) -> Result<RebuildResponse, StoreError> {
        let start = Instant::now();
        let snapshot = service.repository().load()?;
        let schema = strict.then(SchemaRegistry::new);
        let (store, stats) = Self::replay(&snapshot.operations, schema.as_ref())?;
        service.replace_store(store);

        tracing::debug!(
            files = snapshot.files,
            operations = stats.operations_replayed,
            "trail rebuilt"
        );

        Ok(RebuildResponse {
            rebuilt: true,
            trail_files: snapshot.files,
            operations_replayed: stats.operations_replayed,
            nodes_created: stats.nodes_created,
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }
}
