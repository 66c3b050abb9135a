//! Patch types for node edits.
//!
//! Each patch has `Option` fields; only `Some` fields change the node. Fields
//! that can be cleared are `Option<Option<T>>`: `Some(None)` clears. A patch is
//! serialized as the trail `data` payload of an `Update` operation, so only the
//! touched fields land in the trail, and replay applies the same patch type.

pub mod evidence;
pub mod kpi;
pub mod node;
pub mod test_node;

pub use evidence::{EvidenceUpdate, EvidenceUpdateBuilder};
pub use kpi::{KpiUpdate, KpiUpdateBuilder};
pub use node::{NodeUpdate, NodeUpdateBuilder};
pub use test_node::{TestUpdate, TestUpdateBuilder};

use serde::{Deserialize, Deserializer};

use canopy_core::dates::DateRange;

/// Deserialize a present field into `Some(..)`, so an explicit `null` becomes
/// `Some(None)` rather than collapsing into "absent".
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Patch fields shared by every dated kind.
pub trait DatedPatch {
    /// The new date range, if the patch touches dates.
    fn dates(&self) -> Option<&DateRange>;
}
