//! ID prefixes and generation.
//!
//! Every node ID is `{prefix}-{8 lowercase hex}`, e.g. `opp-a3f8b2c1`. The
//! prefix makes the kind readable from the ID alone.

use crate::enums::NodeKind;
use crate::errors::CoreError;

pub const PREFIX_OUTCOME: &str = "out";
pub const PREFIX_OPPORTUNITY: &str = "opp";
pub const PREFIX_SOLUTION: &str = "sol";
pub const PREFIX_TEST: &str = "tst";
pub const PREFIX_EVIDENCE: &str = "evd";
pub const PREFIX_KPI: &str = "kpi";

/// ID prefix used for nodes of `kind`.
#[must_use]
pub const fn prefix_for(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Outcome => PREFIX_OUTCOME,
        NodeKind::Opportunity => PREFIX_OPPORTUNITY,
        NodeKind::Solution => PREFIX_SOLUTION,
        NodeKind::Test => PREFIX_TEST,
        NodeKind::Evidence => PREFIX_EVIDENCE,
        NodeKind::Kpi => PREFIX_KPI,
    }
}

/// Join a prefix and a 32-bit suffix into an ID.
#[must_use]
pub fn format_id(prefix: &str, suffix: u32) -> String {
    format!("{prefix}-{suffix:08x}")
}

/// Generate a fresh random ID for a node of `kind`.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn generate_id(kind: NodeKind) -> Result<String, CoreError> {
    let mut buf = [0u8; 4];
    getrandom::fill(&mut buf).map_err(|e| CoreError::Other(anyhow::anyhow!("random source: {e}")))?;
    Ok(format_id(prefix_for(kind), u32::from_be_bytes(buf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_to_eight_hex_chars() {
        assert_eq!(format_id(PREFIX_SOLUTION, 0xab), "sol-000000ab");
    }

    #[test]
    fn generated_id_carries_kind_prefix() {
        let id = generate_id(NodeKind::Opportunity).unwrap();
        assert!(id.starts_with("opp-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn every_kind_has_distinct_prefix() {
        let kinds = [
            NodeKind::Outcome,
            NodeKind::Opportunity,
            NodeKind::Solution,
            NodeKind::Test,
            NodeKind::Evidence,
            NodeKind::Kpi,
        ];
        let mut prefixes: Vec<&str> = kinds.iter().map(|k| prefix_for(*k)).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), kinds.len());
    }
}
