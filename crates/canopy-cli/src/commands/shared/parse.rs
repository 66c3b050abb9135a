use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization. Accepts any
/// case and hyphens in place of underscores.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use canopy_core::enums::{Decision, EvidenceQuality};

    use super::parse_enum;

    #[test]
    fn parses_snake_case_enum() {
        let decision: Decision = parse_enum("kill", "decision").expect("decision should parse");
        assert_eq!(decision, Decision::Kill);
    }

    #[test]
    fn parses_any_case() {
        let quality: EvidenceQuality = parse_enum("High", "quality").expect("quality should parse");
        assert_eq!(quality, EvidenceQuality::High);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<Decision>("maybe", "decision").expect_err("should fail");
        assert!(err.to_string().contains("invalid decision 'maybe'"));
    }
}
