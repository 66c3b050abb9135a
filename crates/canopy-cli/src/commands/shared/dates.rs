use anyhow::Context;
use chrono::NaiveDate;

use canopy_core::dates::DateRange;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(raw: &str, flag: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .with_context(|| format!("invalid --{flag} '{raw}': expected YYYY-MM-DD"))
}

/// Build a candidate range from `--start`/`--end`. A single side is passed
/// through as-is so the store rejects it with its own reason.
pub fn parse_date_range(start: Option<&str>, end: Option<&str>) -> anyhow::Result<DateRange> {
    Ok(DateRange {
        start: start.map(|raw| parse_date(raw, "start")).transpose()?,
        end: end.map(|raw| parse_date(raw, "end")).transpose()?,
    })
}

/// Date change requested by an update: `None` leaves dates untouched.
pub fn date_patch(
    start: Option<&str>,
    end: Option<&str>,
    clear: bool,
) -> anyhow::Result<Option<DateRange>> {
    if clear {
        return Ok(Some(DateRange::none()));
    }
    if start.is_none() && end.is_none() {
        return Ok(None);
    }
    parse_date_range(start, end).map(Some)
}
