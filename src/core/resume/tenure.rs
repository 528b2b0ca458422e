//! Tenure Computer
//!
//! Converts an experience entry's `{start, end}` strings into a month count
//! and sums across entries to derive `years_of_experience`. Mirrors the
//! teacher's chrono parsing style in `core::resume::mod` (try one format,
//! fall back to another) but targets the "Month Year" / bare-year shapes the
//! extractors emit rather than RFC3339/SQLite timestamps.

use crate::core::resume::types::ExperienceEntry;
use chrono::{Datelike, NaiveDate, Utc};

pub(crate) const MONTH_NAMES: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Parse a date string of shape "Month Year" or "Year" into a `NaiveDate`
/// anchored at the 1st of the month (or January for a bare year).
#[must_use]
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(year) = raw.parse::<i32>() {
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    let mut parts = raw.split_whitespace();
    let month_token = parts.next()?.to_lowercase();
    let year_token = parts.next()?;
    let year: i32 = year_token.parse().ok()?;

    let month_index = MONTH_NAMES
        .iter()
        .position(|m| month_token.starts_with(&m[..3]))?;

    NaiveDate::from_ymd_opt(year, (month_index + 1) as u32, 1)
}

#[must_use]
pub fn is_present(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "present" | "current")
}

/// Months between `start` and (`end` or now), clamped to 0 on negative deltas.
#[must_use]
pub fn months_between(start: &str, end: Option<&str>) -> Option<i64> {
    let start_date = parse_flexible_date(start)?;

    let end_date = match end {
        Some(raw) if !is_present(raw) && !raw.trim().is_empty() => parse_flexible_date(raw)?,
        _ => {
            let now = Utc::now();
            NaiveDate::from_ymd_opt(now.year(), now.month(), 1)?
        }
    };

    let months = (end_date.year() - start_date.year()) * 12 + (end_date.month() as i32 - start_date.month() as i32);
    Some(i64::from(months.max(0)))
}

/// `years = floor(sum_of_months / 12)` over entries whose dates parse.
/// Overlapping spans are summed independently — not deduplicated — per the
/// preserved source behaviour documented in DESIGN.md.
#[must_use]
pub fn years_of_experience(entries: &[ExperienceEntry]) -> i32 {
    let total_months: i64 = entries
        .iter()
        .filter_map(|e| {
            let start = e.start_date.as_deref()?;
            months_between(start, e.end_date.as_deref())
        })
        .sum();

    (total_months / 12) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month_year() {
        let date = parse_flexible_date("July 2009").unwrap();
        assert_eq!(date.year(), 2009);
        assert_eq!(date.month(), 7);
    }

    #[test]
    fn parses_bare_year() {
        let date = parse_flexible_date("2015").unwrap();
        assert_eq!(date.year(), 2015);
        assert_eq!(date.month(), 1);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_flexible_date("not a date").is_none());
    }

    #[test]
    fn months_between_computes_span() {
        assert_eq!(months_between("Jan 2020", Some("Jan 2021")), Some(12));
    }

    #[test]
    fn months_between_clamps_negative_to_zero() {
        assert_eq!(months_between("Jan 2021", Some("Jan 2020")), Some(0));
    }

    #[test]
    fn present_uses_current_month() {
        let months = months_between("Jan 2020", Some("Present")).unwrap();
        assert!(months > 0);
    }

    #[test]
    fn years_of_experience_sums_overlapping_spans() {
        let entries = vec![
            ExperienceEntry {
                start_date: Some("Jan 2018".into()),
                end_date: Some("Jan 2020".into()),
                ..Default::default()
            },
            ExperienceEntry {
                start_date: Some("Jan 2019".into()),
                end_date: Some("Jan 2021".into()),
                ..Default::default()
            },
        ];
        // 24 + 24 = 48 months => 4 years, despite the one-year overlap.
        assert_eq!(years_of_experience(&entries), 4);
    }

    proptest::proptest! {
        #[test]
        fn months_between_is_never_negative(
            start_year in 1960i32..2030,
            start_month in 1u32..=12,
            end_year in 1960i32..2030,
            end_month in 1u32..=12,
        ) {
            let start = format!("{} {start_year}", MONTH_NAMES[(start_month - 1) as usize]);
            let end = format!("{} {end_year}", MONTH_NAMES[(end_month - 1) as usize]);
            let months = months_between(&start, Some(&end)).expect("both dates parse");
            proptest::prop_assert!(months >= 0);
        }
    }
}
