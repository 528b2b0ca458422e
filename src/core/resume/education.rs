//! Education Extractor
//!
//! Restricted to the education section span; iterates a priority-ordered
//! degree-pattern list (most specific first, to avoid two-letter
//! abbreviations like "as" swallowing unrelated lines).

use crate::core::resume::sections::{find_education_span, is_all_caps_header};
use crate::core::resume::types::EducationEntry;
use once_cell::sync::Lazy;
use regex::Regex;

const REGION_KEYWORDS: &[&str] = &[
    "Manila", "Cebu", "Davao", "Quezon City", "Makati", "Philippines", "USA",
    "United States", "California", "Texas", "New York", "Florida",
];

static DEGREE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let patterns = [
        r"(?i)Bachelor of Science in [\w &/-]+",
        r"(?i)\bBSN\b",
        r"(?i)(Chemical|Mechanical|Electrical|Civil) Engineering Technology",
        r"(?i)B\.S\.?\s*(?:in\s+)?[\w &/-]*",
        r"(?i)B\.A\.?\s*(?:in\s+)?[\w &/-]*",
        r"(?i)M\.S\.?\s*(?:in\s+)?[\w &/-]*",
        r"(?i)M\.A\.?\s*(?:in\s+)?[\w &/-]*",
        r"(?i)MBA\b",
        r"(?i)Ph\.?D\.?\s*(?:in\s+)?[\w &/-]*",
        r"(?i)Associate(?:'s)?\s+(?:Degree\s+)?(?:in\s+)?[\w &/-]*",
    ];
    patterns.iter().map(|p| Regex::new(p).expect("static regex")).collect()
});

static FIELD_OF_STUDY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:Focus on|Major in|Specialization|Concentration|Emphasis|Specializing in)[:\s]+(.+)$")
        .expect("static regex")
});

static STATUS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(1st|2nd|3rd|4th|5th)\s+Year\s+Student\b|\bFreshman\b|\bSophomore\b|\bJunior\b|\bSenior\b|\bGraduated\b|\bGraduate\b|\bUndergraduate\b")
        .expect("static regex")
});

static INSTITUTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(University|College|Institute|School|Academy|Polytechnic)\b").expect("static regex")
});

static GRADUATED_INLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Graduated[:\s]+(?:[A-Za-z]+\s+)?(\d{4})").expect("static regex")
});

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})\s*(?:–|—|-)\s*(Present|Current|\d{4})").expect("static regex")
});

static BARE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19[6-9]\d|20[0-4]\d)\b").expect("static regex"));

#[must_use]
pub fn extract_education(text: &str, current_year: i32) -> Vec<EducationEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let Some(span) = find_education_span(&lines) else {
        return Vec::new();
    };

    let mut entries = Vec::new();

    for i in (span.start + 1)..span.end {
        let line = lines[i].trim();
        if line.is_empty() {
            continue;
        }

        let Some(degree) = find_degree(line) else { continue };

        let mut entry = EducationEntry {
            degree: Some(degree),
            ..Default::default()
        };

        for candidate in lines.iter().take((i + 3).min(span.end)).skip(i + 1) {
            if let Some(caps) = FIELD_OF_STUDY_RE.captures(candidate.trim()) {
                entry.field_of_study = Some(caps[1].trim().to_string());
                break;
            }
        }

        for candidate in lines.iter().take((i + 4).min(span.end)).skip(i + 1) {
            if STATUS_RE.is_match(candidate.trim()) {
                entry.status = Some(candidate.trim().to_string());
                break;
            }
        }

        entry.institution = find_institution(&lines, span.start, span.end, i);
        if let Some(inst) = &entry.institution {
            entry.institution_location = find_nearby_location(&lines, span.start, span.end, i, inst);
        }

        resolve_year(line, &lines, span.end, i, current_year, &mut entry);

        entries.push(entry);
    }

    entries
}

fn find_degree(line: &str) -> Option<String> {
    DEGREE_PATTERNS.iter().find_map(|re| re.find(line)).map(|m| m.as_str().trim().to_string())
}

fn find_institution(lines: &[&str], region_start: usize, region_end: usize, degree_line: usize) -> Option<String> {
    let before_start = degree_line.saturating_sub(3).max(region_start);
    for idx in (before_start..degree_line).rev() {
        if let Some(inst) = institution_from_line(lines[idx]) {
            return Some(inst);
        }
    }
    let after_end = (degree_line + 4).min(region_end);
    for line in lines.iter().take(after_end).skip(degree_line + 1) {
        if let Some(inst) = institution_from_line(line) {
            return Some(inst);
        }
    }
    None
}

fn institution_from_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.len() >= 150 || is_all_caps_header(trimmed, 8) {
        return None;
    }
    if !INSTITUTION_RE.is_match(trimmed) {
        return None;
    }
    let stripped = trimmed
        .split(':')
        .next_back()
        .unwrap_or(trimmed)
        .trim();
    let without_year = BARE_YEAR_RE.replace_all(stripped, "");
    let head = without_year.split(',').next().unwrap_or(&without_year).trim();
    if head.is_empty() {
        None
    } else {
        Some(head.to_string())
    }
}

fn find_nearby_location(lines: &[&str], region_start: usize, region_end: usize, degree_line: usize, institution: &str) -> Option<String> {
    let start = degree_line.saturating_sub(2).max(region_start);
    let end = (degree_line + 6).min(region_end);
    for line in &lines[start..end] {
        let trimmed = line.trim();
        if trimmed == institution {
            continue;
        }
        if let Some((_, loc)) = trimmed.split_once('|') {
            let loc = loc.trim();
            if REGION_KEYWORDS.iter().any(|k| loc.contains(k)) {
                return Some(loc.to_string());
            }
        }
        if trimmed.contains(", ") && REGION_KEYWORDS.iter().any(|k| trimmed.contains(k)) && trimmed.len() < 80 {
            return Some(trimmed.to_string());
        }
    }
    None
}

fn resolve_year(degree_line: &str, lines: &[&str], region_end: usize, idx: usize, current_year: i32, entry: &mut EducationEntry) {
    if let Some(caps) = GRADUATED_INLINE_RE.captures(degree_line) {
        if let Ok(year) = caps[1].parse::<i32>() {
            if (1960..=current_year + 6).contains(&year) {
                entry.year = Some(year);
                return;
            }
        }
    }

    let end = (idx + 5).min(region_end);
    for line in &lines[(idx + 1)..end] {
        if let Some(caps) = DATE_RANGE_RE.captures(line) {
            let end_token = &caps[2];
            if end_token.eq_ignore_ascii_case("present") || end_token.eq_ignore_ascii_case("current") {
                entry.start_date = Some(caps[1].to_string());
                return;
            }
            if let Ok(year) = end_token.parse::<i32>() {
                if (1960..=current_year + 6).contains(&year) {
                    entry.start_date = Some(caps[1].to_string());
                    entry.end_date = Some(end_token.to_string());
                    entry.year = Some(year);
                    return;
                }
            }
        }
        if let Some(m) = BARE_YEAR_RE.find(line) {
            if let Ok(year) = m.as_str().parse::<i32>() {
                if (1960..=current_year + 6).contains(&year) {
                    entry.year = Some(year);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bsn_with_institution_and_year() {
        let text = "EDUCATION\nBachelor of Science in Nursing\nUniversity of the Philippines, Manila\nGraduated: May 2016";
        let entries = extract_education(text, 2026);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.degree.as_deref(), Some("Bachelor of Science in Nursing"));
        assert!(e.institution.as_deref().unwrap().contains("University of the Philippines"));
        assert_eq!(e.year, Some(2016));
    }

    #[test]
    fn no_education_section_returns_empty() {
        assert!(extract_education("SUMMARY\nNo education here", 2026).is_empty());
    }

    #[test]
    fn date_range_with_present_leaves_year_unset() {
        let text = "EDUCATION\nBSN\nSome College\n2022-Present";
        let entries = extract_education(text, 2026);
        assert_eq!(entries[0].start_date.as_deref(), Some("2022"));
        assert!(entries[0].year.is_none());
    }
}
