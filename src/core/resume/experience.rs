//! Experience Extractor — the centrepiece of the rule-based
//! pipeline.
//!
//! Builds entries around date-anchored lines using bidirectional,
//! feature-scored candidate windows for position/employer/department/
//! location, following the `ExperienceBuilder`-around-a-date-anchor shape of
//! the `other_examples` resume parser, generalised with the weighted scoring
//! model.

use crate::core::resume::lexicons::{self, COMPANY_KEYWORDS, KNOWN_FACILITIES, POSITION_KEYWORDS};
use crate::core::resume::sections::{build_experience_exclusion_mask, is_all_caps_header, is_masked};
use crate::core::resume::types::ExperienceEntry;
use once_cell::sync::Lazy;
use regex::Regex;

const BEFORE_WINDOW: usize = 3;
const AFTER_WINDOW: usize = 4;

static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<start>(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4}|\d{4})\s*(?:–|—|-|‑|to)\s*(?P<end>(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4}|\d{4}|Present|Current)",
    )
    .expect("static regex")
});

static SEMESTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(1st|2nd|3rd|4th)\s+Semester\b").expect("static regex")
});

static SEMINAR_QUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["“][^"”]{3,}["”]"#).expect("static regex"));

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[|•]\s*|,\s*(?=[A-Z])").expect("static regex"));

const BULLET_GLYPHS: &[char] = &['•', '-', '●', '◦', '▪', '*'];

fn starts_with_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_GLYPHS)
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start().trim_start_matches(BULLET_GLYPHS).trim_start()
}

/// Extract all experience entries from the full resume text.
#[must_use]
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let mask = build_experience_exclusion_mask(&lines);
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if is_masked(i, &mask) {
            continue;
        }
        if starts_with_bullet(line) {
            continue;
        }
        if SEMESTER_RE.is_match(line) {
            continue;
        }

        let Some(caps) = DATE_RANGE_RE.captures(line) else {
            continue;
        };

        // Seminar guard: a date followed by a quoted title is a training
        // entry, not a job.
        let after_date = &line[caps.get(0).unwrap().end()..];
        if SEMINAR_QUOTE_RE.is_match(after_date) {
            continue;
        }

        let full_match = caps.get(0).unwrap();
        let start_date = normalise_date(&caps["start"]);
        let end_date = normalise_date(&caps["end"]);

        let before_same_line = line[..full_match.start()].trim();
        let after_same_line = line[full_match.end()..].trim();

        let mut entry = ExperienceEntry {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        };

        build_entry_around_anchor(&lines, &mask, i, before_same_line, after_same_line, &mut entry);
        unpack_embedded_forms(&mut entry);
        aggregate_description(&lines, &mask, i, &mut entry);

        if entry.is_emittable() {
            entries.push(entry);
        }
    }

    entries
}

fn normalise_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("present") || raw.eq_ignore_ascii_case("current") {
        "Present".to_string()
    } else {
        raw.split_whitespace()
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Before,
    After,
}

struct Candidate<'a> {
    text: &'a str,
    line_idx: usize,
    distance: usize,
    side: Side,
}

fn collect_window<'a>(
    lines: &'a [&'a str],
    mask: &[crate::core::resume::sections::LineSpan],
    anchor: usize,
) -> (Vec<Candidate<'a>>, Vec<Candidate<'a>>) {
    let mut before = Vec::new();
    for d in 1..=BEFORE_WINDOW {
        if d > anchor {
            break;
        }
        let idx = anchor - d;
        if is_masked(idx, mask) {
            break;
        }
        let line = lines[idx].trim();
        if line.is_empty() {
            continue;
        }
        before.push(Candidate { text: line, line_idx: idx, distance: d, side: Side::Before });
    }

    let mut after = Vec::new();
    for d in 1..=AFTER_WINDOW {
        let idx = anchor + d;
        if idx >= lines.len() || is_masked(idx, mask) {
            break;
        }
        let line = lines[idx].trim();
        if line.is_empty() {
            continue;
        }
        if starts_with_bullet(line) || is_all_caps_header(line, 8) || DATE_RANGE_RE.is_match(line) {
            break;
        }
        after.push(Candidate { text: line, line_idx: idx, distance: d, side: Side::After });
    }

    (before, after)
}

fn distance_bonus(distance: usize) -> f64 {
    match distance {
        1 => 25.0,
        2 => 15.0,
        3 => 5.0,
        _ => 0.0,
    }
}

fn score_position_candidate(c: &Candidate) -> f64 {
    let mut score = 0.0;
    if lexicons::matches_any(c.text, POSITION_KEYWORDS) {
        score += 40.0;
    }
    score += match c.side {
        Side::Before => 20.0,
        Side::After => 0.0,
    };
    score += distance_bonus(c.distance);
    if c.text.chars().next().is_some_and(char::is_uppercase) {
        score += 10.0;
    }
    if c.text.len() > 10 && c.text.len() < 60 {
        score += 15.0;
    }
    if c.text.eq_ignore_ascii_case("unknown") {
        score -= 50.0;
    }
    if lexicons::matches_any(c.text, COMPANY_KEYWORDS) {
        score -= 30.0;
    }
    if looks_like_location(c.text) {
        score -= 30.0;
    }
    if c.text.len() < 5 || c.text.len() > 80 {
        score -= 20.0;
    }
    if is_all_caps_header(c.text, 3) {
        score -= 15.0;
    }
    if matches!(c.side, Side::After) {
        score += 10.0; // tiebreak bonus
    }
    score
}

fn score_employer_candidate(c: &Candidate) -> f64 {
    let mut score = 0.0;
    if lexicons::matches_any(c.text, KNOWN_FACILITIES) {
        score += 50.0;
    }
    if lexicons::matches_any(c.text, COMPANY_KEYWORDS) {
        score += 35.0;
    }
    score += match c.side {
        Side::Before => 20.0,
        Side::After => 0.0,
    };
    score += distance_bonus(c.distance);
    if c.text.len() > 10 && c.text.len() < 60 {
        score += 10.0;
    }
    if c.text.eq_ignore_ascii_case("unknown") {
        score -= 50.0;
    }
    if looks_like_location(c.text) {
        score -= 30.0;
    }
    if lexicons::matches_any(c.text, POSITION_KEYWORDS) {
        score -= 25.0;
    }
    let word_count = c.text.split_whitespace().count();
    if word_count > 8 {
        score -= 40.0;
    }
    if looks_like_sentence(c.text) {
        score -= 50.0;
    }
    if c.text.trim_end().ends_with('.') || c.text.trim_end().ends_with('!') {
        score -= 30.0;
    }
    score
}

fn looks_like_location(text: &str) -> bool {
    let t = text.trim();
    t.split(", ").count() >= 2 && t.len() < 60 && !t.chars().any(|c| c.is_ascii_digit())
}

fn looks_like_sentence(text: &str) -> bool {
    const SUBORDINATORS: &[&str] = &["because", "although", "while", "since", "so that", "which"];
    let lower = text.to_lowercase();
    SUBORDINATORS.iter().any(|s| lower.contains(s))
}

/// Reject an employer string that reads like prose rather than a company
/// name: more than 8 tokens, a subordinating-clause pattern, or a trailing
/// sentence-ending punctuation mark.
#[must_use]
pub(crate) fn employer_reads_like_a_sentence(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.split_whitespace().count() > 8
        || looks_like_sentence(trimmed)
        || trimmed.ends_with('.')
        || trimmed.ends_with('!')
}

fn best_candidate<'a>(candidates: &'a [Candidate<'a>], score_fn: impl Fn(&Candidate) -> f64) -> Option<(&'a str, usize, f64)> {
    candidates
        .iter()
        .map(|c| (c.text, c.line_idx, score_fn(c)))
        .fold(None, |best: Option<(&str, usize, f64)>, (text, line_idx, score)| match best {
            Some((_, _, best_score)) if best_score >= score => best,
            _ => Some((text, line_idx, score)),
        })
}

fn build_entry_around_anchor(
    lines: &[&str],
    mask: &[crate::core::resume::sections::LineSpan],
    anchor: usize,
    before_same_line: &str,
    after_same_line: &str,
    entry: &mut ExperienceEntry,
) {
    // Same-line split. A pre-date position wins outright over
    // any later window candidate — preserved source behaviour, see DESIGN.md.
    let mut position_from_same_line = false;
    if before_same_line.len() >= 3 && before_same_line.len() <= 100 && lexicons::matches_any(before_same_line, POSITION_KEYWORDS) {
        entry.position = Some(before_same_line.to_string());
        position_from_same_line = true;
    }
    if after_same_line.len() >= 3 && after_same_line.len() <= 100 {
        entry.employer = Some(after_same_line.to_string());
    }

    let (before_window, after_window) = collect_window(lines, mask, anchor);

    if !position_from_same_line {
        let before_best = best_candidate(&before_window, score_position_candidate);
        let after_best = best_candidate(&after_window, score_position_candidate);
        entry.position = pick_better(before_best, after_best).map(|(text, _)| text.to_string());
    }

    let mut employer_line_idx = None;
    if entry.employer.is_none() {
        let before_best = best_candidate(&before_window, score_employer_candidate);
        let after_best = best_candidate(&after_window, score_employer_candidate);
        if let Some((text, line_idx)) = pick_better(before_best, after_best) {
            let (employer, location) = split_employer_location(text);
            entry.employer = Some(employer);
            if entry.location.is_none() {
                entry.location = location;
            }
            employer_line_idx = Some(line_idx);
        }
    }

    // Department: a short intermediate line between anchor and a below-anchor
    // employer that isn't the chosen position/employer.
    if let Some(employer_line_idx) = employer_line_idx {
        if employer_line_idx > anchor {
            for idx in (anchor + 1)..employer_line_idx {
                let candidate = lines[idx].trim();
                if candidate.is_empty() || starts_with_bullet(candidate) || DATE_RANGE_RE.is_match(candidate) {
                    continue;
                }
                if Some(candidate) != entry.position.as_deref() && Some(candidate) != entry.employer.as_deref() {
                    entry.department = Some(candidate.to_string());
                    break;
                }
            }
        }
    }

    if entry.department.is_none() {
        if let Some(position) = entry.position.clone() {
            if let Some((head, tail)) = position.split_once(" – ").or_else(|| position.split_once(" - ")) {
                if !lexicons::matches_any(tail, KNOWN_FACILITIES) && !lexicons::matches_any(tail, COMPANY_KEYWORDS) {
                    entry.position = Some(head.trim().to_string());
                    entry.department = Some(tail.trim().to_string());
                }
            }
        }
    }

    if entry.location.is_none() {
        for c in before_window.iter().chain(after_window.iter()) {
            if looks_like_location(c.text) && c.text.len() < 80 {
                entry.location = Some(c.text.to_string());
                break;
            }
        }
    }
}

fn pick_better<'a>(a: Option<(&'a str, usize, f64)>, b: Option<(&'a str, usize, f64)>) -> Option<(&'a str, usize)> {
    match (a, b) {
        (Some((ta, ia, sa)), Some((tb, ib, sb))) => Some(if sa >= sb { (ta, ia) } else { (tb, ib) }),
        (Some((t, i, _)), None) | (None, Some((t, i, _))) => Some((t, i)),
        (None, None) => None,
    }
}

fn split_employer_location(text: &str) -> (String, Option<String>) {
    if let Some(m) = SEPARATOR_RE.find(text) {
        let employer = text[..m.start()].trim().to_string();
        let location = text[m.end()..].trim().to_string();
        if !location.is_empty() {
            return (employer, Some(location));
        }
    }
    (text.to_string(), None)
}

/// Unpack `Position (Employer)`, `Position at Employer`, and
/// `Position – Employer/Department` shapes.
fn unpack_embedded_forms(entry: &mut ExperienceEntry) {
    if entry.employer.is_some() {
        return;
    }
    let Some(position) = entry.position.clone() else { return };

    if let Some(open) = position.find('(') {
        if let Some(close) = position.find(')') {
            if close > open {
                let employer = position[open + 1..close].trim();
                if !employer.is_empty() {
                    entry.employer = Some(employer.to_string());
                    entry.position = Some(position[..open].trim().to_string());
                    return;
                }
            }
        }
    }

    if let Some(idx) = position.to_lowercase().find(" at ") {
        let employer = position[idx + 4..].trim();
        if !employer.is_empty() {
            entry.employer = Some(employer.to_string());
            entry.position = Some(position[..idx].trim().to_string());
        }
    }
}

/// Collect description bullets following the anchor line until a stop
/// condition fires.
fn aggregate_description(
    lines: &[&str],
    mask: &[crate::core::resume::sections::LineSpan],
    anchor: usize,
    entry: &mut ExperienceEntry,
) {
    let mut bullets = Vec::new();
    let mut blank_run = 0;

    let mut idx = anchor + 1;
    while idx < lines.len() {
        if is_masked(idx, mask) {
            break;
        }
        let raw = lines[idx];
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run >= 2 {
                break;
            }
            idx += 1;
            continue;
        }
        blank_run = 0;

        if DATE_RANGE_RE.is_match(trimmed) || is_all_caps_header(trimmed, 8) {
            break;
        }
        if trimmed.starts_with("--") && trimmed.ends_with("--") {
            break;
        }

        if is_noise_line(trimmed, entry) {
            idx += 1;
            continue;
        }

        let content = if starts_with_bullet(trimmed) {
            strip_bullet(trimmed)
        } else {
            trimmed
        };

        if content.len() >= 10 && content.len() <= 300 && !is_all_caps_header(content, 8) {
            bullets.push(content.to_string());
        }

        idx += 1;
    }

    if !bullets.is_empty() {
        entry.description = Some(bullets.iter().map(|b| format!("• {b}")).collect::<Vec<_>>().join("\n"));
    }
}

fn is_noise_line(line: &str, entry: &ExperienceEntry) -> bool {
    if Some(line) == entry.position.as_deref()
        || Some(line) == entry.employer.as_deref()
        || Some(line) == entry.location.as_deref()
        || Some(line) == entry.department.as_deref()
    {
        return true;
    }
    if let Some(employer) = &entry.employer {
        if line.len() < 120 && line.contains(employer.as_str()) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_on_date_only_line() {
        let text = "July 2009 – Jan 2010 Quezon City General Hospital";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].start_date.as_deref(), Some("July 2009"));
        assert_eq!(entries[0].end_date.as_deref(), Some("Jan 2010"));
        assert_eq!(entries[0].employer.as_deref(), Some("Quezon City General Hospital"));
    }

    #[test]
    fn full_block_extracts_all_fields() {
        let text = "Senior ICU Registered Nurse  Jan 2020 - Present\nPain Management\nCedars-Sinai Medical Center • Los Angeles, California\n• Managed critical patients";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.position.as_deref(), Some("Senior ICU Registered Nurse"));
        assert_eq!(e.start_date.as_deref(), Some("Jan 2020"));
        assert_eq!(e.end_date.as_deref(), Some("Present"));
        assert_eq!(e.employer.as_deref(), Some("Cedars-Sinai Medical Center"));
        assert_eq!(e.location.as_deref(), Some("Los Angeles, California"));
        assert_eq!(e.department.as_deref(), Some("Pain Management"));
    }

    #[test]
    fn seminar_quote_is_not_an_anchor() {
        let text = "SEMINARS AND TRAININGS ATTENDED\nMarch 15, 2018 \"Advanced Wound Care Workshop\"";
        let entries = extract_experience(text);
        assert!(entries.is_empty());
    }

    #[test]
    fn semester_line_is_not_an_anchor() {
        let text = "EDUCATION\n1st Semester 2004-2005";
        let entries = extract_experience(text);
        assert!(entries.is_empty());
    }

    #[test]
    fn masked_education_region_is_skipped() {
        let text = "EDUCATION\nJan 2015 - Dec 2018 University of the Philippines\n\nEXPERIENCE\nJan 2019 - Present General Hospital";
        let entries = extract_experience(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].employer.as_deref(), Some("General Hospital"));
    }

    #[test]
    fn no_start_date_means_no_entry() {
        let entries = extract_experience("Just a line with no date information at all");
        assert!(entries.is_empty());
    }
}
