//! Field Extractors
//!
//! Stateless extractors for the scalar/list fields that don't need the
//! date-anchored machinery of experience/education: summary, address,
//! graduation year, certifications, hospitals, skills, salary.

use crate::core::resume::lexicons::{self, COMPANY_KEYWORDS, KNOWN_FACILITIES, NURSING_SKILLS, TECHNICAL_SKILLS};
use crate::core::resume::sections::{find_skills_section, find_summary_section};
use crate::core::resume::types::Certification;
use once_cell::sync::Lazy;
use regex::Regex;

static EDUCATION_CONTEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)graduat|Bachelor|Master|Doctorate|Ph\.?D|degree|diploma|university|college|B\.S|M\.S|MBA|B\.A|M\.A")
        .expect("static regex")
});
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19[6-9]\d|20[0-4]\d)\b").expect("static regex"));
static SALARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:salary|compensation|pay|wage)?\s*(PHP|USD|\$|₱)\s?[\d,]+(?:\.\d+)?")
        .expect("static regex")
});
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z][\w .'-]+,\s*[A-Z][\w .'-]+(?:,\s*[A-Z][\w .'-]+)?$").expect("static regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\d().+-]{7,}").expect("static regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@").expect("static regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://|www\.").expect("static regex"));
static FACILITY_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z][\w&.'-]+(?:\s+[A-Z][\w&.'-]+)*\s+(?:Hospital|Medical Center|Health Center|Medical Centre)")
        .expect("static regex")
});
static TECHNICAL_SKILLS_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = TECHNICAL_SKILLS.iter().map(|s| regex::escape(s)).collect::<Vec<_>>().join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("static regex")
});

const CERTIFICATION_PATTERNS: &[(&str, &str)] = &[
    ("NCLEX", r"(?i)NCLEX-?RN?"),
    ("IELTS", r"(?i)IELTS"),
    ("PRC License", r"(?i)PRC\s+License"),
    ("BLS", r"(?i)\bBLS\b"),
    ("ACLS", r"(?i)\bACLS\b"),
    ("OSCE", r"(?i)\bOSCE\b"),
    ("NLE", r"(?i)\bNLE\b"),
    ("PALS", r"(?i)\bPALS\b"),
    ("TNCC", r"(?i)\bTNCC\b"),
    ("CCRN", r"(?i)\bCCRN\b"),
    ("NIH Stroke Scale", r"(?i)NIH\s+Stroke\s+Scale|\bNIHSS\b"),
    ("Chemotherapy & Biotherapy Provider", r"(?i)Chemotherapy\s*(?:&|and)\s*Biotherapy"),
    ("RN License", r"(?i)\b[A-Z]{2}-RN-\d+\b"),
    ("ENPC", r"(?i)\bENPC\b"),
    ("CEN", r"(?i)\bCEN\b"),
];

/// Extract the summary/objective block. Takes up to the next ALL-CAPS header
/// or 600 chars, joining non-header lines with single spaces.
#[must_use]
pub fn extract_summary(lines: &[&str]) -> Option<String> {
    let span = find_summary_section(lines)?;
    let body: String = lines[(span.start + 1)..span.end]
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let truncated: String = body.chars().take(600).collect();
    if truncated.len() >= 20 && truncated.len() <= 1500 {
        Some(truncated)
    } else if truncated.len() > 1500 {
        Some(truncated.chars().take(1500).collect())
    } else {
        None
    }
}

/// Scan lines containing education keywords for a plausible graduation year.
#[must_use]
pub fn extract_graduation_year(lines: &[&str], current_year: i32) -> Option<i32> {
    for (i, line) in lines.iter().enumerate() {
        if !EDUCATION_CONTEXT.is_match(line) {
            continue;
        }
        if let Some(year) = find_year_in_range(line, current_year) {
            return Some(year);
        }
        let window_start = i.saturating_sub(2);
        let window_end = (i + 2).min(lines.len());
        for candidate in &lines[window_start..window_end] {
            if let Some(year) = find_year_in_range(candidate, current_year) {
                return Some(year);
            }
        }
    }
    None
}

fn find_year_in_range(line: &str, current_year: i32) -> Option<i32> {
    YEAR_RE.find_iter(line).find_map(|m| {
        let year: i32 = m.as_str().parse().ok()?;
        if (1960..=current_year + 6).contains(&year) {
            Some(year)
        } else {
            None
        }
    })
}

/// Emit each canonical credential at most once, with anchored number/score
/// extraction where the pattern provides for it.
#[must_use]
pub fn extract_certifications(text: &str) -> Vec<Certification> {
    let mut out = Vec::new();
    for (name, pattern) in CERTIFICATION_PATTERNS {
        let re = Regex::new(pattern).expect("certification regex is static and valid");
        if let Some(m) = re.find(text) {
            let context_end = (m.end() + 40).min(text.len());
            let context = &text[m.end()..context_end];
            let number = extract_trailing_number(context);
            let score = if *name == "IELTS" {
                extract_trailing_score(context)
            } else {
                None
            };
            out.push(Certification {
                cert_type: (*name).to_string(),
                number,
                score,
            });
        }
    }
    out
}

fn extract_trailing_number(context: &str) -> Option<String> {
    static NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:#]?\s*([A-Z0-9-]{4,20})").expect("static regex"));
    NUM_RE
        .captures(context)
        .map(|c| c[1].to_string())
        .filter(|s| s.chars().any(|c| c.is_ascii_digit()))
}

fn extract_trailing_score(context: &str) -> Option<String> {
    static SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d(?:\.\d)?)").expect("static regex"));
    SCORE_RE.captures(context).map(|c| c[1].to_string())
}

/// Curated facility-set membership plus a generic "Proper Noun(s) Hospital"
/// phrase scan.
#[must_use]
pub fn extract_hospitals(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for facility in KNOWN_FACILITIES {
        if lexicons::matches_any(text, std::slice::from_ref(facility)) {
            found.push((*facility).to_string());
        }
    }
    for m in FACILITY_PHRASE_RE.find_iter(text) {
        let phrase = m.as_str();
        if phrase.len() >= 10 && phrase.len() <= 80 && !found.iter().any(|f| f.eq_ignore_ascii_case(phrase)) {
            found.push(phrase.to_string());
        }
    }
    found
}

/// Curated nursing-skills membership, plus a skills-section line split and a
/// small technical-terms scan.
#[must_use]
pub fn extract_skills(lines: &[&str], text: &str) -> Vec<String> {
    let mut skills = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for skill in NURSING_SKILLS {
        if lexicons::matches_any(text, std::slice::from_ref(skill)) && seen.insert(skill.to_lowercase()) {
            skills.push((*skill).to_string());
        }
    }

    if let Some(span) = find_skills_section(lines) {
        for line in &lines[(span.start + 1)..span.end] {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value_side = line.split_once(':').map_or(*line, |(_, v)| v);
            for token in value_side.split([',', ';', '|']) {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                if token.split_whitespace().count() > 6 {
                    continue;
                }
                if seen.insert(token.to_lowercase()) {
                    skills.push(token.to_string());
                }
            }
        }
    }

    for m in TECHNICAL_SKILLS_RE.find_iter(text) {
        let matched = m.as_str();
        if let Some(canonical) = lexicons::find_first_match(matched, TECHNICAL_SKILLS) {
            if seen.insert(canonical.to_lowercase()) {
                skills.push(canonical.to_string());
            }
        }
    }

    skills
}

/// First match of a currency-prefixed number.
#[must_use]
pub fn extract_salary(text: &str) -> Option<String> {
    SALARY_RE.find(text).map(|m| m.as_str().trim().to_string())
}

/// First plausible "City, Region[, Country]" line within the first ~1500 chars
/// that isn't a phone/email/URL/header/institution line.
#[must_use]
pub fn extract_address(lines: &[&str]) -> Option<String> {
    let mut consumed = 0usize;
    for line in lines {
        consumed += line.len();
        if consumed > 1500 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.len() < 10 || trimmed.len() > 150 {
            continue;
        }
        if PHONE_RE.is_match(trimmed) && trimmed.chars().filter(|c| c.is_ascii_digit()).count() > 6 {
            continue;
        }
        if EMAIL_RE.is_match(trimmed) || URL_RE.is_match(trimmed) {
            continue;
        }
        if lexicons::matches_any(trimmed, COMPANY_KEYWORDS) {
            continue;
        }
        if crate::core::resume::sections::is_all_caps_header(trimmed, 8) {
            continue;
        }
        if ADDRESS_RE.is_match(trimmed) {
            return Some(trimmed.to_string());
        }
        if REGION_KEYWORDS.iter().any(|k| trimmed.to_lowercase().contains(&k.to_lowercase())) {
            return Some(trimmed.to_string());
        }
    }
    None
}

const REGION_KEYWORDS: &[&str] = &[
    "Manila", "Cebu", "Davao", "Quezon City", "Makati", "Philippines", "USA",
    "United States", "California", "Texas", "New York", "Florida",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_summary_within_bounds() {
        let text = "PROFESSIONAL SUMMARY\nDedicated registered nurse with five years of ICU experience across two hospitals.\n\nEXPERIENCE\nStuff";
        let lines: Vec<&str> = text.lines().collect();
        let summary = extract_summary(&lines).unwrap();
        assert!(summary.contains("registered nurse"));
    }

    #[test]
    fn extracts_graduation_year_in_range() {
        let lines: Vec<&str> = "Bachelor of Science in Nursing, graduated 2016".lines().collect();
        assert_eq!(extract_graduation_year(&lines, 2026), Some(2016));
    }

    #[test]
    fn rejects_graduation_year_out_of_range() {
        let lines: Vec<&str> = "University founded 1899, Bachelor of Science".lines().collect();
        assert_eq!(extract_graduation_year(&lines, 2026), None);
    }

    #[test]
    fn extracts_nclex_certification() {
        let certs = extract_certifications("Passed NCLEX-RN with license number 1234567 in 2019.");
        assert!(certs.iter().any(|c| c.cert_type == "NCLEX"));
    }

    #[test]
    fn extracts_rn_license_with_state_prefix() {
        let certs = extract_certifications("Holds active CA-RN-492817 license.");
        let rn = certs.iter().find(|c| c.cert_type == "RN License").unwrap();
        assert_eq!(rn.number.as_deref(), Some("CA-RN-492817"));
    }

    #[test]
    fn extracts_known_facility() {
        let hospitals = extract_hospitals("Staff Nurse at St. Luke's Medical Center, Quezon City.");
        assert!(hospitals.contains(&"St. Luke's Medical Center".to_string()));
    }

    #[test]
    fn extracts_skills_from_curated_list_and_section() {
        let text = "SKILLS\nIV Therapy, Wound Care, Triage\n\nEXPERIENCE\nWorked with ventilator management daily.";
        let lines: Vec<&str> = text.lines().collect();
        let skills = extract_skills(&lines, text);
        assert!(skills.iter().any(|s| s.eq_ignore_ascii_case("IV Therapy")));
        assert!(skills.iter().any(|s| s.eq_ignore_ascii_case("Ventilator Management")));
    }

    #[test]
    fn extracts_technical_skills_via_global_regex_scan() {
        let text = "EXPERIENCE\nCharted patient vitals in Epic and ran reports with Microsoft Excel and SQL queries.";
        let lines: Vec<&str> = text.lines().collect();
        let skills = extract_skills(&lines, text);
        assert!(skills.iter().any(|s| s.eq_ignore_ascii_case("Epic")));
        assert!(skills.iter().any(|s| s.eq_ignore_ascii_case("Microsoft Excel")));
        assert!(skills.iter().any(|s| s.eq_ignore_ascii_case("SQL")));
    }

    #[test]
    fn technical_skills_regex_respects_word_boundaries() {
        let lines: Vec<&str> = Vec::new();
        let skills = extract_skills(&lines, "Caring for patients requires attention.");
        assert!(!skills.iter().any(|s| s.eq_ignore_ascii_case("R")));
    }

    #[test]
    fn extracts_salary_token() {
        assert_eq!(extract_salary("Expected salary: PHP 50,000 monthly"), Some("PHP 50,000".to_string()));
    }

    #[test]
    fn extracts_address_line() {
        let lines: Vec<&str> = "Jane Doe\nQuezon City, Metro Manila, Philippines\nSUMMARY".lines().collect();
        assert_eq!(extract_address(&lines), Some("Quezon City, Metro Manila, Philippines".to_string()));
    }

    #[test]
    fn address_skips_phone_and_email_lines() {
        let lines: Vec<&str> = "+63 912 345 6789\njane.doe@example.com\nManila, Philippines".lines().collect();
        assert_eq!(extract_address(&lines), Some("Manila, Philippines".to_string()));
    }
}
