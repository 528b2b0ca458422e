//! Section Indexer
//!
//! Locates resume section headers and builds the exclusion mask the
//! experience extractor uses to avoid treating education/awards/clinical
//! lines as job entries. Mirrors the teacher's `ResumeParser::extract_sections`
//! keyword-table idiom, generalised to track byte spans instead of only the
//! section's joined content.

/// Headers that open a region the experience extractor must skip.
const EXCLUDE_FROM_EXPERIENCE_HEADERS: &[&str] = &[
    "EDUCATION",
    "EDUCATIONAL BACKGROUND",
    "EDUCATIONAL ATTAINMENT",
    "ACADEMIC BACKGROUND",
    "ACADEMIC QUALIFICATIONS",
    "HONORS & AWARDS",
    "HONORS AND AWARDS",
    "SEMINARS/TRAININGS ATTENDED",
    "SEMINARS AND TRAININGS ATTENDED",
    "CLINICAL INTERNSHIP",
    "PERSONAL INFORMATION",
    "CHARACTER REFERENCES",
    "MEMBERSHIPS",
    "LICENSES & CERTIFICATIONS",
    "LICENSES AND CERTIFICATIONS",
    "CONTINUING EDUCATION",
    "ADDITIONAL INFORMATION",
];

const EDUCATION_HEADERS: &[&str] = &[
    "EDUCATIONAL BACKGROUND",
    "EDUCATIONAL ATTAINMENT",
    "ACADEMIC BACKGROUND",
    "ACADEMIC QUALIFICATIONS",
    "EDUCATION & CERTIFICATIONS",
    "EDUCATION",
];

const SKILLS_HEADERS: &[&str] = &[
    "TECHNICAL SKILLS",
    "PROFESSIONAL SKILLS",
    "CORE COMPETENCIES",
    "CLINICAL SKILLS",
    "KEY SKILLS",
    "COMPETENCIES",
    "EXPERTISE",
    "PROFICIENCIES",
    "TECHNOLOGIES",
    "SKILLS",
];

const SUMMARY_HEADERS: &[&str] = &[
    "PROFESSIONAL SUMMARY",
    "CAREER SUMMARY",
    "EXECUTIVE SUMMARY",
    "PROFESSIONAL PROFILE",
    "PERSONAL STATEMENT",
    "CAREER OBJECTIVES",
    "CAREER OBJECTIVE",
    "OBJECTIVES",
    "OBJECTIVE",
    "ABOUT ME",
    "OVERVIEW",
    "PROFILE",
    "SUMMARY",
];

/// A `[start, end)` line-index span within the resume body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

/// A located header plus the span of lines it opens (up to the next
/// qualifying header or end of document).
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub header: &'a str,
    pub span: LineSpan,
}

/// True when `line` reads as an ALL-CAPS section header: uppercase-letter
/// ratio over 0.7 among alphabetic characters, length at least `min_len`.
#[must_use]
pub fn is_all_caps_header(line: &str, min_len: usize) -> bool {
    let trimmed = line.trim_end_matches(':').trim();
    if trimmed.len() < min_len {
        return false;
    }
    let alpha: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
    if alpha.len() < 3 {
        return false;
    }
    let upper = alpha.iter().filter(|c| c.is_uppercase()).count();
    (upper as f64 / alpha.len() as f64) > 0.7
}

fn matches_header(line: &str, headers: &[&str]) -> bool {
    let upper = line.trim().trim_end_matches(':').to_uppercase();
    headers.iter().any(|h| upper == *h || upper.starts_with(h))
}

/// Build the exclusion mask: spans of lines that must not yield experience
/// entries because a disqualifying header opened them.
#[must_use]
pub fn build_experience_exclusion_mask(lines: &[&str]) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if matches_header(lines[i], EXCLUDE_FROM_EXPERIENCE_HEADERS) {
            let start = i;
            let mut end = lines.len();
            for (j, line) in lines.iter().enumerate().skip(i + 1) {
                if is_all_caps_header(line, 8) {
                    end = j;
                    break;
                }
            }
            spans.push(LineSpan { start, end });
            i = end;
        } else {
            i += 1;
        }
    }
    spans
}

#[must_use]
pub fn is_masked(line_index: usize, mask: &[LineSpan]) -> bool {
    mask.iter().any(|s| line_index >= s.start && line_index < s.end)
}

/// Locate the first line index of a section opened by any header in `headers`.
#[must_use]
pub fn find_section_start(lines: &[&str], headers: &[&str]) -> Option<usize> {
    lines.iter().position(|line| matches_header(line, headers))
}

/// Find the education section's line span (header to next ALL-CAPS header
/// with an education-region uppercase-ratio threshold of 10).
#[must_use]
pub fn find_education_span(lines: &[&str]) -> Option<LineSpan> {
    let start = find_section_start(lines, EDUCATION_HEADERS)?;
    let mut end = lines.len();
    for (j, line) in lines.iter().enumerate().skip(start + 1) {
        if is_all_caps_header(line, 10) {
            end = j;
            break;
        }
    }
    Some(LineSpan { start, end })
}

#[must_use]
pub fn find_skills_section(lines: &[&str]) -> Option<LineSpan> {
    let start = find_section_start(lines, SKILLS_HEADERS)?;
    let mut end = lines.len();
    for (j, line) in lines.iter().enumerate().skip(start + 1) {
        if is_all_caps_header(line, 8) {
            end = j;
            break;
        }
    }
    Some(LineSpan { start, end })
}

#[must_use]
pub fn find_summary_section(lines: &[&str]) -> Option<LineSpan> {
    let start = find_section_start(lines, SUMMARY_HEADERS)?;
    let mut end = lines.len();
    for (j, line) in lines.iter().enumerate().skip(start + 1) {
        if is_all_caps_header(line, 8) {
            end = j;
            break;
        }
    }
    Some(LineSpan { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_all_caps_header() {
        assert!(is_all_caps_header("PROFESSIONAL EXPERIENCE", 8));
        assert!(!is_all_caps_header("Professional Experience", 8));
        assert!(!is_all_caps_header("RN", 8));
    }

    #[test]
    fn builds_exclusion_mask_between_headers() {
        let text = "EXPERIENCE\nJan 2020 - Present Staff Nurse\n\nEDUCATION\nBSN University\n\nPROFESSIONAL EXPERIENCE\nMore stuff";
        let lines: Vec<&str> = text.lines().collect();
        let mask = build_experience_exclusion_mask(&lines);
        assert_eq!(mask.len(), 1);
        assert!(is_masked(4, &mask));
        assert!(!is_masked(1, &mask));
        assert!(!is_masked(6, &mask));
    }

    #[test]
    fn finds_education_span() {
        let text = "SUMMARY\nBlah\n\nEDUCATION\nBSN\nUniversity\n\nSKILLS\nIV Therapy";
        let lines: Vec<&str> = text.lines().collect();
        let span = find_education_span(&lines).unwrap();
        assert_eq!(lines[span.start], "EDUCATION");
        assert_eq!(lines[span.end], "SKILLS");
    }

    #[test]
    fn no_education_section_returns_none() {
        let lines: Vec<&str> = "SUMMARY\nBlah".lines().collect();
        assert!(find_education_span(&lines).is_none());
    }
}
