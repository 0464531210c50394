use tracing::debug;

use crate::scoring::keywords::{build_jd_keywords, KeywordCatalog, KeywordWeightMap};
use crate::scoring::sections::{Section, SectionedText};

/// Keywords found in both documents, alongside the job-side map they were drawn from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMatches {
    pub matched: KeywordWeightMap,
    pub jd: KeywordWeightMap,
}

/// Attributes each shared keyword to the highest-priority résumé section that mentions it.
///
/// Sections are walked SKILLS → EXPERIENCE → EDUCATION → OTHER and the first attribution
/// sticks. A catalog keyword takes its section's weight in both maps; an extra keyword is
/// credited at the SKILLS weight and leaves the job-side weight alone.
pub fn match_sections(
    sections: &SectionedText,
    job_text: &str,
    catalog: &KeywordCatalog,
) -> KeywordMatches {
    let job_keywords = build_jd_keywords(job_text, catalog);
    let extra_weight = Section::Skills.weight();

    let mut matched = KeywordWeightMap::new();
    let mut jd = job_keywords.weights;

    for section in sections.sections() {
        if sections.is_blank(section) {
            continue;
        }
        let weight = section.weight();
        let lowered = sections.text(section).to_lowercase();

        // catalog_hits are already confirmed in the job text
        for pattern in &job_keywords.catalog_hits {
            let keyword = pattern.keyword();
            if !matched.contains_key(keyword) && pattern.is_match(&lowered) {
                matched.insert(keyword.to_string(), weight);
                jd.insert(keyword.to_string(), weight);
            }
        }

        for pattern in &job_keywords.extras {
            let keyword = pattern.keyword();
            if !matched.contains_key(keyword) && pattern.is_match(&lowered) {
                matched.insert(keyword.to_string(), extra_weight);
            }
        }
    }

    debug!(
        "Matched {} of {} job keywords ({} catalog hits, {} extras)",
        matched.len(),
        jd.len(),
        job_keywords.catalog_hits.len(),
        job_keywords.extras.len()
    );

    KeywordMatches { matched, jd }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::sections::segment;

    fn catalog(keywords: &[&str]) -> KeywordCatalog {
        KeywordCatalog::new(keywords.iter().copied())
    }

    fn weights(pairs: &[(&str, u8)]) -> KeywordWeightMap {
        pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect()
    }

    #[test]
    fn test_skills_section_match_gets_weight_four() {
        let m = match_sections(
            &segment("SKILLS\npython sql"),
            "Looking for Python and AWS",
            &catalog(&["python", "aws", "sql"]),
        );
        assert_eq!(m.matched, weights(&[("python", 4)]));
        assert_eq!(m.jd, weights(&[("aws", 4), ("python", 4)]));
    }

    #[test]
    fn test_first_section_in_priority_order_wins() {
        let resume = "Education\nStudied python\nExperience\nShipped python services\nSkills\nrust";
        let m = match_sections(
            &segment(resume),
            "python and rust engineers",
            &catalog(&["python", "rust"]),
        );
        // python appears in EXPERIENCE and EDUCATION; EXPERIENCE outranks EDUCATION
        assert_eq!(m.matched, weights(&[("python", 3), ("rust", 4)]));
        assert_eq!(m.jd, weights(&[("python", 3), ("rust", 4)]));
    }

    #[test]
    fn test_lower_section_weight_overrides_default_jd_weight() {
        let m = match_sections(
            &segment("Jane Doe\nknows docker"),
            "docker required",
            &catalog(&["docker"]),
        );
        assert_eq!(m.matched, weights(&[("docker", 1)]));
        assert_eq!(m.jd, weights(&[("docker", 1)]));
    }

    #[test]
    fn test_catalog_keyword_must_appear_in_job_text() {
        let m = match_sections(
            &segment("Skills\npython sql"),
            "We need python",
            &catalog(&["python", "sql"]),
        );
        assert!(!m.matched.contains_key("sql"));
        assert!(!m.jd.contains_key("sql"));
    }

    #[test]
    fn test_extra_keywords_credit_skills_weight_from_any_section() {
        let m = match_sections(
            &segment("Experience\nIntegrated EtherCAT drives"),
            "Experience with EtherCAT fieldbus",
            &KeywordCatalog::default(),
        );
        assert_eq!(m.matched, weights(&[("ethercat", 4)]));
        assert_eq!(m.jd, weights(&[("ethercat", 4)]));
    }

    #[test]
    fn test_multi_word_keyword_matches_in_both_texts() {
        let m = match_sections(
            &segment("Experience\nBuilt machine learning pipelines"),
            "Strong machine learning background",
            &catalog(&["machine learning"]),
        );
        assert_eq!(m.matched, weights(&[("machine learning", 3)]));
    }

    #[test]
    fn test_empty_resume_matches_nothing() {
        let m = match_sections(&segment(""), "python and sql", &catalog(&["python", "sql"]));
        assert!(m.matched.is_empty());
        assert_eq!(m.jd, weights(&[("python", 4), ("sql", 4)]));
    }

    #[test]
    fn test_matched_is_subset_of_jd() {
        let resume = "Skills\nRust, Go, Kubernetes, GCP\nExperience\nRan AWS and GCP fleets";
        let job = "Platform engineer: Rust or Go, Kubernetes, AWS, GCP, Terraform";
        let m = match_sections(
            &segment(resume),
            job,
            &catalog(&["rust", "go", "kubernetes", "terraform"]),
        );
        assert!(m.matched.keys().all(|k| m.jd.contains_key(k)));
    }
}
