//! Keyword extraction: which catalog and acronym-like keywords the job text actually contains.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use regex::Regex;
use tracing::warn;

use crate::scoring::sections::Section;

/// keyword → weight (1–4). Key-sorted so output order never depends on insertion order.
pub type KeywordWeightMap = BTreeMap<String, u8>;

/// Minimum uppercase characters for a job-text token to count as an extra keyword.
const MIN_UPPERCASE_FOR_EXTRA: usize = 2;

/// Lowercase keyword list for one job category. Order is kept, duplicates are not.
#[derive(Debug, Clone, Default)]
pub struct KeywordCatalog {
    keywords: Vec<String>,
    index: HashSet<String>,
}

impl KeywordCatalog {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && catalog.index.insert(keyword.clone()) {
                catalog.keywords.push(keyword);
            }
        }
        catalog
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.index.contains(keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Whole-word, case-insensitive matcher for a single keyword or phrase.
///
/// Word boundaries anchor only the outer edges of the phrase, so "machine learning"
/// matches the literal phrase and "java" does not match inside "javascript".
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    keyword: String,
    regex: Regex,
}

impl KeywordPattern {
    pub fn compile(keyword: &str) -> Option<Self> {
        let keyword = keyword.to_lowercase();
        let pattern = format!(r"\b{}\b", regex::escape(&keyword));
        match Regex::new(&pattern) {
            Ok(regex) => Some(Self { keyword, regex }),
            Err(e) => {
                warn!("Skipping keyword '{keyword}': pattern failed to compile: {e}");
                None
            }
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// `lowered` must already be lowercased.
    pub fn is_match(&self, lowered: &str) -> bool {
        self.regex.is_match(lowered)
    }
}

/// Keywords present in the job text, plus the compiled patterns the matcher reuses.
#[derive(Debug, Clone, Default)]
pub struct JobKeywords {
    /// Every keyword found in the job text, at the default SKILLS weight.
    pub weights: KeywordWeightMap,
    /// Catalog keywords confirmed in the job text.
    pub catalog_hits: Vec<KeywordPattern>,
    /// Acronym-like job-text tokens that the catalog does not know.
    pub extras: Vec<KeywordPattern>,
}

/// Collects whitespace-delimited job-text tokens with at least two uppercase characters
/// (acronyms, product names such as "EtherCAT") that are not catalog keywords.
///
/// Sentence punctuation at the token edges is dropped ("AWS," → "aws"); inner punctuation
/// stays ("RS-485" → "rs-485").
pub fn detect_extra_keywords(job_text: &str, catalog: &KeywordCatalog) -> BTreeSet<String> {
    job_text
        .split_whitespace()
        .filter(|word| word.chars().filter(|c| c.is_uppercase()).count() >= MIN_UPPERCASE_FOR_EXTRA)
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|word| !word.is_empty() && !catalog.contains(word))
        .collect()
}

/// Builds the job-side keyword map. Both extra keywords and catalog hits start at the
/// SKILLS weight; the matcher later re-weights catalog hits by résumé section.
pub fn build_jd_keywords(job_text: &str, catalog: &KeywordCatalog) -> JobKeywords {
    let default_weight = Section::Skills.weight();
    let lowered = job_text.to_lowercase();
    let mut job_keywords = JobKeywords::default();

    for extra in detect_extra_keywords(job_text, catalog) {
        job_keywords.weights.insert(extra.clone(), default_weight);
        if let Some(pattern) = KeywordPattern::compile(&extra) {
            job_keywords.extras.push(pattern);
        }
    }

    for pattern in catalog.iter().filter_map(KeywordPattern::compile) {
        if pattern.is_match(&lowered) {
            job_keywords
                .weights
                .insert(pattern.keyword().to_string(), default_weight);
            job_keywords.catalog_hits.push(pattern);
        }
    }

    job_keywords
}
