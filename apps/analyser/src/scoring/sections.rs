//! Section segmentation: splits résumé text into SKILLS / EXPERIENCE / EDUCATION / OTHER
//! buckets using header-line heuristics.
//!
//! The heuristic is a structural proxy: a short line mentioning a header phrase moves the
//! cursor, everything else is appended to the current bucket. Misclassified lines are a
//! known limitation, not an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A header line must have fewer than this many whitespace-delimited words.
const MAX_HEADER_WORDS: usize = 5;

/// Résumé section. Each variant carries a fixed weight and a fixed set of header phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    Skills,
    Experience,
    Education,
    Other,
}

impl Section {
    /// Header detection and keyword attribution both walk sections in this order.
    pub const PRIORITY: [Section; 4] = [
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Other,
    ];

    pub fn weight(self) -> u8 {
        match self {
            Section::Skills => 4,
            Section::Experience => 3,
            Section::Education => 2,
            Section::Other => 1,
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Section::Skills => &[
                "skills",
                "technologies",
                "expertise",
                "proficiencies",
                "languages",
                "tools",
                "interest",
            ],
            Section::Experience => &[
                "experience",
                "employment",
                "projects",
                "work history",
                "responsibilities",
            ],
            Section::Education => &[
                "education",
                "enrolled",
                "academic",
                "degree",
                "certification",
                "qualification",
                "post-secondary",
                "bachelor",
                "master",
                "doctorate",
                "phd",
            ],
            Section::Other => &[],
        }
    }
}

/// Résumé text partitioned by section. All four sections are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SectionedText {
    lines: BTreeMap<Section, Vec<String>>,
}

impl Default for SectionedText {
    fn default() -> Self {
        Self {
            lines: Section::PRIORITY.iter().map(|&s| (s, Vec::new())).collect(),
        }
    }
}

impl SectionedText {
    pub fn lines(&self, section: Section) -> &[String] {
        self.lines.get(&section).map(Vec::as_slice).unwrap_or_default()
    }

    /// Section text with the original line boundaries restored.
    pub fn text(&self, section: Section) -> String {
        self.lines(section).join("\n")
    }

    /// True when the section holds nothing but whitespace.
    pub fn is_blank(&self, section: Section) -> bool {
        self.lines(section).iter().all(|l| l.trim().is_empty())
    }

    /// Every section, in priority order (`Section`'s `Ord` follows `PRIORITY`).
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.lines.keys().copied()
    }

    fn push(&mut self, section: Section, line: &str) {
        let bucket = self.lines.entry(section).or_default();
        // Leading blank lines carry no content; later ones keep the line layout intact.
        if bucket.is_empty() && line.is_empty() {
            return;
        }
        bucket.push(line.to_string());
    }
}

/// Partitions résumé text line by line. The cursor starts in OTHER; header lines move it
/// and are not themselves recorded.
pub fn segment(text: &str) -> SectionedText {
    let mut sectioned = SectionedText::default();
    let mut current = Section::Other;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        match detect_header(line) {
            Some(section) => current = section,
            None => sectioned.push(current, line),
        }
    }

    sectioned
}

/// Returns the first section (in priority order) whose header phrases appear in a short line.
fn detect_header(line: &str) -> Option<Section> {
    if line.split_whitespace().count() >= MAX_HEADER_WORDS {
        return None;
    }
    let lower = line.to_lowercase();
    Section::PRIORITY
        .into_iter()
        .find(|section| section.headers().iter().any(|h| lower.contains(h)))
}
