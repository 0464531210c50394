//! Missing-keyword context: where an unmatched job keyword sits in the job text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::keywords::KeywordWeightMap;
use crate::scoring::tokenizer::tokenize;

/// Maximum tokens reported on each side of a keyword.
pub const CONTEXT_WINDOW: usize = 3;

/// Up to `CONTEXT_WINDOW` job-text tokens before and after a keyword occurrence.
/// Serialized as the pair `[before, after]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct KeywordContext {
    pub before: String,
    pub after: String,
}

impl From<(String, String)> for KeywordContext {
    fn from((before, after): (String, String)) -> Self {
        Self { before, after }
    }
}

impl From<KeywordContext> for (String, String) {
    fn from(context: KeywordContext) -> Self {
        (context.before, context.after)
    }
}

/// keyword → context of its first occurrence in the job text.
pub type MissingKeywordContext = BTreeMap<String, KeywordContext>;

/// Start indices of every exact token-slice occurrence of `keyword_tokens`, in order.
/// An empty keyword has no occurrences.
pub fn find_keyword_occurrences<'a>(
    tokens: &'a [String],
    keyword_tokens: &'a [String],
) -> impl Iterator<Item = usize> + 'a {
    let k = keyword_tokens.len();
    tokens
        .windows(k.max(1))
        .enumerate()
        .filter(move |(_, window)| k > 0 && *window == keyword_tokens)
        .map(|(i, _)| i)
}

/// Context around the span `[start, start + len)`, clipped at the ends of `tokens`.
pub fn context_window(tokens: &[String], start: usize, len: usize) -> KeywordContext {
    let start = start.min(tokens.len());
    let before_start = start.saturating_sub(CONTEXT_WINDOW);
    let after_start = (start + len).min(tokens.len());
    let after_end = (after_start + CONTEXT_WINDOW).min(tokens.len());

    KeywordContext {
        before: tokens[before_start..start].join(" "),
        after: tokens[after_start..after_end].join(" "),
    }
}

/// Reports context for every job keyword the résumé did not match.
///
/// Regex hits and token slices are not perfectly equivalent (hyphenated compounds,
/// trailing punctuation), so a keyword may have no locatable occurrence; it then maps
/// to an empty context.
pub fn extract_missing_context(
    jd_keywords: &KeywordWeightMap,
    matched_keywords: &KeywordWeightMap,
    job_tokens: &[String],
) -> MissingKeywordContext {
    jd_keywords
        .keys()
        .filter(|keyword| !matched_keywords.contains_key(*keyword))
        .map(|keyword| {
            let keyword_tokens = tokenize(keyword);
            let context = find_keyword_occurrences(job_tokens, &keyword_tokens)
                .next()
                .map(|start| context_window(job_tokens, start, keyword_tokens.len()))
                .unwrap_or_else(|| {
                    debug!("Context not found for missing keyword '{keyword}'");
                    KeywordContext::default()
                });
            (keyword.clone(), context)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        tokenize(text)
    }

    fn weights(pairs: &[(&str, u8)]) -> KeywordWeightMap {
        pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect()
    }

    #[test]
    fn test_finds_every_occurrence_in_order() {
        let tokens = toks("rust and rust and more rust");
        let found: Vec<usize> = find_keyword_occurrences(&tokens, &toks("rust")).collect();
        assert_eq!(found, vec![0, 2, 5]);
    }

    #[test]
    fn test_multi_token_occurrence() {
        let tokens = toks("we want machine learning and deep learning");
        let found: Vec<usize> =
            find_keyword_occurrences(&tokens, &toks("machine learning")).collect();
        assert_eq!(found, vec![2]);
    }

    #[test]
    fn test_empty_or_oversized_keyword_has_no_occurrences() {
        let tokens = toks("short text");
        assert_eq!(find_keyword_occurrences(&tokens, &[]).count(), 0);
        assert_eq!(
            find_keyword_occurrences(&tokens, &toks("short text that is longer")).count(),
            0
        );
        assert_eq!(find_keyword_occurrences(&[], &toks("x")).count(), 0);
    }

    #[test]
    fn test_window_clips_at_both_ends() {
        let tokens = toks("a b c d e f g h");
        assert_eq!(
            context_window(&tokens, 4, 1),
            KeywordContext {
                before: "b c d".to_string(),
                after: "f g h".to_string()
            }
        );
        assert_eq!(
            context_window(&tokens, 0, 2),
            KeywordContext {
                before: String::new(),
                after: "c d e".to_string()
            }
        );
        assert_eq!(
            context_window(&tokens, 6, 2),
            KeywordContext {
                before: "d e f".to_string(),
                after: String::new()
            }
        );
    }

    #[test]
    fn test_context_serializes_as_pair() {
        let context = KeywordContext {
            before: "looking for".to_string(),
            after: String::new(),
        };
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json, serde_json::json!(["looking for", ""]));

        let back: KeywordContext = serde_json::from_value(json).unwrap();
        assert_eq!(back, context);
    }

    #[test]
    fn test_reports_first_occurrence_of_unmatched_keywords() {
        let job = toks("Looking for Python and AWS. AWS certification is a plus");
        let missing = extract_missing_context(
            &weights(&[("python", 4), ("aws", 4)]),
            &weights(&[("python", 4)]),
            &job,
        );
        assert_eq!(missing.len(), 1);
        assert_eq!(
            missing["aws"],
            KeywordContext {
                before: "for python and".to_string(),
                after: "aws certification is".to_string()
            }
        );
    }

    #[test]
    fn test_unlocatable_keyword_maps_to_empty_context() {
        // The tokenizer turns "ci-cd" into "cicd", which never occurs in the job tokens.
        let job = toks("Experience with CI / CD pipelines");
        let missing = extract_missing_context(&weights(&[("ci-cd pipelines", 4)]), &weights(&[]), &job);
        assert_eq!(missing["ci-cd pipelines"], KeywordContext::default());
    }

    #[test]
    fn test_context_never_exceeds_window() {
        let job = toks("one two three four five six seven eight nine ten");
        let jd = weights(&[("five", 4), ("one", 4), ("ten", 4), ("four five six", 4)]);
        let missing = extract_missing_context(&jd, &weights(&[]), &job);
        for context in missing.values() {
            assert!(context.before.split_whitespace().count() <= CONTEXT_WINDOW);
            assert!(context.after.split_whitespace().count() <= CONTEXT_WINDOW);
        }
        assert_eq!(missing["four five six"].before, "one two three");
        assert_eq!(missing["four five six"].after, "seven eight nine");
    }
}
