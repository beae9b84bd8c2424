// Word-list content filter.
//
// Each flagged term is compiled into a case-insensitive whole-word pattern:
// the term must sit at the start of the text or after a character that is not
// an ASCII letter, digit or `_`, and likewise at its end. Text is lowercased
// before matching and terms are checked in list order, stopping at the first
// hit. "class" never matches "ass" and "stupid!" matches "stupid".

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::info;

use super::traits::{ContentFilter, Verdict};

/// The built-in flagged-term list, in match order.
pub const DEFAULT_FLAGGED_TERMS: &[&str] = &[
    "stupid",
    "idiot",
    "dumb",
    "hate",
    "kill",
    "die",
    "loser",
    "worthless",
    "pathetic",
    "ugly",
    "fat",
    "disgusting",
    "retard",
    "moron",
    "failure",
    "useless",
    "trash",
    "garbage",
    "freak",
    "crazy",
    "insane",
    "psycho",
    "fuck",
    "bitch",
];

/// A single flagged term and its compiled whole-word pattern.
#[derive(Debug, Clone)]
struct FlaggedTerm {
    word: String,
    pattern: Regex,
}

/// Content filter backed by an ordered, immutable list of flagged terms.
#[derive(Debug, Clone)]
pub struct WordListFilter {
    terms: Vec<FlaggedTerm>,
}

impl WordListFilter {
    /// Build a filter from any list of terms.
    ///
    /// Terms are trimmed and lowercased. Blank terms are skipped and
    /// duplicates keep their first position.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut compiled = Vec::new();

        for term in terms {
            let word = term.as_ref().trim().to_lowercase();
            if word.is_empty() || !seen.insert(word.clone()) {
                continue;
            }
            let pattern = whole_word_pattern(&word)
                .with_context(|| format!("Invalid flagged term: {word:?}"))?;
            compiled.push(FlaggedTerm { word, pattern });
        }

        Ok(Self { terms: compiled })
    }

    /// The built-in policy list.
    pub fn builtin() -> Result<Self> {
        Self::new(DEFAULT_FLAGGED_TERMS)
    }

    /// The built-in list followed by `extra` terms.
    pub fn extended<I, S>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut all: Vec<String> = DEFAULT_FLAGGED_TERMS.iter().map(|t| t.to_string()).collect();
        all.extend(extra.into_iter().map(|t| t.as_ref().to_string()));
        Self::new(all)
    }

    /// Load a term list file: one term per line, `#` comments and blank lines ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let terms = read_term_file(path)?;
        info!(path = %path.display(), terms = terms.len(), "Loaded flagged-term list");
        Self::new(terms)
    }

    /// The active terms, in match order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The first term (in list order) that occurs in `text` as a whole word.
    ///
    /// Diagnostic only. The verdict never carries the matched term.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.terms
            .iter()
            .find(|t| t.pattern.is_match(&lower))
            .map(|t| t.word.as_str())
    }
}

impl ContentFilter for WordListFilter {
    fn verdict(&self, text: &str) -> Verdict {
        Verdict::from(self.first_match(text).is_some())
    }
}

// Explicit neighbour classes rather than `\b`, which only works when the term
// itself starts and ends with a word character ("$hit", "tonté").
fn whole_word_pattern(word: &str) -> Result<Regex, regex_lite::Error> {
    Regex::new(&format!(
        r"(?i)(?:^|[^0-9A-Za-z_]){}(?:[^0-9A-Za-z_]|$)",
        regex_lite::escape(word)
    ))
}

/// Read flagged terms from a policy file.
pub fn read_term_file(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read flagged-term list: {}", path.display()))?;
    Ok(parse_term_list(&contents))
}

/// Parse the flagged-term file format.
pub fn parse_term_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
