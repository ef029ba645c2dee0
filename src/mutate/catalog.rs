//! Single-output transforms and the simple affix families

use std::collections::HashSet;

use super::{LEET_RULES, PUNCTUATION};

/// Insertion-ordered set of variants for one word
#[derive(Debug, Clone, Default)]
pub struct VariantSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl VariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variant, returning false if it was already present
    pub fn insert(&mut self, variant: String) -> bool {
        if self.seen.contains(&variant) {
            return false;
        }
        self.seen.insert(variant.clone());
        self.ordered.push(variant);
        true
    }

    pub fn contains(&self, variant: &str) -> bool {
        self.seen.contains(variant)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ordered.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

impl Extend<String> for VariantSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for variant in iter {
            self.insert(variant);
        }
    }
}

impl IntoIterator for VariantSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.into_iter()
    }
}

pub fn upper(word: &str) -> String {
    word.to_uppercase()
}

pub fn lower(word: &str) -> String {
    word.to_lowercase()
}

/// Uppercase the first code point, leave the rest untouched
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Toggle ASCII letter case; every other character is kept
pub fn swap_case(word: &str) -> String {
    word.chars()
        .map(|ch| {
            if ch.is_ascii_lowercase() {
                ch.to_ascii_uppercase()
            } else if ch.is_ascii_uppercase() {
                ch.to_ascii_lowercase()
            } else {
                ch
            }
        })
        .collect()
}

/// Code-point reversal
pub fn reverse(word: &str) -> String {
    word.chars().rev().collect()
}

pub fn double(word: &str) -> String {
    format!("{}{}", word, word)
}

/// Every leet rule's primary replacement applied at once
pub fn leet_all(word: &str) -> String {
    word.chars()
        .map(|ch| {
            LEET_RULES
                .iter()
                .find(|(source, _)| *source == ch)
                .map_or(ch, |(_, reps)| reps[0])
        })
        .collect()
}

/// One variant per leet rule, plus the cumulative variant
pub fn simple_leet_variants(word: &str) -> Vec<String> {
    let mut variants: Vec<String> = LEET_RULES
        .iter()
        .map(|(source, reps)| word.replace(*source, &reps[0].to_string()))
        .collect();
    variants.push(leet_all(word));
    variants
}

/// `word` followed by each punctuation symbol
pub fn punctuation_variants(word: &str) -> Vec<String> {
    PUNCTUATION
        .iter()
        .map(|symbol| format!("{}{}", word, symbol))
        .collect()
}

/// First code point of each input word, concatenated
pub fn acronym<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .filter_map(|word| word.as_ref().chars().next())
        .collect()
}
