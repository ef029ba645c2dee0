//! Full leet generator - every combination of leet substitutions

use super::leet_alternatives;

/// A position in the word with registered leet alternatives
#[derive(Debug, Clone)]
struct Substitution {
    position: usize,
    alternatives: &'static [char],
}

/// Lazy generator for all leet combinations of a word.
///
/// Each substitutable position is a digit in a mixed-radix counter
/// (`alternatives + 1` choices, digit 0 = the original character), so the
/// output size is the product of those radixes. Index 0 is always the
/// unmodified word.
pub struct FullLeetGenerator {
    chars: Vec<char>,
    substitutions: Vec<Substitution>,
    current_index: u64,
    total: Option<u64>,
}

impl FullLeetGenerator {
    /// Create a generator for `word`
    pub fn new(word: &str) -> Self {
        let chars: Vec<char> = word.chars().collect();
        let substitutions: Vec<Substitution> = chars
            .iter()
            .enumerate()
            .filter_map(|(position, &ch)| {
                leet_alternatives(ch).map(|alternatives| Substitution {
                    position,
                    alternatives,
                })
            })
            .collect();

        let total = substitutions.iter().try_fold(1u64, |acc, sub| {
            acc.checked_mul(sub.alternatives.len() as u64 + 1)
        });

        Self {
            chars,
            substitutions,
            current_index: 0,
            total,
        }
    }

    /// Total number of variants, `None` if it does not fit in a u64
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Whether the full output stays within `budget` variants
    pub fn fits(&self, budget: u64) -> bool {
        self.total.is_some_and(|total| total <= budget)
    }

    /// Number of substitutable positions
    pub fn positions(&self) -> usize {
        self.substitutions.len()
    }

    /// Generate the variant at a specific index
    pub fn variant_at(&self, index: u64) -> Option<String> {
        if index >= self.total? {
            return None;
        }

        let mut result = self.chars.clone();
        let mut n = index;

        for sub in self.substitutions.iter().rev() {
            let radix = sub.alternatives.len() as u64 + 1;
            let digit = (n % radix) as usize;
            n /= radix;
            if digit > 0 {
                result[sub.position] = sub.alternatives[digit - 1];
            }
        }

        Some(result.into_iter().collect())
    }

    pub fn is_exhausted(&self) -> bool {
        self.total.map_or(true, |total| self.current_index >= total)
    }
}

impl Iterator for FullLeetGenerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let variant = self.variant_at(self.current_index)?;
        self.current_index += 1;
        Some(variant)
    }
}
