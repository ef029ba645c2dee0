//! All-case permutation generator

/// Lazy generator over every upper/lower case mask of a word.
///
/// A word of `n` code points yields exactly `2^n` strings: bit `j` of the
/// mask uppercases position `j`. Non-letters read the same under either bit,
/// so the distinct count can be lower.
pub struct CaseGenerator {
    lowers: Vec<char>,
    uppers: Vec<char>,
    current_mask: u64,
    total: Option<u64>,
}

impl CaseGenerator {
    pub fn new(word: &str) -> Self {
        let lowers: Vec<char> = word
            .chars()
            .map(|ch| ch.to_lowercase().next().unwrap_or(ch))
            .collect();
        let uppers: Vec<char> = word
            .chars()
            .map(|ch| ch.to_uppercase().next().unwrap_or(ch))
            .collect();

        let total = 1u64.checked_shl(lowers.len() as u32);

        Self {
            lowers,
            uppers,
            current_mask: 0,
            total,
        }
    }

    /// `2^n`, or `None` when n >= 64
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn fits(&self, budget: u64) -> bool {
        self.total.is_some_and(|total| total <= budget)
    }

    /// Generate the variant for a specific case mask
    pub fn variant_at(&self, mask: u64) -> Option<String> {
        if mask >= self.total? {
            return None;
        }

        Some(
            (0..self.lowers.len())
                .map(|j| {
                    if (mask >> j) & 1 == 1 {
                        self.uppers[j]
                    } else {
                        self.lowers[j]
                    }
                })
                .collect(),
        )
    }
}

impl Iterator for CaseGenerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let variant = self.variant_at(self.current_mask)?;
        self.current_mask += 1;
        Some(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_letters_only() {
        let all: Vec<String> = CaseGenerator::new("ab").collect();
        assert_eq!(all, vec!["ab", "Ab", "aB", "AB"]);
    }

    #[test]
    fn test_non_letters_collapse() {
        let all: Vec<String> = CaseGenerator::new("a1").collect();
        assert_eq!(all.len(), 4);
        let distinct: HashSet<&String> = all.iter().collect();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn test_empty_word() {
        let all: Vec<String> = CaseGenerator::new("").collect();
        assert_eq!(all, vec![""]);
    }

    #[test]
    fn test_total_overflow() {
        let long = "a".repeat(70);
        let gen = CaseGenerator::new(&long);
        assert_eq!(gen.total(), None);
        assert!(!gen.fits(u64::MAX));
    }
}
