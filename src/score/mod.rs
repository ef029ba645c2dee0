//! Candidate scoring - strength filter and efficacy sort weight
//!
//! Both scores are pure functions of the candidate and are recomputed on
//! demand rather than stored.

mod efficacy;
mod strength;

pub use efficacy::{efficacy, feature_mask, Feature};
pub use strength::strength;

/// ASCII character classes present in a word
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CharClasses {
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    /// Anything that is not an ASCII letter or digit
    pub other: bool,
}

impl CharClasses {
    pub fn of(word: &str) -> Self {
        let mut classes = Self::default();
        for ch in word.chars() {
            match ch {
                'a'..='z' => classes.lower = true,
                'A'..='Z' => classes.upper = true,
                '0'..='9' => classes.digit = true,
                _ => classes.other = true,
            }
        }
        classes
    }

    pub fn count(&self) -> u8 {
        [self.lower, self.upper, self.digit, self.other]
            .iter()
            .filter(|present| **present)
            .count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classes() {
        let classes = CharClasses::of("aB3!");
        assert_eq!(classes.count(), 4);

        let classes = CharClasses::of("é");
        assert!(classes.other);
        assert!(!classes.lower);
        assert_eq!(CharClasses::of("").count(), 0);
    }
}
