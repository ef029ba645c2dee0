use super::CharClasses;

/// Features that make up the efficacy bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Feature {
    AllUpper = 1,
    FirstUpper = 2,
    AllLower = 4,
    HasLower = 8,
    HasUpper = 16,
    EndsInNumber = 32,
    EndsInSymbol = 64,
    Leet = 128,
    HasNumber = 256,
    HasSymbol = 512,
    OnlyNumbers = 1024,
}

impl Feature {
    pub fn bit(self) -> u32 {
        self as u32
    }
}

/// Weight used for any length or mask missing from the tables
const FALLBACK_WEIGHT: f64 = 0.0001;

/// Observed share of passwords by byte length
const LENGTH_WEIGHTS: [(usize, f64); 24] = [
    (1, 0.00034),
    (2, 0.0023),
    (3, 0.017),
    (4, 0.127),
    (5, 1.81),
    (6, 13.58),
    (7, 17.47),
    (8, 20.68),
    (9, 15.27),
    (10, 14.04),
    (11, 6.03),
    (12, 3.86),
    (13, 2.53),
    (14, 1.73),
    (15, 1.12),
    (16, 0.82),
    (17, 0.25),
    (18, 0.16),
    (19, 0.10),
    (20, 0.08),
    (21, 0.05),
    (22, 0.04),
    (23, 0.03),
    (24, 0.02),
];

/// Observed share of passwords by feature mask
const COMBO_WEIGHTS: [(u32, f64); 20] = [
    (16, 0.78),
    (4, 0.76),
    (20, 0.76),
    (256, 0.49),
    (272, 0.29),
    (260, 0.29),
    (276, 0.29),
    (32, 0.28),
    (288, 0.28),
    (48, 0.27),
    (304, 0.27),
    (36, 0.27),
    (52, 0.27),
    (292, 0.27),
    (1024, 0.19),
    (1280, 0.19),
    (8, 0.03),
    (1, 0.02),
    (9, 0.02),
    (128, 0.019),
];

fn length_weight(len: usize) -> f64 {
    LENGTH_WEIGHTS
        .iter()
        .find(|(l, _)| *l == len)
        .map_or(FALLBACK_WEIGHT, |(_, w)| *w)
}

fn combo_weight(mask: u32) -> f64 {
    COMBO_WEIGHTS
        .iter()
        .find(|(m, _)| *m == mask)
        .map_or(FALLBACK_WEIGHT, |(_, w)| *w)
}

/// Build the feature bitmask of a word
pub fn feature_mask(word: &str) -> u32 {
    let classes = CharClasses::of(word);
    let mut mask = 0u32;
    let mut set = |feature: Feature, on: bool| {
        if on {
            mask |= feature.bit();
        }
    };

    set(
        Feature::AllLower,
        classes.lower && !classes.upper && !classes.digit && !classes.other,
    );
    set(
        Feature::AllUpper,
        classes.upper && !classes.lower && !classes.digit && !classes.other,
    );
    set(Feature::HasLower, classes.lower);
    set(Feature::HasUpper, classes.upper);
    set(Feature::HasNumber, classes.digit);
    set(Feature::HasSymbol, classes.other);
    set(
        Feature::OnlyNumbers,
        classes.digit && !classes.lower && !classes.upper && !classes.other,
    );

    let mut chars = word.chars();
    let first = chars.next();
    let second = chars.next();
    set(
        Feature::FirstUpper,
        first.is_some_and(|c| c.is_ascii_uppercase())
            && second.is_some_and(|c| !c.is_ascii_uppercase()),
    );

    if let Some(&last) = word.as_bytes().last() {
        set(Feature::EndsInNumber, last.is_ascii_digit());
        set(Feature::EndsInSymbol, !last.is_ascii_alphanumeric());
    }

    set(
        Feature::Leet,
        (classes.digit || classes.other) && (classes.lower || classes.upper),
    );

    mask
}

/// Likelihood weight used by the efficacy sort, higher sorts first
pub fn efficacy(word: &str) -> f64 {
    length_weight(word.len()) * combo_weight(feature_mask(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_masks() {
        assert_eq!(feature_mask("password"), 4 | 8);
        assert_eq!(feature_mask("PASSWORD"), 1 | 16);
        assert_eq!(feature_mask("123456"), 256 | 1024 | 32);
        // leading capital, then lowercase and a trailing digit
        assert_eq!(feature_mask("Password1"), 2 | 8 | 16 | 256 | 32 | 128);
        assert_eq!(feature_mask("A"), 1 | 16);
        assert_eq!(feature_mask("pass!"), 8 | 512 | 64 | 128);
        assert_eq!(feature_mask(""), 0);
    }

    #[test]
    fn test_unlisted_mask_uses_fallback() {
        // mask 12 is not in the table
        let weight = efficacy("password");
        assert!((weight - 20.68 * FALLBACK_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_unlisted_length_uses_fallback() {
        let long = "A".repeat(30);
        assert_eq!(efficacy(&long), FALLBACK_WEIGHT * FALLBACK_WEIGHT);
        assert_eq!(efficacy(""), FALLBACK_WEIGHT * FALLBACK_WEIGHT);
    }

    #[test]
    fn test_common_lengths_rank_higher() {
        assert!(efficacy("abcdefgh") > efficacy("abcdefghijklmnopqrstu"));
        assert!(efficacy("abcdefgh") > efficacy("abc"));
    }
}
