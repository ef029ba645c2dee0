use super::CharClasses;

/// Heuristic strength score in `0..=4`.
///
/// One point per ASCII class present (lower, upper, digit, other). Words
/// shorter than 8 bytes are capped at 2 when above it and lose a point
/// otherwise; words of 12 bytes or more gain one.
pub fn strength(word: &str) -> u8 {
    if word.is_empty() {
        return 0;
    }

    let mut score = CharClasses::of(word).count() as i32;
    let len = word.len();

    if len < 8 {
        if score > 2 {
            score = 2;
        } else {
            score -= 1;
        }
    }
    if len >= 12 {
        score += 1;
    }

    score.clamp(0, 4) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_scores() {
        assert_eq!(strength(""), 0);
        assert_eq!(strength("cat"), 0);
        assert_eq!(strength("Cat1"), 2);
        assert_eq!(strength("password"), 1);
        assert_eq!(strength("Password1"), 3);
        assert_eq!(strength("Password123!"), 4);
        assert_eq!(strength("correcthorsebattery"), 2);
    }

    proptest! {
        #[test]
        fn strength_is_bounded(word in ".*") {
            prop_assert!(strength(&word) <= 4);
        }
    }
}
