//! Transformation catalog - pure word -> variants functions
//!
//! Simple transforms return one string. The combinatorial ones
//! (`FullLeetGenerator`, `CaseGenerator`, `PermutationGenerator`) are lazy
//! iterators that report their total size up front; they can grow
//! exponentially with word length, so callers must check `total()` against
//! a budget before draining them.

mod cases;
mod catalog;
mod leet;
mod permute;
mod range;
mod recipe;

pub use cases::CaseGenerator;
pub use catalog::{
    acronym, capitalize, double, leet_all, lower, punctuation_variants, reverse,
    simple_leet_variants, swap_case, upper, VariantSet,
};
pub use leet::FullLeetGenerator;
pub use permute::PermutationGenerator;
pub use range::NumberRange;
pub use recipe::{Recipe, RecipeStep};

/// Leet substitution rules, in application order.
///
/// The first replacement of each rule is its primary one. No primary
/// replacement is itself a source letter, so applying every rule at once
/// gives the same result in any order.
pub const LEET_RULES: &[(char, &[char])] = &[
    ('s', &['$', 'z']),
    ('e', &['3']),
    ('a', &['4', '@']),
    ('o', &['0']),
    ('i', &['1', '!']),
    ('l', &['1', '!']),
    ('t', &['7']),
    ('b', &['8']),
    ('z', &['2']),
];

/// Symbols appended by the punctuation transform
pub const PUNCTUATION: &[char] = &['!', '@', '$', '%', '^', '&', '*', '(', ')'];

/// Leet alternatives for a character, matched case-insensitively
pub fn leet_alternatives(ch: char) -> Option<&'static [char]> {
    let lower = ch.to_lowercase().next().unwrap_or(ch);
    LEET_RULES
        .iter()
        .find(|(source, _)| *source == lower)
        .map(|(_, reps)| *reps)
}
