//! Wordlist analysis report

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::score::strength;

fn pattern(re: &str) -> Result<Regex> {
    Regex::new(re).map_err(|e| crate::internal_error!(e.to_string()))
}

/// Widest bar in the length chart
const CHART_WIDTH: usize = 40;

/// Composition, strength and length statistics of a wordlist
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordlistStats {
    pub total: usize,
    pub with_lowercase: usize,
    pub with_uppercase: usize,
    pub with_digits: usize,
    pub with_specials: usize,
    /// Count per strength score 0-4
    pub strength_counts: [usize; 5],
    pub strength_sum: usize,
    /// Count per byte length, ascending
    pub lengths: BTreeMap<usize, usize>,
}

impl WordlistStats {
    pub fn analyze<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let digit = pattern(r"[0-9]")?;
        let special = pattern(r"[^A-Za-z0-9]")?;
        let upper = pattern(r"[A-Z]")?;
        let lower = pattern(r"[a-z]")?;

        let mut stats = Self {
            total: words.len(),
            ..Default::default()
        };

        for word in words {
            let word = word.as_ref();
            stats.with_digits += digit.is_match(word) as usize;
            stats.with_specials += special.is_match(word) as usize;
            stats.with_uppercase += upper.is_match(word) as usize;
            stats.with_lowercase += lower.is_match(word) as usize;
            *stats.lengths.entry(word.len()).or_insert(0) += 1;

            let score = strength(word) as usize;
            stats.strength_counts[score] += 1;
            stats.strength_sum += score;
        }

        Ok(stats)
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }

    pub fn average_strength(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.strength_sum as f64 / self.total as f64
        }
    }

    /// Bar length for each length bucket, scaled so the largest is 40
    pub fn chart_bars(&self) -> Vec<(usize, usize, usize)> {
        let max = self.lengths.values().copied().max().unwrap_or(0);
        if max == 0 {
            return Vec::new();
        }
        self.lengths
            .iter()
            .map(|(&len, &count)| {
                let bar = (count * CHART_WIDTH / max).max(1);
                (len, count, bar)
            })
            .collect()
    }
}

impl fmt::Display for WordlistStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pass-forge v{} Analysis Report", crate::VERSION)?;
        writeln!(f, "====================================")?;
        writeln!(f, "Total words: {}", self.total)?;
        writeln!(f, "Contains lowercase: {} ({:.1}%)", self.with_lowercase, self.percent(self.with_lowercase))?;
        writeln!(f, "Contains uppercase: {} ({:.1}%)", self.with_uppercase, self.percent(self.with_uppercase))?;
        writeln!(f, "Contains numbers:   {} ({:.1}%)", self.with_digits, self.percent(self.with_digits))?;
        writeln!(f, "Contains specials:  {} ({:.1}%)", self.with_specials, self.percent(self.with_specials))?;

        writeln!(f)?;
        writeln!(f, "Strength Distribution (0-4):")?;
        for (score, &count) in self.strength_counts.iter().enumerate() {
            writeln!(f, "  Score {}: {:6} ({:5.1}%)", score, count, self.percent(count))?;
        }
        writeln!(f, "Avg Strength: {:.2} / 4.00", self.average_strength())?;

        writeln!(f)?;
        writeln!(f, "Length Distribution Chart:")?;
        for (len, count, bar) in self.chart_bars() {
            writeln!(f, "{:2} [{:6}] {}", len, count, "█".repeat(bar))?;
        }
        Ok(())
    }
}
