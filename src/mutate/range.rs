//! Numeric range affixes ("0-99", "1980-current")

use chrono::Datelike;

/// Leading ASCII digits of a token; the rest is ignored
fn leading_digits(token: &str) -> &str {
    let end = token
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(token.len());
    &token[..end]
}

/// An inclusive numeric range with optional zero padding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRange {
    start: u64,
    end: u64,
    width: Option<usize>,
}

impl NumberRange {
    /// Parse a range spec, resolving "current" to the running calendar year.
    ///
    /// Returns `None` unless the spec has exactly two dash-separated parts.
    /// A part is read up to its first non-digit, and a part with no leading
    /// digits counts as 0.
    pub fn parse(spec: &str) -> Option<Self> {
        Self::parse_with_year(spec, chrono::Local::now().year() as u64)
    }

    /// Parse with an explicit value for "current"
    pub fn parse_with_year(spec: &str, current_year: u64) -> Option<Self> {
        let parts: Vec<&str> = spec.split('-').collect();
        if parts.len() != 2 {
            return None;
        }

        let resolve = |token: &str| -> u64 {
            if token.eq_ignore_ascii_case("current") {
                current_year
            } else {
                leading_digits(token).parse().unwrap_or(0)
            }
        };

        let (start_token, end_token) = (parts[0].trim(), parts[1].trim());
        let start = resolve(start_token);
        let end = resolve(end_token);

        // zero-led start digits fix the output width
        let digits = leading_digits(start_token);
        let width = digits.starts_with('0').then_some(digits.len());

        Some(Self { start, end, width })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of values in the range (0 when start > end)
    pub fn len(&self) -> u64 {
        if self.start > self.end {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Format one value with this range's padding
    pub fn format(&self, value: u64) -> String {
        match self.width {
            Some(width) => format!("{:0width$}", value, width = width),
            None => value.to_string(),
        }
    }

    /// Every formatted value in ascending order
    pub fn values(&self) -> impl Iterator<Item = String> + '_ {
        (self.start..=self.end).map(move |value| self.format(value))
    }

    /// `value + word` for every value
    pub fn prefixed<'a>(&'a self, word: &'a str) -> impl Iterator<Item = String> + 'a {
        self.values().map(move |value| format!("{}{}", value, word))
    }

    /// `word + value` for every value
    pub fn suffixed<'a>(&'a self, word: &'a str) -> impl Iterator<Item = String> + 'a {
        self.values().map(move |value| format!("{}{}", word, value))
    }
}
