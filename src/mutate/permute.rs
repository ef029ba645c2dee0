//! Literal-word permutation generator

/// Lazy generator for every ordered arrangement of 1..=n distinct words.
///
/// Arrangements come out shortest first. Within one length `k`, index `i`
/// is decoded as a mixed-radix number with radixes `n, n-1, .., n-k+1`,
/// each digit picking from the words not used yet.
pub struct PermutationGenerator {
    words: Vec<String>,
    separator: &'static str,
    current_len: usize,
    current_index: u64,
    total: Option<u64>,
}

/// Number of k-arrangements of n items, `None` on overflow
fn arrangements(n: usize, k: usize) -> Option<u64> {
    (0..k).try_fold(1u64, |acc, p| acc.checked_mul((n - p) as u64))
}

impl PermutationGenerator {
    /// Build over the distinct words of `words`, first occurrence wins
    pub fn new<S: AsRef<str>>(words: &[S], space: bool) -> Self {
        let mut distinct: Vec<String> = Vec::with_capacity(words.len());
        for word in words {
            let word = word.as_ref();
            if !distinct.iter().any(|w| w == word) {
                distinct.push(word.to_string());
            }
        }

        let total = (1..=distinct.len())
            .try_fold(0u64, |acc, k| acc.checked_add(arrangements(distinct.len(), k)?));

        Self {
            words: distinct,
            separator: if space { " " } else { "" },
            current_len: 1,
            current_index: 0,
            total,
        }
    }

    /// Total arrangements over all lengths, `None` if it overflows a u64
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn fits(&self, budget: u64) -> bool {
        self.total.is_some_and(|total| total <= budget)
    }

    /// Arrangement `index` of length `len`
    pub fn arrangement_at(&self, len: usize, index: u64) -> Option<String> {
        let n = self.words.len();
        if len == 0 || len > n || index >= arrangements(n, len)? {
            return None;
        }

        let mut digits = vec![0usize; len];
        let mut rest = index;
        for p in (0..len).rev() {
            let radix = (n - p) as u64;
            digits[p] = (rest % radix) as usize;
            rest /= radix;
        }

        let mut remaining: Vec<&str> = self.words.iter().map(String::as_str).collect();
        let picked: Vec<&str> = digits.into_iter().map(|d| remaining.remove(d)).collect();
        Some(picked.join(self.separator))
    }

    pub fn is_exhausted(&self) -> bool {
        self.current_len > self.words.len()
    }
}

impl Iterator for PermutationGenerator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.is_exhausted() {
            if let Some(arrangement) = self.arrangement_at(self.current_len, self.current_index) {
                self.current_index += 1;
                return Some(arrangement);
            }
            self.current_len += 1;
            self.current_index = 0;
        }
        None
    }
}
