//! Passphrase combinator - joins pooled components into multi-word candidates

use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::sink::{Destination, ResultSink};
use crate::error::{PassForgeError, Result};

/// Below this many tuples every combination is enumerated
pub const EXHAUSTIVE_THRESHOLD: u64 = 10_000;

/// Tuples drawn when the space is too large to enumerate
pub const SAMPLE_COUNT: usize = 1_000;

/// How the combinator walks the tuple space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every ordered tuple, `total` of them
    Exhaustive { total: u64 },
    /// A fixed number of uniformly random tuples
    Sampled { count: usize },
}

/// Builds ordered, repetition-allowed tuples over a component pool
pub struct PassphraseCombinator<'a> {
    pool: &'a [String],
    count: usize,
    separator: &'a str,
}

impl<'a> PassphraseCombinator<'a> {
    /// Fails when the pool is empty
    pub fn new(pool: &'a [String], count: usize, separator: &'a str) -> Result<Self> {
        if pool.is_empty() {
            return Err(PassForgeError::empty_pool(
                "no candidates survived mutation, cannot generate passphrases",
            ));
        }
        Ok(Self {
            pool,
            count,
            separator,
        })
    }

    /// `pool^count`, or `None` on overflow
    pub fn space(&self) -> Option<u64> {
        let exponent = u32::try_from(self.count).ok()?;
        (self.pool.len() as u64).checked_pow(exponent)
    }

    pub fn strategy(&self) -> Strategy {
        match self.space() {
            Some(total) if total < EXHAUSTIVE_THRESHOLD => Strategy::Exhaustive { total },
            _ => Strategy::Sampled {
                count: SAMPLE_COUNT,
            },
        }
    }

    fn join(&self, indices: impl Iterator<Item = usize>) -> String {
        indices
            .map(|i| self.pool[i].as_str())
            .collect::<Vec<_>>()
            .join(self.separator)
    }

    /// Tuple number `index`, first position most significant
    pub fn tuple_at(&self, index: u64) -> Option<String> {
        if index >= self.space()? {
            return None;
        }

        let radix = self.pool.len() as u64;
        let mut digits = vec![0usize; self.count];
        let mut rest = index;
        for digit in digits.iter_mut().rev() {
            *digit = (rest % radix) as usize;
            rest /= radix;
        }
        Some(self.join(digits.into_iter()))
    }

    /// Every tuple in enumeration order
    pub fn exhaustive(&self) -> impl Iterator<Item = String> + '_ {
        let total = self.space().unwrap_or(0);
        (0..total).filter_map(move |index| self.tuple_at(index))
    }

    /// `n` tuples with each position drawn independently and uniformly
    pub fn sample<'r, R: Rng>(&'r self, rng: &'r mut R, n: usize) -> impl Iterator<Item = String> + 'r {
        let len = self.pool.len();
        (0..n).map(move |_| {
            let indices: Vec<usize> = (0..self.count).map(|_| rng.gen_range(0..len)).collect();
            self.join(indices.into_iter())
        })
    }

    /// Feed the chosen tuples through the sink, returns how many were offered
    pub fn emit<W: Write>(&self, sink: &ResultSink<W>, seed: Option<u64>) -> Result<u64> {
        let strategy = self.strategy();
        tracing::debug!(pool = self.pool.len(), count = self.count, ?strategy, "Generating passphrases");

        let mut offered = 0u64;
        match strategy {
            Strategy::Exhaustive { .. } => {
                for phrase in self.exhaustive() {
                    sink.submit(phrase, &mut Destination::Emit)?;
                    offered += 1;
                }
            }
            Strategy::Sampled { count } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                for phrase in self.sample(&mut rng, count) {
                    sink.submit(phrase, &mut Destination::Emit)?;
                    offered += 1;
                }
            }
        }
        Ok(offered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MutationConfig, RunMetrics};
    use std::sync::Arc;

    fn pool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_pool_is_fatal() {
        let err = PassphraseCombinator::new(&[], 2, "-").err().unwrap();
        assert!(matches!(err, PassForgeError::EmptyPool { .. }));
    }

    #[test]
    fn test_exhaustive_pairs() {
        let words = pool(&["a", "b"]);
        let combinator = PassphraseCombinator::new(&words, 2, "-").unwrap();
        assert_eq!(combinator.strategy(), Strategy::Exhaustive { total: 4 });
        let all: Vec<String> = combinator.exhaustive().collect();
        assert_eq!(all, vec!["a-a", "a-b", "b-a", "b-b"]);
    }

    #[test]
    fn test_switches_to_sampling() {
        let words: Vec<String> = (0..100).map(|i| i.to_string()).collect();
        let combinator = PassphraseCombinator::new(&words, 2, "").unwrap();
        assert_eq!(combinator.strategy(), Strategy::Sampled { count: SAMPLE_COUNT });

        let small: Vec<String> = (0..99).map(|i| i.to_string()).collect();
        let combinator = PassphraseCombinator::new(&small, 2, "").unwrap();
        assert_eq!(combinator.strategy(), Strategy::Exhaustive { total: 9801 });
    }

    #[test]
    fn test_overflowing_space_samples() {
        let words = pool(&["a", "b", "c"]);
        let combinator = PassphraseCombinator::new(&words, 64, "").unwrap();
        assert_eq!(combinator.space(), None);
        assert!(matches!(combinator.strategy(), Strategy::Sampled { .. }));
    }

    #[test]
    fn test_single_word_pool_stays_exhaustive() {
        let words = pool(&["a"]);
        let combinator = PassphraseCombinator::new(&words, 17, "-").unwrap();
        assert_eq!(combinator.strategy(), Strategy::Exhaustive { total: 1 });
        assert_eq!(combinator.exhaustive().count(), 1);
    }

    #[test]
    fn test_sampling_is_seeded() {
        let words: Vec<String> = (0..200).map(|i| format!("w{}", i)).collect();
        let combinator = PassphraseCombinator::new(&words, 3, " ").unwrap();

        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let a: Vec<String> = combinator.sample(&mut rng_a, 20).collect();
        let b: Vec<String> = combinator.sample(&mut rng_b, 20).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|p| p.split(' ').count() == 3));
    }

    #[test]
    fn test_emit_offers_sample_count() {
        let words: Vec<String> = (0..200).map(|i| format!("w{}", i)).collect();
        let combinator = PassphraseCombinator::new(&words, 2, "-").unwrap();
        let sink = ResultSink::new(
            Arc::new(MutationConfig::default()),
            Arc::new(RunMetrics::new()),
            Vec::new(),
        );
        assert_eq!(combinator.emit(&sink, Some(1)).unwrap(), SAMPLE_COUNT as u64);
        assert!(sink.accepted() <= SAMPLE_COUNT);
    }
}
