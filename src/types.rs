//! Core types and structures for pass-forge

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{PassForgeError, Result};

/// Output ordering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Stream candidates as soon as they pass the sink
    #[default]
    None,
    /// Ascending lexicographic order
    Alpha,
    /// Descending efficacy weight, ties in lexicographic order
    Efficacy,
}

impl SortMode {
    /// Whether the whole result set must be materialized before output
    pub fn is_sorted(&self) -> bool {
        !matches!(self, SortMode::None)
    }
}

impl FromStr for SortMode {
    type Err = PassForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" => Ok(SortMode::None),
            "a" | "alpha" => Ok(SortMode::Alpha),
            "e" | "efficacy" => Ok(SortMode::Efficacy),
            other => Err(PassForgeError::config(format!(
                "Unknown sort mode '{}'. Use 'a' (alpha) or 'e' (efficacy)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::None => write!(f, "none"),
            SortMode::Alpha => write!(f, "alpha"),
            SortMode::Efficacy => write!(f, "efficacy"),
        }
    }
}

/// Mutation complexity level.
///
/// Level 1 is accepted but currently mutates exactly like level 0; only
/// level 2 chains two passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MutationLevel {
    #[default]
    Single,
    Extended,
    Chained,
}

impl MutationLevel {
    pub fn is_chained(&self) -> bool {
        matches!(self, MutationLevel::Chained)
    }
}

impl TryFrom<u8> for MutationLevel {
    type Error = PassForgeError;

    fn try_from(level: u8) -> Result<Self> {
        match level {
            0 => Ok(MutationLevel::Single),
            1 => Ok(MutationLevel::Extended),
            2 => Ok(MutationLevel::Chained),
            n => Err(PassForgeError::config(format!(
                "Mutation level must be 0, 1 or 2 (got {})",
                n
            ))),
        }
    }
}

impl From<MutationLevel> for u8 {
    fn from(level: MutationLevel) -> u8 {
        match level {
            MutationLevel::Single => 0,
            MutationLevel::Extended => 1,
            MutationLevel::Chained => 2,
        }
    }
}

/// How unrecognized recipe steps are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeMode {
    /// Unknown steps pass the candidate through unchanged
    #[default]
    Permissive,
    /// Unknown steps are a configuration error
    Strict,
}

/// Built-in common words used when no common-word file is given
pub const BUILTIN_COMMON_WORDS: &[&str] = &["pw", "pwd", "admin", "sys"];

/// Default bounded work queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default cap on literal-word permutations
pub const DEFAULT_PERMUTATION_BUDGET: usize = 1_000_000;

/// Default cap on full-leet, all-case and range output per word
pub const DEFAULT_COMBINATORIAL_BUDGET: u64 = 1 << 20;

/// Fully resolved run parameters.
///
/// Built once before the pipeline starts, then shared read-only behind an
/// `Arc` for the rest of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Minimum candidate length in bytes (0 = no bound)
    pub min_length: usize,
    /// Maximum candidate length in bytes (0 = no bound)
    pub max_length: usize,

    pub perms: bool,
    pub double: bool,
    pub reverse: bool,
    pub leet: bool,
    pub full_leet: bool,
    pub all_cases: bool,
    pub capital: bool,
    pub upper: bool,
    pub lower: bool,
    pub swap: bool,
    pub punctuation: bool,
    pub acronym: bool,
    /// Join permutations with a space instead of nothing
    pub space: bool,

    pub prefix_strings: Vec<String>,
    pub suffix_strings: Vec<String>,
    /// Resolved common-word list (empty = disabled)
    pub common_words: Vec<String>,

    /// Numeric ranges, e.g. "0-99" or "1980-current"
    pub years_range: Option<String>,
    pub prefix_range: Option<String>,
    pub suffix_range: Option<String>,

    /// Crunch-style positional mask
    pub crunch_mask: Option<String>,
    pub sort_mode: SortMode,
    pub mutation_level: MutationLevel,
    /// Minimum strength score 0-4 (0 = no filter)
    pub min_strength: u8,

    pub passphrase_count: usize,
    pub passphrase_separator: String,
    /// Fixed seed for passphrase sampling
    pub passphrase_seed: Option<u64>,

    pub no_numbers: bool,
    pub no_symbols: bool,
    pub no_capitals: bool,

    pub threads: usize,
    pub queue_capacity: usize,
    pub permutation_budget: usize,
    /// Per-word cap for the exponential generators
    pub combinatorial_budget: u64,

    /// Ordered recipe steps; non-empty overrides every catalog flag
    pub custom_recipe: Vec<String>,
    pub recipe_mode: RecipeMode,

    /// Exact-match exclusion set
    #[serde(skip)]
    pub blacklist: Option<Arc<HashSet<String>>>,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: 0,
            perms: false,
            double: false,
            reverse: false,
            leet: false,
            full_leet: false,
            all_cases: false,
            capital: false,
            upper: false,
            lower: false,
            swap: false,
            punctuation: false,
            acronym: false,
            space: false,
            prefix_strings: Vec::new(),
            suffix_strings: Vec::new(),
            common_words: Vec::new(),
            years_range: None,
            prefix_range: None,
            suffix_range: None,
            crunch_mask: None,
            sort_mode: SortMode::None,
            mutation_level: MutationLevel::Single,
            min_strength: 0,
            passphrase_count: 0,
            passphrase_separator: "-".to_string(),
            passphrase_seed: None,
            no_numbers: false,
            no_symbols: false,
            no_capitals: false,
            threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            permutation_budget: DEFAULT_PERMUTATION_BUDGET,
            combinatorial_budget: DEFAULT_COMBINATORIAL_BUDGET,
            custom_recipe: Vec::new(),
            recipe_mode: RecipeMode::Permissive,
            blacklist: None,
        }
    }
}

impl MutationConfig {
    /// Validate and normalize the configuration
    pub fn validate(mut self) -> Result<Self> {
        if self.min_strength > 4 {
            return Err(crate::config_error!(
                "min_strength must be between 0 and 4 (got {})",
                self.min_strength
            ));
        }

        if self.min_length > 0 && self.max_length > 0 && self.min_length > self.max_length {
            return Err(crate::config_error!(
                "min_length ({}) is greater than max_length ({})",
                self.min_length,
                self.max_length
            ));
        }

        self.threads = self.threads.max(1);
        self.queue_capacity = self.queue_capacity.max(1);
        Ok(self)
    }

    /// Overlay settings from environment variables
    pub fn apply_env(&mut self) {
        if let Ok(threads) = std::env::var("PASS_FORGE_THREADS") {
            match threads.trim().parse::<usize>() {
                Ok(n) => self.threads = n,
                Err(_) => tracing::warn!(value = %threads, "Ignoring invalid PASS_FORGE_THREADS"),
            }
        }

        if let Ok(sep) = std::env::var("PASS_FORGE_SEPARATOR") {
            self.passphrase_separator = sep;
        }
    }

    /// Builder-style blacklist attachment
    pub fn with_blacklist(mut self, blacklist: HashSet<String>) -> Self {
        self.blacklist = Some(Arc::new(blacklist));
        self
    }

    /// Whether passphrase generation replaces plain mangling
    pub fn is_passphrase_mode(&self) -> bool {
        self.passphrase_count > 0
    }

    /// Whether a custom recipe overrides the catalog
    pub fn has_recipe(&self) -> bool {
        !self.custom_recipe.is_empty()
    }
}

/// Counters collected while a run is in flight
#[derive(Debug, Default)]
pub struct RunMetrics {
    submitted: AtomicU64,
    rejected: AtomicU64,
    duplicates: AtomicU64,
    emitted: AtomicU64,
    pooled: AtomicU64,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_duplicates(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_pooled(&self, count: u64) {
        self.pooled.fetch_add(count, Ordering::Relaxed);
    }

    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    /// Take a point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            emitted: self.emitted.load(Ordering::Relaxed),
            pooled: self.pooled.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`RunMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Candidates offered to the sink
    pub submitted: u64,
    /// Candidates dropped by a filter
    pub rejected: u64,
    /// Candidates dropped by checksum dedup
    pub duplicates: u64,
    /// Lines written (or collected for sorting)
    pub emitted: u64,
    /// Candidates routed into an unfiltered pool
    pub pooled: u64,
}

impl MetricsSnapshot {
    /// Share of submitted candidates that made it to output
    pub fn acceptance_rate(&self) -> f64 {
        if self.submitted == 0 {
            0.0
        } else {
            self.emitted as f64 / self.submitted as f64
        }
    }
}
