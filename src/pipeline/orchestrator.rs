//! Mutation orchestrator - decides which transforms run on a word and how
//! many passes are chained

use std::io::Write;
use std::sync::Arc;

use super::sink::{Destination, ResultSink};
use crate::error::Result;
use crate::mutate::{
    capitalize, double, lower, punctuation_variants, reverse, simple_leet_variants, swap_case,
    upper, CaseGenerator, FullLeetGenerator, NumberRange, Recipe, VariantSet,
};
use crate::types::MutationConfig;

/// Parse a configured range, dropping it when malformed or over budget
fn resolve_range(label: &str, spec: Option<&str>, budget: u64) -> Option<NumberRange> {
    let spec = spec?;
    let Some(range) = NumberRange::parse(spec) else {
        tracing::warn!(option = label, range = %spec, "Malformed numeric range, no affixes added");
        return None;
    };
    if range.len() > budget {
        tracing::warn!(option = label, range = %spec, values = range.len(), "Numeric range exceeds budget, skipped");
        return None;
    }
    Some(range)
}

fn trimmed(list: &[String]) -> Vec<String> {
    list.iter().map(|s| s.trim().to_string()).collect()
}

/// Read-only mutation plan resolved once per run
pub struct Mutator {
    config: Arc<MutationConfig>,
    recipe: Option<Recipe>,
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    years: Option<NumberRange>,
    prefix_range: Option<NumberRange>,
    suffix_range: Option<NumberRange>,
}

impl Mutator {
    pub fn new(config: Arc<MutationConfig>) -> Result<Self> {
        let recipe = if config.has_recipe() {
            Some(Recipe::parse(&config.custom_recipe, config.recipe_mode)?)
        } else {
            None
        };

        let budget = config.combinatorial_budget;

        Ok(Self {
            recipe,
            prefixes: trimmed(&config.prefix_strings),
            suffixes: trimmed(&config.suffix_strings),
            years: resolve_range("years", config.years_range.as_deref(), budget),
            prefix_range: resolve_range("prefix-range", config.prefix_range.as_deref(), budget),
            suffix_range: resolve_range("suffix-range", config.suffix_range.as_deref(), budget),
            config,
        })
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Every variant a single catalog pass produces for `word`, the word
    /// itself included
    pub fn variants(&self, word: &str) -> VariantSet {
        let config = &self.config;
        let mut set = VariantSet::new();
        set.insert(word.to_string());

        if config.double {
            set.insert(double(word));
        }
        if config.reverse {
            set.insert(reverse(word));
        }
        if config.capital {
            set.insert(capitalize(word));
        }
        if config.lower {
            set.insert(lower(word));
        }
        if config.upper {
            set.insert(upper(word));
        }
        if config.swap {
            set.insert(swap_case(word));
        }

        set.extend(self.prefixes.iter().map(|p| format!("{}{}", p, word)));
        set.extend(self.suffixes.iter().map(|s| format!("{}{}", word, s)));

        for common in &config.common_words {
            set.insert(format!("{}{}", common, word));
            set.insert(format!("{}{}", word, common));
        }

        if config.full_leet {
            let generator = FullLeetGenerator::new(word);
            if generator.fits(config.combinatorial_budget) {
                set.extend(generator);
            } else {
                tracing::warn!(word = %word, positions = generator.positions(), "Full leet output exceeds budget, skipped");
            }
        } else if config.leet {
            set.extend(simple_leet_variants(word));
        }

        if config.all_cases {
            let generator = CaseGenerator::new(word);
            if generator.fits(config.combinatorial_budget) {
                set.extend(generator);
            } else {
                tracing::warn!(word = %word, "All-case output exceeds budget, skipped");
            }
        }

        if config.punctuation {
            set.extend(punctuation_variants(word));
        }

        if let Some(years) = &self.years {
            set.extend(years.prefixed(word));
            set.extend(years.suffixed(word));
        }
        if let Some(range) = &self.prefix_range {
            set.extend(range.prefixed(word));
        }
        if let Some(range) = &self.suffix_range {
            set.extend(range.suffixed(word));
        }

        set
    }

    /// One pass: the recipe result, or every catalog variant
    pub fn mutate<W: Write>(
        &self,
        word: &str,
        sink: &ResultSink<W>,
        destination: &mut Destination<'_>,
    ) -> Result<()> {
        if let Some(recipe) = &self.recipe {
            return sink.submit(recipe.apply(word), destination);
        }

        for variant in self.variants(word) {
            sink.submit(variant, destination)?;
        }
        Ok(())
    }

    /// Two passes: the first into a private pool, the second into `destination`
    pub fn chain_mutate<W: Write>(
        &self,
        word: &str,
        sink: &ResultSink<W>,
        destination: &mut Destination<'_>,
    ) -> Result<()> {
        let mut first_pass = Vec::new();
        self.mutate(word, sink, &mut Destination::Pool(&mut first_pass))?;

        for intermediate in &first_pass {
            self.mutate(intermediate, sink, destination)?;
        }
        Ok(())
    }

    /// Mutate one word at the configured level
    pub fn process<W: Write>(
        &self,
        word: &str,
        sink: &ResultSink<W>,
        destination: &mut Destination<'_>,
    ) -> Result<()> {
        if self.config.mutation_level.is_chained() {
            self.chain_mutate(word, sink, destination)
        } else {
            self.mutate(word, sink, destination)
        }
    }
}
