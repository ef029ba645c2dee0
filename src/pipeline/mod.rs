//! Mutation pipeline
//!
//! words -> (permutations) -> worker pool -> orchestrator -> catalog ->
//! result sink -> (sort) -> writer. Passphrase mode routes the worker
//! output into a component pool first, then feeds assembled passphrases
//! through the sink.

mod orchestrator;
mod passphrase;
mod pool;
mod sink;

pub use orchestrator::Mutator;
pub use passphrase::{PassphraseCombinator, Strategy, EXHAUSTIVE_THRESHOLD, SAMPLE_COUNT};
pub use pool::{run_workers, PoolConfig};
pub use sink::{matches_crunch, Destination, ResultSink};

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{PassForgeError, Result};
use crate::mutate::{acronym, PermutationGenerator};
use crate::types::{MetricsSnapshot, MutationConfig, RunMetrics};

/// Output of a completed run
#[derive(Debug)]
pub struct RunOutput<W> {
    /// The writer, flushed
    pub writer: W,
    pub metrics: MetricsSnapshot,
}

/// Drives one mutation run end to end
pub struct Pipeline {
    config: Arc<MutationConfig>,
    metrics: Arc<RunMetrics>,
}

impl Pipeline {
    /// Validate the config and freeze it for the run
    pub fn new(config: MutationConfig) -> Result<Self> {
        Ok(Self {
            config: Arc::new(config.validate()?),
            metrics: Arc::new(RunMetrics::new()),
        })
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Live counters, readable while the run is in flight
    pub fn metrics(&self) -> Arc<RunMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Base words plus any common words not already present
    fn base_words(&self, words: Vec<String>) -> Vec<String> {
        let mut base = words;
        for common in &self.config.common_words {
            if !base.contains(common) {
                base.push(common.clone());
            }
        }
        base
    }

    /// Build the work list, emitting permutations and the acronym
    fn work_list<W: Write>(
        &self,
        original: &[String],
        base: Vec<String>,
        sink: &ResultSink<W>,
    ) -> Result<Vec<String>> {
        let mut work = if self.config.perms {
            let generator = PermutationGenerator::new(&base, self.config.space);
            let budget = self.config.permutation_budget as u64;
            if !generator.fits(budget) {
                return Err(crate::config_error!(
                    "{} words produce too many permutations (limit {})",
                    base.len(),
                    budget
                ));
            }

            let mut arrangements = Vec::new();
            for arrangement in generator {
                sink.submit(arrangement.clone(), &mut Destination::Emit)?;
                arrangements.push(arrangement);
            }
            tracing::debug!(permutations = arrangements.len(), "Expanded word permutations");
            arrangements
        } else {
            base
        };

        if self.config.acronym {
            let acro = acronym(original);
            if !acro.is_empty() {
                sink.submit(acro.clone(), &mut Destination::Emit)?;
                work.push(acro);
            }
        }

        Ok(work)
    }

    /// Run the whole pipeline over `words`, writing to `writer`
    pub async fn run<W>(&self, words: Vec<String>, writer: W) -> Result<RunOutput<W>>
    where
        W: Write + Send + 'static,
    {
        if words.is_empty() {
            return Err(crate::input_error!("no words loaded from input"));
        }

        let started = Instant::now();
        let mutator = Arc::new(Mutator::new(Arc::clone(&self.config))?);
        let sink = Arc::new(ResultSink::new(
            Arc::clone(&self.config),
            Arc::clone(&self.metrics),
            writer,
        ));

        tracing::info!(
            words = words.len(),
            threads = self.config.threads,
            sort = %self.config.sort_mode,
            passphrase = self.config.passphrase_count,
            "Starting mutation run"
        );

        let base = self.base_words(words.clone());
        let work = self.work_list(&words, base, &sink)?;

        let passphrase_mode = self.config.is_passphrase_mode();
        let pool_config = PoolConfig {
            workers: self.config.threads,
            queue_capacity: self.config.queue_capacity,
            collect: passphrase_mode,
        };
        let components = run_workers(work, mutator, Arc::clone(&sink), pool_config).await?;

        if passphrase_mode {
            tracing::debug!(components = components.len(), "Component pool collected");
            let combinator = PassphraseCombinator::new(
                &components,
                self.config.passphrase_count,
                &self.config.passphrase_separator,
            )?;
            combinator.emit(&sink, self.config.passphrase_seed)?;
        }

        let sink = Arc::try_unwrap(sink)
            .map_err(|_| PassForgeError::internal("result sink still shared after workers finished"))?;
        let writer = sink.finish()?;
        let metrics = self.metrics.snapshot();

        tracing::info!(
            emitted = metrics.emitted,
            rejected = metrics.rejected,
            duplicates = metrics.duplicates,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Mutation run finished"
        );

        Ok(RunOutput { writer, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    /// Writer whose every write fails, like stdout after the reader hung up
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader closed"))
        }
    }

    fn output(out: RunOutput<Vec<u8>>) -> Vec<String> {
        let mut lines: Vec<String> = String::from_utf8(out.writer)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        lines.sort();
        lines
    }

    #[tokio::test]
    async fn test_empty_input_is_fatal() {
        let pipeline = Pipeline::new(MutationConfig::default()).unwrap();
        let err = pipeline.run(Vec::new(), Vec::new()).await.unwrap_err();
        assert!(matches!(err, PassForgeError::Input { .. }));
    }

    #[tokio::test]
    async fn test_permutations_are_emitted_and_mutated() {
        let pipeline = Pipeline::new(MutationConfig {
            perms: true,
            upper: true,
            threads: 2,
            ..Default::default()
        })
        .unwrap();
        let out = pipeline
            .run(vec!["a".into(), "b".into()], Vec::new())
            .await
            .unwrap();
        assert_eq!(
            output(out),
            vec!["A", "AB", "B", "BA", "a", "ab", "b", "ba"]
        );
    }

    #[tokio::test]
    async fn test_permutation_budget() {
        let pipeline = Pipeline::new(MutationConfig {
            perms: true,
            permutation_budget: 3,
            ..Default::default()
        })
        .unwrap();
        let err = pipeline
            .run(vec!["a".into(), "b".into()], Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PassForgeError::Config { .. }));
    }

    #[tokio::test]
    async fn test_acronym_and_common_words() {
        let pipeline = Pipeline::new(MutationConfig {
            acronym: true,
            common_words: vec!["pw".into(), "hello".into()],
            ..Default::default()
        })
        .unwrap();
        let out = pipeline
            .run(vec!["hello".into(), "world".into()], Vec::new())
            .await
            .unwrap();
        let lines = output(out);
        assert!(lines.contains(&"hw".to_string()));
        // appended common words do not contribute letters
        assert!(!lines.contains(&"hwp".to_string()));
        assert!(lines.contains(&"pw".to_string()));
        assert!(lines.contains(&"hellopw".to_string()));
        assert!(lines.contains(&"pwpw".to_string()));
    }

    #[tokio::test]
    async fn test_passphrase_components_bypass_filters() {
        let pipeline = Pipeline::new(MutationConfig {
            passphrase_count: 2,
            min_length: 3,
            custom_recipe: vec!["strip".into()],
            ..Default::default()
        })
        .unwrap();
        // "a" is too short on its own but still joins the pool
        let out = pipeline.run(vec!["a".into()], Vec::new()).await.unwrap();
        assert_eq!(output(out), vec!["a-a"]);
    }

    #[tokio::test]
    async fn test_writer_failure_ends_run() {
        let pipeline = Pipeline::new(MutationConfig {
            threads: 2,
            ..Default::default()
        })
        .unwrap();
        let words: Vec<String> = (0..50_000).map(|i| format!("word{:05}", i)).collect();

        let result = tokio::time::timeout(Duration::from_secs(20), pipeline.run(words, BrokenPipe))
            .await
            .expect("run stalled after the writer failed");
        assert!(matches!(result, Err(PassForgeError::Io { .. })));
    }

    #[tokio::test]
    async fn test_long_passphrases_allowed() {
        let pipeline = Pipeline::new(MutationConfig {
            passphrase_count: 17,
            ..Default::default()
        })
        .unwrap();
        let out = pipeline.run(vec!["a".into()], Vec::new()).await.unwrap();
        assert_eq!(output(out), vec![vec!["a"; 17].join("-")]);
    }
}
