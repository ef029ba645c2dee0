//! Result sink - filtering, checksum dedup and output

use std::collections::HashSet;
use std::io::{BufWriter, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{PassForgeError, Result};
use crate::score::{efficacy, strength};
use crate::types::{MutationConfig, RunMetrics, SortMode};

/// Buffered writer capacity
const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Where a mutation pass sends its candidates
pub enum Destination<'a> {
    /// Filter, dedup, then write or collect
    Emit,
    /// Append to a caller-owned pool, bypassing filters and dedup
    Pool(&'a mut Vec<String>),
}

/// Match a candidate against a crunch-style mask.
///
/// `.` any byte, `#` digit, `^` uppercase, `%` lowercase, `&` anything
/// that is not an ASCII letter or digit; other mask bytes match literally.
pub fn matches_crunch(mask: &str, word: &str) -> bool {
    let (mask, word) = (mask.as_bytes(), word.as_bytes());
    if mask.len() != word.len() {
        return false;
    }

    mask.iter().zip(word).all(|(&m, &c)| match m {
        b'.' => true,
        b'#' => c.is_ascii_digit(),
        b'^' => c.is_ascii_uppercase(),
        b'%' => c.is_ascii_lowercase(),
        b'&' => !c.is_ascii_alphanumeric(),
        literal => c == literal,
    })
}

/// State guarded by the sink lock
struct SinkState<W: Write> {
    seen: HashSet<u32>,
    collected: Vec<String>,
    writer: BufWriter<W>,
}

/// Thread-safe candidate sink shared by every worker
pub struct ResultSink<W: Write> {
    config: Arc<MutationConfig>,
    metrics: Arc<RunMetrics>,
    state: Mutex<SinkState<W>>,
}

impl<W: Write> ResultSink<W> {
    pub fn new(config: Arc<MutationConfig>, metrics: Arc<RunMetrics>, writer: W) -> Self {
        Self {
            config,
            metrics,
            state: Mutex::new(SinkState {
                seen: HashSet::new(),
                collected: Vec::new(),
                writer: BufWriter::with_capacity(WRITE_BUFFER_SIZE, writer),
            }),
        }
    }

    /// Run the output filters in order, stopping at the first failure
    pub fn accepts(&self, word: &str) -> bool {
        let config = &self.config;

        if config.min_length > 0 && word.len() < config.min_length {
            return false;
        }
        if config.max_length > 0 && word.len() > config.max_length {
            return false;
        }

        if config.no_numbers || config.no_symbols || config.no_capitals {
            let excluded = word.chars().any(|ch| {
                (config.no_numbers && ch.is_ascii_digit())
                    || (config.no_capitals && ch.is_ascii_uppercase())
                    || (config.no_symbols && !ch.is_ascii_alphanumeric())
            });
            if excluded {
                return false;
            }
        }

        if let Some(mask) = config.crunch_mask.as_deref() {
            if !matches_crunch(mask, word) {
                return false;
            }
        }

        if let Some(blacklist) = &config.blacklist {
            if blacklist.contains(word) {
                return false;
            }
        }

        config.min_strength == 0 || strength(word) >= config.min_strength
    }

    /// Offer one candidate
    pub fn submit(&self, word: String, destination: &mut Destination<'_>) -> Result<()> {
        if let Destination::Pool(pool) = destination {
            pool.push(word);
            self.metrics.add_pooled(1);
            return Ok(());
        }

        self.metrics.increment_submitted();
        if !self.accepts(&word) {
            self.metrics.increment_rejected();
            return Ok(());
        }

        let checksum = crc32fast::hash(word.as_bytes());
        let mut state = self.state.lock();
        if !state.seen.insert(checksum) {
            self.metrics.increment_duplicates();
            return Ok(());
        }

        if self.config.sort_mode.is_sorted() {
            state.collected.push(word);
        } else {
            state.writer.write_all(word.as_bytes())?;
            state.writer.write_all(b"\n")?;
        }
        self.metrics.increment_emitted();
        Ok(())
    }

    /// Number of distinct candidates accepted so far
    pub fn accepted(&self) -> usize {
        self.state.lock().seen.len()
    }

    /// Sort collected results if needed, write them out, flush and hand
    /// back the underlying writer
    pub fn finish(self) -> Result<W> {
        let mut state = self.state.into_inner();
        let mut collected = std::mem::take(&mut state.collected);

        match self.config.sort_mode {
            SortMode::None => {}
            SortMode::Alpha => collected.sort_unstable(),
            SortMode::Efficacy => {
                let mut weighted: Vec<(f64, String)> = collected
                    .into_iter()
                    .map(|word| (efficacy(&word), word))
                    .collect();
                weighted.sort_by(|(wa, a), (wb, b)| wb.total_cmp(wa).then_with(|| a.cmp(b)));
                collected = weighted.into_iter().map(|(_, word)| word).collect();
            }
        }

        for word in &collected {
            state.writer.write_all(word.as_bytes())?;
            state.writer.write_all(b"\n")?;
        }

        state
            .writer
            .into_inner()
            .map_err(|err| PassForgeError::io(err.error().to_string(), None))
    }
}
