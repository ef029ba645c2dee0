//! Worker pool - N tasks draining one bounded word queue

use std::io::Write;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{mpsc, Mutex};

use super::orchestrator::Mutator;
use super::sink::{Destination, ResultSink};
use crate::error::Result;

/// Worker pool settings
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub workers: usize,
    pub queue_capacity: usize,
    /// Collect candidates into per-worker pools instead of the sink
    pub collect: bool,
}

/// Feed `words` through the mutator on `workers` concurrent tasks.
///
/// In collect mode each worker keeps its own component pool and the pools
/// are concatenated once every worker has finished; otherwise the returned
/// vector is empty and all output went through the sink.
pub async fn run_workers<W>(
    words: Vec<String>,
    mutator: Arc<Mutator>,
    sink: Arc<ResultSink<W>>,
    config: PoolConfig,
) -> Result<Vec<String>>
where
    W: Write + Send + 'static,
{
    let workers = config.workers.max(1);
    let (tx, rx) = mpsc::channel::<String>(config.queue_capacity.max(1));
    let rx = Arc::new(Mutex::new(rx));

    tracing::debug!(words = words.len(), workers, collect = config.collect, "Starting worker pool");

    let producer = tokio::spawn(async move {
        for word in words {
            // every worker has exited, nothing left to feed
            if tx.send(word).await.is_err() {
                break;
            }
        }
    });

    let handles: Vec<_> = (0..workers)
        .map(|worker_id| {
            let rx = Arc::clone(&rx);
            let mutator = Arc::clone(&mutator);
            let sink = Arc::clone(&sink);
            let collect = config.collect;

            tokio::spawn(async move {
                let mut local_pool = Vec::new();
                let mut processed = 0usize;

                loop {
                    let next = rx.lock().await.recv().await;
                    let Some(word) = next else {
                        break;
                    };

                    let mut destination = if collect {
                        Destination::Pool(&mut local_pool)
                    } else {
                        Destination::Emit
                    };
                    mutator.process(&word, &sink, &mut destination)?;
                    processed += 1;
                }

                tracing::debug!(worker_id, processed, pooled = local_pool.len(), "Worker finished");
                Ok::<_, crate::error::PassForgeError>(local_pool)
            })
        })
        .collect();

    // workers hold the only receivers now, so the producer stops once they all exit
    drop(rx);

    let results = join_all(handles).await;
    producer.await?;

    let mut pooled = Vec::new();
    for result in results {
        pooled.extend(result??);
    }
    Ok(pooled)
}
