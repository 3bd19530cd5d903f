use super::progress::{ProgressReporter, SharedCounter};
use crate::config::ParallelConfig;
use crate::error::{Error, Result};
use crossbeam::channel::{Receiver, Sender, bounded, unbounded};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Pool size used when none is configured
pub const DEFAULT_POOL_SIZE: usize = 8;

/// How often the reporter thread looks at the counter
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Worker threads (0 = one per CPU)
    pub pool_size: usize,
    pub poll_interval: Duration,
    /// Draw the progress bar (it is hidden anyway when stderr is not a terminal)
    pub show_progress: bool,
    /// Shown in front of the progress bar
    pub description: Option<String>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            show_progress: true,
            description: None,
        }
    }
}

impl From<&ParallelConfig> for MapOptions {
    fn from(config: &ParallelConfig) -> Self {
        Self {
            pool_size: config.pool_size,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            show_progress: config.show_progress,
            description: None,
        }
    }
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext<'a, T, R, F> {
    worker_id: usize,
    work_rx: Receiver<(usize, T)>,
    result_tx: Sender<(usize, anyhow::Result<R>)>,
    counter: SharedCounter,
    processor: &'a F,
    abort: &'a AtomicBool,
}

/// Order-preserving parallel map over a fixed-size worker pool
#[derive(Debug, Clone, Default)]
pub struct ParallelMap {
    options: MapOptions,
}

impl ParallelMap {
    pub fn new(options: MapOptions) -> Self {
        Self { options }
    }

    pub fn with_pool_size(pool_size: usize) -> Self {
        Self::new(MapOptions {
            pool_size,
            ..MapOptions::default()
        })
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Worker count for `item_count` items: never more workers than items
    pub fn workers_for(&self, item_count: usize) -> usize {
        let pool_size = match self.options.pool_size {
            0 => num_cpus::get(),
            n => n,
        };
        pool_size.min(item_count).max(1)
    }

    /// Apply `processor` to every item and return the results in input order.
    ///
    /// Blocks until every item is processed and the progress reporter has
    /// seen the final count. The first item that returns `Err` stops the map:
    /// idle workers stop picking up new items and the error comes back as
    /// [`Error::Worker`]. A panicking worker surfaces as
    /// [`Error::WorkerPanicked`].
    pub fn run<T, R, F>(&self, items: Vec<T>, processor: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> anyhow::Result<R> + Sync,
    {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let total_items = items.len();
        let workers = self.workers_for(total_items);
        tracing::debug!("Mapping {total_items} items over {workers} workers");

        let counter = SharedCounter::new();
        let reporter = ProgressReporter::spawn(
            total_items,
            counter.clone(),
            self.options.poll_interval,
            self.options.show_progress,
            self.options.description.as_deref(),
        );

        let (work_tx, work_rx) = bounded::<(usize, T)>(workers * 2);
        let (result_tx, result_rx) = unbounded::<(usize, anyhow::Result<R>)>();
        let abort = AtomicBool::new(false);
        let processor = &processor;

        let outcome = crossbeam::thread::scope(|s| {
            for worker_id in 0..workers {
                let ctx = WorkerContext {
                    worker_id,
                    work_rx: work_rx.clone(),
                    result_tx: result_tx.clone(),
                    counter: counter.clone(),
                    processor,
                    abort: &abort,
                };
                s.spawn(move |_| worker_thread(ctx));
            }

            // Producer thread: feed indexed work to the pool
            s.spawn(move |_| {
                for indexed in items.into_iter().enumerate() {
                    if work_tx.send(indexed).is_err() {
                        break; // Workers gone
                    }
                }
            });

            // Drop our copies so the channels disconnect once the threads finish
            drop(work_rx);
            drop(result_tx);

            collect_results(result_rx, total_items, &abort)
        });

        reporter.finish();

        let slots = match outcome {
            Ok(collected) => collected?,
            Err(payload) => return Err(Error::WorkerPanicked(panic_message(payload.as_ref()))),
        };

        slots.into_iter().collect::<Option<Vec<R>>>().ok_or_else(|| {
            Error::WorkerPanicked("a worker exited before its items were processed".to_string())
        })
    }
}

fn worker_thread<T, R, F>(ctx: WorkerContext<'_, T, R, F>)
where
    F: Fn(T) -> anyhow::Result<R>,
{
    let mut processed = 0usize;
    while let Ok((index, item)) = ctx.work_rx.recv() {
        if ctx.abort.load(Ordering::Relaxed) {
            break;
        }

        let result = (ctx.processor)(item);
        if result.is_ok() {
            ctx.counter.increment();
        }
        processed += 1;

        if ctx.result_tx.send((index, result)).is_err() {
            break; // Collector gave up
        }
    }
    tracing::trace!("Worker {} processed {processed} items", ctx.worker_id);
}

/// Gather results into their input slots, stopping at the first failure
fn collect_results<R>(
    result_rx: Receiver<(usize, anyhow::Result<R>)>,
    total_items: usize,
    abort: &AtomicBool,
) -> Result<Vec<Option<R>>> {
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(total_items).collect();
    let mut received = 0;

    while received < total_items {
        let Ok((index, result)) = result_rx.recv() else {
            break; // Every worker is gone
        };
        match result {
            Ok(value) => {
                slots[index] = Some(value);
                received += 1;
            }
            Err(source) => {
                abort.store(true, Ordering::Relaxed);
                return Err(Error::Worker { index, source });
            }
        }
    }

    Ok(slots)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
