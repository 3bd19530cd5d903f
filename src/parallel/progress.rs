use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, bounded};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

/// Count of completed work items, shared between workers and the reporter.
///
/// Created fresh for every map and handed to each worker explicitly.
/// Only ever increases.
#[derive(Debug, Clone, Default)]
pub struct SharedCounter(Arc<AtomicUsize>);

impl SharedCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished item and return the new count
    pub fn increment(&self) -> usize {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}

/// Background thread drawing a progress bar from a [`SharedCounter`].
///
/// The thread polls the counter every `poll_interval` and exits on its own
/// once the counter reaches `total`. [`ProgressReporter::finish`] wakes it
/// early; if the work stopped short of `total` the bar is abandoned rather
/// than completed. The reporter never fails the surrounding map.
pub struct ProgressReporter {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    pub fn spawn(
        total: usize,
        counter: SharedCounter,
        poll_interval: Duration,
        visible: bool,
        description: Option<&str>,
    ) -> Self {
        let bar = if visible {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template(
                "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, {eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        if let Some(description) = description {
            bar.set_message(description.to_string());
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = std::thread::Builder::new()
            .name("rutils-progress".to_string())
            .spawn(move || poll_counter(bar, total, counter, stop_rx, poll_interval));

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("Could not start progress reporter: {e}");
                None
            }
        };

        Self {
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    /// Wake the reporter for a last look at the counter and wait for it
    pub fn finish(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects the channel and wakes the poller
        self.stop_tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::warn!("Progress reporter thread panicked");
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn poll_counter(
    bar: ProgressBar,
    total: usize,
    counter: SharedCounter,
    stop_rx: Receiver<()>,
    poll_interval: Duration,
) {
    loop {
        let current = counter.get();
        bar.set_position(current as u64);
        if current >= total {
            bar.finish();
            return;
        }

        match stop_rx.recv_timeout(poll_interval) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let current = counter.get();
                bar.set_position(current as u64);
                if current >= total {
                    bar.finish();
                } else {
                    tracing::debug!("Work stopped at {current}/{total}, abandoning progress bar");
                    bar.abandon();
                }
                return;
            }
        }
    }
}
