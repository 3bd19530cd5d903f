//! Wall-clock timing of a block of work.
//!
//! A [`Timer`] reports when it goes out of scope, which also happens while
//! unwinding from a panic: a failing block still gets its partial duration
//! printed.
//!
//! ```
//! use rutils::timer::{Timer, timed};
//!
//! {
//!     let _timer = Timer::with_message(Some("load".to_string()));
//!     // ... work ...
//! } // prints "load: 0.0001"
//!
//! let answer = timed(Some("compute"), || 6 * 7);
//! assert_eq!(answer, 42);
//! ```

use crate::format::{format_elapsed, with_message};
use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

pub const DEFAULT_MESSAGE: &str = "Elapsed Time";

pub struct Timer {
    message: Option<String>,
    start: Instant,
    reported: bool,
    /// Where the report goes; stdout when unset
    sink: Option<Box<dyn Write + Send>>,
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("message", &self.message)
            .field("start", &self.start)
            .field("reported", &self.reported)
            .finish_non_exhaustive()
    }
}

impl Timer {
    /// Start timing with the default message
    pub fn start() -> Self {
        Self::with_message(Some(DEFAULT_MESSAGE.to_string()))
    }

    /// Start timing; `None` prints the bare duration
    pub fn with_message(message: Option<String>) -> Self {
        Self {
            message,
            start: Instant::now(),
            reported: false,
            sink: None,
        }
    }

    /// Like [`Timer::with_message`], reporting to `sink` instead of stdout
    pub fn with_sink<W>(message: Option<String>, sink: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let mut timer = Self::with_message(message);
        timer.sink = Some(Box::new(sink));
        timer
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The line that would be printed right now
    pub fn render(&self) -> String {
        with_message(
            self.message.as_deref(),
            format_elapsed(self.elapsed().as_secs_f64()),
        )
    }

    /// Report now instead of at the end of the scope
    pub fn stop(mut self) -> Duration {
        self.report()
    }

    fn report(&mut self) -> Duration {
        let elapsed = self.elapsed();
        if !self.reported {
            self.reported = true;
            let line = with_message(self.message.as_deref(), format_elapsed(elapsed.as_secs_f64()));
            match self.sink.as_mut() {
                Some(sink) => {
                    if let Err(e) = writeln!(sink, "{line}").and_then(|()| sink.flush()) {
                        tracing::warn!("Failed to report elapsed time: {e}");
                    }
                }
                None => println!("{line}"),
            }
        }
        elapsed
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.report();
    }
}

/// Run `f` inside a [`Timer`] scope and return its result
pub fn timed<T, F>(message: Option<&str>, f: F) -> T
where
    F: FnOnce() -> T,
{
    let _timer = Timer::with_message(message.map(str::to_string));
    f()
}
