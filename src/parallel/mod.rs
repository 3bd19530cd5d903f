//! Parallel map with a live progress bar
//!
//! Work items are spread over a fixed pool of scoped worker threads fed by a
//! bounded crossbeam channel. Every worker bumps a [`SharedCounter`] after it
//! finishes an item; a separate reporter thread polls that counter and draws
//! an indicatif progress bar until all items are done.
//!
//! ```text
//! items ──▶ producer ──▶ [bounded channel] ──▶ worker 0..N ──▶ collector ──▶ Vec<R> (input order)
//!                                                  │
//!                                           SharedCounter ◀── reporter thread (polls, draws bar)
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use rutils::parallel::{MapOptions, ParallelMap};
//!
//! let options = MapOptions { pool_size: 4, show_progress: false, ..Default::default() };
//! let squares = ParallelMap::new(options)
//!     .run((0..10).collect(), |x: u64| Ok(x * x))
//!     .unwrap();
//! assert_eq!(squares[3], 9);
//! ```
//!
//! Positional/keyword style calls go through [`Invocation`] and a
//! [`Callable`], see [`map_with_progress`].

pub mod core;
pub mod invocation;
pub mod progress;

pub use core::{MapOptions, ParallelMap};
pub use invocation::{Callable, Invocation, Kwargs, map_with_progress};
pub use progress::{ProgressReporter, SharedCounter};
