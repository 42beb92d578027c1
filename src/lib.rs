//! # Bounded Runner
//!
//! Run a collection of independent closures, or map one function over a
//! sequence, on a fixed number of worker threads.
//!
//! - Results come back in input order, one [`TaskResult`] per item.
//! - A failing item never affects its neighbours. Returned errors and caught
//!   panics are both stored in the item's own slot.
//! - At most `limit` items run at the same time. A limit of `0` means one
//!   worker per available logical core.
//!
//! ## Example
//! ```rust
//! use bounded_runner::prelude::*;
//!
//! let results = BoundedRunner::with_limit(2).map_all(vec![1, 2, 3], |n: i32| {
//!     if n == 2 {
//!         panic!("boom");
//!     }
//!     Ok::<_, String>(n * 10)
//! });
//!
//! assert_eq!(results[0].value(), Some(&10));
//! assert!(results[1].error().unwrap().to_string().starts_with("panic recovered: boom"));
//! assert_eq!(results[2].value(), Some(&30));
//! ```
//!
//! ## Batches
//! There are two ways to observe a mapped run batch by batch:
//! - [`BoundedRunner::map_all_with_progress`] reports progress every `limit`
//!   completed items while all workers keep running.
//! - [`BoundedRunner::map_all_in_batches`] runs `limit` items at a time, hands
//!   each finished batch to a callback and stops early when it returns `true`.
//! ```rust
//! use bounded_runner::prelude::*;
//!
//! let results = BoundedRunner::with_limit(2).map_all_in_batches(
//!     0..10,
//!     |n: u32| Ok::<_, ()>(n),
//!     |batch, _index, _total| batch.iter().any(|r| r.value() == Some(&3)),
//! );
//! assert_eq!(results.len(), 4);
//! ```
//!
//! ## Panics are reported
//! Caught panics are logged through the [`log`] facade, or passed to a hook.
//! ```rust
//! use bounded_runner::prelude::*;
//!
//! let runner = BoundedRunner::new().on_panic(|report| eprintln!("{report}"));
//! let results = runner.run_all([|| -> Result<(), ()> { panic!("oops") }]);
//! assert!(results[0].error().unwrap().is_panic());
//! ```

mod error;
mod fault;
mod internal;
mod runner;
mod task_result;

pub use error::TaskError;
pub use fault::PanicReport;
pub use runner::{BoundedRunner, map_all, run_all};
pub use task_result::TaskResult;

pub mod prelude {
    pub use crate::{BoundedRunner, PanicReport, TaskError, TaskResult};
}
