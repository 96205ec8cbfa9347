// Copyright (c) The quick-bench Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! A tiny check/report library: data model and plain-text renderer for
//! lightweight assertion benches.
//!
//! A [`Bench`] is a named aggregate of results. [`Case`]s are spawned from it,
//! run checks, and fold their outcome back into the bench when they go out of
//! scope. The bench then renders a per-case, per-failure summary.
//!
//! ```
//! use quick_bench::Bench;
//!
//! let bench = Bench::new("arithmetic");
//! {
//!     let mut case = bench.create("integer addition");
//!     case.check(1 + 1 == 2);
//!     case.equal(2 + 2, 4);
//!     case.in_range(7, 1, 10);
//! }
//! {
//!     let mut case = bench.create("division");
//!     case.does_not_panic(|| {
//!         let _ = 10 / 2;
//!     });
//! }
//!
//! assert_eq!(bench.testcases(), 2);
//! assert_eq!(bench.checks(), 4);
//! assert_eq!(bench.failed_testcases(), 0);
//!
//! let report = bench.to_string();
//! assert!(report.contains("[OK]"));
//! assert!(report.contains("PASSED"));
//! ```
//!
//! Checks never unwind into the caller: a panicking comparison operator,
//! `Display` impl or callable is caught at the case boundary and recorded as a
//! failed check with a descriptive message. A process exit status can be
//! derived from [`Bench::failed_testcases`] (0 failed = success).

mod case;
mod errors;
mod message;
mod render;
mod report;

pub use case::Case;
pub use errors::RenderError;
pub use report::{Bench, CaseLog, FailureEntry};
