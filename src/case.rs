// Copyright (c) The quick-bench Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    message::{concat, describe_panic, payload_message},
    report::{Bench, CaseLog},
};
use std::{
    any::Any,
    fmt,
    ops::Sub,
    panic::{self, AssertUnwindSafe},
};

/// A scoped unit of checking, spawned from a [`Bench`] with [`Bench::create`].
///
/// Every check operation increments the case's check count exactly once and,
/// on failure, records a [`FailureEntry`](crate::FailureEntry) carrying the
/// check's 1-based position and a descriptive message.
///
/// When the case goes out of scope — on any exit path, including unwinding —
/// its [`CaseLog`] is handed to the owning bench exactly once. A `Case` cannot
/// be cloned (that would risk double reporting) but may be moved freely; the
/// move transfers the in-progress log.
///
/// Caller-supplied code is not trusted to be panic-free: comparison operators,
/// `Display` impls and the callables passed to the panic checks all run inside
/// an unwind boundary, so a panicking impl degrades to a failed check instead
/// of aborting the whole bench run.
pub struct Case<'bench> {
    // Taken exactly once, on drop.
    log: Option<CaseLog>,
    bench: &'bench Bench,
}

impl<'bench> Case<'bench> {
    pub(crate) fn new(name: String, bench: &'bench Bench) -> Self {
        Self {
            log: Some(CaseLog::new(name)),
            bench,
        }
    }

    /// Checks that `condition` is true.
    pub fn check(&mut self, condition: bool) {
        self.log_mut()
            .record(!condition, "Expression evaluated to 'false'.".to_owned());
    }

    /// Checks that `a == b`.
    pub fn equal<T>(&mut self, a: T, b: T)
    where
        T: PartialEq + fmt::Display,
    {
        let message = concat(&[&"Expected [", &b, &"], but found [", &a, &"]."]);
        self.check_comparison(message, || a == b);
    }

    /// Checks that the absolute deviation between `a` and `b` is at most
    /// `threshold` (non-strict). Intended for approximate floating-point
    /// equality.
    pub fn equal_within<T>(&mut self, a: T, b: T, threshold: T)
    where
        T: PartialOrd + Sub<Output = T> + fmt::Display + Copy,
    {
        // The subtraction is caller-supplied too (and can overflow-panic on
        // debug builds), so it runs inside the unwind boundary as well.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let deviation = if a < b { b - a } else { a - b };
            let message = concat(&[
                &"Expected [",
                &b,
                &"], but found [",
                &a,
                &"]. Absolute deviation=",
                &deviation,
                &" exceeds threshold=",
                &threshold,
            ]);
            (deviation <= threshold, message)
        }));
        let (failed, message) = match outcome {
            Ok((holds, message)) => (!holds, message),
            Err(payload) => (true, describe_panic(payload.as_ref())),
        };
        self.log_mut().record(failed, message);
    }

    /// Checks that `a < b`.
    pub fn less_than<T>(&mut self, a: T, b: T)
    where
        T: PartialOrd + fmt::Display,
    {
        let message = concat(&[
            &"Expected value to be less than [",
            &b,
            &"], but found [",
            &a,
            &"].",
        ]);
        self.check_comparison(message, || a < b);
    }

    /// Checks that `a <= b`.
    pub fn less_than_or_equal<T>(&mut self, a: T, b: T)
    where
        T: PartialOrd + fmt::Display,
    {
        let message = concat(&[
            &"Expected value to be less than or equal to [",
            &b,
            &"], but found [",
            &a,
            &"].",
        ]);
        self.check_comparison(message, || a <= b);
    }

    /// Checks that `a > b`.
    pub fn greater_than<T>(&mut self, a: T, b: T)
    where
        T: PartialOrd + fmt::Display,
    {
        let message = concat(&[
            &"Expected value to be greater than [",
            &b,
            &"], but found [",
            &a,
            &"].",
        ]);
        self.check_comparison(message, || a > b);
    }

    /// Checks that `a >= b`.
    pub fn greater_than_or_equal<T>(&mut self, a: T, b: T)
    where
        T: PartialOrd + fmt::Display,
    {
        let message = concat(&[
            &"Expected value to be greater than or equal to [",
            &b,
            &"], but found [",
            &a,
            &"].",
        ]);
        self.check_comparison(message, || a >= b);
    }

    /// Checks that `lo <= a <= hi`, both bounds inclusive.
    pub fn in_range<T>(&mut self, a: T, lo: T, hi: T)
    where
        T: PartialOrd + fmt::Display,
    {
        let message = concat(&[
            &"Expected value in [",
            &lo,
            &", ",
            &hi,
            &"], but found [",
            &a,
            &"].",
        ]);
        self.check_comparison(message, || a >= lo && a <= hi);
    }

    /// Checks that `a < lo` or `a > hi`.
    pub fn not_in_range<T>(&mut self, a: T, lo: T, hi: T)
    where
        T: PartialOrd + fmt::Display,
    {
        let message = concat(&[
            &"Expected value to be less than [",
            &lo,
            &"] or greater than [",
            &hi,
            &"], but found [",
            &a,
            &"].",
        ]);
        self.check_comparison(message, || a < lo || a > hi);
    }

    /// Checks that `callable` returns without panicking.
    ///
    /// On failure the message carries the caught payload's message, or notes
    /// that the payload was of an unknown type.
    pub fn does_not_panic(&mut self, callable: impl FnOnce()) {
        let (failed, message) = match panic::catch_unwind(AssertUnwindSafe(callable)) {
            Ok(()) => (false, String::new()),
            Err(payload) => {
                let caught = match payload_message(payload.as_ref()) {
                    Some(text) => text,
                    None => "panic payload of unknown type.",
                };
                (
                    true,
                    concat(&[&"Panic should not occur, but caught ", &caught]),
                )
            }
        };
        self.log_mut().record(failed, message);
    }

    /// Checks that `callable` panics, with any payload at all.
    pub fn panics(&mut self, callable: impl FnOnce()) {
        let failed = panic::catch_unwind(AssertUnwindSafe(callable)).is_ok();
        self.log_mut().record(failed, "No panic occurred.".to_owned());
    }

    /// Checks that `callable` panics with a message-carrying payload (the kind
    /// produced by `panic!` with a format string).
    pub fn panics_with_message(&mut self, callable: impl FnOnce()) {
        let (failed, message) = match panic::catch_unwind(AssertUnwindSafe(callable)) {
            Ok(()) => (true, "No panic occurred.".to_owned()),
            Err(payload) => match payload_message(payload.as_ref()) {
                Some(_) => (false, String::new()),
                None => (
                    true,
                    "Caught panic payload of unknown type (no message).".to_owned(),
                ),
            },
        };
        self.log_mut().record(failed, message);
    }

    /// Checks that `callable` panics with a payload of exactly type `P`, as
    /// produced by `std::panic::panic_any`.
    ///
    /// The failure message distinguishes a missing panic from a panic with the
    /// wrong payload type, quoting the caught message when there is one. A
    /// message payload of a known concrete type (say `panic_any` with a
    /// `String`) can be matched here too, overlapping
    /// [`Case::panics_with_message`], which accepts any message-carrying form.
    pub fn panics_with<P: Any>(&mut self, callable: impl FnOnce()) {
        let (failed, message) = match panic::catch_unwind(AssertUnwindSafe(callable)) {
            Ok(()) => (true, "No panic occurred.".to_owned()),
            Err(payload) => {
                if payload.as_ref().downcast_ref::<P>().is_some() {
                    (false, String::new())
                } else {
                    let message = match payload_message(payload.as_ref()) {
                        Some(text) => concat(&[
                            &"Expected a different panic payload type. Caught: ",
                            &text,
                        ]),
                        None => {
                            "Expected a different panic payload type. Caught payload of unknown type."
                                .to_owned()
                        }
                    };
                    (true, message)
                }
            }
        };
        self.log_mut().record(failed, message);
    }

    /// Evaluates a caller-supplied comparison under `catch_unwind`: a panic in
    /// an overloaded operator becomes a failed check describing the panic.
    fn check_comparison(&mut self, message: String, comparison: impl FnOnce() -> bool) {
        let (failed, message) = match panic::catch_unwind(AssertUnwindSafe(comparison)) {
            Ok(holds) => (!holds, message),
            Err(payload) => (true, describe_panic(payload.as_ref())),
        };
        self.log_mut().record(failed, message);
    }

    fn log_mut(&mut self) -> &mut CaseLog {
        self.log.as_mut().expect("case log is present until drop")
    }
}

impl Drop for Case<'_> {
    fn drop(&mut self) {
        if let Some(log) = self.log.take() {
            self.bench.add(log);
        }
    }
}

impl fmt::Debug for Case<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case")
            .field("log", &self.log)
            .field("bench", &self.bench.name())
            .finish()
    }
}
