// Copyright (c) The quick-bench Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::RenderError, message::sanitize, Case};
use std::{
    cell::{Ref, RefCell},
    io,
};

/// The root of a bench run: a named, append-only collection of completed
/// [`CaseLog`]s.
///
/// A `Bench` is the only type constructed directly by callers. Cases are
/// spawned from it with [`Bench::create`] and report back to it when they go
/// out of scope.
#[derive(Debug)]
pub struct Bench {
    name: String,
    logs: RefCell<Vec<CaseLog>>,
}

impl Bench {
    /// Creates a new `Bench` with the given name.
    ///
    /// The name is descriptive only; it is not required to be unique.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logs: RefCell::new(vec![]),
        }
    }

    /// Creates a new [`Case`] bound to this bench.
    ///
    /// Several cases from the same bench may be live at once; each one appends
    /// its log when it completes, so the log order is completion order.
    pub fn create(&self, name: impl Into<String>) -> Case<'_> {
        Case::new(name.into(), self)
    }

    /// Returns the name of this bench.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of completed cases.
    pub fn testcases(&self) -> usize {
        self.logs.borrow().len()
    }

    /// The number of completed cases with at least one failed check.
    ///
    /// Callers that need a process exit status typically map this to
    /// success/failure (0 = all passed).
    pub fn failed_testcases(&self) -> usize {
        self.logs
            .borrow()
            .iter()
            .filter(|log| log.has_failures())
            .count()
    }

    /// The total number of checks performed across all completed cases.
    pub fn checks(&self) -> usize {
        self.logs.borrow().iter().map(|log| log.check_count).sum()
    }

    /// The total number of failed checks across all completed cases.
    pub fn failed_checks(&self) -> usize {
        self.logs.borrow().iter().map(|log| log.failures.len()).sum()
    }

    /// An ordered view of all completed case logs, earliest completion first.
    ///
    /// # Panics
    ///
    /// The returned guard shares the bench's interior log collection. Letting
    /// a live [`Case`] complete while the guard is held panics with a
    /// `RefCell` borrow error; drop the guard first.
    pub fn logs(&self) -> Ref<'_, [CaseLog]> {
        Ref::map(self.logs.borrow(), Vec::as_slice)
    }

    /// Renders the report for this bench to the given writer.
    ///
    /// The same text is available through this type's `Display` impl.
    pub fn render(&self, mut writer: impl io::Write) -> Result<(), RenderError> {
        write!(writer, "{self}")?;
        Ok(())
    }

    /// Called by a completing `Case` to submit its results. Append-only.
    pub(crate) fn add(&self, log: CaseLog) {
        self.logs.borrow_mut().push(log);
    }
}

/// The accumulated result record of one completed [`Case`].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct CaseLog {
    /// The name of the case.
    pub name: String,

    /// The number of checks performed on the case, regardless of outcome.
    pub check_count: usize,

    /// The failed checks, in the order they were recorded.
    ///
    /// Always at most `check_count` entries, with strictly increasing
    /// positions.
    pub failures: Vec<FailureEntry>,
}

impl CaseLog {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            check_count: 0,
            failures: vec![],
        }
    }

    /// Records the outcome of one check: the count always moves, a failure
    /// also appends an entry carrying the new count as its position.
    pub(crate) fn record(&mut self, failed: bool, message: String) {
        self.check_count += 1;
        if failed {
            self.failures.push(FailureEntry {
                position: self.check_count,
                message: sanitize(&message),
            });
        }
    }

    /// Returns true if at least one check on this case failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// One recorded failing check.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct FailureEntry {
    /// 1-based ordinal of the failing check among all checks performed on the
    /// owning case.
    pub position: usize,

    /// Human-readable description of the failure.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_always_counts_and_positions_failures() {
        let mut log = CaseLog::new("probe".to_owned());
        log.record(false, String::new());
        log.record(true, "first".to_owned());
        log.record(false, String::new());
        log.record(true, "second".to_owned());

        assert_eq!(log.check_count, 4);
        assert_eq!(log.failures.len(), 2);
        assert_eq!(log.failures[0].position, 2);
        assert_eq!(log.failures[0].message, "first");
        assert_eq!(log.failures[1].position, 4);
        assert_eq!(log.failures[1].message, "second");
    }

    #[test]
    fn record_sanitizes_messages() {
        let mut log = CaseLog::new("probe".to_owned());
        log.record(true, "bell\x07 and \x1b[31mcolor\x1b[0m".to_owned());
        assert_eq!(log.failures[0].message, "bell and color");
    }

    #[test]
    fn aggregates_are_derived_from_logs() {
        let bench = Bench::new("aggregate");
        {
            let mut case = bench.create("mostly fine");
            case.check(true);
            case.check(true);
            case.check(false);
            case.check(true);
        }
        {
            let mut case = bench.create("fine");
            case.check(true);
        }

        assert_eq!(bench.testcases(), 2);
        assert_eq!(bench.failed_testcases(), 1);
        assert_eq!(bench.checks(), 5);
        assert_eq!(bench.failed_checks(), 1);
    }

    #[test]
    fn logs_guard_held_across_completion_panics() {
        use std::panic::{self, AssertUnwindSafe};

        let bench = Bench::new("guarded");
        let case = bench.create("completes too late");
        let logs = bench.logs();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| drop(case)));
        assert!(outcome.is_err());
        drop(logs);
    }

    #[test]
    fn logs_are_ordered_by_completion() {
        let bench = Bench::new("ordering");
        let first = bench.create("created first");
        let mut second = bench.create("created second");
        second.check(true);
        drop(second);
        drop(first);

        let logs = bench.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].name, "created second");
        assert_eq!(logs[1].name, "created first");
    }
}
