// Copyright (c) The quick-bench Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render a [`Bench`]'s accumulated logs as a plain-text report.

use crate::report::{Bench, CaseLog};
use std::fmt;

static FAILED_TAG: &str = "[FAILED]   ";
static PASSED_TAG: &str = "[OK]       ";
static WARNING_TAG: &str = "[WARNING]  ";
static INDENT: &str = "           ";

pub(crate) fn render_report(bench: &Bench, out: &mut impl fmt::Write) -> fmt::Result {
    writeln!(out, "{}", bench.name())?;
    writeln!(out, "{}", "-".repeat(bench.name().chars().count()))?;

    let logs = bench.logs();
    for log in logs.iter() {
        render_case(log, out)?;
    }
    writeln!(out)?;

    if logs.is_empty() {
        writeln!(out, "Nothing's been tested.")
    } else if bench.failed_testcases() == 0 {
        writeln!(
            out,
            "PASSED\n------\n(total: {} testcases, {} checks)",
            bench.testcases(),
            bench.checks()
        )
    } else {
        writeln!(
            out,
            "FAILED\n------\n{}/{} testcases\n{}/{} checks",
            bench.failed_testcases(),
            bench.testcases(),
            bench.failed_checks(),
            bench.checks()
        )
    }
}

fn render_case(log: &CaseLog, out: &mut impl fmt::Write) -> fmt::Result {
    let tag = if log.has_failures() {
        FAILED_TAG
    } else if log.check_count == 0 {
        WARNING_TAG
    } else {
        PASSED_TAG
    };
    write!(out, "{tag}\"{}\" (checks: {})", log.name, log.check_count)?;
    if log.check_count == 0 {
        write!(out, " Empty testcase!")?;
    }
    writeln!(out)?;
    for entry in &log.failures {
        writeln!(out, "{INDENT}#{}: {}", entry.position, entry.message)?;
    }
    Ok(())
}

impl fmt::Display for Bench {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render_report(self, f)
    }
}
