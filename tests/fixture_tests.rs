// Copyright (c) The quick-bench Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use goldenfile::Mint;
use quick_bench::Bench;

#[test]
fn fixtures() {
    let mut mint = Mint::new("tests/fixtures");

    let f = mint
        .new_goldenfile("basic_report.txt")
        .expect("creating new goldenfile succeeds");

    let basic_bench = basic_bench();
    basic_bench
        .render(f)
        .expect("rendering basic_report succeeds");
}

fn basic_bench() -> Bench {
    let bench = Bench::new("basic-report");
    {
        let mut case = bench.create("arithmetic");
        case.equal(2 + 2, 4);
        case.less_than(1, 2);
    }
    {
        let mut case = bench.create("comparisons");
        case.check(false);
        case.equal(41, 42);
        case.in_range(7, 1, 5);
    }
    {
        let _case = bench.create("placeholder");
    }
    bench
}
