use std::path::Path;

use test_utils::{check_run, Expected};

/// Scenario 6: a three-clause `for` loop.
#[test]
fn for_loop_counts_up() {
    check_run(
        Path::new("tests/fixtures/loop.eta"),
        Expected {
            stdout: "0\n1\n2\n",
            stderr: "",
        },
    )
    .unwrap();
}
