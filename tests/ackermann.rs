use std::path::Path;

use test_utils::{check_run, Expected};

/// Two-argument mutual recursion, a heavier stress test than `fib` for the
/// call stack and closures-over-top-level-bindings support.
#[test]
fn two_argument_recursion() {
    check_run(
        Path::new("tests/fixtures/ackermann.eta"),
        Expected {
            stdout: "9\n",
            stderr: "",
        },
    )
    .unwrap();
}
