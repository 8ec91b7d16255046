use std::path::Path;

use test_utils::{check_run, Expected};

/// Scenario 2: recursive fibonacci via a self-referencing `let` binding.
#[test]
fn recursive_fibonacci() {
    check_run(
        Path::new("tests/fixtures/fib.eta"),
        Expected {
            stdout: "55\n",
            stderr: "",
        },
    )
    .unwrap();
}
