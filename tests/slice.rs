use std::path::Path;

use test_utils::{check_run, Expected};

/// Scenario 8: `slice(a, start, end)` returns a new array over the given
/// half-open range.
#[test]
fn slice_returns_the_requested_range() {
    check_run(
        Path::new("tests/fixtures/slice.eta"),
        Expected {
            stdout: "[20, 30]\n",
            stderr: "",
        },
    )
    .unwrap();
}
