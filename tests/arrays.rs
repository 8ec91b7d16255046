use std::path::Path;

use test_utils::{check_run, Expected};

/// Scenario 3: `push` grows an array in place; `len` reflects the new size.
#[test]
fn push_grows_array_length() {
    check_run(
        Path::new("tests/fixtures/arrays.eta"),
        Expected {
            stdout: "4\n",
            stderr: "",
        },
    )
    .unwrap();
}
