use std::path::Path;

use test_utils::{check_run, Expected};

/// Scenario 4: indexed assignment into a string replaces one character.
#[test]
fn string_indexed_assignment() {
    check_run(
        Path::new("tests/fixtures/assignment.eta"),
        Expected {
            stdout: "Hello\n",
            stderr: "",
        },
    )
    .unwrap();
}
