use std::path::Path;

use test_utils::{check_run, Expected};

#[test]
fn arithmetic_precedence_and_grouping() {
    check_run(
        Path::new("tests/fixtures/expressions.eta"),
        Expected {
            stdout: "14\n20\n8\n-3\n12\n",
            stderr: "",
        },
    )
    .unwrap();
}
