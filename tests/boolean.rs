use std::path::Path;

use test_utils::{check_run, Expected};

#[test]
fn boolean_and_comparison_operators() {
    check_run(
        Path::new("tests/fixtures/boolean.eta"),
        Expected {
            stdout: "true\nfalse\ntrue\ntrue\ntrue\nfalse\ntrue\ntrue\n",
            stderr: "",
        },
    )
    .unwrap();
}
