use std::path::Path;

use test_utils::{check_run, Expected};

#[test]
fn named_functions_and_higher_order_calls() {
    check_run(
        Path::new("tests/fixtures/functions.eta"),
        Expected {
            stdout: "7\nhello eta\n12\n",
            stderr: "",
        },
    )
    .unwrap();
}
