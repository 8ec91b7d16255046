use std::path::Path;

use test_utils::{check_run, Expected};

#[test]
fn println_handles_literals_variables_functions_and_blocks() {
    check_run(
        Path::new("tests/fixtures/print.eta"),
        Expected {
            stdout: "literal\nvariable\nfunction\nblock\nelse\n",
            stderr: "",
        },
    )
    .unwrap();
}
