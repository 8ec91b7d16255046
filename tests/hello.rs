use std::path::Path;

use test_utils::{check_run, Expected};

#[test]
fn prints_a_string_literal() {
    check_run(
        Path::new("tests/fixtures/hello.eta"),
        Expected {
            stdout: "Hello, World!\n",
            stderr: "",
        },
    )
    .unwrap();
}
