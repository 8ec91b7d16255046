use std::path::Path;

use test_utils::{check_run, Expected};

/// A string's truthiness is decided by rendered-text coincidence with the
/// `null`/`false` renderings, not by its tag — so the strings `"false"` and
/// `"null"` are falsy even though they are `String` values, matching the
/// original evaluator's `debug()`-based comparison (SPEC_FULL §4.3 "If").
#[test]
fn strings_rendering_as_null_or_false_are_falsy() {
    check_run(
        Path::new("tests/fixtures/truthy_strings.eta"),
        Expected {
            stdout: "falsy\nfalsy\ntruthy\ntrue\ntrue\nfalse\n",
            stderr: "",
        },
    )
    .unwrap();
}
