use std::path::Path;

use test_utils::check_failing_with_message;

/// Scenario 7: reassigning a binding with a value of a different type is an
/// evaluation-time error, reported with a detailed source-position banner.
#[test]
fn reassignment_with_a_new_type_is_an_error() {
    check_failing_with_message(
        Path::new("tests/fixtures/type_error.eta"),
        "a variable cannot be reassigned with a new type",
    )
    .unwrap();
}
