use std::path::Path;

use test_utils::{check_run, Expected};

/// Property 8: a `let` inside a function body shadows an outer binding of
/// the same name without leaking the shadow back out.
#[test]
fn inner_let_shadows_without_leaking() {
    check_run(
        Path::new("tests/fixtures/scope.eta"),
        Expected {
            stdout: "20\n10\n",
            stderr: "",
        },
    )
    .unwrap();
}
