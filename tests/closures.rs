use std::path::Path;

use test_utils::{check_run, Expected};

/// Scenario 5: a function returning a function captures its parameter in a
/// closure that outlives the call that created it.
#[test]
fn nested_function_returns_closure() {
    check_run(
        Path::new("tests/fixtures/closures.eta"),
        Expected {
            stdout: "7\n",
            stderr: "",
        },
    )
    .unwrap();
}

/// Property 9: closures capture their enclosing environment by reference,
/// not by value — later mutations of a captured variable are visible.
#[test]
fn closure_observes_later_mutation_of_captured_variable() {
    check_run(
        Path::new("tests/fixtures/reference_closure.eta"),
        Expected {
            stdout: "2\n",
            stderr: "",
        },
    )
    .unwrap();
}
