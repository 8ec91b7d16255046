use std::path::Path;

use test_utils::{check_run, Expected};

/// Properties 4-7: arithmetic commutativity, `push`/`pop`/`len` bookkeeping,
/// `slice` over the full range, and `type` naming every scalar/container
/// kind.
#[test]
fn arithmetic_array_and_type_properties() {
    check_run(
        Path::new("tests/fixtures/properties.eta"),
        Expected {
            stdout: concat!(
                "true\n",
                "4\n",
                "3\n",
                "[1, 2, 3]\n",
                "int\n",
                "float\n",
                "bool\n",
                "string\n",
                "array\n",
                "function\n",
                "builtin function\n",
                "null\n",
            ),
            stderr: "",
        },
    )
    .unwrap();
}
