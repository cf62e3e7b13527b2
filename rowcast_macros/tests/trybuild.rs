#[test]
fn ui_pass() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pass/derive_basic.rs");
    t.pass("tests/ui/pass/derive_labels.rs");
    t.pass("tests/ui/pass/derive_option.rs");
    t.pass("tests/ui/pass/derive_flatten.rs");
}

#[test]
#[ignore = "compile-fail stderr snapshots not pinned yet"]
fn ui_compile_fail() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/fail/not_a_struct.rs");
    t.compile_fail("tests/ui/fail/tuple_struct.rs");
    t.compile_fail("tests/ui/fail/flatten_with_column.rs");
    t.compile_fail("tests/ui/fail/generic_struct.rs");
    t.compile_fail("tests/ui/fail/missing_default.rs");
}
