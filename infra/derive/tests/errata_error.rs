#[test]
fn errata_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/errata_error_pass.rs");
}
