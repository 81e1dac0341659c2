use errata::prelude::*;
use serde_json::json;

#[error_domain("database.sql.query")]
pub struct SqlQuery;

#[test]
fn declared_domain_drives_codes() {
    assert_eq!(SqlQuery::DOMAIN, "database.sql.query");

    let record = ErrorRecord::<SqlQuery>::builder("Column 'user_id' does not exist")
        .error_code("column-not-found")
        .build();
    assert_eq!(record.full_identifier(), "database.sql.query.column-not-found");
}

#[test]
fn declared_domain_is_the_wrap_fallback() {
    #[derive(Debug)]
    struct DriverFault;

    impl std::fmt::Display for DriverFault {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("driver fault")
        }
    }
    impl std::error::Error for DriverFault {}

    let registry = CodeRegistry::with_builtins();
    let result: Result<(), ErrorRecord<SqlQuery>> =
        Err::<(), _>(DriverFault).wrap_err_in(&registry, None).with_context("attempt", 1);

    let record = result.unwrap_err();
    assert_eq!(record.full_identifier(), "database.sql.query.generic-000");
    assert_eq!(record.report().context["attempt"], json!(1));
}

#[test]
fn marker_is_a_plain_value_type() {
    assert_eq!(SqlQuery, SqlQuery);
    assert_eq!(format!("{SqlQuery:?}"), "SqlQuery");
}

#[test]
fn error_domain_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/error_domain_pass.rs");
}
