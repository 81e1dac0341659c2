use errata_kernel::domain::{CodeIdentifier, is_valid_component};
use errata_kernel::domain::domains::Runtime;
use errata_kernel::{CodeRegistry, ErrorRecord, MessageFormatter, NativeType};
use proptest::prelude::*;
use std::io::ErrorKind;

#[derive(Debug)]
struct QueryFailed;

fn natives() -> impl Strategy<Value = NativeType> {
    prop_oneof![
        Just(NativeType::io(ErrorKind::NotFound)),
        Just(NativeType::io(ErrorKind::Other)),
        Just(NativeType::of::<std::num::ParseIntError>()),
        Just(NativeType::of::<QueryFailed>()),
        Just(NativeType::of::<String>()),
    ]
}

fn registry() -> CodeRegistry {
    let registry = CodeRegistry::with_builtins();
    registry.register::<QueryFailed>(CodeIdentifier::parse("db.query.failed").unwrap());
    registry
}

proptest! {
    #[test]
    fn resolution_is_total(
        native in natives(),
        provided in proptest::option::of(any::<String>()),
        fallback in any::<String>(),
    ) {
        let code = registry().resolve(native, provided.as_deref(), &fallback);
        // Whatever came in, the result is a valid identifier.
        prop_assert!(code.domain().iter().all(|c| is_valid_component(c)));
        prop_assert!(is_valid_component(code.code()));
        prop_assert_eq!(CodeIdentifier::from_canonical(&code.to_string()).unwrap(), code);
    }

    #[test]
    fn resolution_is_deterministic(
        native in natives(),
        provided in proptest::option::of("[A-Za-z_. -]{0,24}"),
        fallback in "[a-z]{2,8}",
    ) {
        let registry = registry();
        let first = registry.resolve(native, provided.as_deref(), &fallback);
        let second = registry.resolve(native, provided.as_deref(), &fallback);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn matching_partial_domain_prefers_registry(fallback in any::<String>()) {
        let code = registry().resolve(NativeType::of::<QueryFailed>(), Some("db"), &fallback);
        prop_assert_eq!(code.to_string(), "db.query.failed");
    }

    #[test]
    fn bare_format_is_header_only(message in "[^\\s].{0,40}") {
        let record = ErrorRecord::<Runtime>::builder(message.clone()).build();
        let expected = format!("[{}] {}", record.full_identifier(), message);
        prop_assert_eq!(MessageFormatter::new().format(&record, false, false), expected);
    }
}
