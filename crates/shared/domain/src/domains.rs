//! Error domains: the fixed, type-level prefix every record carries.

use std::fmt::Debug;

/// A marker type naming the domain of a family of records.
///
/// Implement it with `#[error_domain("...")]` (validated at compile time) or by
/// hand next to a `const` assertion:
///
/// ```rust
/// use errata_domain::{ErrorDomain, is_valid_domain};
///
/// #[derive(Debug, Clone, Copy, Default)]
/// pub struct Billing;
///
/// impl ErrorDomain for Billing {
///     const DOMAIN: &'static str = "billing.invoice";
/// }
/// const _: () = assert!(is_valid_domain(Billing::DOMAIN));
/// ```
pub trait ErrorDomain: Debug + Send + Sync + 'static {
    /// Hierarchical domain, e.g. `"database.sql"`.
    const DOMAIN: &'static str;
}

macro_rules! builtin_domains {
    ($($(#[$meta:meta])* $name:ident => $domain:literal),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl ErrorDomain for $name {
                const DOMAIN: &'static str = $domain;
            }

            const _: () = assert!($crate::code::is_valid_domain($domain));
        )+

        /// Every domain shipped with the crate, in declaration order (may repeat).
        pub const BUILTIN_DOMAINS: &[&str] = &[$($domain),+];
    };
}

builtin_domains! {
    /// Data validation failures.
    Validation => "validation",
    /// OS, file system and I/O failures.
    Os => "os",
    /// Configuration parsing, validation and loading failures.
    Configuration => "config",
    /// Failures during program execution.
    Runtime => "runtime",
    /// Missing or invalid credentials.
    Authentication => "authentication",
    /// Missing permissions or privileges.
    Authorization => "authorization",
    /// Features that are not implemented yet.
    NotImplemented => "runtime",
    /// Base domain for frameworks built on top of errata.
    Framework => "framework",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_domains_are_declared() {
        assert_eq!(Os::DOMAIN, "os");
        assert_eq!(Configuration::DOMAIN, "config");
        assert_eq!(NotImplemented::DOMAIN, Runtime::DOMAIN);
        assert!(BUILTIN_DOMAINS.contains(&"framework"));
    }
}
