#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the errata workspace.
//! This crate provides attribute macros for declaring internal error enums and
//! compile-time validated error domains.
//!
//! ## Usage
//! Most consumers reach these through the `errata` facade:
//! ```toml
//! [dependencies]
//! errata = { path = "../crates/errata" }
//! ```
//!
//! See each macro’s docstring for examples; they are `ignore`d to avoid compiling in this crate,
//! but should be copied into consuming crates’ tests/examples as needed.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// A high-level attribute macro for defining crate-internal error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), plus a `context` field.
/// 4. Tuple or unit variants are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use errata_derive::errata_error;
/// use std::borrow::Cow;
///
/// #[errata_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Invalid setting{}: {message}", format_context(.context))]
///     Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn errata_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro that turns a unit struct into an error domain marker.
///
/// The marker gets `Debug, Clone, Copy, Default, PartialEq, Eq, Hash`; do not derive them again.
///
/// The domain string is checked against the component grammar
/// (`[a-z][a-z0-9-]*[a-z0-9]`, dot-separated) while compiling, so an invalid
/// domain never reaches runtime.
///
/// # Arguments
///
/// * A string literal with the hierarchical domain (e.g. `"database.sql"`).
/// * `crate = path` - Optional path to the crate exporting `ErrorDomain`.
///   Defaults to `::errata::domain`.
///
/// # Example
///
/// ```rust,ignore
/// use errata::prelude::*;
///
/// #[error_domain("billing.invoice")]
/// pub struct Billing;
///
/// let failure = ErrorRecord::<Billing>::new("Invoice total is negative");
/// assert_eq!(failure.full_identifier(), "billing.invoice.generic-000");
/// ```
#[proc_macro_attribute]
pub fn error_domain(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::domain::expand_domain(args.into(), input).into()
}
