//! Kernel of the errata framework: the code registry and its resolution
//! algorithm, error records, the message formatter and the wrapping helpers
//! built on them.
//!
//! ## Resolution
//! ```rust
//! use errata_kernel::{CodeRegistry, NativeType};
//!
//! let registry = CodeRegistry::with_builtins();
//! let native = NativeType::of::<std::num::ParseIntError>();
//!
//! assert_eq!(registry.resolve(native, None, "runtime").to_string(), "validation.number.invalid-integer");
//! assert_eq!(registry.resolve(native, Some("validation"), "runtime").to_string(), "validation.number.invalid-integer");
//! assert_eq!(registry.resolve(native, Some("billing"), "runtime").to_string(), "billing.generic-000");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use errata_kernel::config::{ErrataConfig, load_config};
//! let cfg: ErrataConfig = load_config(Some("errata.toml")).unwrap();
//! errata_kernel::CodeRegistry::global().apply_config(&cfg).unwrap();
//! ```

mod builtins;
pub mod config;
pub mod format;
pub mod native;
pub mod record;
pub mod registry;
pub mod wrap;

pub use errata_domain as domain;

pub use format::{FormatterConfig, MessageFormatter};
pub use native::NativeType;
pub use record::{
    AuthenticationFailure, AuthorizationFailure, BoxedCause, ConfigFailure, ErrorRecord,
    ErrorRecordBuilder, ErrorReport, FrameworkFailure, NotImplementedFailure, OsFailure,
    RuntimeFailure, ValidationFailure,
};
pub use registry::CodeRegistry;
pub use wrap::{
    ErrorScope, RecordResultExt, WrapErrExt, WrapOptions, wrap, wrap_with, wrap_with_message,
};
