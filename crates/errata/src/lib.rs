//! Facade crate for the errata framework.
//! Re-exports the domain models, the kernel and the proc macros under one name.
//! Keep this crate thin: it composes the other crates, it does not implement logic.
//!
//! ## Usage
//! ```rust
//! use errata::prelude::*;
//!
//! #[error_domain("billing.invoice")]
//! pub struct Invoice;
//!
//! let mut record = ErrorRecord::<Invoice>::builder("Invoice is overdue")
//!     .error_code("overdue")
//!     .detail("invoice", 1042)
//!     .build();
//! record.add_suggestion("Send a reminder");
//!
//! assert_eq!(record.to_string(), "[billing.invoice.overdue] Invoice is overdue");
//! ```

pub use errata_domain as domain;
pub use errata_kernel as kernel;
#[cfg(feature = "logger")]
pub use errata_logger as logger;

pub use errata_derive::{errata_error, error_domain};
pub use errata_domain::{CodeError, CodeIdentifier, ContextMap, ErrorDomain, Severity, merge, normalize};
pub use errata_kernel::{
    CodeRegistry, ErrorRecord, ErrorReport, ErrorScope, MessageFormatter, NativeType, WrapOptions,
    wrap, wrap_with,
};

/// Everything needed to declare, raise and render records.
pub mod prelude {
    pub use errata_derive::error_domain;
    pub use errata_domain::domains::{
        Authentication, Authorization, Configuration, Framework, NotImplemented, Os, Runtime,
        Validation,
    };
    pub use errata_domain::{CodeIdentifier, ContextMap, ErrorDomain, Severity};
    pub use errata_kernel::{
        AuthenticationFailure, AuthorizationFailure, CodeRegistry, ConfigFailure, ErrorRecord,
        ErrorScope, FrameworkFailure, MessageFormatter, NativeType, NotImplementedFailure,
        OsFailure, RecordResultExt, RuntimeFailure, ValidationFailure, WrapErrExt, WrapOptions,
        wrap, wrap_with,
    };
}

/// Build-time enabled features (by Cargo feature).
pub const ENABLED_FEATURES: &[&str] = &[
    #[cfg(feature = "logger")]
    "logger",
];
