//! # Domain Models
//!
//! Pure value types of the errata framework: code identifiers, the normalizer,
//! context maps and their merge rule, severities and error domains.
//! Keep it lean: no I/O, no global state, no registry. Just data and the
//! total functions over it.

pub mod code;
pub mod context;
pub mod domains;
mod error;
pub mod normalize;
mod severity;

pub use code::{CodeIdentifier, FALLBACK_DOMAIN, GENERIC_CODE, is_valid_component, is_valid_domain};
pub use context::{ContextMap, display_value, merge};
pub use domains::{BUILTIN_DOMAINS, ErrorDomain};
pub use error::{CodeError, CodeErrorExt};
pub use normalize::{normalize, normalize_segments};
pub use severity::Severity;
