//! # Domain Errors
//!
//! [`CodeError`] covers every way a code or record can be rejected at its
//! boundary. Resolution, merging, normalization and formatting are total and
//! never produce it.

use std::borrow::Cow;

/// Errors raised while building identifiers and records.
#[errata_derive::errata_error]
#[derive(Clone, PartialEq, Eq)]
pub enum CodeError {
    /// A code string or component does not satisfy the component grammar.
    #[error("Malformed code{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A record was built with an empty message.
    #[error("Empty message{}: {message}", format_context(.context))]
    EmptyMessage { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CodeError {
    /// Returns `true` for [`CodeError::Malformed`].
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}
