//! Structured error-code identifiers.
//!
//! A code is written `domain[.subdomain...].code`: one or more domain components
//! followed by a single trailing code component. Every component matches
//! `[a-z][a-z0-9-]*[a-z0-9]`.

use crate::error::CodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Code used when resolution has nothing more specific than a domain.
pub const GENERIC_CODE: &str = "generic-000";

/// Domain of [`CodeIdentifier::fallback`], used when no usable domain is left.
pub const FALLBACK_DOMAIN: &str = "runtime";

const _: () = assert!(is_valid_component(GENERIC_CODE) && is_valid_component(FALLBACK_DOMAIN));

/// Returns `true` if `component` matches `[a-z][a-z0-9-]*[a-z0-9]`.
///
/// Usable in `const` context, e.g. `const _: () = assert!(is_valid_component("db"));`.
#[must_use]
pub const fn is_valid_component(component: &str) -> bool {
    let bytes = component.as_bytes();
    let len = bytes.len();
    if len < 2 || !bytes[0].is_ascii_lowercase() {
        return false;
    }

    let last = bytes[len - 1];
    if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
        return false;
    }

    let mut i = 1;
    while i < len - 1 {
        let b = bytes[i];
        if !(b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-') {
            return false;
        }
        i += 1;
    }
    true
}

/// Returns `true` if `domain` is one or more valid components joined by `.`.
#[must_use]
pub const fn is_valid_domain(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.is_empty() {
        return false;
    }

    let mut start = 0;
    let mut i = 0;
    while i <= bytes.len() {
        if i == bytes.len() || bytes[i] == b'.' {
            let (_, tail) = bytes.split_at(start);
            let (segment, _) = tail.split_at(i - start);
            if !component_bytes_valid(segment) {
                return false;
            }
            start = i + 1;
        }
        i += 1;
    }
    true
}

const fn component_bytes_valid(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(s) => is_valid_component(s),
        Err(_) => false,
    }
}

/// A validated, immutable `domain.code` identifier.
///
/// Identifiers are canonical: when the code repeats the trailing domain
/// component (`db.query` + `query`), the duplicates are folded away so that
/// [`CodeIdentifier::parse`] and [`fmt::Display`] stay exact inverses.
/// A single-component domain whose code equals it (`value` + `value`) has no
/// shorter spelling and formats as the bare domain; read it back with
/// [`CodeIdentifier::from_canonical`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodeIdentifier {
    domain: Vec<String>,
    code: String,
}

impl CodeIdentifier {
    /// Parses `domain[.domain...].code`.
    ///
    /// # Errors
    /// Returns [`CodeError::Malformed`] if the text is empty, has fewer than two
    /// segments, or any segment breaks the component grammar.
    pub fn parse(text: &str) -> Result<Self, CodeError> {
        if text.is_empty() {
            return Err(malformed("code cannot be empty", None));
        }

        let segments: Vec<&str> = text.split('.').collect();
        let Some((code, domain)) = segments.split_last().filter(|(_, domain)| !domain.is_empty())
        else {
            return Err(malformed(
                format!("'{text}' needs at least a domain and a code"),
                Some("expected domain[.domain...].code"),
            ));
        };

        Self::compose(domain, code).map_err(|err| match err {
            CodeError::Malformed { message, .. } => CodeError::Malformed {
                message,
                context: Some(format!("parsing '{text}'").into()),
            },
            other => other,
        })
    }

    /// Reads any text [`fmt::Display`] produces, including the bare `value`
    /// form of a folded `value.value`. Otherwise identical to [`Self::parse`].
    ///
    /// # Errors
    /// Returns [`CodeError::Malformed`] under the same rules as [`Self::parse`],
    /// except that a lone valid component is accepted.
    pub fn from_canonical(text: &str) -> Result<Self, CodeError> {
        if !text.contains('.') && is_valid_component(text) {
            return Ok(Self { domain: vec![text.to_owned()], code: text.to_owned() });
        }
        Self::parse(text)
    }

    /// Builds an identifier from already-normalized parts.
    ///
    /// Each domain part may itself be hierarchical (`"database.sql"`); parts
    /// are split on `.` before validation. No normalization happens here.
    ///
    /// # Errors
    /// Returns [`CodeError::Malformed`] if the domain is empty or any component
    /// (including `code`, which may not contain dots) breaks the grammar.
    pub fn compose<S: AsRef<str>>(domain_parts: &[S], code: &str) -> Result<Self, CodeError> {
        let mut domain = Vec::with_capacity(domain_parts.len());
        for part in domain_parts {
            for component in part.as_ref().split('.') {
                check_component(component, "domain")?;
                domain.push(component.to_owned());
            }
        }

        if domain.is_empty() {
            return Err(malformed("domain cannot be empty", None));
        }
        check_component(code, "code")?;

        while domain.len() > 1 && domain.last().is_some_and(|last| last == code) {
            domain.pop();
        }

        Ok(Self { domain, code: code.to_owned() })
    }

    /// `runtime.generic-000`: the identifier of last resort.
    ///
    /// Infallible, so callers that must never fail (resolution) always have
    /// something valid to return.
    #[must_use]
    pub fn fallback() -> Self {
        Self { domain: vec![FALLBACK_DOMAIN.to_owned()], code: GENERIC_CODE.to_owned() }
    }

    /// Domain components, outermost first.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// The domain joined with `.`.
    #[must_use]
    pub fn domain_str(&self) -> String {
        self.domain.join(".")
    }

    /// The outermost domain component.
    #[must_use]
    pub fn root(&self) -> &str {
        self.domain.first().map_or("", String::as_str)
    }

    /// The trailing code component.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns `true` when the code is [`GENERIC_CODE`].
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.code == GENERIC_CODE
    }

    /// Returns `true` when this identifier is `prefix` itself or lives beneath it,
    /// compared component-wise (`os` matches `os.file.not-found`, not `osx.fault`).
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_matches('.');
        if prefix.is_empty() {
            return true;
        }

        let mut own = self.domain.iter().map(String::as_str).chain(self.collapsed_code());
        prefix.split('.').all(|wanted| own.next() == Some(wanted))
    }

    /// Canonical textual form; the inverse of [`CodeIdentifier::parse`].
    #[must_use]
    pub fn format(&self) -> String {
        self.to_string()
    }

    fn collapsed_code(&self) -> Option<&str> {
        (self.domain.last() != Some(&self.code)).then_some(self.code.as_str())
    }
}

fn check_component(component: &str, role: &str) -> Result<(), CodeError> {
    if is_valid_component(component) {
        Ok(())
    } else {
        Err(malformed(
            format!("invalid {role} component '{component}'"),
            Some("components must match [a-z][a-z0-9-]*[a-z0-9]"),
        ))
    }
}

fn malformed(message: impl Into<String>, context: Option<&'static str>) -> CodeError {
    CodeError::Malformed { message: message.into().into(), context: context.map(Into::into) }
}

impl fmt::Display for CodeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.domain.join("."))?;
        match self.collapsed_code() {
            Some(code) => write!(f, ".{code}"),
            None => Ok(()),
        }
    }
}

impl FromStr for CodeIdentifier {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CodeIdentifier {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_canonical(&value)
    }
}

impl TryFrom<&str> for CodeIdentifier {
    type Error = CodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_canonical(value)
    }
}

impl From<CodeIdentifier> for String {
    fn from(value: CodeIdentifier) -> Self {
        value.to_string()
    }
}
