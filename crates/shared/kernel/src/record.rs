//! # Error Records
//!
//! [`ErrorRecord`] is the structured failure value: an immutable identity
//! (code + message + details, fixed at construction) plus diagnostics that the
//! observing code keeps growing (context, suggestions) before handing it on.

use errata_domain::{
    CodeError, CodeIdentifier, ContextMap, ErrorDomain, GENERIC_CODE, Severity, display_value,
    domains, merge,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;

/// Boxed native failure stored as a record's cause.
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Validation failures.
pub type ValidationFailure = ErrorRecord<domains::Validation>;
/// OS, file system and I/O failures.
pub type OsFailure = ErrorRecord<domains::Os>;
/// Configuration failures.
pub type ConfigFailure = ErrorRecord<domains::Configuration>;
/// Failures during program execution.
pub type RuntimeFailure = ErrorRecord<domains::Runtime>;
/// Missing or invalid credentials.
pub type AuthenticationFailure = ErrorRecord<domains::Authentication>;
/// Missing permissions.
pub type AuthorizationFailure = ErrorRecord<domains::Authorization>;
/// Features that do not exist yet.
pub type NotImplementedFailure = ErrorRecord<domains::NotImplemented>;
/// Base record for frameworks layered on errata.
pub type FrameworkFailure = ErrorRecord<domains::Framework>;

/// A failure occurrence in domain `D`.
///
/// ```rust
/// use errata_kernel::OsFailure;
/// use serde_json::json;
///
/// let mut record = OsFailure::builder("Config file missing")
///     .error_code("file-missing")
///     .detail("path", "/etc/app.toml")
///     .build();
///
/// record.attach_context("attempt", 2).add_suggestion("Create the file");
///
/// assert_eq!(record.to_string(), "[os.file-missing] Config file missing");
/// assert_eq!(record.context("attempt"), Some(&json!(2)));
/// ```
#[derive(Debug)]
pub struct ErrorRecord<D: ErrorDomain> {
    code: CodeIdentifier,
    message: String,
    details: ContextMap,
    context: ContextMap,
    suggestions: Vec<String>,
    severity: Severity,
    recoverable: bool,
    cause: Option<BoxedCause>,
    _domain: PhantomData<D>,
}

impl<D: ErrorDomain> ErrorRecord<D> {
    /// Static domain of this record type.
    pub const DOMAIN: &'static str = D::DOMAIN;

    /// Starts a record with the given message.
    pub fn builder(message: impl Into<String>) -> ErrorRecordBuilder<D> {
        ErrorRecordBuilder {
            message: message.into(),
            code: None,
            details: ContextMap::new(),
            severity: Severity::default(),
            recoverable: false,
            cause: None,
            _domain: PhantomData,
        }
    }

    /// Shorthand for `builder(message).build()`.
    ///
    /// # Panics
    /// Panics if `message` is empty.
    pub fn new(message: impl Into<String>) -> Self {
        Self::builder(message).build()
    }

    /// `domain.code` of this occurrence.
    #[must_use]
    pub const fn code(&self) -> &CodeIdentifier {
        &self.code
    }

    /// Canonical formatted identifier, e.g. `os.file.not-found`.
    #[must_use]
    pub fn full_identifier(&self) -> String {
        self.code.to_string()
    }

    /// Domain of the identifier (which may differ from [`Self::DOMAIN`] when the
    /// code was resolved from a native failure).
    #[must_use]
    pub fn domain(&self) -> String {
        self.code.domain_str()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Details fixed at construction.
    #[must_use]
    pub const fn details(&self) -> &ContextMap {
        &self.details
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.recoverable
    }

    /// Sets one context entry, replacing any previous value for `key`.
    pub fn attach_context(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Merges `entries` into the context; entries win over existing keys.
    pub fn attach_context_map(&mut self, entries: &ContextMap) -> &mut Self {
        self.context = merge(&self.context, entries);
        self
    }

    /// Places this record inside an enclosing scope: keys the record already
    /// carries win over the scope's.
    pub fn attach_scope(&mut self, outer: &ContextMap) -> &mut Self {
        self.context = merge(outer, &self.context);
        self
    }

    #[must_use]
    pub fn context(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Context value for `key`, or `default` when absent.
    #[must_use]
    pub fn context_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.context.get(key).cloned().unwrap_or_else(|| default.into())
    }

    #[must_use]
    pub const fn context_map(&self) -> &ContextMap {
        &self.context
    }

    #[must_use]
    pub fn has_context(&self, key: &str) -> bool {
        self.context.contains_key(key)
    }

    pub fn clear_context(&mut self) -> &mut Self {
        self.context.clear();
        self
    }

    /// Appends a recovery suggestion. Duplicates are kept.
    pub fn add_suggestion(&mut self, text: impl Into<String>) -> &mut Self {
        self.suggestions.push(text.into());
        self
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[must_use]
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// The native failure that triggered this record.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Walks the cause and everything it was caused by, nearest first.
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        let first = self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static));
        std::iter::successors(first, |&err| err.source())
    }

    /// `[code] message`, followed by `(k=v, ...)` when details are present.
    /// String values are single-quoted: `(field='age', max=150)`.
    #[must_use]
    pub fn full_message(&self) -> String {
        if self.details.is_empty() {
            return self.to_string();
        }

        let details = self
            .details
            .iter()
            .map(|(key, value)| format!("{key}={}", quoted_value(value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{self} ({details})")
    }

    /// Serializable snapshot of everything the record carries.
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code.clone(),
            domain: self.domain(),
            message: self.message.clone(),
            details: self.details.clone(),
            context: self.context.clone(),
            suggestions: self.suggestions.clone(),
            severity: self.severity,
            recoverable: self.recoverable,
            causes: self.causes().map(ToString::to_string).collect(),
        }
    }
}

impl<D: ErrorDomain> fmt::Display for ErrorRecord<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl<D: ErrorDomain> StdError for ErrorRecord<D> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
    }
}

#[derive(Debug)]
enum CodeSource {
    Full(CodeIdentifier),
    Local(String),
}

/// Builder for [`ErrorRecord`]; the only place a cause can be set.
#[derive(Debug)]
#[must_use = "The builder must be finished with build() or try_build()."]
pub struct ErrorRecordBuilder<D: ErrorDomain> {
    message: String,
    code: Option<CodeSource>,
    details: ContextMap,
    severity: Severity,
    recoverable: bool,
    cause: Option<BoxedCause>,
    _domain: PhantomData<D>,
}

impl<D: ErrorDomain> ErrorRecordBuilder<D> {
    /// Uses a complete identifier, e.g. one returned by resolution.
    pub fn code(mut self, code: CodeIdentifier) -> Self {
        self.code = Some(CodeSource::Full(code));
        self
    }

    /// Uses a local code under the record's domain (`D::DOMAIN.<code>`).
    pub fn error_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(CodeSource::Local(code.into()));
        self
    }

    /// Replaces all details.
    pub fn details(mut self, details: ContextMap) -> Self {
        self.details = details;
        self
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub const fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub const fn recoverable(mut self, recoverable: bool) -> Self {
        self.recoverable = recoverable;
        self
    }

    pub fn cause<E>(mut self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn boxed_cause(mut self, cause: BoxedCause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Finishes the record.
    ///
    /// # Panics
    /// An empty message or a malformed local code is a
    /// programming error and panics immediately. Use [`Self::try_build`] for
    /// input you do not control.
    pub fn build(self) -> ErrorRecord<D> {
        match self.try_build() {
            Ok(record) => record,
            Err(err) => panic!("invalid {} record: {err}", D::DOMAIN),
        }
    }

    /// Finishes the record, reporting precondition failures instead of panicking.
    ///
    /// # Errors
    /// [`CodeError::EmptyMessage`] for an empty message and
    /// [`CodeError::Malformed`] for an invalid local code.
    pub fn try_build(self) -> Result<ErrorRecord<D>, CodeError> {
        if self.message.is_empty() {
            return Err(CodeError::EmptyMessage {
                message: "record message cannot be empty".into(),
                context: Some(D::DOMAIN.into()),
            });
        }

        let code = match self.code {
            Some(CodeSource::Full(code)) => code,
            Some(CodeSource::Local(code)) => CodeIdentifier::compose(&[D::DOMAIN], &code)?,
            None => default_code::<D>(),
        };

        Ok(ErrorRecord {
            code,
            message: self.message,
            details: self.details,
            context: ContextMap::new(),
            suggestions: Vec::new(),
            severity: self.severity,
            recoverable: self.recoverable,
            cause: self.cause,
            _domain: PhantomData,
        })
    }
}

fn quoted_value(value: &Value) -> String {
    match value {
        Value::String(text) => format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'")),
        other => display_value(other).into_owned(),
    }
}

fn default_code<D: ErrorDomain>() -> CodeIdentifier {
    CodeIdentifier::compose(&[D::DOMAIN], GENERIC_CODE).unwrap_or_else(|_| CodeIdentifier::fallback())
}

/// Owned, serializable view of an [`ErrorRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: CodeIdentifier,
    pub domain: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "ContextMap::is_empty")]
    pub details: ContextMap,
    #[serde(default, skip_serializing_if = "ContextMap::is_empty")]
    pub context: ContextMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    pub severity: Severity,
    pub recoverable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use errata_domain::domains::{Os, Validation};
    use serde_json::json;
    use std::io;

    #[derive(Debug)]
    struct Billing;

    impl ErrorDomain for Billing {
        const DOMAIN: &'static str = "billing.invoice";
    }

    fn scope(value: Value) -> ContextMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn code_defaults_to_generic_under_domain() {
        let record = ErrorRecord::<Billing>::new("Invoice rejected");
        assert_eq!(record.full_identifier(), "billing.invoice.generic-000");
        assert_eq!(record.domain(), "billing.invoice");
        assert_eq!(ErrorRecord::<Billing>::DOMAIN, "billing.invoice");
    }

    #[test]
    fn local_codes_compose_with_domain() {
        let record = ErrorRecord::<Billing>::builder("Overdue").error_code("overdue").build();
        assert_eq!(record.full_identifier(), "billing.invoice.overdue");
    }

    #[test]
    fn local_code_repeating_domain_is_folded() {
        let record = ErrorRecord::<Billing>::builder("Bad invoice").error_code("invoice").build();
        assert_eq!(record.full_identifier(), "billing.invoice");
    }

    #[test]
    fn empty_message_is_rejected() {
        let err = ErrorRecord::<Os>::builder("").try_build().unwrap_err();
        assert!(matches!(err, CodeError::EmptyMessage { .. }));
    }

    #[test]
    fn whitespace_message_is_allowed() {
        let record = ErrorRecord::<Os>::new(" ");
        assert_eq!(record.message(), " ");
        assert_eq!(record.to_string(), "[os.generic-000]  ");
    }

    #[test]
    #[should_panic(expected = "record message cannot be empty")]
    fn empty_message_panics_on_build() {
        let _ = ErrorRecord::<Os>::new("");
    }

    #[test]
    fn malformed_local_code_is_rejected() {
        let err = ErrorRecord::<Os>::builder("x").error_code("Not Valid").try_build().unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn context_is_last_write_wins() {
        let mut record = ErrorRecord::<Validation>::new("Bad email");
        record.attach_context("field", "email").attach_context("field", "login");

        assert_eq!(record.context("field"), Some(&json!("login")));
        assert!(record.has_context("field"));
        assert_eq!(record.context_or("missing", 7), json!(7));

        record.clear_context();
        assert!(record.context_map().is_empty());
    }

    #[test]
    fn scope_and_map_attachment_differ_in_precedence() {
        let mut record = ErrorRecord::<Validation>::new("Bad email");
        record.attach_context("request", json!({ "id": 1 }));

        record.attach_scope(&scope(json!({ "request": { "id": 0, "user": "ann" }, "tenant": "t1" })));
        assert_eq!(record.context("request"), Some(&json!({ "id": 1 })));
        assert_eq!(record.context("tenant"), Some(&json!("t1")));

        record.attach_context_map(&scope(json!({ "request": { "user": "bob" } })));
        assert_eq!(record.context("request"), Some(&json!({ "user": "bob" })));
    }

    #[test]
    fn suggestions_keep_order_and_duplicates() {
        let mut record = ErrorRecord::<Validation>::new("Bad email");
        assert!(!record.has_suggestions());
        record.add_suggestion("Check format").add_suggestion("Retry").add_suggestion("Check format");
        assert_eq!(record.suggestions(), ["Check format", "Retry", "Check format"]);
    }

    #[test]
    fn full_message_lists_details() {
        let record = ErrorRecord::<Validation>::builder("Value out of range")
            .error_code("out-of-range")
            .detail("field", "age")
            .detail("max", 150)
            .build();

        assert_eq!(record.to_string(), "[validation.out-of-range] Value out of range");
        assert_eq!(
            record.full_message(),
            "[validation.out-of-range] Value out of range (field='age', max=150)"
        );
    }

    #[test]
    fn full_message_escapes_quotes_in_strings() {
        let record = ErrorRecord::<Validation>::builder("Bad name")
            .detail("name", "o'hara")
            .detail("strict", true)
            .build();
        assert_eq!(record.full_message(), r"[validation.generic-000] Bad name (name='o\'hara', strict=true)");
    }

    #[test]
    fn cause_is_exposed_as_source() {
        let record = ErrorRecord::<Os>::builder("Could not open")
            .cause(io::Error::new(io::ErrorKind::NotFound, "no such file"))
            .build();

        assert_eq!(record.cause().map(ToString::to_string).as_deref(), Some("no such file"));
        assert_eq!(record.source().map(ToString::to_string).as_deref(), Some("no such file"));
        assert_eq!(record.causes().count(), 1);
    }

    #[test]
    fn cause_chain_is_walked() {
        let inner = ErrorRecord::<Os>::builder("disk gone")
            .cause(io::Error::other("sector 7"))
            .build();
        let outer = ErrorRecord::<Validation>::builder("import failed").cause(inner).build();

        let chain: Vec<String> = outer.causes().map(ToString::to_string).collect();
        assert_eq!(chain, ["[os.generic-000] disk gone", "sector 7"]);
    }

    #[test]
    fn severity_and_recoverable_default() {
        let record = ErrorRecord::<Os>::new("x");
        assert_eq!(record.severity(), Severity::Error);
        assert!(!record.is_recoverable());

        let record = ErrorRecord::<Os>::builder("x").severity(Severity::Warning).recoverable(true).build();
        assert_eq!(record.severity(), Severity::Warning);
        assert!(record.is_recoverable());
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut record = ErrorRecord::<Os>::builder("Could not open")
            .error_code("open-failed")
            .detail("path", "/tmp/x")
            .cause(io::Error::other("denied"))
            .build();
        record.attach_context("attempt", 3).add_suggestion("Check permissions");

        let report = record.report();
        let json = serde_json::to_string(&report).unwrap();
        let back: ErrorReport = serde_json::from_str(&json).unwrap();

        assert_eq!(back, report);
        assert_eq!(back.code.to_string(), "os.open-failed");
        assert_eq!(back.causes, ["denied"]);
        assert!(json.contains("\"severity\":\"error\""));
    }

    #[test]
    fn report_with_bare_domain_code_round_trips() {
        let report = ValidationFailure::builder("Bad value").error_code("validation").build().report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"code\":\"validation\""));

        let back: ErrorReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
        assert_eq!(back.code.code(), "validation");
    }
}
