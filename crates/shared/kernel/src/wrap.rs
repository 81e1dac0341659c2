//! Turning native failures into [`ErrorRecord`]s.
//!
//! [`wrap`] is the primitive; [`WrapErrExt`] and [`ErrorScope`] are sugar for
//! `Result`-returning code and for whole blocks of work.

use crate::native::NativeType;
use crate::record::ErrorRecord;
use crate::registry::CodeRegistry;
use errata_domain::{ContextMap, ErrorDomain};
use serde_json::Value;
use std::error::Error as StdError;
use std::marker::PhantomData;
use tracing::{Level, debug, error, info, trace, warn};

/// Wraps a native failure into a record of domain `D`.
///
/// The code is resolved through `registry` with `D::DOMAIN` as the fallback
/// domain, the record takes the error's message and keeps the error as its
/// cause.
///
/// ```rust
/// use errata_kernel::{CodeRegistry, OsFailure, wrap};
/// use std::io;
///
/// let registry = CodeRegistry::with_builtins();
/// let err = io::Error::new(io::ErrorKind::NotFound, "settings.toml");
///
/// let record: OsFailure = wrap(&registry, err, None);
/// assert_eq!(record.to_string(), "[os.file.not-found] settings.toml");
/// ```
pub fn wrap<D, E>(registry: &CodeRegistry, error: E, code: Option<&str>) -> ErrorRecord<D>
where
    D: ErrorDomain,
    E: StdError + Send + Sync + 'static,
{
    wrap_with_message(registry, error, code, None)
}

/// Like [`wrap`], with a message that replaces the native one.
pub fn wrap_with_message<D, E>(
    registry: &CodeRegistry,
    error: E,
    code: Option<&str>,
    message: Option<&str>,
) -> ErrorRecord<D>
where
    D: ErrorDomain,
    E: StdError + Send + Sync + 'static,
{
    wrap_with(registry, error, WrapOptions { code, message, details: ContextMap::new() })
}

/// Inputs of [`wrap_with`] beyond the native error itself.
#[derive(Debug, Clone, Default)]
pub struct WrapOptions<'a> {
    /// Full or partial code handed to resolution.
    pub code: Option<&'a str>,
    /// Replaces the native message when non-blank.
    pub message: Option<&'a str>,
    /// Construction-time details of the record.
    pub details: ContextMap,
}

/// The general form of [`wrap`].
///
/// ```rust
/// use errata_kernel::{CodeRegistry, ValidationFailure, WrapOptions, wrap_with};
/// use serde_json::json;
///
/// let registry = CodeRegistry::with_builtins();
/// let err = "x1".parse::<u32>().unwrap_err();
/// let details = json!({ "field": "quantity" }).as_object().cloned().unwrap_or_default();
///
/// let record: ValidationFailure = wrap_with(&registry, err, WrapOptions { details, ..Default::default() });
/// assert_eq!(record.details()["field"], "quantity");
/// ```
pub fn wrap_with<D, E>(registry: &CodeRegistry, error: E, options: WrapOptions<'_>) -> ErrorRecord<D>
where
    D: ErrorDomain,
    E: StdError + Send + Sync + 'static,
{
    let WrapOptions { code, message, details } = options;
    let native = NativeType::of_error(&error);
    let resolved = registry.resolve(native, code, D::DOMAIN);

    let message = message
        .filter(|text| !text.trim().is_empty())
        .map_or_else(|| error.to_string(), str::to_owned);
    // The record cannot carry an empty message; fall back to something that names the failure.
    let message = if message.trim().is_empty() {
        native.io_kind().map_or_else(|| native.short_name().to_owned(), |kind| kind.to_string())
    } else {
        message
    };

    debug!(native = %native, code = %resolved, "Wrapping native failure");
    ErrorRecord::builder(message).code(resolved).details(details).cause(error).build()
}

/// Wrapping for any `Result` whose error is a native failure.
pub trait WrapErrExt<T> {
    /// Wraps the error through an explicit registry.
    ///
    /// # Errors
    /// Returns the wrapped record when `self` is `Err`.
    fn wrap_err_in<D: ErrorDomain>(
        self,
        registry: &CodeRegistry,
        code: Option<&str>,
    ) -> Result<T, ErrorRecord<D>>;

    /// Wraps the error through [`CodeRegistry::global`].
    ///
    /// # Errors
    /// Returns the wrapped record when `self` is `Err`.
    fn wrap_err<D: ErrorDomain>(self, code: Option<&str>) -> Result<T, ErrorRecord<D>>;
}

impl<T, E> WrapErrExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[inline]
    fn wrap_err_in<D: ErrorDomain>(
        self,
        registry: &CodeRegistry,
        code: Option<&str>,
    ) -> Result<T, ErrorRecord<D>> {
        self.map_err(|err| wrap(registry, err, code))
    }

    #[inline]
    fn wrap_err<D: ErrorDomain>(self, code: Option<&str>) -> Result<T, ErrorRecord<D>> {
        self.wrap_err_in(CodeRegistry::global(), code)
    }
}

/// Diagnostics for a `Result` that already carries a record.
pub trait RecordResultExt<T, D: ErrorDomain> {
    /// Attaches one context entry to the record, if any.
    #[must_use]
    fn with_context(self, key: impl Into<String>, value: impl Into<Value>) -> Self;

    /// Appends a suggestion to the record, if any.
    #[must_use]
    fn with_suggestion(self, text: impl Into<String>) -> Self;

    /// Places the record inside an enclosing scope (its own keys win).
    #[must_use]
    fn in_scope(self, outer: &ContextMap) -> Self;
}

impl<T, D: ErrorDomain> RecordResultExt<T, D> for Result<T, ErrorRecord<D>> {
    fn with_context(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.map_err(|mut record| {
            record.attach_context(key, value);
            record
        })
    }

    fn with_suggestion(self, text: impl Into<String>) -> Self {
        self.map_err(|mut record| {
            record.add_suggestion(text);
            record
        })
    }

    fn in_scope(self, outer: &ContextMap) -> Self {
        self.map_err(|mut record| {
            record.attach_scope(outer);
            record
        })
    }
}

/// Runs a unit of work and converts its failure into a record of domain `D`,
/// attaching the scope's context and suggestions and logging the outcome.
///
/// ```rust
/// use errata_kernel::{CodeRegistry, ErrorScope, domain::domains::Validation};
///
/// let registry = CodeRegistry::with_builtins();
/// let result = ErrorScope::<Validation>::with_registry(&registry)
///     .context("field", "age")
///     .suggestion("Use digits only")
///     .run(|| "4x".parse::<u8>());
///
/// let record = result.unwrap_err();
/// assert_eq!(record.full_identifier(), "validation.number.invalid-integer");
/// assert_eq!(record.suggestions(), ["Use digits only"]);
/// ```
#[derive(Debug)]
#[must_use = "A scope does nothing until run."]
pub struct ErrorScope<'r, D: ErrorDomain> {
    registry: &'r CodeRegistry,
    code: Option<String>,
    message: Option<String>,
    details: ContextMap,
    context: ContextMap,
    suggestions: Vec<String>,
    level: Option<Level>,
    _domain: PhantomData<D>,
}

impl<D: ErrorDomain> ErrorScope<'static, D> {
    /// A scope resolving through [`CodeRegistry::global`].
    pub fn new() -> Self {
        Self::with_registry(CodeRegistry::global())
    }
}

impl<D: ErrorDomain> Default for ErrorScope<'static, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r, D: ErrorDomain> ErrorScope<'r, D> {
    /// A scope resolving through `registry`.
    pub fn with_registry(registry: &'r CodeRegistry) -> Self {
        Self {
            registry,
            code: None,
            message: None,
            details: ContextMap::new(),
            context: ContextMap::new(),
            suggestions: Vec::new(),
            level: Some(Level::ERROR),
            _domain: PhantomData,
        }
    }

    /// Full or partial code handed to resolution.
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Message replacing the native error's own.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Construction-time detail of every record this scope converts.
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn suggestion(mut self, text: impl Into<String>) -> Self {
        self.suggestions.push(text.into());
        self
    }

    /// Level converted failures are logged at; `None` disables logging.
    pub const fn level(mut self, level: Option<Level>) -> Self {
        self.level = level;
        self
    }

    /// Runs `work`, converting an `Err` into a record.
    ///
    /// # Errors
    /// Returns the converted record when `work` fails.
    pub fn run<T, E, F>(&self, work: F) -> Result<T, ErrorRecord<D>>
    where
        F: FnOnce() -> Result<T, E>,
        E: StdError + Send + Sync + 'static,
    {
        work().map_err(|err| self.convert(err))
    }

    /// Runs `work`, logging and swallowing a failure.
    pub fn run_suppressed<T, E, F>(&self, work: F) -> Option<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: StdError + Send + Sync + 'static,
    {
        self.run(work).ok()
    }

    fn convert<E>(&self, error: E) -> ErrorRecord<D>
    where
        E: StdError + Send + Sync + 'static,
    {
        let options = WrapOptions {
            code: self.code.as_deref(),
            message: self.message.as_deref(),
            details: self.details.clone(),
        };
        let mut record: ErrorRecord<D> = wrap_with(self.registry, error, options);
        record.attach_scope(&self.context);
        for suggestion in &self.suggestions {
            record.add_suggestion(suggestion.as_str());
        }

        if let Some(level) = self.level {
            log_record(level, &record);
        }
        record
    }
}

fn log_record<D: ErrorDomain>(level: Level, record: &ErrorRecord<D>) {
    let code = record.full_identifier();
    let message = record.message();
    match level {
        Level::ERROR => error!(code, message, "Failure converted in scope"),
        Level::WARN => warn!(code, message, "Failure converted in scope"),
        Level::INFO => info!(code, message, "Failure converted in scope"),
        Level::DEBUG => debug!(code, message, "Failure converted in scope"),
        _ => trace!(code, message, "Failure converted in scope"),
    }
}
