//! # Code Registry
//!
//! The process-wide table mapping native failure types onto [`CodeIdentifier`]s,
//! plus the description table used for documentation and listing.
//!
//! Reads take a shared lock, so any number of threads can resolve failures at
//! once; registrations are serialized behind the write lock.

use crate::builtins;
use crate::config::ErrataConfig;
use crate::native::NativeType;
use errata_domain::{CodeError, CodeIdentifier, GENERIC_CODE, normalize_segments};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, trace, warn};

static GLOBAL: LazyLock<CodeRegistry> = LazyLock::new(CodeRegistry::with_builtins);

#[derive(Debug, Default)]
struct Tables {
    mappings: FxHashMap<NativeType, CodeIdentifier>,
    // Keyed by the formatted code so iteration is lexical and stable.
    descriptions: BTreeMap<String, (CodeIdentifier, String)>,
}

/// Shared handle to a native-type → code table and a code → description table.
///
/// Cloning is cheap and every clone sees the same tables.
#[derive(Debug, Clone, Default)]
pub struct CodeRegistry {
    tables: Arc<RwLock<Tables>>,
}

impl CodeRegistry {
    /// Creates an empty registry with no built-in mappings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the standard library mappings and
    /// their descriptions.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtins::install(&registry);
        registry
    }

    /// The process-wide registry, initialised with the built-ins on first use.
    ///
    /// Prefer passing an explicit handle where you can; this exists for code
    /// that has nowhere to thread one through.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Maps `native` to `code`. The last registration for a type wins, which
    /// also lets callers override a built-in mapping.
    pub fn register_mapping(&self, native: NativeType, code: CodeIdentifier) {
        debug!(native = %native, code = %code, "Registering error code mapping");
        if let Some(previous) = self.tables.write().mappings.insert(native, code) {
            trace!(native = %native, previous = %previous, "Replaced existing mapping");
        }
    }

    /// Shorthand for [`CodeRegistry::register_mapping`] with `NativeType::of::<E>()`.
    pub fn register<E: 'static>(&self, code: CodeIdentifier) {
        self.register_mapping(NativeType::of::<E>(), code);
    }

    /// Exact-type lookup; never walks to related types.
    #[must_use]
    pub fn lookup(&self, native: NativeType) -> Option<CodeIdentifier> {
        self.tables.read().mappings.get(&native).cloned()
    }

    /// Maps a native failure plus an optional, possibly partial, user-supplied
    /// code onto a canonical identifier.
    ///
    /// * No usable code: the registered mapping, or `<fallback_domain>.generic-000`.
    /// * A dotted code (`billing.invoice.overdue`): taken as-is, registry ignored.
    /// * A single segment (`db`): the registered mapping when its root domain
    ///   equals the segment, otherwise `<segment>.generic-000`.
    ///
    /// Never fails. Input that cannot be turned into a valid code is logged
    /// and resolved as if no code had been supplied; an unusable
    /// `fallback_domain` degrades to [`CodeIdentifier::fallback`].
    ///
    /// ```rust
    /// use errata_kernel::{CodeRegistry, NativeType};
    ///
    /// let registry = CodeRegistry::with_builtins();
    /// let native = NativeType::io(std::io::ErrorKind::NotFound);
    ///
    /// assert_eq!(registry.resolve(native, None, "os").to_string(), "os.file.not-found");
    /// assert_eq!(registry.resolve(native, Some("billing"), "os").to_string(), "billing.generic-000");
    /// assert_eq!(registry.resolve(native, Some("Billing.Late Fee"), "os").to_string(), "billing.late-fee");
    /// ```
    #[must_use]
    pub fn resolve(
        &self,
        native: NativeType,
        provided: Option<&str>,
        fallback_domain: &str,
    ) -> CodeIdentifier {
        let segments = provided.map(normalize_segments).unwrap_or_default();

        let resolved = match segments.as_slice() {
            [] => None,
            [domain] => self.resolve_partial(native, domain),
            [..] => match CodeIdentifier::parse(&segments.join(".")) {
                Ok(code) => Some(code),
                Err(err) => {
                    warn!(provided = ?provided, error = %err, "Ignoring unusable error code");
                    None
                },
            },
        };

        let code = resolved.unwrap_or_else(|| self.resolve_default(native, fallback_domain));
        debug!(native = %native, provided = ?provided, code = %code, "Resolved error code");
        code
    }

    fn resolve_partial(&self, native: NativeType, domain: &str) -> Option<CodeIdentifier> {
        if let Some(registered) = self.lookup(native).filter(|code| code.root() == domain) {
            return Some(registered);
        }

        match CodeIdentifier::compose(&[domain], GENERIC_CODE) {
            Ok(code) => Some(code),
            Err(err) => {
                warn!(domain, error = %err, "Ignoring unusable partial domain");
                None
            },
        }
    }

    fn resolve_default(&self, native: NativeType, fallback_domain: &str) -> CodeIdentifier {
        if let Some(registered) = self.lookup(native) {
            return registered;
        }

        let segments = normalize_segments(fallback_domain);
        CodeIdentifier::compose(segments.as_slice(), GENERIC_CODE).unwrap_or_else(|err| {
            warn!(fallback_domain, error = %err, "Fallback domain is unusable");
            CodeIdentifier::fallback()
        })
    }

    /// Documents `code`. Re-describing a code replaces its text.
    pub fn register_description(&self, code: &CodeIdentifier, description: impl Into<String>) {
        let description = description.into();
        debug!(code = %code, "Registering error code description");
        self.tables.write().descriptions.insert(code.to_string(), (code.clone(), description));
    }

    /// The description registered for `code`, if any.
    #[must_use]
    pub fn describe(&self, code: &CodeIdentifier) -> Option<String> {
        self.tables.read().descriptions.get(&code.to_string()).map(|(_, text)| text.clone())
    }

    /// Described codes at or below `prefix` (component-wise), in lexical order.
    /// `None` lists everything.
    #[must_use]
    pub fn list(&self, prefix: Option<&str>) -> Vec<CodeIdentifier> {
        self.entries(prefix).into_iter().map(|(code, _)| code).collect()
    }

    /// Like [`CodeRegistry::list`], paired with each description.
    #[must_use]
    pub fn entries(&self, prefix: Option<&str>) -> Vec<(CodeIdentifier, String)> {
        let prefix = prefix.unwrap_or_default();
        self.tables
            .read()
            .descriptions
            .values()
            .filter(|(code, _)| code.has_prefix(prefix))
            .cloned()
            .collect()
    }

    /// Number of registered type mappings.
    #[must_use]
    pub fn mapping_count(&self) -> usize {
        self.tables.read().mappings.len()
    }

    /// Registers every description from a loaded configuration.
    ///
    /// Entries are validated up front, so either all of them are applied or
    /// none are.
    ///
    /// # Errors
    /// Returns [`CodeError::Malformed`] for the first key that is not a valid code.
    pub fn apply_config(&self, config: &ErrataConfig) -> Result<usize, CodeError> {
        let parsed = config
            .descriptions
            .iter()
            .map(|(code, text)| CodeIdentifier::from_canonical(code).map(|code| (code, text)))
            .collect::<Result<Vec<_>, _>>()?;

        for (code, text) in &parsed {
            self.register_description(code, text.as_str());
        }
        Ok(parsed.len())
    }
}
