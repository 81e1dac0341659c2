//! Multi-line rendering of [`ErrorRecord`]s.
//!
//! The layout is stable and scraped by log tooling:
//!
//! ```text
//! [os.file.not-found] Settings file is missing
//! Context:
//!   path: /etc/app.toml
//!   attempt: 2
//! Suggestions:
//!   1. Create the file
//!   2. Pass --config
//! ```

use crate::record::ErrorRecord;
use errata_domain::{ErrorDomain, display_value};
use serde::Deserialize;
use std::fmt::Write as _;

const DEFAULT_INDENT: usize = 2;

/// Which sections [`MessageFormatter`] emits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub include_context: bool,
    pub include_suggestions: bool,
    /// Appends a `Caused by:` block with the cause chain.
    pub include_causes: bool,
    pub indent: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self { include_context: true, include_suggestions: true, include_causes: false, indent: DEFAULT_INDENT }
    }
}

/// Renders records as text. Never fails: every value has a display form.
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
    config: FormatterConfig,
}

impl MessageFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Renders `record` with the sections enabled in the configuration.
    #[must_use]
    pub fn render<D: ErrorDomain>(&self, record: &ErrorRecord<D>) -> String {
        self.format(record, self.config.include_context, self.config.include_suggestions)
    }

    /// Renders `record`, choosing the context and suggestion sections explicitly.
    ///
    /// With both switched off the output is exactly `[code] message`.
    ///
    /// ```rust
    /// use errata_kernel::{MessageFormatter, RuntimeFailure};
    ///
    /// let mut record = RuntimeFailure::builder("Worker crashed").error_code("worker-crashed").build();
    /// record.attach_context("worker", 3).add_suggestion("Restart the pool");
    ///
    /// let formatter = MessageFormatter::new();
    /// assert_eq!(formatter.format(&record, false, false), "[runtime.worker-crashed] Worker crashed");
    /// assert_eq!(
    ///     formatter.format(&record, true, true),
    ///     "[runtime.worker-crashed] Worker crashed\nContext:\n  worker: 3\nSuggestions:\n  1. Restart the pool"
    /// );
    /// ```
    #[must_use]
    pub fn format<D: ErrorDomain>(
        &self,
        record: &ErrorRecord<D>,
        include_context: bool,
        include_suggestions: bool,
    ) -> String {
        let pad = " ".repeat(self.config.indent);
        let mut out = record.to_string();

        if include_context && !record.context_map().is_empty() {
            out.push_str("\nContext:");
            for (key, value) in record.context_map() {
                let _ = write!(out, "\n{pad}{key}: {}", display_value(value));
            }
        }

        if include_suggestions && record.has_suggestions() {
            out.push_str("\nSuggestions:");
            for (n, suggestion) in record.suggestions().iter().enumerate() {
                let _ = write!(out, "\n{pad}{}. {suggestion}", n + 1);
            }
        }

        if self.config.include_causes {
            let mut causes = record.causes().peekable();
            if causes.peek().is_some() {
                out.push_str("\nCaused by:");
                for cause in causes {
                    let _ = write!(out, "\n{pad}- {cause}");
                }
            }
        }

        out
    }
}
