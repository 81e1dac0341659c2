use crate::format::FormatterConfig;
use config::{Config, Environment, File, Map};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "errata";
const ENV_PREFIX: &str = "ERRATA";

/// Errors raised while loading configuration.
#[errata_derive::errata_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Settings shared by errata binaries.
///
/// ```toml
/// [descriptions]
/// "billing.invoice.overdue" = "An invoice is past its due date"
///
/// [formatter]
/// include_causes = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrataConfig {
    /// Extra code descriptions, keyed by formatted code.
    pub descriptions: BTreeMap<String, String>,
    pub formatter: FormatterConfig,
}

/// Loads `T` from a file layered with environment overrides.
///
/// 1. **Base file**: `path`, or `errata` (any supported extension) in the
///    working directory when no path is given.
/// 2. **Environment**: variables prefixed with `ERRATA__`, nested with `__`
///    (`ERRATA__FORMATTER__INDENT=4` sets `formatter.indent`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or unreadable, or
/// the merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use errata_kernel::config::{ErrataConfig, load_config};
///
/// let cfg: ErrataConfig = load_config(Some("config/local")).unwrap_or_default();
/// assert!(cfg.formatter.include_context);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// `env` replaces the process environment when given.
fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__").source(env),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
