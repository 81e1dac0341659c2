use anyhow::{Context, Result, bail};
use errata::domain::domains::Runtime;
use errata::kernel::config::ErrataConfig;
use errata::{CodeIdentifier, CodeRegistry, ErrorRecord, MessageFormatter, NativeType};
use std::io::{ErrorKind, Write};

/// Stand-in native type for `resolve` without `--io-kind`; never registered.
#[derive(Debug)]
struct UnknownFailure;

#[derive(Debug)]
pub(crate) struct RenderRequest {
    pub(crate) code: String,
    pub(crate) message: String,
    pub(crate) context: Vec<(String, String)>,
    pub(crate) suggestions: Vec<String>,
}

pub(crate) fn list(out: &mut impl Write, registry: &CodeRegistry, prefix: Option<&str>) -> Result<()> {
    let entries = registry.entries(prefix);
    let width = entries.iter().map(|(code, _)| code.to_string().len()).max().unwrap_or_default();

    for (code, description) in entries {
        writeln!(out, "{:<width$}  {description}", code.to_string())?;
    }
    Ok(())
}

pub(crate) fn describe(out: &mut impl Write, registry: &CodeRegistry, code: &str) -> Result<()> {
    let code = CodeIdentifier::from_canonical(code)?;
    let Some(description) = registry.describe(&code) else {
        bail!("no description registered for '{code}'");
    };

    writeln!(out, "{description}")?;
    Ok(())
}

pub(crate) fn resolve(
    out: &mut impl Write,
    registry: &CodeRegistry,
    code: Option<&str>,
    domain: &str,
    io_kind: Option<ErrorKind>,
) -> Result<()> {
    let native = io_kind.map_or_else(NativeType::of::<UnknownFailure>, NativeType::io);
    writeln!(out, "{}", registry.resolve(native, code, domain))?;
    Ok(())
}

pub(crate) fn normalize(out: &mut impl Write, text: &str) -> Result<()> {
    let normalized = errata::normalize(text);
    writeln!(out, "{}", normalized.as_deref().unwrap_or("<none>"))?;
    Ok(())
}

pub(crate) fn render(out: &mut impl Write, config: &ErrataConfig, request: &RenderRequest) -> Result<()> {
    let code = CodeIdentifier::from_canonical(&request.code)?;
    let mut record = ErrorRecord::<Runtime>::builder(request.message.as_str())
        .code(code)
        .try_build()
        .context("cannot render record")?;

    for (key, value) in &request.context {
        record.attach_context(key.as_str(), value.as_str());
    }
    for suggestion in &request.suggestions {
        record.add_suggestion(suggestion.as_str());
    }

    let formatter = MessageFormatter::with_config(config.formatter.clone());
    writeln!(out, "{}", formatter.render(&record))?;
    Ok(())
}

/// Accepts `NotFound`, `not-found`, `not_found` and similar spellings.
pub(crate) fn parse_io_kind(raw: &str) -> Result<ErrorKind, String> {
    let kind = match errata::normalize(raw).as_deref() {
        Some("notfound" | "not-found") => ErrorKind::NotFound,
        Some("permissiondenied" | "permission-denied") => ErrorKind::PermissionDenied,
        Some("alreadyexists" | "already-exists") => ErrorKind::AlreadyExists,
        Some("timedout" | "timed-out" | "timeout") => ErrorKind::TimedOut,
        Some("unexpectedeof" | "unexpected-eof") => ErrorKind::UnexpectedEof,
        Some("brokenpipe" | "broken-pipe") => ErrorKind::BrokenPipe,
        Some("interrupted") => ErrorKind::Interrupted,
        Some("connectionrefused" | "connection-refused") => ErrorKind::ConnectionRefused,
        Some("connectionreset" | "connection-reset") => ErrorKind::ConnectionReset,
        Some("invaliddata" | "invalid-data") => ErrorKind::InvalidData,
        Some("invalidinput" | "invalid-input") => ErrorKind::InvalidInput,
        Some("unsupported") => ErrorKind::Unsupported,
        Some("other") => ErrorKind::Other,
        _ => return Err(format!("unknown I/O error kind '{raw}'")),
    };
    Ok(kind)
}

pub(crate) fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| (key.trim().to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn io_kinds_accept_several_spellings() {
        assert_eq!(parse_io_kind("NotFound"), Ok(ErrorKind::NotFound));
        assert_eq!(parse_io_kind("not_found"), Ok(ErrorKind::NotFound));
        assert_eq!(parse_io_kind("Timed Out"), Ok(ErrorKind::TimedOut));
        assert!(parse_io_kind("meltdown").is_err());
    }

    #[test]
    fn key_values_need_a_key() {
        assert_eq!(parse_key_value("path=/tmp/a=b"), Ok(("path".into(), "/tmp/a=b".into())));
        assert!(parse_key_value("=x").is_err());
        assert!(parse_key_value("novalue").is_err());
    }

    #[test]
    fn list_aligns_columns() {
        let registry = CodeRegistry::new();
        registry.register_description(&CodeIdentifier::parse("ab.cd").unwrap(), "short");
        registry.register_description(&CodeIdentifier::parse("ab.cdef").unwrap(), "long");

        let out = run(|buf| list(buf, &registry, None));
        assert_eq!(out, "ab.cd    short\nab.cdef  long\n");
    }

    #[test]
    fn describe_reads_listed_bare_codes() {
        let registry = CodeRegistry::new();
        let bare = CodeIdentifier::compose(&["quota"], "quota").unwrap();
        registry.register_description(&bare, "Quota exhausted");

        let listed = run(|buf| list(buf, &registry, None));
        assert_eq!(listed, "quota  Quota exhausted\n");
        assert_eq!(run(|buf| describe(buf, &registry, "quota")), "Quota exhausted\n");
    }

    #[test]
    fn resolve_without_io_kind_uses_domain() {
        let registry = CodeRegistry::with_builtins();
        let out = run(|buf| resolve(buf, &registry, None, "billing", None));
        assert_eq!(out, "billing.generic-000\n");
    }

    #[test]
    fn render_applies_formatter_config() {
        let mut config = ErrataConfig::default();
        config.formatter.include_context = false;
        let request = RenderRequest {
            code: "billing.invoice.overdue".into(),
            message: "Invoice overdue".into(),
            context: vec![("invoice".into(), "1042".into())],
            suggestions: vec!["Send a reminder".into()],
        };

        let out = run(|buf| render(buf, &config, &request));
        assert_eq!(out, "[billing.invoice.overdue] Invoice overdue\nSuggestions:\n  1. Send a reminder\n");
    }
}
