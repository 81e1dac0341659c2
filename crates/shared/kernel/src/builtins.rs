//! Standard library failures every registry starts with.

use crate::native::NativeType;
use crate::registry::CodeRegistry;
use errata_domain::{BUILTIN_DOMAINS, CodeIdentifier, GENERIC_CODE};
use std::io::ErrorKind;
use tracing::error;

/// `(native type, code, description)` rows installed by [`install`].
pub(crate) fn table() -> Vec<(NativeType, &'static str, &'static str)> {
    use std::{env, fmt, num, str, string, time};

    vec![
        (NativeType::io(ErrorKind::NotFound), "os.file.not-found", "A file or directory does not exist"),
        (NativeType::io(ErrorKind::PermissionDenied), "os.file.permission-denied", "Insufficient permissions for the operation"),
        (NativeType::io(ErrorKind::AlreadyExists), "os.file.already-exists", "The target already exists"),
        (NativeType::io(ErrorKind::TimedOut), "os.io.timeout", "An I/O operation timed out"),
        (NativeType::io(ErrorKind::UnexpectedEof), "os.io.unexpected-eof", "Input ended before the operation completed"),
        (NativeType::io(ErrorKind::BrokenPipe), "os.io.broken-pipe", "The other end of a pipe was closed"),
        (NativeType::io(ErrorKind::Interrupted), "runtime.io.interrupted", "An operation was interrupted"),
        (NativeType::io(ErrorKind::ConnectionRefused), "os.network.connection-refused", "The remote host refused the connection"),
        (NativeType::io(ErrorKind::ConnectionReset), "os.network.connection-reset", "The connection was reset by the remote host"),
        (NativeType::io(ErrorKind::InvalidData), "validation.data.invalid-data", "Data read from a source was not valid"),
        (NativeType::io(ErrorKind::InvalidInput), "validation.data.invalid-input", "An argument passed to an operation was not valid"),
        (NativeType::io(ErrorKind::Unsupported), "runtime.operation.unsupported", "The operation is not supported on this platform"),
        (NativeType::of::<num::ParseIntError>(), "validation.number.invalid-integer", "Text could not be parsed as an integer"),
        (NativeType::of::<num::ParseFloatError>(), "validation.number.invalid-float", "Text could not be parsed as a floating point number"),
        (NativeType::of::<num::TryFromIntError>(), "validation.number.out-of-range", "A number does not fit the target type"),
        (NativeType::of::<str::ParseBoolError>(), "validation.value.invalid-bool", "Text could not be parsed as a boolean"),
        (NativeType::of::<std::char::ParseCharError>(), "validation.value.invalid-char", "Text could not be parsed as a single character"),
        (NativeType::of::<str::Utf8Error>(), "validation.encoding.invalid-utf8", "Bytes are not valid UTF-8"),
        (NativeType::of::<string::FromUtf8Error>(), "validation.encoding.invalid-utf8", "Bytes are not valid UTF-8"),
        (NativeType::of::<env::VarError>(), "config.env.missing-variable", "An environment variable is missing or not unicode"),
        (NativeType::of::<fmt::Error>(), "runtime.format.failed", "Formatting a value failed"),
        (NativeType::of::<time::SystemTimeError>(), "runtime.clock.time-went-backwards", "The system clock moved backwards"),
        (NativeType::of::<serde_json::Error>(), "validation.json.parse-failed", "JSON could not be parsed or serialized"),
    ]
}

/// Registers the built-in mappings, their descriptions and a
/// `<domain>.generic-000` description for every built-in domain.
pub(crate) fn install(registry: &CodeRegistry) {
    for (native, text, description) in table() {
        match CodeIdentifier::parse(text) {
            Ok(code) => {
                registry.register_description(&code, description);
                registry.register_mapping(native, code);
            },
            Err(err) => error!(code = text, error = %err, "Skipping malformed built-in code"),
        }
    }

    for domain in BUILTIN_DOMAINS {
        match CodeIdentifier::compose(&[domain], GENERIC_CODE) {
            Ok(code) => registry.register_description(&code, format!("Unclassified {domain} failure")),
            Err(err) => error!(domain, error = %err, "Skipping malformed built-in domain"),
        }
    }
}
