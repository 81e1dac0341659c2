use errata_derive::errata_error;
use std::borrow::Cow;

#[errata_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Malformed code{}: {message}", format_context(.context))]
    Malformed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err::<(), _>(std::io::Error::other("disk on fire")).context("reading codes")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading codes): disk on fire");

    let converted: DemoError = std::io::Error::other("eof").into();
    assert_eq!(converted.to_string(), "IO error: eof");

    let malformed: Result<(), DemoError> =
        Err(DemoError::Malformed { message: "db..x".into(), context: None });
    let err = malformed.context("parsing").unwrap_err();
    assert_eq!(err.to_string(), "Malformed code (parsing): db..x");
}
