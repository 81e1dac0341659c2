use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// How serious a failure is. Defaults to [`Severity::Error`].
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    #[default]
    Error,
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn text_forms_are_lowercase() {
        let names: Vec<String> = Severity::iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["info", "warning", "error", "critical"]);
        assert_eq!(Severity::from_str("critical"), Ok(Severity::Critical));
        assert!(Severity::from_str("fatal").is_err());
        assert_eq!(Severity::default(), Severity::Error);
    }

    #[test]
    fn ordering_follows_gravity() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Error < Severity::Critical);
    }
}
