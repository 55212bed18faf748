use std::error::Error;
use std::fmt;

/// Returned when parsing a [`ProbeVariant`](crate::ProbeVariant) from a name
/// that no probe is registered under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownProbeError {
    name: String,
}

impl UnknownProbeError {
    pub(crate) fn new(name: &str) -> Self {
        UnknownProbeError {
            name: name.to_owned(),
        }
    }

    /// The name that failed to parse.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown probe module `{}` (expected `gil_disable` or `gil_enable`)",
            self.name
        )
    }
}

impl Error for UnknownProbeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            UnknownProbeError::new("gil_test").to_string(),
            "unknown probe module `gil_test` (expected `gil_disable` or `gil_enable`)"
        );
    }
}
