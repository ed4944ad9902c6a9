use std::fmt;

/// An access token held for the duration of one run.
///
/// `Debug` and `Display` print a mask, so a `Secret` can sit inside structs
/// that get logged without leaking its value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

/// What gets shown wherever the token would otherwise appear.
pub const MASK: &str = "********************";

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value. Only the remote URL builder should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({MASK})")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}
