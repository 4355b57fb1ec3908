//! Caller identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity used when a request names no caller.
///
/// Posts created without an identity live under `USER#anonymous`, and a
/// delete without one only finds those.
pub const ANONYMOUS: &str = "anonymous";

/// The opaque string naming a post's owner.
///
/// No verification happens here: whatever the caller presents is taken
/// verbatim. The only rule is that it is not empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wraps a raw identity, returning `None` when it is empty.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    /// The identity of a caller that presented none.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(ANONYMOUS.to_string())
    }

    /// Returns the raw identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
