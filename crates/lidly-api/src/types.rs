//! Shared data types across both API generations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short-lived bearer credential obtained via refresh-token exchange.
///
/// Not cached across workflow runs — each activation pass re-authenticates
/// once and reuses the token for every call in that pass. `Debug` redacts
/// the bearer string so it never lands in logs.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub(crate) fn new(raw: String) -> Self {
        Self(raw)
    }

    /// The raw bearer string, for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

/// The `[start, end]` timestamp range during which an offer may be
/// activated. Both bounds are inclusive: an offer whose window starts or
/// ends exactly now is still eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Validity {
    /// Whether `instant` falls inside the window (inclusive on both ends).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}
