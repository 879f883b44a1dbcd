//! Paper identifier type.
//!
//! Paper ids arrive from hand-written JSON documents where authors use
//! either strings (`"attention-2017"`) or plain numbers (`3`). Both forms
//! are normalized into one string-backed identifier so lookups never
//! depend on how the document spelled them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable paper identifier.
///
/// Numeric ids are stored in their decimal form, so `3` and `"3"` refer to
/// the same paper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPaperId")]
pub struct PaperId(String);

impl PaperId {
    /// Create a new PaperId from anything string-like.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaperId {
    #[inline]
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for PaperId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for PaperId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

/// Wire shapes accepted for an id.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPaperId {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl From<RawPaperId> for PaperId {
    fn from(raw: RawPaperId) -> Self {
        match raw {
            RawPaperId::Text(text) => Self(text),
            RawPaperId::Integer(n) => Self(n.to_string()),
            // JS hands integral numbers over as floats
            RawPaperId::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                Self((n as i64).to_string())
            }
            RawPaperId::Number(n) => Self(n.to_string()),
        }
    }
}
