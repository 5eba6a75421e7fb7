//! Item codes.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stock-keeping unit: an opaque product identifier such as `"ipd"`.
///
/// No validation is applied. Unknown codes are valid and simply price at zero
/// unless a rule exists for them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    pub fn new(code: impl Into<String>) -> Self {
        Sku(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Sku {
    fn from(code: &str) -> Self {
        Sku(code.to_string())
    }
}

impl From<String> for Sku {
    fn from(code: String) -> Self {
        Sku(code)
    }
}

impl Borrow<str> for Sku {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
