use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::import::ImportError;

/// Identifier attached to every catalog node before translation.
///
/// Unique across groups and layers for the lifetime of one import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid {
    pub value: String,
}

impl Uid {
    pub fn new(value: impl Into<String>) -> Self {
        Uid {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for Uid {
    fn from(value: &str) -> Self {
        Uid::new(value)
    }
}

/// Source of fresh identifiers for the identifier assigner.
pub trait UidGenerator {
    /// Produce a token that has not been handed out before.
    fn generate(&mut self) -> Result<Uid, ImportError>;
}

/// Random RFC 4122 (v4) identifiers. Never reused across imports.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUids;

impl UidGenerator for RandomUids {
    fn generate(&mut self) -> Result<Uid, ImportError> {
        Ok(Uid::new(Uuid::new_v4().to_string()))
    }
}

/// Deterministic `<prefix>-<n>` identifiers, for reproducible output.
#[derive(Debug, Clone)]
pub struct SequentialUids {
    prefix: String,
    next: u64,
}

impl SequentialUids {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }
}

impl Default for SequentialUids {
    fn default() -> Self {
        Self::new("node")
    }
}

impl UidGenerator for SequentialUids {
    fn generate(&mut self) -> Result<Uid, ImportError> {
        let n = self.next;
        self.next = self.next.checked_add(1).ok_or_else(|| {
            ImportError::IdGeneration(format!("sequence '{}' exhausted", self.prefix))
        })?;
        Ok(Uid::new(format!("{}-{}", self.prefix, n)))
    }
}

impl<G: UidGenerator + ?Sized> UidGenerator for Box<G> {
    fn generate(&mut self) -> Result<Uid, ImportError> {
        (**self).generate()
    }
}
