use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// A stable document identifier derived from a file name.
///
/// Two documents with the same name always share an id, which is what lets
/// re-adding a file replace its previous entry in the store. The hash is
/// std's `DefaultHasher`, which is fixed for a given build but may change
/// between Rust releases, so ids are only stable within one process and
/// must not be persisted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
#[serde(into = "String")]
pub struct DocumentId(u64);

impl DocumentId {
    pub fn new(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish())
    }

    pub fn numeric(self) -> u64 {
        self.0
    }

    /// The leading `len` hex digits, for human display.
    pub fn short(self, len: usize) -> String {
        let full = format!("{:016x}", self.0);
        full[..len.clamp(1, 16)].to_string()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.short(6))
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.short(16)
    }
}
