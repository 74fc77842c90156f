use std::path::Path;

use crate::{
    doc_id::DocumentId,
    error::{Error, Result},
    tokenizer::{self, TokenSet},
    walker,
};

/// One indexed file under the store's root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    name: String,
    loaded: bool,
    tokens: TokenSet,
}

impl Document {
    /// Create an unloaded document for the file `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: DocumentId::new(&name),
            name,
            loaded: false,
            tokens: TokenSet::new(),
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Read `root/name` and tokenize its content.
    ///
    /// The attempt always completes: on failure the document is marked
    /// loaded with an empty token set and the read error is returned for
    /// the caller to report. Names that are not a plain file name are
    /// never read, since joining them could escape `root`.
    pub fn load(&mut self, root: &Path) -> Result<()> {
        if !walker::is_plain_name(&self.name) {
            self.loaded = true;
            self.tokens.clear();
            return Err(Error::NotFound {
                kind: "file",
                name: self.name.clone(),
            });
        }

        let path = root.join(&self.name);
        let outcome = std::fs::read(&path);
        self.loaded = true;

        match outcome {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                self.tokens = tokenizer::tokenize(&content);
                Ok(())
            }
            Err(source) => {
                self.tokens.clear();
                Err(Error::Read { path, source })
            }
        }
    }

    /// Case-insensitive, whitespace-trimmed membership test.
    ///
    /// Always false before the document has been loaded.
    pub fn contains_token(&self, word: &str) -> bool {
        self.loaded && self.tokens.contains(&tokenizer::normalize(word))
    }
}
