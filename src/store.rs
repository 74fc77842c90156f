use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    doc_id::DocumentId,
    document::Document,
    error::{Error, Result},
    walker,
};

/// Maximum number of file reads in flight during [`DocumentStore::load_all`].
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Outcome of one [`DocumentStore::load_all`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Documents whose load was attempted.
    pub attempted: usize,
    /// Attempts that ended in a read error.
    pub failed: usize,
}

/// In-memory collection of documents rooted at one directory.
///
/// All access to the document map goes through a single mutex, so `add`,
/// `remove` and the writes made by `load_all` are serialized per store.
#[derive(Debug)]
pub struct DocumentStore {
    root: PathBuf,
    documents: Mutex<HashMap<DocumentId, Document>>,
    pool: rayon::ThreadPool,
}

impl DocumentStore {
    /// Create an empty store for `root` whose loads run on at most
    /// `concurrency` worker threads.
    pub fn open(root: impl Into<PathBuf>, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::Config(
                "concurrency limit must be at least 1".into(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(concurrency)
            .thread_name(|i| format!("simplesearch-load-{i}"))
            .build()?;

        Ok(Self {
            root: root.into(),
            documents: Mutex::new(HashMap::new()),
            pool,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The admission limit for concurrent reads.
    pub fn concurrency(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, HashMap<DocumentId, Document>> {
        self.documents.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register every `.txt` file directly under the root, unloaded.
    ///
    /// Returns the number of documents discovered.
    pub fn seed(&self) -> Result<usize> {
        let names = walker::discover_files(&self.root)?;
        let count = names.len();
        let mut documents = self.lock();
        for name in names {
            let doc = Document::new(name);
            documents.insert(doc.id(), doc);
        }
        Ok(count)
    }

    /// Insert `doc`, replacing any document with the same id.
    pub fn add(&self, doc: Document) {
        if self.lock().insert(doc.id(), doc).is_some() {
            debug!("replaced existing document");
        }
    }

    /// Remove the document with `id`. Absent ids are ignored.
    pub fn remove(&self, id: DocumentId) -> Option<Document> {
        self.lock().remove(&id)
    }

    /// Load every document not yet loaded, then return.
    ///
    /// Reads are spread over the store's bounded worker pool. Read failures
    /// are logged and counted; they never abort the batch. Documents that
    /// already completed a load attempt, successful or not, are skipped.
    pub fn load_all(&self) -> LoadReport {
        let root = self.root.as_path();
        self.load_with(|doc| doc.load(root))
    }

    fn load_with<F>(&self, load: F) -> LoadReport
    where
        F: Fn(&mut Document) -> Result<()> + Sync,
    {
        let mut documents = self.lock();
        let pending: Vec<&mut Document> = documents
            .values_mut()
            .filter(|doc| !doc.is_loaded())
            .collect();

        if pending.is_empty() {
            return LoadReport::default();
        }

        let attempted = pending.len();
        let started = Instant::now();

        let failed = self.pool.install(|| {
            pending
                .into_par_iter()
                .filter_map(|doc| {
                    let err = load(doc).err()?;
                    warn!(document = doc.name(), "{err}");
                    Some(())
                })
                .count()
        });

        debug!(
            attempted,
            failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "load batch complete"
        );

        LoadReport { attempted, failed }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// A snapshot of the document with `id`.
    pub fn get(&self, id: DocumentId) -> Option<Document> {
        self.lock().get(&id).cloned()
    }

    /// Names and ids of all documents, sorted by name.
    pub fn names(&self) -> Vec<(String, DocumentId)> {
        let mut names: Vec<_> = self
            .lock()
            .values()
            .map(|doc| (doc.name().to_string(), doc.id()))
            .collect();
        names.sort();
        names
    }
}
