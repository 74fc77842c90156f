//! simplesearch - an in-memory keyword index over a directory of text files.
//!
//! Every `.txt` file directly under a root directory becomes a
//! [`Document`] whose content is reduced to a set of lowercase tokens.
//! Queries are ranked by the fraction of their tokens each document
//! contains, and documents that contain all of them can offer completion
//! words for the query.
//!
//! # Quick start
//!
//! ```no_run
//! use simplesearch::{DocumentStore, search, suggest, tokenizer::tokenize};
//!
//! let store = DocumentStore::open("notes", 10).unwrap();
//! store.seed().unwrap();
//! store.load_all();
//!
//! for r in search::search(&store, &tokenize("rust programming"), 10) {
//!     println!("{} : {}%", r.name, r.score);
//! }
//! for s in suggest::suggest(&store, "rust", 5) {
//!     println!("'{}' {}", s.query, s.word);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod doc_id;
pub mod document;
pub mod error;
pub mod search;
pub mod shell;
pub mod store;
pub mod suggest;
pub mod tokenizer;
pub mod walker;

pub use config::Config;
pub use doc_id::DocumentId;
pub use document::Document;
pub use error::{Error, Result};
pub use search::MatchResult;
pub use store::{DocumentStore, LoadReport};
pub use suggest::Suggestion;
