use std::io::{self, Write};

use serde::Serialize;

use crate::{
    search,
    store::DocumentStore,
    tokenizer::tokenize,
};

/// A completion word offered for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub query: String,
    pub word: String,
}

/// Suggest up to `limit` words that extend `query`.
///
/// Only documents containing every query token contribute. They are
/// visited in search order, and each one offers its remaining tokens in
/// lexicographic order. The same word may appear more than once when
/// several documents offer it.
pub fn suggest(
    store: &DocumentStore,
    query: &str,
    limit: usize,
) -> Vec<Suggestion> {
    let keywords = tokenize(query);
    let query = query.trim();

    let documents = store.lock();
    let matches = search::rank(documents.values(), &keywords, limit);

    matches
        .iter()
        .filter(|m| m.score == 100)
        .filter_map(|m| documents.get(&m.id))
        .flat_map(|doc| doc.tokens().iter())
        .filter(|word| !keywords.contains(*word))
        .take(limit)
        .map(|word| Suggestion {
            query: query.to_string(),
            word: word.clone(),
        })
        .collect()
}

/// Write suggestions for a human at the prompt.
pub fn write_human(
    out: &mut impl Write,
    suggestions: &[Suggestion],
) -> io::Result<()> {
    for s in suggestions {
        writeln!(out, "   - '{}' {}", s.query, s.word)?;
    }
    Ok(())
}

/// Write suggestions as a single JSON line.
pub fn write_json(
    out: &mut impl Write,
    suggestions: &[Suggestion],
) -> io::Result<()> {
    serde_json::to_writer(&mut *out, suggestions)?;
    writeln!(out)
}
