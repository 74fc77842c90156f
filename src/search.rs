use std::io::{self, Write};

use serde::Serialize;

use crate::{
    doc_id::DocumentId,
    document::Document,
    store::DocumentStore,
    tokenizer::TokenSet,
};

/// Number of results the `:search` command shows.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// A document that shares at least one token with the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub id: DocumentId,
    pub name: String,
    /// Fraction of query tokens found in the document, in `(0, 1]`.
    pub overlap: f64,
    /// `overlap` as a percentage rounded up, in `[1, 100]`.
    pub score: u8,
}

/// Rank the store's documents by how many of `keywords` they contain.
///
/// Results are ordered by overlap descending, then by name and id
/// ascending, and truncated to `limit`. Documents with no overlap are
/// left out, so an empty keyword set matches nothing.
pub fn search(
    store: &DocumentStore,
    keywords: &TokenSet,
    limit: usize,
) -> Vec<MatchResult> {
    let documents = store.lock();
    rank(documents.values(), keywords, limit)
}

pub(crate) fn rank<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
    keywords: &TokenSet,
    limit: usize,
) -> Vec<MatchResult> {
    let total = keywords.len();
    if total == 0 || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &Document)> = documents
        .into_iter()
        .filter_map(|doc| {
            let matched = keywords
                .iter()
                .filter(|word| doc.contains_token(word))
                .count();
            (matched > 0).then_some((matched, doc))
        })
        .collect();

    // Every entry shares the same denominator, so comparing counts is
    // exact where comparing ratios might not be.
    scored.sort_by(|(a_count, a), (b_count, b)| {
        b_count
            .cmp(a_count)
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.id().cmp(&b.id()))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(matched, doc)| MatchResult {
            id: doc.id(),
            name: doc.name().to_string(),
            overlap: matched as f64 / total as f64,
            score: score_percent(matched, total),
        })
        .collect()
}

/// `ceil(matched / total * 100)`, computed in integers.
fn score_percent(matched: usize, total: usize) -> u8 {
    let percent = (matched * 100).div_ceil(total).clamp(1, 100);
    percent as u8
}

/// Write results for a human at the prompt.
pub fn write_human(
    out: &mut impl Write,
    results: &[MatchResult],
) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "   no matches found");
    }

    for r in results {
        writeln!(out, "   - {} : {}%", r.name, r.score)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    result_count: usize,
    results: &'a [MatchResult],
}

/// Write results as a single JSON line.
pub fn write_json(
    out: &mut impl Write,
    query: &str,
    results: &[MatchResult],
) -> io::Result<()> {
    let response = SearchResponse {
        query,
        result_count: results.len(),
        results,
    };
    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)
}
