use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Incremental term/document statistics over an in-memory corpus.
///
/// Documents are identified by a caller-supplied id `D`; reusing an id
/// accumulates more content into the same document rather than replacing it.
/// The index only grows: there is no deletion or eviction, and `doc_count`
/// and every document frequency are non-decreasing over the life of the
/// instance.
///
/// `update` takes `&mut self` and scoring takes `&self`, so a directly owned
/// index already has the single-writer discipline the statistics require.
/// For a corpus shared across threads, see [`SharedCorpusIndex`].
///
/// [`SharedCorpusIndex`]: crate::shared::SharedCorpusIndex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusIndex<D: Eq + Hash> {
    /// Number of `update` calls, i.e. logical document events.
    doc_count: u64,
    /// Total token count per document, accumulated across updates.
    doc_lengths: HashMap<D, u64>,
    /// Per-document raw term occurrence counts.
    term_freq: HashMap<D, HashMap<String, u64>>,
    /// Number of distinct documents each term occurs in.
    doc_freq: HashMap<String, u64>,
}

impl<D: Eq + Hash> Default for CorpusIndex<D> {
    fn default() -> Self {
        CorpusIndex {
            doc_count: 0,
            doc_lengths: HashMap::new(),
            term_freq: HashMap::new(),
            doc_freq: HashMap::new(),
        }
    }
}

impl<D: Eq + Hash + Clone> CorpusIndex<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one tokenized document.
    ///
    /// Counts one document event, adds the token count to the document's
    /// length, bumps the document frequency of every term that is new to
    /// this document, and bumps the per-term occurrence count for every
    /// token. An empty `tokens` is valid: it still counts a document event
    /// and creates a zero-length document entry.
    pub fn update<I>(&mut self, tokens: I, doc_id: D)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.doc_count += 1;
        let counts = self.term_freq.entry(doc_id.clone()).or_default();
        let len = self.doc_lengths.entry(doc_id).or_insert(0);
        for token in tokens {
            let term: String = token.into();
            *len += 1;
            match counts.get_mut(&term) {
                Some(count) => *count += 1,
                None => {
                    // First occurrence in this document, across all updates
                    // with this id: document frequency moves exactly once.
                    *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
                    counts.insert(term, 1);
                }
            }
        }
        tracing::trace!(
            doc_count = self.doc_count,
            doc_len = *len,
            distinct_terms = counts.len(),
            "document ingested"
        );
    }

    /// Number of `update` calls made so far.
    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// Number of distinct documents known to the index.
    pub fn len(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_lengths.is_empty()
    }

    /// Total token count of a document, or `None` if the id is unknown.
    pub fn doc_len(&self, doc_id: &D) -> Option<u64> {
        self.doc_lengths.get(doc_id).copied()
    }

    /// Raw occurrence count of `term` within one document (0 if absent).
    pub fn term_count(&self, doc_id: &D, term: &str) -> u64 {
        self.term_freq
            .get(doc_id)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct documents containing `term` (0 if never seen).
    pub fn doc_freq(&self, term: &str) -> u64 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// The term → count map of one document, if the id is known.
    pub fn terms(&self, doc_id: &D) -> Option<&HashMap<String, u64>> {
        self.term_freq.get(doc_id)
    }

    /// Average document length, `sum(doc_lengths) / doc_count`.
    ///
    /// Derived on demand, never stored. Returns 0.0 on an empty corpus.
    pub fn avg_doc_len(&self) -> f64 {
        if self.doc_count == 0 {
            return 0.0;
        }
        let total: u64 = self.doc_lengths.values().sum();
        total as f64 / self.doc_count as f64
    }

    pub(crate) fn doc_lengths(&self) -> &HashMap<D, u64> {
        &self.doc_lengths
    }
}
