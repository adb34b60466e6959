use crate::index::CorpusIndex;
use crate::score::Bm25Params;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// A `CorpusIndex` behind an `Arc<RwLock<_>>` for use across threads.
///
/// Each `update` holds the write lock for the whole call, so readers never
/// observe a torn update (e.g. the document count bumped but term counts not
/// yet applied). Scoring and accessors take the read lock and may run
/// concurrently with each other.
pub struct SharedCorpusIndex<D: Eq + Hash> {
    inner: Arc<RwLock<CorpusIndex<D>>>,
}

impl<D: Eq + Hash> Clone for SharedCorpusIndex<D> {
    fn clone(&self) -> Self {
        SharedCorpusIndex {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: Eq + Hash> Default for SharedCorpusIndex<D> {
    fn default() -> Self {
        SharedCorpusIndex {
            inner: Arc::new(RwLock::new(CorpusIndex::default())),
        }
    }
}

impl<D: Eq + Hash + Clone> SharedCorpusIndex<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<I>(&self, tokens: I, doc_id: D)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.inner.write().update(tokens, doc_id);
    }

    pub fn generate_bm25(&self) -> HashMap<D, HashMap<String, f64>> {
        self.inner.read().generate_bm25()
    }

    pub fn generate_bm25_with(&self, params: Bm25Params) -> HashMap<D, HashMap<String, f64>> {
        self.inner.read().generate_bm25_with(params)
    }

    pub fn generate_tfidf(&self) -> HashMap<D, HashMap<String, f64>> {
        self.inner.read().generate_tfidf()
    }

    pub fn doc_count(&self) -> u64 {
        self.inner.read().doc_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` under the read lock for ad-hoc access to the statistics.
    pub fn read<R>(&self, f: impl FnOnce(&CorpusIndex<D>) -> R) -> R {
        f(&self.inner.read())
    }
}
