use crate::index::CorpusIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// BM25 tuning parameters.
///
/// `k1` controls term-frequency saturation (usually in `[1.2, 2.0]`) and `b`
/// length-normalization strength (in `[0, 1]`; `b = 0` gives BM15, `b = 1`
/// BM11). `delta` is the BM25+ offset added to the saturated term-frequency
/// component; 0.0 disables it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    pub delta: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params {
            k1: 1.5,
            b: 0.75,
            delta: 0.0,
        }
    }
}

/// IDF with the `+0.5` smoothing and `+1` inside the log:
/// `ln((N - df + 0.5) / (df + 0.5) + 1)`.
///
/// The `+1` keeps the result non-negative for every `df` in `[0, N]`, so a
/// term occurring in every document still gets a small positive weight
/// instead of a negative one.
fn idf(total_docs: f64, doc_freq: u64) -> f64 {
    let df = doc_freq as f64;
    ((total_docs - df + 0.5) / (df + 0.5) + 1.0).ln()
}

impl<D: Eq + Hash + Clone> CorpusIndex<D> {
    /// IDF of a term given the current corpus size.
    ///
    /// Only meaningful once the corpus is non-empty; a term the index has
    /// never seen is scored with `df = 0` (maximum rarity).
    pub fn idf(&self, term: &str) -> f64 {
        idf(self.doc_count() as f64, self.doc_freq(term))
    }

    /// BM25 scores with the default parameters (`k1 = 1.5`, `b = 0.75`).
    pub fn generate_bm25(&self) -> HashMap<D, HashMap<String, f64>> {
        self.generate_bm25_with(Bm25Params::default())
    }

    /// BM25 score of every term of every known document.
    ///
    /// Returns a map per document from each of its terms to
    /// `idf(t) * (tf * (k1 + 1) / (tf + k1 * (1 - b + b * len/avg_len)) + delta)`.
    /// Iteration order of the returned maps carries no meaning; callers
    /// needing a deterministic ranking sort by score with a secondary key.
    ///
    /// An empty corpus yields an empty map. A zero-length document appears
    /// in the result with an empty term map. If every document is empty the
    /// length-normalization factor degenerates to `1 - b` by continuity, so
    /// no division by zero occurs.
    pub fn generate_bm25_with(&self, params: Bm25Params) -> HashMap<D, HashMap<String, f64>> {
        if self.doc_count() == 0 {
            return HashMap::new();
        }
        let total_docs = self.doc_count() as f64;
        let avg_len = self.avg_doc_len();
        let mut out = HashMap::with_capacity(self.doc_lengths().len());
        for (doc_id, &doc_len) in self.doc_lengths() {
            let counts = self.terms(doc_id);
            let mut scores = HashMap::with_capacity(counts.map_or(0, HashMap::len));
            if let Some(counts) = counts {
                let len_norm = if avg_len == 0.0 {
                    1.0 - params.b
                } else {
                    1.0 - params.b + params.b * (doc_len as f64 / avg_len)
                };
                for (term, &freq) in counts {
                    let tf = freq as f64;
                    let saturated = tf * (params.k1 + 1.0) / (tf + params.k1 * len_norm);
                    let score = idf(total_docs, self.doc_freq(term)) * (saturated + params.delta);
                    scores.insert(term.clone(), score);
                }
            }
            out.insert(doc_id.clone(), scores);
        }
        tracing::debug!(docs = out.len(), avg_len, "scored corpus with bm25");
        out
    }

    /// Classic TF-IDF: raw term frequency times the same smoothed IDF as
    /// [`generate_bm25`], with no saturation or length normalization.
    ///
    /// [`generate_bm25`]: CorpusIndex::generate_bm25
    pub fn generate_tfidf(&self) -> HashMap<D, HashMap<String, f64>> {
        if self.doc_count() == 0 {
            return HashMap::new();
        }
        let total_docs = self.doc_count() as f64;
        let mut out = HashMap::with_capacity(self.doc_lengths().len());
        for doc_id in self.doc_lengths().keys() {
            let counts = self.terms(doc_id);
            let mut scores = HashMap::with_capacity(counts.map_or(0, HashMap::len));
            if let Some(counts) = counts {
                for (term, &freq) in counts {
                    let score = idf(total_docs, self.doc_freq(term)) * freq as f64;
                    scores.insert(term.clone(), score);
                }
            }
            out.insert(doc_id.clone(), scores);
        }
        tracing::debug!(docs = out.len(), "scored corpus with tf-idf");
        out
    }
}
