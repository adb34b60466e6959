//! Incremental BM25 / TF-IDF relevance scoring over an in-memory corpus.
//!
//! Feed tokenized documents with [`CorpusIndex::update`], then derive term
//! rankings with [`CorpusIndex::generate_bm25`] or
//! [`CorpusIndex::generate_tfidf`]. The crate does no file reading,
//! tokenization, or output formatting; callers supply already-tokenized
//! term sequences (see the `ranker` binary for a complete caller).

pub mod index;
pub mod score;
pub mod shared;

pub use index::CorpusIndex;
pub use score::Bm25Params;
pub use shared::SharedCorpusIndex;
