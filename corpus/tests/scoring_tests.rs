use corpus::{Bm25Params, CorpusIndex};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Reference BM25 computed independently of the crate internals.
fn bm25(tf: f64, df: f64, n: f64, doc_len: f64, avg_len: f64, k1: f64, b: f64) -> f64 {
    let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
    let len_norm = 1.0 - b + b * (doc_len / avg_len);
    idf * tf * (k1 + 1.0) / (tf + k1 * len_norm)
}

#[test]
fn two_document_corpus_scores_expected_terms() {
    let mut index = CorpusIndex::new();
    index.update(["cat", "dog"], "d1");
    index.update(["cat", "cat", "bird"], "d2");

    assert_eq!(index.doc_freq("cat"), 2);
    assert_eq!(index.doc_freq("dog"), 1);
    assert_eq!(index.doc_freq("bird"), 1);

    let scores = index.generate_bm25();
    assert_eq!(scores.len(), 2);

    let d1 = &scores[&"d1"];
    let d2 = &scores[&"d2"];
    let mut d1_terms: Vec<&str> = d1.keys().map(String::as_str).collect();
    let mut d2_terms: Vec<&str> = d2.keys().map(String::as_str).collect();
    d1_terms.sort_unstable();
    d2_terms.sort_unstable();
    assert_eq!(d1_terms, ["cat", "dog"]);
    assert_eq!(d2_terms, ["bird", "cat"]);

    // avg_len = (2 + 3) / 2 documents
    assert_close(d1["cat"], bm25(1.0, 2.0, 2.0, 2.0, 2.5, 1.5, 0.75));
    assert_close(d1["dog"], bm25(1.0, 1.0, 2.0, 2.0, 2.5, 1.5, 0.75));
    assert_close(d2["cat"], bm25(2.0, 2.0, 2.0, 3.0, 2.5, 1.5, 0.75));
    assert_close(d2["bird"], bm25(1.0, 1.0, 2.0, 3.0, 2.5, 1.5, 0.75));

    // Same tf and document: the rarer term outranks the common one.
    assert!(d1["dog"] > d1["cat"]);
}

#[test]
fn empty_corpus_scores_to_empty_map() {
    let index: CorpusIndex<&str> = CorpusIndex::new();
    assert!(index.generate_bm25().is_empty());
    assert!(index.generate_tfidf().is_empty());
}

#[test]
fn empty_document_appears_with_no_term_entries() {
    let mut index: CorpusIndex<&str> = CorpusIndex::new();
    index.update(Vec::<String>::new(), "d1");
    index.update(["word"], "d2");

    let scores = index.generate_bm25();
    assert_eq!(scores.len(), 2);
    assert!(scores[&"d1"].is_empty());
    assert!(scores[&"d2"].contains_key("word"));
}

#[test]
fn all_empty_corpus_does_not_divide_by_zero() {
    let mut index: CorpusIndex<&str> = CorpusIndex::new();
    index.update(Vec::<String>::new(), "d1");
    index.update(Vec::<String>::new(), "d2");

    let scores = index.generate_bm25();
    assert_eq!(scores.len(), 2);
    assert!(scores.values().all(|terms| terms.is_empty()));
}

#[test]
fn term_in_every_document_keeps_positive_idf() {
    let mut index = CorpusIndex::new();
    let n = 8u64;
    for i in 0..n {
        index.update(vec!["common".to_string(), format!("only-{i}")], i);
    }

    let expected = (1.0 + 0.5 / (n as f64 + 0.5)).ln();
    assert_close(index.idf("common"), expected);
    assert!(index.idf("common") > 0.0);

    let scores = index.generate_bm25();
    for terms in scores.values() {
        let score = terms["common"];
        assert!(score.is_finite() && score > 0.0);
    }
}

#[test]
fn all_scores_are_non_negative() {
    let mut index = CorpusIndex::new();
    index.update(["a", "b", "c", "a"], "d1");
    index.update(["a"], "d2");
    index.update(["a", "c"], "d3");
    index.update(["b", "b", "b", "b", "b"], "d4");
    index.update(Vec::<String>::new(), "d5");

    for scores in [index.generate_bm25(), index.generate_tfidf()] {
        for terms in scores.values() {
            for (term, &score) in terms {
                assert!(score >= 0.0, "negative score for {term}: {score}");
            }
        }
    }
}

#[test]
fn tfidf_is_idf_times_raw_tf() {
    let mut index = CorpusIndex::new();
    index.update(["x", "x", "x", "y"], "d1");
    index.update(["y"], "d2");

    let scores = index.generate_tfidf();
    assert_close(scores[&"d1"]["x"], index.idf("x") * 3.0);
    assert_close(scores[&"d1"]["y"], index.idf("y") * 1.0);
    assert_close(scores[&"d2"]["y"], index.idf("y") * 1.0);
}

#[test]
fn zero_k1_collapses_bm25_to_pure_idf() {
    let mut index = CorpusIndex::new();
    index.update(["a", "a", "a", "b"], "d1");
    index.update(["b"], "d2");

    let params = Bm25Params {
        k1: 0.0,
        ..Bm25Params::default()
    };
    let scores = index.generate_bm25_with(params);
    // With k1 = 0 the saturation term is exactly 1 whatever the tf.
    assert_close(scores[&"d1"]["a"], index.idf("a"));
    assert_close(scores[&"d1"]["b"], index.idf("b"));
    assert_close(scores[&"d2"]["b"], index.idf("b"));
}

#[test]
fn delta_offsets_every_score_by_idf_times_delta() {
    let mut index = CorpusIndex::new();
    index.update(["a", "b"], "d1");
    index.update(["a"], "d2");

    let base = index.generate_bm25();
    let offset = index.generate_bm25_with(Bm25Params {
        delta: 1.0,
        ..Bm25Params::default()
    });
    for (doc_id, terms) in &base {
        for (term, &score) in terms {
            assert_close(offset[doc_id][term] - score, index.idf(term));
        }
    }
}
