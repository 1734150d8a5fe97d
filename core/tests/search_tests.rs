use search_core::ranking::compare_documents;
use search_core::{
    DocumentFilter, DocumentStatus, ExecutionMode, SearchEngine, SearchError, MAX_RESULT_DOCUMENT_COUNT,
    RELEVANCE_PRECISION,
};
use std::cmp::Ordering;

const MODES: [ExecutionMode; 2] = [ExecutionMode::Sequential, ExecutionMode::Parallel];

fn build_test_engine() -> SearchEngine {
    let mut engine = SearchEngine::with_stop_words_text("and in on").unwrap();
    let docs: [(i32, &str, DocumentStatus, &[i32]); 8] = [
        (0, "white cat and fancy collar", DocumentStatus::Active, &[8, -3]),
        (1, "fluffy cat fluffy tail", DocumentStatus::Active, &[7, 2, 7]),
        (2, "groomed dog expressive eyes", DocumentStatus::Active, &[5, -12, 2, 1]),
        (3, "funny hippo on deck", DocumentStatus::Banned, &[6, -2, 6, 1]),
        (4, "big whale in house", DocumentStatus::Irrelevant, &[1, 5, -5, 1]),
        (5, "dog fluffy and fancy", DocumentStatus::Irrelevant, &[0, 0, 2, -1]),
        (6, "dinner tasty and fluffy", DocumentStatus::Active, &[0, 0, 2, -1]),
        (7, "hippo expressive eyes", DocumentStatus::Banned, &[4, 3, 2, -1]),
    ];
    for (id, text, status, ratings) in docs {
        engine.add_document(id, text, status, ratings).unwrap();
    }
    engine
}

fn ids(engine: &SearchEngine, mode: ExecutionMode, query: &str) -> Vec<i32> {
    engine
        .find_top_documents(mode, query, DocumentFilter::default())
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect()
}

#[test]
fn stop_word_only_query_is_empty() {
    let engine = build_test_engine();
    for mode in MODES {
        assert!(ids(&engine, mode, "in on and").is_empty());
        assert!(!ids(&engine, mode, "and cat on dog").is_empty());
    }
}

#[test]
fn minus_words_exclude_documents() {
    let engine = build_test_engine();
    for mode in MODES {
        assert_eq!(ids(&engine, mode, "fluffy fancy dog -cat")[0], 2);
        assert!(ids(&engine, mode, "-fluffy tasty fancy tail -dog -cat").is_empty());
    }
}

#[test]
fn ranks_by_relevance_with_expected_values() {
    let engine = build_test_engine();
    let expected = [(2, 0.8664339756999, -1), (1, 0.8369882167858, 5), (0, 0.3465735902799, 2)];
    for mode in MODES {
        let docs = engine
            .find_top_documents(mode, "fluffy groomed cat dog -dinner", DocumentStatus::Active)
            .unwrap();
        assert_eq!(docs.len(), expected.len());
        for (doc, (id, relevance, rating)) in docs.iter().zip(expected) {
            assert_eq!(doc.id, id);
            assert_eq!(doc.rating, rating);
            assert!((doc.relevance - relevance).abs() < RELEVANCE_PRECISION);
        }
    }
}

#[test]
fn minus_term_scenario_from_two_documents() {
    let mut engine = SearchEngine::with_stop_words_text("and in on").unwrap();
    engine
        .add_document(0, "white cat and fancy collar", DocumentStatus::Active, &[8, -3])
        .unwrap();
    engine
        .add_document(1, "fluffy cat fluffy tail", DocumentStatus::Active, &[7, 2, 7])
        .unwrap();

    for mode in MODES {
        let docs = engine
            .find_top_documents(mode, "cat -fluffy", DocumentFilter::default())
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, 0);
        assert_eq!(docs[0].rating, 2);
        let cat_idf = engine.inverse_document_frequency("cat").unwrap();
        assert!((docs[0].relevance - cat_idf * 0.25).abs() < RELEVANCE_PRECISION);

        let docs = engine
            .find_top_documents(mode, "collar -fluffy", DocumentFilter::default())
            .unwrap();
        assert!((docs[0].relevance - 2f64.ln() * 0.25).abs() < RELEVANCE_PRECISION);
    }
}

#[test]
fn filters_by_status() {
    let engine = build_test_engine();
    for mode in MODES {
        let count = |query: &str, status: DocumentStatus| engine.find_top_documents(mode, query, status).unwrap().len();
        assert_eq!(count("fluffy hippo cat", DocumentStatus::Banned), 2);
        assert_eq!(count("fluffy groomed cat", DocumentStatus::Irrelevant), 1);
        assert_eq!(count("fluffy groomed cat", DocumentStatus::Active), 4);
        assert_eq!(count("fluffy groomed cat", DocumentStatus::Removed), 0);
    }
}

#[test]
fn filters_by_predicate() {
    let engine = build_test_engine();
    for mode in MODES {
        let docs = engine
            .find_top_documents(
                mode,
                "fluffy groomed cat",
                DocumentFilter::predicate(|id, _, _| id % 2 == 0),
            )
            .unwrap();
        assert!(!docs.is_empty());
        assert!(docs.iter().all(|d| d.id % 2 == 0));
    }
}

#[test]
fn results_are_capped_and_ordered() {
    let mut engine = SearchEngine::default();
    for id in 0..20 {
        let text = format!("common word{} {}", id % 4, "filler ".repeat(id as usize % 5));
        engine
            .add_document(id, &text, DocumentStatus::Active, &[id % 7, 3])
            .unwrap();
    }
    for mode in MODES {
        let docs = engine
            .find_top_documents(mode, "common word1 filler", DocumentFilter::default())
            .unwrap();
        assert_eq!(docs.len(), MAX_RESULT_DOCUMENT_COUNT);
        for pair in docs.windows(2) {
            assert_ne!(compare_documents(&pair[0], &pair[1]), Ordering::Greater);
        }
    }
}

#[test]
fn ties_are_broken_by_rating() {
    let mut engine = SearchEngine::default();
    engine.add_document(0, "cat dog", DocumentStatus::Active, &[1]).unwrap();
    engine.add_document(1, "dog cat", DocumentStatus::Active, &[9]).unwrap();
    engine.add_document(2, "bird", DocumentStatus::Active, &[5]).unwrap();
    for mode in MODES {
        assert_eq!(ids(&engine, mode, "cat"), vec![1, 0]);
    }
}

#[test]
fn parallel_matches_sequential() {
    let engine = build_test_engine();
    for query in ["fluffy cat", "dog eyes -hippo", "fancy collar tail dinner", "-cat fluffy"] {
        let seq = engine
            .find_top_documents(ExecutionMode::Sequential, query, DocumentFilter::default())
            .unwrap();
        let par = engine
            .find_top_documents(ExecutionMode::Parallel, query, DocumentFilter::default())
            .unwrap();
        assert_eq!(seq.len(), par.len(), "{query}");
        for (a, b) in seq.iter().zip(&par) {
            assert_eq!(a.id, b.id);
            assert!((a.relevance - b.relevance).abs() < 1e-12);
        }
    }
}

#[test]
fn malformed_queries_fail_before_ranking() {
    let engine = build_test_engine();
    for mode in MODES {
        for query in ["cat -", "cat --dog", "cat\u{2}"] {
            let err = engine
                .find_top_documents(mode, query, DocumentFilter::default())
                .unwrap_err();
            assert!(matches!(err, SearchError::InvalidInput(_)), "{query}");
        }
    }
}

#[test]
fn matches_plus_terms_in_order() {
    let engine = build_test_engine();
    for mode in MODES {
        let result = engine
            .match_document(mode, "fluffy groomed cat dog -dinner", 1)
            .unwrap();
        assert_eq!(result.matched_terms, vec!["cat", "fluffy"]);
        assert_eq!(result.status, DocumentStatus::Active);

        let result = engine.match_document(mode, "fluffy tasty -dinner", 6).unwrap();
        assert!(result.matched_terms.is_empty());

        let result = engine.match_document(mode, "hippo deck", 3).unwrap();
        assert_eq!(result.matched_terms, vec!["deck", "hippo"]);
        assert_eq!(result.status, DocumentStatus::Banned);

        assert!(engine.match_document(mode, "whale", 2).unwrap().matched_terms.is_empty());
    }
}

#[test]
fn matching_unknown_document_is_not_found() {
    let engine = build_test_engine();
    for mode in MODES {
        let err = engine.match_document(mode, "cat", 100).unwrap_err();
        assert!(matches!(err, SearchError::NotFound(_)));
        assert!(engine.match_document(mode, "--cat", 1).is_err());
    }
}

#[test]
fn word_frequencies_sum_to_one() {
    let engine = build_test_engine();
    for id in engine.document_ids() {
        let freqs = engine.word_frequencies(id);
        assert!(!freqs.is_empty());
        assert!(!freqs.contains_key("and"));
        assert!((freqs.values().sum::<f64>() - 1.0).abs() < 1e-9);
    }
    let freqs = engine.word_frequencies(1);
    assert_eq!(freqs["fluffy"], 0.5);
    assert_eq!(freqs["tail"], 0.25);
}

#[test]
fn removed_document_disappears_everywhere() {
    for mode in MODES {
        let mut engine = build_test_engine();
        engine.remove_document(mode, 1).unwrap();
        assert_eq!(engine.document_count(), 7);
        assert!(engine.word_frequencies(1).is_empty());
        assert!(!ids(&engine, mode, "fluffy cat tail").contains(&1));
        assert!(engine.inverse_document_frequency("tail").is_err());
        assert!(matches!(engine.match_document(mode, "cat", 1), Err(SearchError::NotFound(_))));
        assert!(matches!(engine.remove_document(mode, 1), Err(SearchError::NotFound(_))));

        engine
            .add_document(1, "brand new tail", DocumentStatus::Active, &[])
            .unwrap();
        assert_eq!(ids(&engine, mode, "tail"), vec![1]);
    }
}

#[test]
fn idf_reflects_live_documents() {
    let mut engine = build_test_engine();
    let before = engine.inverse_document_frequency("cat").unwrap();
    assert!((before - 4f64.ln()).abs() < 1e-12);
    engine.remove_document(ExecutionMode::Sequential, 7).unwrap();
    let after = engine.inverse_document_frequency("cat").unwrap();
    assert!((after - 3.5f64.ln()).abs() < 1e-12);
    assert!(matches!(
        engine.inverse_document_frequency("zebra"),
        Err(SearchError::NotFound(_))
    ));
}
