use tfidx::{DocId, DocumentStatus, ErrorKind, Execution, ScoredDocument, SearchServer};

const BOTH: [Execution; 2] = [Execution::Sequential, Execution::Parallel];

fn server() -> SearchServer {
    SearchServer::from_stop_words_text("in the").unwrap()
}

fn ids(found: &[ScoredDocument]) -> Vec<i32> {
    found.iter().map(|doc| doc.id.value()).collect()
}

fn pets() -> SearchServer {
    let mut server = server();
    server.add_document(DocId(111), "brown cat with fluffy tail", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(DocId(222), "brown parrot in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(DocId(333), "brown fluffy dog with brown fluffy tail in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server
}

#[test]
fn stop_words_are_excluded_from_documents() {
    let mut server = server();
    server.add_document(DocId(42), "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();

    assert_eq!(ids(&server.find_top_documents("city").unwrap()), vec![42]);
    assert!(server.find_top_documents("in").unwrap().is_empty());
    assert!(!server.word_frequencies(DocId(42)).contains_key("the"));
}

#[test]
fn absent_words_find_nothing() {
    let mut server = server();
    server.add_document(DocId(42), "cat in the city New York", DocumentStatus::Actual, &[1, 2, 3]).unwrap();

    assert!(server.find_top_documents("citi").unwrap().is_empty());
    assert!(server.find_top_documents("zebra").unwrap().is_empty());
}

#[test]
fn minus_words_exclude_documents() {
    let mut server = server();
    server.add_document(DocId(42), "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();

    for execution in BOTH {
        let find = |query: &str| server.find_top_documents_with(execution, query, DocumentStatus::Actual).unwrap();
        assert_eq!(ids(&find("cat")), vec![42]);
        assert!(find("cat -city").is_empty());
        assert!(find("-cat city").is_empty());
        assert!(find("-cat").is_empty());
    }
}

#[test]
fn matching_reports_present_plus_words() {
    let mut server = server();
    server.add_document(DocId(42), "brown cat with fluffy tail", DocumentStatus::Irrelevant, &[1, 2, 3]).unwrap();

    for execution in BOTH {
        let (words, status) = server.match_document_with(execution, "tail cat brown zebra cat", DocId(42)).unwrap();
        assert_eq!(words, vec!["brown", "cat", "tail"]);
        assert_eq!(status, DocumentStatus::Irrelevant);

        let (words, status) = server.match_document_with(execution, "cat brown tail -fluffy", DocId(42)).unwrap();
        assert!(words.is_empty());
        assert_eq!(status, DocumentStatus::Irrelevant);
    }
}

#[test]
fn matching_unknown_document_is_not_found() {
    let server = pets();
    for execution in BOTH {
        let err = server.match_document_with(execution, "cat", DocId(7)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}

#[test]
fn results_are_sorted_by_relevance() {
    let server = pets();

    for execution in BOTH {
        let find = |query: &str| server.find_top_documents_with(execution, query, DocumentStatus::Actual).unwrap();

        let found = find("brown fluffy tail");
        assert_eq!(ids(&found), vec![111, 333, 222]);
        assert!(found.windows(2).all(|pair| pair[0].relevance >= pair[1].relevance));

        assert_eq!(ids(&find("parrot fluffy city")), vec![222, 333, 111]);
        assert_eq!(ids(&find("dog fluffy tail city")), vec![333, 111, 222]);
    }
}

#[test]
fn rating_is_the_truncated_mean() {
    let cases: [(&[i32], i32); 6] = [
        (&[0, 0, 0], 0),
        (&[1, 0, 0], 0),
        (&[0, 1, 2, 99], 25),
        (&[5000, 101, 1, 1], 1275),
        (&[5, 5, 5], 5),
        (&[], 0),
    ];

    for (ratings, expected) in cases {
        let mut server = server();
        server.add_document(DocId(111), "brown cat with fluffy tail", DocumentStatus::Actual, ratings).unwrap();
        let found = server.find_top_documents("brown cat").unwrap();
        assert_eq!(found[0].rating, expected, "{ratings:?}");
    }
}

#[test]
fn predicates_filter_candidates() {
    let mut server = server();
    assert!(server.find_top_documents_by("brown fluffy cat", |_, status, _| status == DocumentStatus::Actual).unwrap().is_empty());

    server.add_document(DocId(42), "brown cat with fluffy tail", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(DocId(333), "brown fluffy dog with brown fluffy tail in the city", DocumentStatus::Banned, &[3, 4, 5]).unwrap();

    let query = "brown fluffy cat";
    assert_eq!(ids(&server.find_top_documents_by(query, |_, status, _| status == DocumentStatus::Actual).unwrap()), vec![42]);
    assert_eq!(ids(&server.find_top_documents_by(query, |_, status, _| status == DocumentStatus::Banned).unwrap()), vec![333]);
    assert_eq!(ids(&server.find_top_documents_by(query, |id, _, _| id == DocId(42)).unwrap()), vec![42]);
    assert_eq!(ids(&server.find_top_documents_by(query, |id, _, _| id.value() == 333).unwrap()), vec![333]);
    assert_eq!(server.find_top_documents_by(query, |_, _, rating| rating == 2).unwrap()[0].rating, 2);
    assert_eq!(server.find_top_documents_by(query, |_, _, rating| rating == 4).unwrap()[0].rating, 4);

    let even_ids = |id: DocId, _: DocumentStatus, _: i32| id.value() % 2 == 0;
    let found = server.find_top_documents_with(Execution::Parallel, query, even_ids).unwrap();
    assert_eq!(ids(&found), vec![42]);
}

#[test]
fn status_filter_selects_documents() {
    let mut server = server();
    assert!(server.find_top_documents_by_status("brown fluffy cat", DocumentStatus::Actual).unwrap().is_empty());

    server.add_document(DocId(42), "brown cat with fluffy tail", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(DocId(333), "brown fluffy dog with brown fluffy tail in the city", DocumentStatus::Banned, &[3, 4, 5]).unwrap();

    assert_eq!(ids(&server.find_top_documents_by_status("brown fluffy cat", DocumentStatus::Actual).unwrap()), vec![42]);
    assert_eq!(ids(&server.find_top_documents_by_status("brown fluffy cat", DocumentStatus::Banned).unwrap()), vec![333]);
    assert!(server.find_top_documents_by_status("brown fluffy cat", DocumentStatus::Removed).unwrap().is_empty());
}

#[test]
fn relevance_is_tf_idf() {
    let mut server = server();
    server.add_document(DocId(42), "brown cat with fluffy tail", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
    server.add_document(DocId(333), "brown fluffy dog with brown fluffy tail in the city", DocumentStatus::Banned, &[3, 4, 5]).unwrap();

    let found = server.find_top_documents("cat").unwrap();
    assert!((found[0].relevance - 0.2 * 2f64.ln()).abs() < 1e-12);

    let found = server.find_top_documents("brown cat").unwrap();
    assert!((found[0].relevance - (0.2 * 1f64.ln() + 0.2 * 2f64.ln())).abs() < 1e-12);
}

#[test]
fn zero_idf_ties_fall_back_to_rating() {
    let mut server = server();
    server.add_document(DocId(1), "cat in the city", DocumentStatus::Actual, &[1]).unwrap();
    server.add_document(DocId(2), "cat dog", DocumentStatus::Actual, &[9]).unwrap();

    let found = server.find_top_documents("cat").unwrap();
    assert_eq!(ids(&found), vec![2, 1]);
    assert!(found.iter().all(|doc| doc.relevance == 0.0));
}

#[test]
fn at_most_five_results() {
    let mut server = server();
    for id in 0..12 {
        server.add_document(DocId(id), &format!("cat number{}", id), DocumentStatus::Actual, &[id]).unwrap();
    }

    for execution in BOTH {
        let found = server.find_top_documents_with(execution, "cat", DocumentStatus::Actual).unwrap();
        assert_eq!(ids(&found), vec![11, 10, 9, 8, 7]);
    }
}

#[test]
fn malformed_queries_are_invalid_arguments() {
    let server = pets();
    for query in ["brown -", "brown --cat", "bro\x07wn"] {
        let err = server.find_top_documents(query).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument, "{query:?}");
        let err = server.match_document(query, DocId(111)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument, "{query:?}");
    }
}

#[test]
fn ingestion_errors_leave_index_untouched() {
    let mut server = pets();
    let cases = [
        (DocId(-1), "fine words"),
        (DocId(111), "duplicate id"),
        (DocId(5), "bad w\x10ord"),
    ];

    for (id, text) in cases {
        let err = server.add_document(id, text, DocumentStatus::Actual, &[1]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    assert_eq!(server.document_count(), 3);
    assert!(server.find_top_documents("fine").unwrap().is_empty());
    assert!(server.index().is_consistent());
}

#[test]
fn removal_is_idempotent() {
    for execution in BOTH {
        let mut server = pets();

        server.remove_document_with(execution, DocId(222));
        assert_eq!(server.document_count(), 2);
        server.remove_document_with(execution, DocId(222));
        assert_eq!(server.document_count(), 2);
        server.remove_document_with(execution, DocId(999));
        assert_eq!(server.document_count(), 2);

        assert!(server.index().is_consistent());
        assert!(server.word_frequencies(DocId(222)).is_empty());
        assert!(server.find_top_documents("parrot").unwrap().is_empty());
        assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![DocId(111), DocId(333)]);
        assert_eq!(server.match_document("brown", DocId(222)).unwrap_err().kind, ErrorKind::NotFound);
    }
}

#[test]
fn removed_ids_can_be_reused() {
    let mut server = pets();
    server.remove_document(DocId(111));
    server.add_document(DocId(111), "grey parrot", DocumentStatus::Actual, &[4]).unwrap();

    assert_eq!(server.document_ids().collect::<Vec<_>>(), vec![DocId(222), DocId(333), DocId(111)]);
    assert!(server.find_top_documents("cat").unwrap().is_empty());
    assert!(server.index().is_consistent());
}

#[test]
fn word_frequencies_sum_to_one() {
    let server = pets();
    let frequencies = server.word_frequencies(DocId(333));

    assert_eq!(frequencies.len(), 6);
    assert!((frequencies["brown"] - 0.25).abs() < 1e-12);
    assert!((frequencies["city"] - 0.125).abs() < 1e-12);
    assert!((frequencies.values().sum::<f64>() - 1.0).abs() < 1e-9);
    assert!(server.word_frequencies(DocId(1)).is_empty());
}

#[test]
fn stop_words_never_change_outcomes() {
    let mut plain = server();
    let mut padded = server();
    plain.add_document(DocId(1), "fluffy cat tail", DocumentStatus::Actual, &[2]).unwrap();
    plain.add_document(DocId(2), "cat dog", DocumentStatus::Actual, &[3]).unwrap();
    padded.add_document(DocId(1), "the fluffy in cat the tail in", DocumentStatus::Actual, &[2]).unwrap();
    padded.add_document(DocId(2), "cat dog", DocumentStatus::Actual, &[3]).unwrap();

    for query in ["cat", "fluffy tail", "dog -fluffy", "cat tail -in"] {
        assert_eq!(plain.find_top_documents(query).unwrap(), padded.find_top_documents(query).unwrap());
        assert_eq!(plain.match_document(query, DocId(1)).unwrap(), padded.match_document(query, DocId(1)).unwrap());
    }
}

#[test]
fn every_word_of_a_document_matches_itself() {
    let server = pets();
    let (words, _) = server.match_document("brown fluffy dog with tail city", DocId(333)).unwrap();
    assert_eq!(words, vec!["brown", "city", "dog", "fluffy", "tail", "with"]);
}

#[test]
fn long_chains_of_near_ties_rank_by_rating() {
    let mut server = server();
    let rating = |id: i32| (id * 7919) % 23;
    for (id, length) in (900..1100).enumerate() {
        let text = format!("a{}", " f".repeat(length - 1));
        server.add_document(DocId(id as i32), &text, DocumentStatus::Actual, &[rating(id as i32)]).unwrap();
    }
    for id in 200..400 {
        server.add_document(DocId(id), "f g", DocumentStatus::Actual, &[0]).unwrap();
    }

    let mut expected: Vec<i32> = (0..200).collect();
    expected.sort_by_key(|&id| (-rating(id), id));
    expected.truncate(5);

    for execution in BOTH {
        let found = server.find_top_documents_with(execution, "a", DocumentStatus::Actual).unwrap();
        assert_eq!(ids(&found), expected);
    }
}
