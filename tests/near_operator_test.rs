//! Integration tests for the NEAR/n operator.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sarissa_daat::postings::{DocId, Position};
use sarissa_daat::prelude::*;
use sarissa_daat::query::near::proximity_intersect;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn list(field: &str, postings: &[(DocId, &[Position])]) -> InvertedList {
    InvertedList::from_postings(
        field,
        postings
            .iter()
            .map(|(docid, positions)| Posting::new(*docid, positions.to_vec()))
            .collect(),
    )
}

fn evaluator(source: MemoryPostingSource) -> Evaluator {
    let ids: MemoryExternalIds = (0..1000).map(|d| (d, format!("doc-{d:04}"))).collect();
    Evaluator::new(Arc::new(source), Arc::new(ids), EvaluatorConfig::default()).unwrap()
}

fn near_terms(distance: u32, terms: &[&str]) -> QueryNode {
    QueryNode::near(
        distance,
        terms.iter().map(|t| QueryNode::term(*t, "body")).collect(),
    )
    .unwrap()
}

fn evaluate_list(evaluator: &Evaluator, query: &QueryNode) -> InvertedList {
    evaluator
        .evaluate(query)
        .unwrap()
        .unwrap()
        .as_inverted_list()
        .cloned()
        .unwrap()
}

#[test]
fn test_adjacent_pairs_both_match() {
    init_logging();
    let source = MemoryPostingSource::new()
        .with_list("a", list("body", &[(100, &[1, 5])]))
        .with_list("b", list("body", &[(100, &[2, 6])]));

    let result = evaluate_list(&evaluator(source), &near_terms(1, &["a", "b"]));

    assert_eq!(result.field(), "body");
    assert_eq!(result.len(), 1);
    assert_eq!(result.posting(0).unwrap(), &Posting::new(100, vec![1, 5]));
}

#[test]
fn test_second_anchor_out_of_reach() {
    init_logging();
    let source = MemoryPostingSource::new()
        .with_list("a", list("body", &[(100, &[1, 5])]))
        .with_list("b", list("body", &[(100, &[2, 8])]));

    let result = evaluate_list(&evaluator(source), &near_terms(1, &["a", "b"]));

    assert_eq!(result.len(), 1);
    assert_eq!(result.posting(0).unwrap(), &Posting::new(100, vec![1]));
}

#[test]
fn test_document_missing_from_one_of_three() {
    init_logging();
    let source = MemoryPostingSource::new()
        .with_list("a", list("body", &[(1, &[0]), (2, &[0])]))
        .with_list("b", list("body", &[(1, &[1]), (2, &[1])]))
        .with_list("c", list("body", &[(2, &[2])]));

    let result = evaluate_list(&evaluator(source), &near_terms(1, &["a", "b", "c"]));

    let docids: Vec<DocId> = result.iter().map(|p| p.docid).collect();
    assert_eq!(docids, vec![2]);
}

#[test]
fn test_missing_term_yields_empty_result() {
    init_logging();
    let source = MemoryPostingSource::new().with_list("a", list("body", &[(1, &[0])]));

    let result = evaluate_list(&evaluator(source), &near_terms(4, &["a", "nothing"]));
    assert!(result.is_empty());
}

#[test]
fn test_field_mismatch_aborts_query() {
    init_logging();
    let source = MemoryPostingSource::new()
        .with_list("a", list("body", &[(1, &[0])]))
        .with_list("b", list("title", &[(1, &[1])]));
    let query = QueryNode::near(
        1,
        vec![QueryNode::term("a", "body"), QueryNode::term("b", "title")],
    )
    .unwrap();

    let err = evaluator(source).evaluate(&query).unwrap_err();
    assert!(err.is_malformed_query());
    assert!(err.to_string().contains("#NEAR/1( a.body b.title )"));
}

#[test]
fn test_near_under_score_operator_is_rejected() {
    let result = QueryNode::near(
        1,
        vec![
            QueryNode::term("a", "body"),
            QueryNode::and(vec![QueryNode::term("b", "body"), QueryNode::term("c", "body")]),
        ],
    );

    assert!(matches!(result, Err(DaatError::InvalidArgument { .. })));
}

fn random_list(rng: &mut StdRng, docs: DocId, max_position: Position) -> InvertedList {
    let mut postings = Vec::new();
    for docid in 0..docs {
        if !rng.random_bool(0.6) {
            continue;
        }
        let positions: Vec<Position> = (0..max_position).filter(|_| rng.random_bool(0.15)).collect();
        if !positions.is_empty() {
            postings.push(Posting::new(docid, positions));
        }
    }
    InvertedList::from_postings("body", postings)
}

/// Whether the arguments after the anchor can be chained in order within `distance`.
fn has_chain(distance: u32, from: Position, rest: &[&[Position]]) -> bool {
    match rest.split_first() {
        None => true,
        Some((positions, tail)) => positions
            .iter()
            .filter(|&&p| p > from && p - from <= distance)
            .any(|&p| has_chain(distance, p, tail)),
    }
}

#[test]
fn test_random_lists_satisfy_window_properties() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let arity = rng.random_range(2..=4);
        let distance = rng.random_range(1..=5);
        let lists: Vec<InvertedList> = (0..arity).map(|_| random_list(&mut rng, 40, 30)).collect();
        let refs: Vec<&InvertedList> = lists.iter().collect();

        let result = proximity_intersect(distance, &refs);

        let mut previous: Option<DocId> = None;
        for posting in result.iter() {
            // Output docids are strictly increasing.
            assert!(previous.is_none_or(|p| p < posting.docid));
            previous = Some(posting.docid);

            // Every document is present in every argument.
            let per_arg: Vec<&Posting> = lists
                .iter()
                .map(|l| l.iter().find(|p| p.docid == posting.docid).unwrap())
                .collect();

            // Anchors are strictly increasing positions of the first argument.
            assert!(!posting.positions.is_empty());
            assert!(posting.positions.windows(2).all(|w| w[0] < w[1]));
            let anchors: BTreeSet<Position> = per_arg[0].positions.iter().copied().collect();

            let rest: Vec<&[Position]> = per_arg[1..].iter().map(|p| p.positions()).collect();
            for &anchor in &posting.positions {
                assert!(anchors.contains(&anchor));
                assert!(
                    has_chain(distance, anchor, &rest),
                    "anchor {anchor} in document {} has no window within {distance}",
                    posting.docid
                );
            }
        }
    }
}

#[test]
fn test_two_term_first_match_is_found() {
    // For two arguments, a document with any qualifying pair always matches.
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let distance = rng.random_range(1..=4);
        let a = random_list(&mut rng, 30, 25);
        let b = random_list(&mut rng, 30, 25);
        let result = proximity_intersect(distance, &[&a, &b]);
        let matched: BTreeSet<DocId> = result.iter().map(|p| p.docid).collect();

        for pa in a.iter() {
            let Some(pb) = b.iter().find(|p| p.docid == pa.docid) else {
                continue;
            };
            let qualifies = pa
                .positions
                .iter()
                .any(|&x| pb.positions.iter().any(|&y| y > x && y - x <= distance));
            assert_eq!(matched.contains(&pa.docid), qualifies, "document {}", pa.docid);
        }
    }
}
