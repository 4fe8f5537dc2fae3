//! Unit tests for the canonical LR(1) item-set builder and table construction.

use lr1gen::grammar::Grammar;
use lr1gen::lr1::items::{build_canonical_collection, closure};
use lr1gen::lr1::table::ConflictKind;
use lr1gen::lr1::LR1Parser;
use lr1gen::symbol::Symbol;
use lr1gen::first_follow::compute_first_sets;

fn expr_grammar() -> Grammar {
    let lines = vec![
        "E".to_string(),
        "2".to_string(),
        "E -> E + T | T".to_string(),
        "T -> id".to_string(),
    ];
    Grammar::parse(&lines).unwrap()
}

#[test]
fn test_augmentation_uniqueness() {
    let grammar = expr_grammar();
    assert_ne!(grammar.augmented_start(), grammar.start_symbol());
    for nt in grammar.nonterminals() {
        assert_ne!(nt, grammar.augmented_start());
    }
}

#[test]
fn test_closure_idempotence() {
    let grammar = expr_grammar();
    let first_sets = compute_first_sets(&grammar);

    let kernel = std::iter::once(lr1gen::lr1::items::Item::new(0, 0, Symbol::EndMarker)).collect();
    let once = closure(&grammar, &first_sets, kernel);
    let twice = closure(&grammar, &first_sets, once.clone());

    assert_eq!(once, twice);
}

#[test]
fn test_state_determinism() {
    let grammar1 = expr_grammar();
    let grammar2 = expr_grammar();
    let first1 = compute_first_sets(&grammar1);
    let first2 = compute_first_sets(&grammar2);

    let (states1, transitions1) = build_canonical_collection(&grammar1, &first1);
    let (states2, transitions2) = build_canonical_collection(&grammar2, &first2);

    assert_eq!(states1.len(), states2.len());
    assert_eq!(transitions1.len(), transitions2.len());
    for (key, target) in &transitions1 {
        assert_eq!(transitions2.get(key), Some(target));
    }
}

#[test]
fn test_goto_well_formedness() {
    let grammar = expr_grammar();
    let first_sets = compute_first_sets(&grammar);
    let (states, transitions) = build_canonical_collection(&grammar, &first_sets);

    for ((from, symbol), &to) in &transitions {
        // Every item in the target state has advanced the dot at least once.
        for item in &states[to] {
            assert!(item.dot >= 1);
        }
        // Some item in the source state has `symbol` right after the dot.
        assert!(states[*from]
            .iter()
            .any(|item| item.symbol_after_dot(&grammar).as_ref() == Some(symbol)));
    }
}

#[test]
fn test_accept_uniqueness() {
    let grammar = expr_grammar();
    let parser = LR1Parser::from_grammar(grammar);

    let accepts: Vec<_> = parser
        .action_table()
        .iter()
        .filter(|(_, action)| matches!(action, lr1gen::lr1::Action::Accept))
        .collect();
    assert_eq!(accepts.len(), 1);
}

#[test]
fn test_conflict_free_grammar_reports_none() {
    let grammar = expr_grammar();
    let parser = LR1Parser::from_grammar(grammar);
    assert!(parser.is_conflict_free());
}

#[test]
fn test_conflict_reporting_dangling_else() {
    let lines = vec![
        "S".to_string(),
        "2".to_string(),
        "S -> i C t S | i C t S e S | a".to_string(),
        "C -> b".to_string(),
    ];
    let grammar = Grammar::parse(&lines).unwrap();
    let parser = LR1Parser::from_grammar(grammar);

    assert!(!parser.is_conflict_free());
    assert!(parser
        .conflicts()
        .iter()
        .any(|c| c.kind == ConflictKind::ShiftReduce && c.symbol == Symbol::new("e")));
}

#[test]
fn test_conflict_reporting_reduce_reduce() {
    let lines = vec![
        "S".to_string(),
        "3".to_string(),
        "S -> A | B".to_string(),
        "A -> a".to_string(),
        "B -> a".to_string(),
    ];
    let grammar = Grammar::parse(&lines).unwrap();
    let parser = LR1Parser::from_grammar(grammar);

    assert!(!parser.is_conflict_free());
    assert!(parser
        .conflicts()
        .iter()
        .any(|c| c.kind == ConflictKind::ReduceReduce && c.symbol == Symbol::EndMarker));
}
