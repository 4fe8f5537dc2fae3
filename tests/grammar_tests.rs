//! Unit tests for the grammar module

use lr1gen::grammar::*;
use lr1gen::symbol::Symbol;

#[test]
fn test_parse_simple_grammar() {
    let lines = vec![
        "S".to_string(),
        "2".to_string(),
        "S -> A B".to_string(),
        "A -> a".to_string(),
    ];

    let grammar = Grammar::parse(&lines).unwrap();
    // augmentation + 2 user productions
    assert_eq!(grammar.all_productions().len(), 3);
    assert!(grammar.nonterminals().contains(&Symbol::new("S")));
    assert!(grammar.terminals().contains(&Symbol::new("a")));
}

#[test]
fn test_parse_alternatives() {
    let lines = vec!["S".to_string(), "1".to_string(), "S -> a | b | c".to_string()];

    let grammar = Grammar::parse(&lines).unwrap();
    assert_eq!(grammar.all_productions().len(), 4);
}

#[test]
fn test_empty_grammar_error() {
    let lines: Vec<String> = vec![];
    let result = Grammar::parse(&lines);
    assert!(result.is_err());
}

#[test]
fn test_get_productions() {
    let lines = vec![
        "S".to_string(),
        "2".to_string(),
        "S -> A B | A C".to_string(),
        "A -> a".to_string(),
    ];

    let grammar = Grammar::parse(&lines).unwrap();
    let s_prods = grammar.productions_for(&Symbol::new("S"));
    assert_eq!(s_prods.len(), 2);
}

#[test]
fn test_start_symbol() {
    let lines = vec!["S".to_string(), "1".to_string(), "S -> a".to_string()];

    let grammar = Grammar::parse(&lines).unwrap();
    assert_eq!(grammar.start_symbol(), &Symbol::new("S"));
}

#[test]
fn test_epsilon_production() {
    let lines = vec!["S".to_string(), "1".to_string(), "S -> ε".to_string()];

    let grammar = Grammar::parse(&lines).unwrap();
    let prods = grammar.productions_for(&Symbol::new("S"));
    assert!(prods[0].rhs.is_empty());
}

#[test]
fn test_complex_grammar() {
    let lines = vec![
        "S".to_string(),
        "3".to_string(),
        "S -> S + T | T".to_string(),
        "T -> T * F | F".to_string(),
        "F -> ( S ) | i".to_string(),
    ];

    let grammar = Grammar::parse(&lines).unwrap();
    // augmentation + 6 user productions
    assert_eq!(grammar.all_productions().len(), 7);
    assert!(grammar.terminals().contains(&Symbol::new("+")));
    assert!(grammar.terminals().contains(&Symbol::new("*")));
    assert!(grammar.terminals().contains(&Symbol::new("(")));
    assert!(grammar.terminals().contains(&Symbol::new(")")));
    assert!(grammar.terminals().contains(&Symbol::new("i")));
}
