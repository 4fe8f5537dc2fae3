//! End-to-end scenarios driving the canonical LR(1) parser from grammar text
//! through to an accepted parse tree or a structured rejection.

use lr1gen::grammar::Grammar;
use lr1gen::lr1::table::ConflictKind;
use lr1gen::lr1::{DriverError, LR1Parser};
use lr1gen::symbol::Symbol;

fn tokens(s: &str) -> Vec<Symbol> {
    lr1gen::symbol::parse_symbol_sequence(s)
}

/// Scenario A — arithmetic, accepting.
#[test]
fn test_scenario_a_arithmetic_accept() {
    let lines = vec![
        "E".to_string(),
        "2".to_string(),
        "E -> E + T | T".to_string(),
        "T -> id".to_string(),
    ];
    let grammar = Grammar::parse(&lines).unwrap();
    let parser = LR1Parser::from_grammar(grammar);
    assert!(parser.is_conflict_free());

    let (tree, derivation) = parser.parse(&tokens("id + id")).unwrap();
    assert_eq!(derivation, vec![3, 2, 3, 1]);

    assert_eq!(tree.symbol(), &Symbol::new("E"));
    assert_eq!(tree.production_id(), Some(1));
    let children = tree.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].symbol(), &Symbol::new("E"));
    assert_eq!(children[1].symbol(), &Symbol::new("+"));
    assert_eq!(children[2].symbol(), &Symbol::new("T"));

    assert_eq!(tree.yield_terminals(), tokens("id + id"));
}

/// Scenario B — arithmetic, rejecting.
#[test]
fn test_scenario_b_arithmetic_reject() {
    let lines = vec![
        "E".to_string(),
        "2".to_string(),
        "E -> E + T | T".to_string(),
        "T -> id".to_string(),
    ];
    let grammar = Grammar::parse(&lines).unwrap();
    let parser = LR1Parser::from_grammar(grammar);

    let err = parser.parse(&tokens("+ id")).unwrap_err();
    match err {
        DriverError::Parse(parse_error) => {
            assert_eq!(parse_error.state, 0);
            assert_eq!(parse_error.position, 0);
            assert_eq!(parse_error.token, Symbol::new("+"));
            assert_eq!(parse_error.expected, vec![Symbol::new("id")]);
        }
        DriverError::Internal(e) => panic!("expected a parse error, got {e}"),
    }
}

/// Scenario C — classical expression grammar: `*` binds tighter than `+`.
#[test]
fn test_scenario_c_classical_expression_grammar() {
    let lines = vec![
        "E".to_string(),
        "3".to_string(),
        "E -> E + T | T".to_string(),
        "T -> T * F | F".to_string(),
        "F -> ( E ) | id".to_string(),
    ];
    let grammar = Grammar::parse(&lines).unwrap();
    let parser = LR1Parser::from_grammar(grammar);
    assert!(parser.is_conflict_free());

    let (tree, _) = parser.parse(&tokens("id + id * id")).unwrap();
    assert_eq!(tree.symbol(), &Symbol::new("E"));

    // Root is `E + T`; the right child (`T`) dominates the `*` subtree.
    let children = tree.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[1].symbol(), &Symbol::new("+"));
    let rhs = &children[2];
    assert_eq!(rhs.symbol(), &Symbol::new("T"));
    assert!(rhs.children().iter().any(|c| c.symbol() == &Symbol::new("*")));

    assert_eq!(tree.yield_terminals(), tokens("id + id * id"));
}

/// Scenario D — dangling else: shift/reduce conflict resolved toward shift,
/// so the innermost `if` claims the `else`.
#[test]
fn test_scenario_d_dangling_else() {
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

    let (tree, _) = parser
        .parse(&tokens("i b t i b t a e a"))
        .expect("dangling else still parses under the default shift resolution");
    assert_eq!(tree.symbol(), &Symbol::new("S"));
}

/// Scenario E — ε-productions.
#[test]
fn test_scenario_e_epsilon_productions() {
    let lines = vec![
        "S".to_string(),
        "3".to_string(),
        "S -> A B".to_string(),
        "A -> a | ε".to_string(),
        "B -> b".to_string(),
    ];
    let grammar = Grammar::parse(&lines).unwrap();
    let parser = LR1Parser::from_grammar(grammar);
    assert!(parser.is_conflict_free());

    let (tree, derivation) = parser.parse(&tokens("b")).unwrap();
    assert_eq!(tree.symbol(), &Symbol::new("S"));

    // A -> ε reduces before B's `b` is shifted.
    let a_prod_id = grammar_production_id(&lines, "A", &[]);
    assert_eq!(derivation.first().copied(), Some(a_prod_id));
}

fn grammar_production_id(lines: &[String], lhs: &str, rhs: &[&str]) -> usize {
    let grammar = Grammar::parse(lines).unwrap();
    let target: Vec<Symbol> = rhs.iter().map(|s| Symbol::new(*s)).collect();
    grammar
        .productions_for(&Symbol::new(lhs))
        .iter()
        .find(|p| p.rhs == target)
        .map(|p| p.id)
        .unwrap()
}

/// Scenario F — reduce/reduce conflict, resolved by keeping the lower id.
#[test]
fn test_scenario_f_reduce_reduce_conflict() {
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
    let conflict = parser
        .conflicts()
        .iter()
        .find(|c| c.kind == ConflictKind::ReduceReduce && c.symbol == Symbol::EndMarker)
        .expect("reduce/reduce conflict on $");

    // S -> A | B expands first (ids 1, 2), then A -> a (id 3), then B -> a
    // (id 4); the lower id wins.
    assert_eq!(conflict.kept, lr1gen::lr1::Action::Reduce(3));

    let (tree, _) = parser.parse(&tokens("a")).unwrap();
    assert_eq!(tree.symbol(), &Symbol::new("S"));
}
