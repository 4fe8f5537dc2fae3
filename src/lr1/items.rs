//! LR(1) item sets, closure, GOTO, and the canonical collection.
//!
//! Shares its worklist shape with the teacher's `closure`/`goto`/
//! `build_lr0_automaton` (same `VecDeque` worklist, same full-set-equality
//! state lookup), generalized to carry and propagate a lookahead terminal
//! per item, which is the dimension an LR(0)/SLR(1) automaton does not need.

use crate::first_follow::{first_of_string, FirstSets};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet, VecDeque};

/// An LR(1) item: a production with a dot position and a lookahead terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub production_id: usize,
    pub dot: usize,
    pub lookahead: Symbol,
}

impl Item {
    pub fn new(production_id: usize, dot: usize, lookahead: Symbol) -> Self {
        Self {
            production_id,
            dot,
            lookahead,
        }
    }

    /// Returns the symbol just after the dot, if the item is not complete.
    pub fn symbol_after_dot(&self, grammar: &Grammar) -> Option<Symbol> {
        let production = grammar.production_by_id(self.production_id)?;
        production.rhs.get(self.dot).cloned()
    }

    /// An item is complete iff the dot has reached the end of the RHS.
    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        match grammar.production_by_id(self.production_id) {
            Some(p) => self.dot >= p.rhs.len(),
            None => true,
        }
    }
}

/// A state in the LR(1) automaton: an unordered set of items, identified by
/// membership. `HashSet`'s `PartialEq` already compares as sets regardless
/// of insertion order, which is exactly the identity rule states need.
pub type ItemSet = HashSet<Item>;

/// A partial mapping `(state_index, symbol) -> state_index`.
pub type TransitionMap = HashMap<(usize, Symbol), usize>;

/// Computes the closure of a kernel set of items.
///
/// For each item `[A → α·Bβ, a]` with `B` a nonterminal, for each production
/// `B → γ`, for each `b ∈ FIRST(βa)` (ε filtered out), adds `[B → ·γ, b]`.
/// `FIRST(βa)` is computed by appending the item's own lookahead terminal as
/// a trailing one-symbol "sequence element" to `β` and reusing
/// `first_of_string`: since a terminal's FIRST set is itself, this yields
/// exactly FIRST(β) if β cannot derive ε, and FIRST(β) ∪ {a} otherwise.
pub fn closure(grammar: &Grammar, first_sets: &FirstSets, kernel: ItemSet) -> ItemSet {
    let mut result = kernel;
    let mut changed = true;

    while changed {
        changed = false;
        let current = result.clone();

        for item in &current {
            let Some(symbol) = item.symbol_after_dot(grammar) else {
                continue;
            };
            if !grammar.is_nonterminal(&symbol) {
                continue;
            }

            let production = grammar.production_by_id(item.production_id).unwrap();
            let mut beta_plus_lookahead = production.rhs[item.dot + 1..].to_vec();
            beta_plus_lookahead.push(item.lookahead.clone());
            let lookaheads = first_of_string(first_sets, &beta_plus_lookahead);

            for next_production in grammar.productions_for(&symbol) {
                for lookahead in &lookaheads {
                    if lookahead.is_epsilon() {
                        continue;
                    }
                    let new_item = Item::new(next_production.id, 0, lookahead.clone());
                    if result.insert(new_item) {
                        changed = true;
                    }
                }
            }
        }
    }

    result
}

/// Computes `GOTO(I, X)`: the items obtained by moving the dot over `X` in
/// every item of `I` that has `X` after its dot, closed.
pub fn goto(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet, symbol: &Symbol) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.symbol_after_dot(grammar).as_ref() == Some(symbol))
        .map(|item| Item::new(item.production_id, item.dot + 1, item.lookahead.clone()))
        .collect();

    if moved.is_empty() {
        return ItemSet::new();
    }

    closure(grammar, first_sets, moved)
}

/// Builds the canonical collection of LR(1) item sets and the transition
/// graph between them.
///
/// State 0 is `CLOSURE({[S' → ·S, $]})`. New states are discovered with a
/// FIFO worklist (as in the teacher's `build_lr0_automaton`) and looked up
/// by full set equality so that structurally identical states are never
/// duplicated. Within a state, the symbols considered for `GOTO` are
/// processed in a stable order — terminals (including `$`) before
/// nonterminals, each group sorted lexicographically — so that two runs on
/// the same grammar always number states identically.
pub fn build_canonical_collection(
    grammar: &Grammar,
    first_sets: &FirstSets,
) -> (Vec<ItemSet>, TransitionMap) {
    let initial_item = Item::new(0, 0, Symbol::EndMarker);
    let initial_state = closure(grammar, first_sets, ItemSet::from([initial_item]));

    let mut states = vec![initial_state];
    let mut transitions = TransitionMap::new();
    let mut worklist: VecDeque<usize> = VecDeque::from([0]);

    while let Some(state_id) = worklist.pop_front() {
        let state = states[state_id].clone();

        let mut terminals_after_dot: Vec<Symbol> = Vec::new();
        let mut nonterminals_after_dot: Vec<Symbol> = Vec::new();
        let mut seen = HashSet::new();
        for item in &state {
            if let Some(symbol) = item.symbol_after_dot(grammar) {
                if seen.insert(symbol.clone()) {
                    if grammar.is_nonterminal(&symbol) {
                        nonterminals_after_dot.push(symbol);
                    } else {
                        terminals_after_dot.push(symbol);
                    }
                }
            }
        }
        terminals_after_dot.sort();
        nonterminals_after_dot.sort();

        for symbol in terminals_after_dot.into_iter().chain(nonterminals_after_dot) {
            let next_state = goto(grammar, first_sets, &state, &symbol);
            if next_state.is_empty() {
                continue;
            }

            let existing_id = states.iter().position(|s| s == &next_state);
            let target_id = match existing_id {
                Some(id) => id,
                None => {
                    let id = states.len();
                    log::trace!("discovered state {id} via GOTO({state_id}, {symbol})");
                    states.push(next_state);
                    worklist.push_back(id);
                    id
                }
            };
            transitions.insert((state_id, symbol), target_id);
        }
    }

    log::debug!("canonical collection has {} state(s)", states.len());
    (states, transitions)
}
