//! ACTION/GOTO table construction and conflict bookkeeping.
//!
//! Builds on the teacher's SLR(1) table-building technique: generalized from
//! "reduce on FOLLOW(A)" to "reduce on the item's own lookahead", and from a
//! hard error on the first conflict to non-fatal conflict recording.

use crate::grammar::Grammar;
use crate::lr1::items::{Item, ItemSet, TransitionMap};
use crate::symbol::Symbol;
use std::collections::HashMap;
use std::fmt;

/// One ACTION table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(s) => write!(f, "s{}", s),
            Action::Reduce(p) => write!(f, "r{}", p),
            Action::Accept => write!(f, "acc"),
        }
    }
}

/// The kind of a recorded table conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

/// A non-fatal conflict observed while building the ACTION table: writing
/// `new` to `(state, symbol)` would have overwritten the pre-existing,
/// semantically different `kept`/`discarded` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRecord {
    pub state: usize,
    pub symbol: Symbol,
    pub kind: ConflictKind,
    pub kept: Action,
    pub discarded: Action,
}

pub type ActionTable = HashMap<(usize, Symbol), Action>;
pub type GotoTable = HashMap<(usize, Symbol), usize>;

/// Builds the ACTION and GOTO tables from the canonical collection.
///
/// | Item pattern in state `i` | Action |
/// |---|---|
/// | `[A → α·aβ, b]`, `a` terminal | `ACTION[i,a] := Shift(GOTO(i,a))` |
/// | `[S' → S·, $]` | `ACTION[i,$] := Accept` |
/// | `[A → α·, a]`, `A ≠ S'` | `ACTION[i,a] := Reduce(A → α)` |
/// | `[A → α·Bβ, _]`, `B` nonterminal | `GOTO[i,B] := GOTO(i,B)` |
///
/// Table construction never fails; conflicting writes are resolved (shift
/// wins over reduce, lower production id wins between two reduces) and
/// recorded in the returned `Vec<ConflictRecord>` regardless.
pub fn build_tables(
    grammar: &Grammar,
    states: &[ItemSet],
    transitions: &TransitionMap,
) -> (ActionTable, GotoTable, Vec<ConflictRecord>) {
    let mut action_table = ActionTable::new();
    let mut goto_table = GotoTable::new();
    let mut conflicts = Vec::new();

    for (state_id, state) in states.iter().enumerate() {
        for item in state {
            if item.is_complete(grammar) {
                handle_complete_item(
                    grammar,
                    state_id,
                    item,
                    &mut action_table,
                    &mut conflicts,
                );
            } else if let Some(symbol) = item.symbol_after_dot(grammar) {
                if grammar.is_terminal(&symbol) {
                    if let Some(&target) = transitions.get(&(state_id, symbol.clone())) {
                        insert_action(
                            &mut action_table,
                            &mut conflicts,
                            state_id,
                            symbol,
                            Action::Shift(target),
                        );
                    }
                }
            }
        }

        for ((src, symbol), &target) in transitions {
            if *src == state_id && grammar.is_nonterminal(symbol) {
                goto_table.insert((state_id, symbol.clone()), target);
            }
        }
    }

    (action_table, goto_table, conflicts)
}

fn handle_complete_item(
    grammar: &Grammar,
    state_id: usize,
    item: &Item,
    action_table: &mut ActionTable,
    conflicts: &mut Vec<ConflictRecord>,
) {
    let production = grammar
        .production_by_id(item.production_id)
        .expect("item references a production that exists in the grammar");

    if production.lhs == *grammar.augmented_start() && item.lookahead.is_end_marker() {
        insert_action(
            action_table,
            conflicts,
            state_id,
            Symbol::EndMarker,
            Action::Accept,
        );
    } else {
        insert_action(
            action_table,
            conflicts,
            state_id,
            item.lookahead.clone(),
            Action::Reduce(item.production_id),
        );
    }
}

fn insert_action(
    table: &mut ActionTable,
    conflicts: &mut Vec<ConflictRecord>,
    state: usize,
    symbol: Symbol,
    new_action: Action,
) {
    let key = (state, symbol.clone());
    match table.get(&key) {
        None => {
            table.insert(key, new_action);
        }
        Some(existing) if *existing == new_action => {
            // Writing the same action twice is idempotent, not a conflict.
        }
        Some(existing) => {
            let (kind, kept) = resolve(existing, &new_action);
            conflicts.push(ConflictRecord {
                state,
                symbol,
                kind,
                kept: kept.clone(),
                discarded: if kept == *existing {
                    new_action
                } else {
                    existing.clone()
                },
            });
            table.insert(key, kept);
        }
    }
}

/// Resolution policy: shift/reduce keeps the shift (standard LR convention);
/// reduce/reduce keeps the lower production id (the earlier-declared rule).
/// `Accept` is treated as taking priority over a conflicting reduce, which
/// can only arise in the state containing `[S' → S·, $]` alongside some
/// other complete item with lookahead `$` — an edge case outside the
/// classic two-kind taxonomy, best-effort classified as shift/reduce.
fn resolve(existing: &Action, new_action: &Action) -> (ConflictKind, Action) {
    match (existing, new_action) {
        (Action::Shift(_), Action::Reduce(_)) => (ConflictKind::ShiftReduce, existing.clone()),
        (Action::Reduce(_), Action::Shift(_)) => (ConflictKind::ShiftReduce, new_action.clone()),
        (Action::Reduce(a), Action::Reduce(b)) => {
            let kept = if a <= b { existing } else { new_action };
            (ConflictKind::ReduceReduce, kept.clone())
        }
        (Action::Accept, _) => (ConflictKind::ShiftReduce, existing.clone()),
        (_, Action::Accept) => (ConflictKind::ShiftReduce, new_action.clone()),
        (Action::Shift(_), Action::Shift(_)) => (ConflictKind::ShiftReduce, existing.clone()),
    }
}
