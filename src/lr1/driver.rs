//! The shift/reduce stack machine (component C5).
//!
//! Generalizes the teacher's parse stack loops from a boolean accept/reject
//! return into a full parse-tree result plus a structured error, and from a
//! single symbol stack into a state stack paired with a parse-tree node
//! stack.

use crate::grammar::Grammar;
use crate::lr1::error::{DriverError, InternalInconsistency, ParseError};
use crate::lr1::table::{Action, ActionTable, GotoTable};
use crate::symbol::Symbol;

/// A node of the parse tree produced by a successful parse.
///
/// Terminal leaves carry no production; interior nodes carry the production
/// used to reduce them, with `children` in left-to-right RHS order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTreeNode {
    Leaf {
        symbol: Symbol,
    },
    Interior {
        symbol: Symbol,
        children: Vec<ParseTreeNode>,
        production_id: usize,
    },
}

impl ParseTreeNode {
    pub fn symbol(&self) -> &Symbol {
        match self {
            ParseTreeNode::Leaf { symbol } => symbol,
            ParseTreeNode::Interior { symbol, .. } => symbol,
        }
    }

    pub fn production_id(&self) -> Option<usize> {
        match self {
            ParseTreeNode::Leaf { .. } => None,
            ParseTreeNode::Interior { production_id, .. } => Some(*production_id),
        }
    }

    pub fn children(&self) -> &[ParseTreeNode] {
        match self {
            ParseTreeNode::Leaf { .. } => &[],
            ParseTreeNode::Interior { children, .. } => children,
        }
    }

    /// The left-to-right sequence of terminal leaves dominated by this node
    /// (its yield). Used by callers (and by this crate's own tests) to check
    /// driver soundness: the yield of an accepted tree equals the input.
    pub fn yield_terminals(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        self.collect_yield(&mut out);
        out
    }

    fn collect_yield(&self, out: &mut Vec<Symbol>) {
        match self {
            ParseTreeNode::Leaf { symbol } => out.push(symbol.clone()),
            ParseTreeNode::Interior { children, .. } => {
                for child in children {
                    child.collect_yield(out);
                }
            }
        }
    }
}

/// Drives the ACTION/GOTO tables over a finite token sequence.
///
/// The caller must not include the trailing `$`; it is appended internally.
/// On success, returns the parse-tree root together with the derivation: one
/// production id per reduce, in application order (reversed, this is the
/// rightmost derivation).
pub fn parse(
    grammar: &Grammar,
    action_table: &ActionTable,
    goto_table: &GotoTable,
    tokens: &[Symbol],
) -> Result<(ParseTreeNode, Vec<usize>), DriverError> {
    let mut input: Vec<Symbol> = tokens.to_vec();
    input.push(Symbol::EndMarker);

    let mut state_stack: Vec<usize> = vec![0];
    let mut node_stack: Vec<ParseTreeNode> = Vec::new();
    let mut derivation: Vec<usize> = Vec::new();
    let mut pos = 0usize;

    loop {
        let state = *state_stack.last().expect("state stack is never empty");
        let token = &input[pos];

        match action_table.get(&(state, token.clone())) {
            Some(Action::Shift(next_state)) => {
                node_stack.push(ParseTreeNode::Leaf {
                    symbol: token.clone(),
                });
                state_stack.push(*next_state);
                pos += 1;
            }
            Some(Action::Reduce(production_id)) => {
                let production = grammar
                    .production_by_id(*production_id)
                    .expect("table only references productions that exist");
                let arity = production.rhs.len();
                let lhs = production.lhs.clone();

                let split_at = node_stack.len() - arity;
                let children: Vec<ParseTreeNode> = node_stack.split_off(split_at);
                state_stack.truncate(state_stack.len() - arity);

                let after_pop = *state_stack.last().expect("state stack is never empty");
                let next_state = goto_table
                    .get(&(after_pop, lhs.clone()))
                    .copied()
                    .ok_or_else(|| InternalInconsistency::MissingGoto {
                        state: after_pop,
                        nonterminal: lhs.clone(),
                    })?;

                node_stack.push(ParseTreeNode::Interior {
                    symbol: lhs,
                    children,
                    production_id: *production_id,
                });
                state_stack.push(next_state);
                derivation.push(*production_id);
            }
            Some(Action::Accept) => {
                if node_stack.len() != 1 {
                    return Err(InternalInconsistency::AcceptStackMismatch {
                        node_count: node_stack.len(),
                    }
                    .into());
                }
                return Ok((node_stack.pop().unwrap(), derivation));
            }
            None => {
                let expected = expected_terminals(action_table, state);
                return Err(ParseError {
                    state,
                    token: token.clone(),
                    position: pos,
                    expected,
                }
                .into());
            }
        }
    }
}

fn expected_terminals(action_table: &ActionTable, state: usize) -> Vec<Symbol> {
    let mut expected: Vec<Symbol> = action_table
        .keys()
        .filter(|(s, _)| *s == state)
        .map(|(_, symbol)| symbol.clone())
        .collect();
    expected.sort();
    expected
}
