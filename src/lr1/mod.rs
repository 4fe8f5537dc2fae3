//! Canonical LR(1) parser generator and driver.
//!
//! Wires the grammar model, FIRST/FOLLOW engine, item-set builder, table
//! builder, and stack-machine driver into a single end-to-end entry point
//! (component C6, §4.6 of the design). This is the crate's only parsing
//! mode.

pub mod driver;
pub mod error;
pub mod items;
pub mod table;

use crate::error::InvalidGrammarError;
use crate::first_follow::{compute_first_sets, FirstSets};
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;

pub use driver::ParseTreeNode;
pub use error::DriverError;
pub use items::{Item, ItemSet};
pub use table::{Action, ActionTable, ConflictKind, ConflictRecord, GotoTable};

/// A built canonical LR(1) parser: an immutable grammar, its canonical
/// collection of item sets, and the ACTION/GOTO tables derived from them.
/// `parse` may be called any number of times and, since every field here is
/// read-only after construction, a single built `LR1Parser` may be shared
/// across threads for concurrent parses.
#[derive(Debug)]
pub struct LR1Parser {
    grammar: Grammar,
    first_sets: FirstSets,
    states: Vec<ItemSet>,
    action_table: ActionTable,
    goto_table: GotoTable,
    conflicts: Vec<ConflictRecord>,
}

impl LR1Parser {
    /// Runs C1 (grammar construction) through C4 (table construction) and
    /// returns the ready-to-drive parser. Conflicts never abort
    /// construction — they are recorded and exposed via [`Self::conflicts`].
    pub fn build(
        productions: Vec<(Symbol, Vec<Symbol>)>,
        start_symbol: Symbol,
    ) -> Result<Self, InvalidGrammarError> {
        let grammar = Grammar::new(productions, start_symbol)?;
        Ok(Self::from_grammar(grammar))
    }

    /// Builds a parser from an already-constructed (already-augmented)
    /// grammar, e.g. one produced by [`Grammar::parse`].
    pub fn from_grammar(grammar: Grammar) -> Self {
        let first_sets = compute_first_sets(&grammar);
        let (states, transitions) = items::build_canonical_collection(&grammar, &first_sets);
        let (action_table, goto_table, conflicts) =
            table::build_tables(&grammar, &states, &transitions);

        Self {
            grammar,
            first_sets,
            states,
            action_table,
            goto_table,
            conflicts,
        }
    }

    /// Runs C5 (the shift/reduce driver) over a token sequence. The caller
    /// must not append the trailing `$`.
    pub fn parse(
        &self,
        tokens: &[Symbol],
    ) -> Result<(ParseTreeNode, Vec<usize>), DriverError> {
        driver::parse(&self.grammar, &self.action_table, &self.goto_table, tokens)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn first_sets(&self) -> &FirstSets {
        &self.first_sets
    }

    /// The numbered canonical collection; state 0 is the initial state.
    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    pub fn action_table(&self) -> &ActionTable {
        &self.action_table
    }

    pub fn goto_table(&self) -> &GotoTable {
        &self.goto_table
    }

    /// Every shift/reduce and reduce/reduce conflict observed while building
    /// the ACTION table. Empty iff the grammar is conflict-free LR(1).
    pub fn conflicts(&self) -> &[ConflictRecord] {
        &self.conflicts
    }

    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Convenience accessor mirroring `Grammar::all_productions`, handy when
    /// rendering conflicts or derivations by production id.
    pub fn production_by_id(&self, id: usize) -> Option<&Production> {
        self.grammar.production_by_id(id)
    }
}
