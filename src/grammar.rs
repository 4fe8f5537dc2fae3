//! Grammar module for context-free grammars.
//!
//! This module provides data structures and parsing logic for working with
//! context-free grammars, including productions, augmentation, and the
//! derived terminal/nonterminal partition.

use crate::error::{GrammarError, InvalidGrammarError, Result};
use crate::symbol::{parse_symbol_sequence, symbols_to_string, Symbol};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A production rule in a context-free grammar.
///
/// Represents a rule of the form `LHS → RHS` where `LHS` is a single
/// nonterminal and `RHS` is a sequence of symbols (possibly empty, denoting
/// an ε-production). Two productions are equal iff their `lhs` and `rhs`
/// match; `id` does not participate in equality so the same rule keeps its
/// identity regardless of how it was numbered.
#[derive(Debug, Clone)]
pub struct Production {
    /// Stable identity for this production within a single generator run.
    pub id: usize,
    /// Left-hand side (always a nonterminal).
    pub lhs: Symbol,
    /// Right-hand side (sequence of symbols).
    pub rhs: Vec<Symbol>,
}

impl Production {
    /// Creates a new production with the given id.
    pub fn new(id: usize, lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        Self { id, lhs, rhs }
    }
}

impl PartialEq for Production {
    fn eq(&self, other: &Self) -> bool {
        self.lhs == other.lhs && self.rhs == other.rhs
    }
}
impl Eq for Production {}

impl std::hash::Hash for Production {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.lhs.hash(state);
        self.rhs.hash(state);
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.lhs, symbols_to_string(&self.rhs))
    }
}

/// A context-free grammar, always in augmented form.
///
/// Constructing a `Grammar` prepends a synthetic production `S' → S` (where
/// `S'` is a fresh symbol guaranteed not to collide with any existing
/// symbol) and renumbers the remaining productions contiguously from 1. The
/// grammar is immutable from that point on.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// All productions, augmentation included, `id`-ordered starting at 0.
    productions: Vec<Production>,
    /// All nonterminal symbols (derived: every LHS symbol).
    nonterminals: HashSet<Symbol>,
    /// All terminal symbols (derived: RHS symbols that are never an LHS).
    terminals: HashSet<Symbol>,
    /// The original (pre-augmentation) start symbol.
    start_symbol: Symbol,
    /// The synthesized augmented start symbol `S'`.
    augmented_start: Symbol,
    /// Map from nonterminals to their productions, augmentation included.
    production_map: HashMap<Symbol, Vec<Production>>,
}

impl Grammar {
    /// Builds an augmented grammar from a flat list of (unaugmented, user
    /// supplied) productions and a start symbol.
    ///
    /// `id`s are assigned here; productions are renumbered from 1 in input
    /// order, with the synthesized augmentation taking `id = 0`.
    pub fn new(
        productions: Vec<(Symbol, Vec<Symbol>)>,
        start_symbol: Symbol,
    ) -> std::result::Result<Self, InvalidGrammarError> {
        if productions.is_empty() {
            return Err(InvalidGrammarError::EmptyGrammar);
        }

        let lhs_set: HashSet<Symbol> = productions.iter().map(|(lhs, _)| lhs.clone()).collect();
        if !lhs_set.contains(&start_symbol) {
            return Err(InvalidGrammarError::UnknownStart(start_symbol.to_string()));
        }

        for (lhs, rhs) in &productions {
            for sym in rhs {
                if sym.is_epsilon() || sym.is_end_marker() {
                    return Err(InvalidGrammarError::ReservedSymbolInRhs {
                        symbol: sym.to_string(),
                        production: format!("{} → {}", lhs, symbols_to_string(rhs)),
                    });
                }
            }
        }

        let augmented_start = Self::fresh_augmented_symbol(&start_symbol, &lhs_set);

        let mut numbered = Vec::with_capacity(productions.len() + 1);
        numbered.push(Production::new(
            0,
            augmented_start.clone(),
            vec![start_symbol.clone()],
        ));
        for (i, (lhs, rhs)) in productions.into_iter().enumerate() {
            numbered.push(Production::new(i + 1, lhs, rhs));
        }

        let rhs_symbols: HashSet<Symbol> = numbered
            .iter()
            .flat_map(|p| p.rhs.iter().cloned())
            .collect();
        let all_lhs: HashSet<Symbol> = numbered.iter().map(|p| p.lhs.clone()).collect();

        let nonterminals: HashSet<Symbol> = all_lhs.clone();
        let terminals: HashSet<Symbol> = rhs_symbols.difference(&all_lhs).cloned().collect();

        let mut production_map: HashMap<Symbol, Vec<Production>> = HashMap::new();
        for prod in &numbered {
            production_map
                .entry(prod.lhs.clone())
                .or_default()
                .push(prod.clone());
        }

        if production_map
            .get(&start_symbol)
            .is_none_or(Vec::is_empty)
        {
            return Err(InvalidGrammarError::StartHasNoProduction(
                start_symbol.to_string(),
            ));
        }

        Ok(Self {
            productions: numbered,
            nonterminals,
            terminals,
            start_symbol,
            augmented_start,
            production_map,
        })
    }

    /// Synthesizes `start ++ "'"`, incrementing primes until the result does
    /// not collide with any symbol already in use as an LHS.
    fn fresh_augmented_symbol(start: &Symbol, lhs_set: &HashSet<Symbol>) -> Symbol {
        let base = start.to_string();
        let mut candidate = format!("{}'", base);
        while lhs_set.contains(&Symbol::new(&candidate)) {
            candidate.push('\'');
        }
        Symbol::new(candidate)
    }

    /// Parses a grammar from textual input lines.
    ///
    /// # Format
    /// - Line 1: the start symbol's name.
    /// - Line 2: the number of production lines that follow (`n`).
    /// - Next `n` lines: `LHS -> RHS1 | RHS2 | ...`, where each `RHS` is a
    ///   sequence of whitespace-separated symbol names, and `ε` denotes the
    ///   empty right-hand side.
    pub fn parse(lines: &[String]) -> Result<Self> {
        if lines.is_empty() {
            return Err(GrammarError::EmptyInput);
        }
        if lines.len() < 2 {
            return Err(GrammarError::InvalidFormat(
                "expected a start symbol line followed by a production count".to_string(),
            ));
        }

        let start_symbol = Symbol::new(lines[0].trim());

        let n = lines[1]
            .trim()
            .parse::<usize>()
            .map_err(|e| GrammarError::InvalidFormat(format!("Invalid number: {}", e)))?;

        if lines.len() < n + 2 {
            return Err(GrammarError::NotEnoughProductions {
                expected: n,
                actual: lines.len() - 2,
            });
        }

        let mut all_productions = Vec::new();
        for line in &lines[2..2 + n] {
            all_productions.extend(Self::parse_production_line(line)?);
        }

        Self::new(all_productions, start_symbol).map_err(GrammarError::from)
    }

    /// Parses a single production line of the form `A -> alt1 | alt2 | ...`.
    fn parse_production_line(line: &str) -> Result<Vec<(Symbol, Vec<Symbol>)>> {
        let parts: Vec<&str> = line.split("->").collect();
        if parts.len() != 2 {
            return Err(GrammarError::InvalidProduction(line.to_string()));
        }

        let lhs_str = parts[0].trim();
        if lhs_str.is_empty() {
            return Err(GrammarError::InvalidProduction(
                "Empty left-hand side".to_string(),
            ));
        }
        let lhs = Symbol::new(lhs_str);

        let rhs_str = parts[1].trim();
        Ok(rhs_str
            .split('|')
            .map(|alt| (lhs.clone(), parse_symbol_sequence(alt)))
            .collect())
    }

    /// Returns all productions for a given nonterminal (augmentation included).
    pub fn productions_for(&self, nt: &Symbol) -> &[Production] {
        self.production_map
            .get(nt)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns all productions in the grammar, augmentation included,
    /// `id`-ordered starting at 0.
    pub fn all_productions(&self) -> &[Production] {
        &self.productions
    }

    /// Looks up a production by its stable id.
    pub fn production_by_id(&self, id: usize) -> Option<&Production> {
        self.productions.get(id)
    }

    /// Returns all nonterminals in the grammar (augmentation included).
    pub fn nonterminals(&self) -> &HashSet<Symbol> {
        &self.nonterminals
    }

    /// Returns all terminals in the grammar. `$` is an implicit terminal for
    /// lookahead purposes but is never a member of this set, since it
    /// appears in no RHS.
    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminals.contains(symbol) || symbol.is_end_marker()
    }

    pub fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        self.nonterminals.contains(symbol)
    }

    /// Returns the original (pre-augmentation) start symbol.
    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    /// Returns the synthesized augmented start symbol `S'`.
    pub fn augmented_start(&self) -> &Symbol {
        &self.augmented_start
    }

    /// Returns the augmentation production `S' → S` (always `id = 0`).
    pub fn augmentation(&self) -> &Production {
        &self.productions[0]
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prod in &self.productions {
            writeln!(f, "{}", prod)?;
        }
        Ok(())
    }
}
