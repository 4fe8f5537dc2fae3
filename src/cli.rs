//! Diagnostics front end (component C9) over the [`crate::lr1::LR1Parser`]
//! orchestrator.
//!
//! `clap` subcommands: `dump` reports on a grammar (productions, FIRST/
//! FOLLOW, canonical states, ACTION/GOTO tables, conflicts) and `parse`
//! drives input strings through the built canonical LR(1) parser.

use crate::error::Result;
use crate::first_follow::{compute_first_sets, compute_follow_sets};
use crate::grammar::Grammar;
use crate::lr1::LR1Parser;
use crate::symbol::{symbols_to_string, Symbol};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lr1gen", about = "Canonical LR(1) parser generator and driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the canonical LR(1) tables for a grammar and report on them.
    Dump {
        /// Path to a grammar file (see the format documented on `Grammar::parse`).
        grammar: PathBuf,

        /// Print FIRST sets.
        #[arg(long)]
        first: bool,
        /// Print FOLLOW sets.
        #[arg(long)]
        follow: bool,
        /// Print the canonical collection of item sets.
        #[arg(long)]
        states: bool,
        /// Print the ACTION and GOTO tables.
        #[arg(long)]
        tables: bool,
        /// Print recorded shift/reduce and reduce/reduce conflicts.
        #[arg(long)]
        conflicts: bool,
    },

    /// Drive tokenized input lines (read from stdin, blank line terminates)
    /// through the built LR(1) parser and report accept/reject per line.
    Parse {
        /// Path to a grammar file.
        grammar: PathBuf,
    },
}

/// Entry point invoked from `main`.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Dump {
            grammar,
            first,
            follow,
            states,
            tables,
            conflicts,
        } => dump(&grammar, first, follow, states, tables, conflicts),
        Command::Parse { grammar } => drive_parse(&grammar),
    }
}

fn load_grammar(path: &PathBuf) -> Result<Grammar> {
    let contents = fs::read_to_string(path)?;
    let lines: Vec<String> = contents.lines().map(str::to_string).collect();
    Grammar::parse(&lines)
}

fn dump(
    path: &PathBuf,
    first: bool,
    follow: bool,
    states: bool,
    tables: bool,
    conflicts: bool,
) -> Result<()> {
    let grammar = load_grammar(path)?;
    // With no flags set, dump everything.
    let all = !(first || follow || states || tables || conflicts);

    println!("Grammar (augmented start: {}):", grammar.augmented_start());
    print!("{}", grammar);

    let first_sets = compute_first_sets(&grammar);
    if all || first {
        println!("\nFIRST sets:");
        print_sets(&first_sets, &grammar);
    }

    if all || follow {
        let follow_sets = compute_follow_sets(&grammar, &first_sets);
        println!("\nFOLLOW sets:");
        print_sets(&follow_sets, &grammar);
    }

    let parser = LR1Parser::from_grammar(grammar);

    if all || states {
        println!("\nCanonical LR(1) states: {}", parser.states().len());
        for (id, state) in parser.states().iter().enumerate() {
            println!("state {id}: {} item(s)", state.len());
        }
    }

    if all || tables {
        println!("\nACTION table entries: {}", parser.action_table().len());
        println!("GOTO table entries: {}", parser.goto_table().len());
    }

    if all || conflicts {
        if parser.is_conflict_free() {
            println!("\nNo conflicts: grammar is LR(1).");
        } else {
            println!("\nConflicts ({}):", parser.conflicts().len());
            for c in parser.conflicts() {
                println!(
                    "  state {} on '{}': kept {}, discarded {} ({:?})",
                    c.state, c.symbol, c.kept, c.discarded, c.kind
                );
            }
        }
    }

    Ok(())
}

fn print_sets(sets: &std::collections::HashMap<Symbol, std::collections::HashSet<Symbol>>, grammar: &Grammar) {
    let mut nonterminals: Vec<&Symbol> = grammar.nonterminals().iter().collect();
    nonterminals.sort();
    for nt in nonterminals {
        let mut members: Vec<Symbol> = sets.get(nt).cloned().unwrap_or_default().into_iter().collect();
        members.sort();
        println!("  {} = {{ {} }}", nt, symbols_to_string(&members));
    }
}

fn drive_parse(path: &PathBuf) -> Result<()> {
    let grammar = load_grammar(path)?;
    let parser = LR1Parser::from_grammar(grammar);

    if !parser.is_conflict_free() {
        log::warn!(
            "grammar has {} unresolved conflict(s); proceeding with the resolved table",
            parser.conflicts().len()
        );
    }

    for_each_input_line(|line| {
        let tokens = crate::symbol::parse_symbol_sequence(line);
        match parser.parse(&tokens) {
            Ok((tree, derivation)) => {
                println!(
                    "accept: root={}, {} reduction(s)",
                    tree.symbol(),
                    derivation.len()
                );
            }
            Err(e) => println!("reject: {e}"),
        }
    })
}

/// Reads lines from stdin until EOF or a blank line, invoking `f` on each
/// trimmed, non-empty line.
fn for_each_input_line<F: FnMut(&str)>(mut f: F) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        f(trimmed);
    }
    Ok(())
}
