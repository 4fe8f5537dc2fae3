//! Canonical LR(1) parser generator and driver.
//!
//! Reads a context-free grammar, builds its canonical LR(1) automaton and
//! ACTION/GOTO tables, and either reports on the grammar (dump mode) or
//! drives input strings through the resulting parser.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

mod cli;
mod error;
mod first_follow;
mod grammar;
mod lr1;
mod symbol;

use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
