//! Pushdown-automaton parse driver (spec Section 4.6).
//!
//! Grounded on the shift/reduce loop in `original_source/parsers/clr.cpp`'s
//! `parseInput`, and on the `Action`/driver split already present in
//! `andrewbaxter-fork_rustemo/src/parser.rs` (actions drive a stack
//! machine; the driver never mutates the tables it reads).

use crate::grammar::Grammar;
use crate::index::StateIndex;
use crate::symbol::END_MARKER;
use crate::table::{Action, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Accepted,
    /// Rejected with no further action/goto available. `at` is the
    /// 0-based index into the tokenized input (including the trailing
    /// `$`) at which rejection occurred.
    Rejected { at: usize, token: String },
}

impl ParseOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, ParseOutcome::Accepted)
    }
}

/// Splits `input` on whitespace and appends the end marker, per spec 4.6.
/// Tokens that never appeared anywhere in the grammar have no ACTION
/// entry and simply drive the parse to rejection, matching the
/// reference's trivial tokenizer (specified only by interface).
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens: Vec<String> = input.split_whitespace().map(|s| s.to_string()).collect();
    tokens.push(END_MARKER.to_string());
    tokens
}

/// Runs the standard LR pushdown automaton against `tokens` (already
/// tokenized, `$`-terminated). Never mutates `table`.
pub fn run(grammar: &Grammar, table: &Table, tokens: &[String]) -> ParseOutcome {
    let mut stack: Vec<StateIndex> = vec![StateIndex(0)];
    let mut ip = 0usize;

    loop {
        let s = *stack.last().expect("parse stack never empties before accept/reject");
        let tok = &tokens[ip];

        let Some(a) = grammar.symbols.index_of(tok) else {
            return ParseOutcome::Rejected {
                at: ip,
                token: tok.clone(),
            };
        };

        match table.action.get(&(s, a)) {
            None => {
                return ParseOutcome::Rejected {
                    at: ip,
                    token: tok.clone(),
                };
            }
            Some(Action::Shift(t)) => {
                stack.push(*t);
                ip += 1;
            }
            Some(Action::Reduce(p)) => {
                let prod = grammar.production(*p);
                let pop_len = prod.rhs.len();
                stack.truncate(stack.len() - pop_len);
                let s_prime = *stack.last().expect("parse stack never empties before accept/reject");
                match table.goto.get(&(s_prime, prod.lhs)) {
                    Some(&next) => stack.push(next),
                    None => {
                        return ParseOutcome::Rejected {
                            at: ip,
                            token: tok.clone(),
                        };
                    }
                }
            }
            Some(Action::Accept) => return ParseOutcome::Accepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{canonical_collection, Discipline};
    use crate::sets::{first_sets, follow_sets};
    use crate::table::build_table;

    fn build(lines: &[&str]) -> (Grammar, Table) {
        let g = Grammar::from_lines(
            &lines.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            1,
        )
        .unwrap();
        let firsts = first_sets(&g);
        let follows = follow_sets(&g, &firsts);
        let collection = canonical_collection(&g, &firsts, Discipline::Lr0);
        let table = build_table(&g, &collection, Discipline::Slr1, Some(&follows));
        (g, table)
    }

    #[test]
    fn arithmetic_accepts_and_rejects() {
        let (g, table) = build(&[
            "E -> E + T",
            "E -> T",
            "T -> T * F",
            "T -> F",
            "F -> ( E )",
            "F -> id",
        ]);

        let ok = run(&g, &table, &tokenize("id + id * id"));
        assert_eq!(ok, ParseOutcome::Accepted);

        let bad = run(&g, &table, &tokenize("id +"));
        assert!(!bad.accepted());
    }

    #[test]
    fn empty_input_on_epsilon_start_accepts() {
        let (g, table) = build(&["S -> "]);
        let ok = run(&g, &table, &tokenize(""));
        assert_eq!(ok, ParseOutcome::Accepted);
    }

    #[test]
    fn unknown_symbol_as_terminal_accepts() {
        let (g, table) = build(&["S -> x"]);
        let ok = run(&g, &table, &tokenize("x"));
        assert_eq!(ok, ParseOutcome::Accepted);
    }
}
