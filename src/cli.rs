//! Process argument parsing and the interactive stdin/stdout pipeline
//! (spec Section 6, SPEC_FULL.md 4.8).
//!
//! Grounded on the `main()` prompt/read loop of
//! `original_source/parsers/clr.cpp` (and its three siblings), unified
//! behind one binary and a `--discipline` flag per the REDESIGN decision
//! recorded in DESIGN.md, with argument parsing itself done the way
//! `other_examples/azazo1-auto_canonical_lr1` sets up its `clap` derive.

use std::io::{BufRead, Write};

use clap::Parser;

use crate::driver;
use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::items::{canonical_collection, Discipline};
use crate::lalr;
use crate::report;
use crate::sets::{first_sets, follow_sets};
use crate::table::build_table;

#[derive(Debug, Parser)]
#[command(name = "lr-forge", about = "LR(0)/SLR(1)/LALR(1)/CLR(1) table generator and driver")]
pub struct Args {
    /// Which table-construction discipline to run.
    #[arg(long, default_value = "lalr1")]
    pub discipline: String,

    /// Print construction progress to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

pub fn resolve_discipline(args: &Args) -> std::result::Result<Discipline, String> {
    args.discipline.parse()
}

fn prompt_line<R: BufRead>(output: &mut impl Write, prompt: &str, input: &mut R) -> Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Runs the full interactive pipeline: prompts for `N`, reads `N`
/// production lines, builds tables under `discipline`, reports states and
/// the table, then prompts for one input line and reports the parse
/// outcome. Returns `Err` only for the fatal grammar-intake category.
pub fn run<R: BufRead, W: Write>(discipline: Discipline, input: &mut R, output: &mut W) -> Result<()> {
    let count_line = prompt_line(output, "Enter number of productions: ", input)?;
    let count: usize = count_line
        .trim()
        .parse()
        .map_err(GrammarError::CountParse)?;

    writeln!(
        output,
        "Note: Please enter productions with spaces between symbols (e.g., S -> A B C)."
    )?;
    writeln!(output, "Enter productions (e.g., S -> A B):")?;

    let mut lines = Vec::with_capacity(count);
    for _ in 0..count {
        let mut raw = String::new();
        let read = input.read_line(&mut raw)?;
        if read == 0 {
            return Err(GrammarError::ProductionCountMismatch {
                expected: count,
                found: lines.len(),
            });
        }
        lines.push(raw.trim_end_matches(['\n', '\r']).to_string());
    }

    let grammar = Grammar::from_lines(&lines, 2)?;
    log!("intake: {} productions read, discipline={}", grammar.productions.len(), discipline.name());

    let firsts = first_sets(&grammar);
    let follows = matches!(discipline, Discipline::Slr1).then(|| follow_sets(&grammar, &firsts));

    let item_discipline = if discipline.uses_lookahead() {
        Discipline::Clr1
    } else {
        Discipline::Lr0
    };
    let mut collection = canonical_collection(&grammar, &firsts, item_discipline);
    log!("canonical collection: {} states before merge", collection.states.len());

    if discipline == Discipline::Lalr1 {
        collection = lalr::merge(&collection);
        log!("lalr merge: {} states after merge", collection.states.len());
    }

    let table = build_table(&grammar, &collection, discipline, follows.as_ref());

    writeln!(output, "{}", report::format_states(&grammar, &collection))?;
    writeln!(output, "{}", report::format_table(&grammar, &collection, &table))?;
    writeln!(output, "{}", report::format_conflicts(&grammar, &table))?;

    let input_line = prompt_line(output, "\nEnter input string (tokens separated by space): ", input)?;
    let tokens = driver::tokenize(&input_line);
    let outcome = driver::run(&grammar, &table, &tokens);
    writeln!(output, "{}", report::format_outcome(&outcome))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn full_pipeline_accepts_arithmetic_input() {
        let script = "6\n\
E -> E + T\n\
E -> T\n\
T -> T * F\n\
T -> F\n\
F -> ( E )\n\
F -> id\n\
id + id * id\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut output = Vec::new();
        run(Discipline::Slr1, &mut input, &mut output).unwrap();
        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("Accepted!"));
    }

    #[test]
    fn rejects_missing_arrow_as_fatal() {
        let script = "1\nS x\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut output = Vec::new();
        let err = run(Discipline::Lalr1, &mut input, &mut output).unwrap_err();
        assert!(matches!(err, GrammarError::MissingArrow { .. }));
    }

    #[test]
    fn eof_before_count_lines_is_production_count_mismatch() {
        let script = "3\nS -> a\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut output = Vec::new();
        let err = run(Discipline::Lalr1, &mut input, &mut output).unwrap_err();
        match err {
            GrammarError::ProductionCountMismatch { expected, found } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 1);
            }
            other => panic!("expected ProductionCountMismatch, got {other:?}"),
        }
    }
}
