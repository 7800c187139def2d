//! Human-readable rendering of item sets and parse tables (spec Section
//! 4's Reporter, output protocol in Section 6).
//!
//! Grounded on `printItemSets`/`printParseTable` in
//! `original_source/parsers/clr.cpp`, with conflict and accept/reject
//! lines highlighted via `colored` the way
//! `rustemo/src/glr/parser.rs` colors its own trace output.

use colored::Colorize;

use crate::grammar::Grammar;
use crate::items::{Collection, Item};
use crate::table::{Action, Table};

/// `LHS -> α0 α1 … (dot) … αk-1` with a trailing lookahead annotation
/// when the item carries one.
pub fn format_item(grammar: &Grammar, item: &Item) -> String {
    let prod = grammar.production(item.prod);
    let mut out = format!("{} ->", grammar.symbol_name(prod.lhs));

    for (i, &sym) in prod.rhs.iter().enumerate() {
        if i == item.dot {
            out.push_str(" .");
        }
        out.push(' ');
        out.push_str(grammar.symbol_name(sym));
    }
    if item.dot == prod.rhs.len() {
        out.push_str(" .");
    }

    if let Some(la) = item.lookahead {
        out.push_str(&format!(", {}", grammar.symbol_name(la)));
    }

    out
}

pub fn format_states(grammar: &Grammar, collection: &Collection) -> String {
    let mut out = String::from("\nItem Sets (States):\n");
    for idx in collection.states.indices() {
        out.push_str(&format!("\nState {}:\n", idx.0));
        let mut items: Vec<&Item> = collection.states[idx].items.iter().collect();
        items.sort_by_key(|it| (it.prod.0, it.dot, it.lookahead.map(|s| s.0)));
        for item in items {
            out.push_str(&format!("[{}]\n", format_item(grammar, item)));
        }
    }
    out
}

fn column_symbols(grammar: &Grammar) -> Vec<crate::symbol::SymbolIndex> {
    let mut cols: Vec<_> = grammar.symbols.terminals().collect();
    cols.extend(grammar.symbols.nonterminals().filter(|&s| s != grammar.augmented_start));
    cols
}

pub fn format_table(grammar: &Grammar, collection: &Collection, table: &Table) -> String {
    let cols = column_symbols(grammar);

    let mut out = String::from("\nParsing Table:\n");
    out.push_str("State\t");
    for &c in &cols {
        out.push_str(grammar.symbol_name(c));
        out.push('\t');
    }
    out.push_str("\n------------------------------------------------------\n");

    for idx in collection.states.indices() {
        out.push_str(&format!("{}\t", idx.0));
        for &c in &cols {
            let entry = if grammar.symbols.is_terminal(c) {
                table
                    .action
                    .get(&(idx, c))
                    .map(|a| a.to_string())
                    .unwrap_or_default()
            } else {
                table
                    .goto
                    .get(&(idx, c))
                    .map(|s| s.0.to_string())
                    .unwrap_or_default()
            };
            out.push_str(&entry);
            out.push('\t');
        }
        out.push('\n');
    }

    out
}

pub fn format_conflicts(grammar: &Grammar, table: &Table) -> String {
    let mut out = String::new();
    for conflict in &table.conflicts {
        let line = format!(
            "Conflict at state {} on symbol '{}': {} vs {}",
            conflict.state.0,
            grammar.symbol_name(conflict.symbol),
            display_action(conflict.existing),
            display_action(conflict.new),
        );
        out.push_str(&line.red().to_string());
        out.push('\n');
    }

    if table.is_conflict_free() {
        out.push_str(&"\nGrammar is conflict-free.\n".green().to_string());
    } else {
        out.push_str(&"\nGrammar has conflicts.\n".red().to_string());
    }

    out
}

fn display_action(action: Action) -> String {
    action.to_string()
}

pub fn format_outcome(outcome: &crate::driver::ParseOutcome) -> String {
    match outcome {
        crate::driver::ParseOutcome::Accepted => "Accepted!".green().to_string(),
        crate::driver::ParseOutcome::Rejected { .. } => "Rejected!".red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::items::{canonical_collection, Discipline};
    use crate::sets::first_sets;
    use crate::table::build_table;

    #[test]
    fn formats_items_with_dot_and_lookahead() {
        let g = Grammar::from_lines(&vec!["S -> a".to_string()], 1).unwrap();
        let firsts = first_sets(&g);
        let collection = canonical_collection(&g, &firsts, Discipline::Clr1);
        let rendered = format_states(&g, &collection);
        assert!(rendered.contains("State 0:"));
        assert!(rendered.contains(", $"));
    }

    #[test]
    fn table_has_a_column_per_terminal_and_nonterminal() {
        let g = Grammar::from_lines(&vec!["S -> a".to_string()], 1).unwrap();
        let firsts = first_sets(&g);
        let collection = canonical_collection(&g, &firsts, Discipline::Lr0);
        let table = build_table(&g, &collection, Discipline::Lr0, None);
        let rendered = format_table(&g, &collection, &table);
        assert!(rendered.contains("State\t"));
    }
}
