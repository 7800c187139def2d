//! ACTION/GOTO table construction and conflict detection (spec Section
//! 4.5).
//!
//! Grounded on the table-fill loop of `original_source/parsers/clr.cpp`
//! (`buildParsingTable`), generalized over [`Discipline`] for the
//! reduce-fill difference resolved in SPEC_FULL.md's Open Question
//! section: LR(0) fills every terminal, SLR(1) fills FOLLOW(lhs), and
//! CLR(1)/LALR(1) fill only the item's own carried lookahead.

use indexmap::IndexMap;

use crate::grammar::Grammar;
use crate::index::{ProdIndex, StateIndex};
use crate::items::{Collection, Discipline, Item};
use crate::sets::FollowSets;
use crate::symbol::SymbolIndex;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(StateIndex),
    Reduce(ProdIndex),
    Accept,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Shift(s) => write!(f, "s{}", s.0),
            Action::Reduce(p) => write!(f, "r{}", p.0),
            Action::Accept => write!(f, "acc"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conflict {
    pub state: StateIndex,
    pub symbol: SymbolIndex,
    pub existing: Action,
    pub new: Action,
}

#[derive(Debug, Default)]
pub struct Table {
    pub action: IndexMap<(StateIndex, SymbolIndex), Action>,
    pub goto: IndexMap<(StateIndex, SymbolIndex), StateIndex>,
    pub conflicts: Vec<Conflict>,
}

impl Table {
    fn set_action(&mut self, state: StateIndex, symbol: SymbolIndex, new: Action) {
        match self.action.get(&(state, symbol)) {
            None => {
                self.action.insert((state, symbol), new);
            }
            Some(&existing) => {
                if existing != new {
                    // First writer wins; the conflicting write is recorded
                    // but never overwrites the existing cell.
                    self.conflicts.push(Conflict {
                        state,
                        symbol,
                        existing,
                        new,
                    });
                }
            }
        }
    }

    pub fn is_conflict_free(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Orders the items of a state so that conflict "existing vs new"
/// reporting is reproducible across runs, per the Design Note on conflict
/// reporting determinism.
fn sorted_items(state: &crate::items::State) -> Vec<&Item> {
    let mut items: Vec<&Item> = state.items.iter().collect();
    items.sort_by_key(|it| (it.prod.0, it.dot, it.lookahead.map(|s| s.0)));
    items
}

/// Builds the ACTION/GOTO table for `collection` under `discipline`.
/// `follows` is required (and used) only for `Discipline::Slr1`.
pub fn build_table(
    grammar: &Grammar,
    collection: &Collection,
    discipline: Discipline,
    follows: Option<&FollowSets>,
) -> Table {
    let mut table = Table::default();

    for state_idx in collection.states.indices() {
        let state = &collection.states[state_idx];

        for item in sorted_items(state) {
            match item.dot_symbol(grammar) {
                Some(sym) if grammar.symbols.is_terminal(sym) => {
                    if let Some(&target) = collection.transitions.get(&(state_idx, sym)) {
                        table.set_action(state_idx, sym, Action::Shift(target));
                    }
                }
                Some(_) => {}
                None => {
                    if item.prod == ProdIndex(0) {
                        let accepts = match item.lookahead {
                            Some(la) => la == grammar.end_marker,
                            None => true,
                        };
                        if accepts {
                            table.set_action(state_idx, grammar.end_marker, Action::Accept);
                        }
                    } else {
                        fill_reduce(grammar, &mut table, state_idx, item, discipline, follows);
                    }
                }
            }
        }

        for sym in grammar.symbols.nonterminals() {
            if let Some(&target) = collection.transitions.get(&(state_idx, sym)) {
                table.goto.insert((state_idx, sym), target);
            }
        }
    }

    table
}

fn fill_reduce(
    grammar: &Grammar,
    table: &mut Table,
    state_idx: StateIndex,
    item: &Item,
    discipline: Discipline,
    follows: Option<&FollowSets>,
) {
    let action = Action::Reduce(item.prod);
    let lhs = grammar.production(item.prod).lhs;

    match discipline {
        Discipline::Lr0 => {
            for t in grammar.symbols.terminals() {
                table.set_action(state_idx, t, action);
            }
        }
        Discipline::Slr1 => {
            let follow = follows.expect("SLR(1) reduce-fill requires FOLLOW sets");
            for &t in follow.of(lhs) {
                table.set_action(state_idx, t, action);
            }
        }
        Discipline::Lalr1 | Discipline::Clr1 => {
            let la = item.lookahead.expect("LR(1) item missing lookahead");
            table.set_action(state_idx, la, action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::canonical_collection;
    use crate::sets::{first_sets, follow_sets};

    fn lines(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn arithmetic_grammar_slr1_conflict_free() {
        let g = Grammar::from_lines(
            &lines(&[
                "E -> E + T",
                "E -> T",
                "T -> T * F",
                "T -> F",
                "F -> ( E )",
                "F -> id",
            ]),
            1,
        )
        .unwrap();
        let firsts = first_sets(&g);
        let follows = follow_sets(&g, &firsts);
        let collection = canonical_collection(&g, &firsts, Discipline::Lr0);
        let table = build_table(&g, &collection, Discipline::Slr1, Some(&follows));
        assert!(table.is_conflict_free());
    }

    #[test]
    fn arithmetic_grammar_lr0_has_conflicts() {
        let g = Grammar::from_lines(
            &lines(&[
                "E -> E + T",
                "E -> T",
                "T -> T * F",
                "T -> F",
                "F -> ( E )",
                "F -> id",
            ]),
            1,
        )
        .unwrap();
        let firsts = first_sets(&g);
        let collection = canonical_collection(&g, &firsts, Discipline::Lr0);
        let table = build_table(&g, &collection, Discipline::Lr0, None);
        assert!(!table.is_conflict_free());
    }

    #[test]
    fn dangling_else_has_exactly_one_conflict() {
        let g = Grammar::from_lines(&lines(&["S -> i S e S", "S -> i S", "S -> a"]), 1).unwrap();
        let firsts = first_sets(&g);
        let follows = follow_sets(&g, &firsts);
        let collection = canonical_collection(&g, &firsts, Discipline::Lr0);
        let table = build_table(&g, &collection, Discipline::Slr1, Some(&follows));
        assert_eq!(table.conflicts.len(), 1);
        let e = g.symbols.index_of("e").unwrap();
        assert_eq!(table.conflicts[0].symbol, e);
    }

    #[test]
    fn lalr_merge_introduces_reduce_reduce() {
        use crate::lalr::merge;

        let g = Grammar::from_lines(
            &lines(&[
                "S -> a A d",
                "S -> b B d",
                "S -> a B e",
                "S -> b A e",
                "A -> c",
                "B -> c",
            ]),
            1,
        )
        .unwrap();
        let firsts = first_sets(&g);

        let clr_collection = canonical_collection(&g, &firsts, Discipline::Clr1);
        let clr_table = build_table(&g, &clr_collection, Discipline::Clr1, None);
        assert!(clr_table.is_conflict_free());

        let lalr_collection = merge(&clr_collection);
        let lalr_table = build_table(&g, &lalr_collection, Discipline::Lalr1, None);
        assert!(!lalr_table.is_conflict_free());
        let c = g.symbols.index_of("c").unwrap();
        assert!(lalr_table.conflicts.iter().any(|conf| conf.symbol == c));
    }
}
