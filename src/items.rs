//! LR items, states, closure, GOTO, and canonical-collection construction
//! (spec Section 4.3).
//!
//! Grounded on `closure`/`goto` in
//! `andrewbaxter-fork_rustemo/src/table.rs` (worklist-driven closure, dot
//! advance via symbol match) and on the canonical-collection discovery
//! loop in `original_source/parsers/clr.cpp`'s `computeStates` (linear scan
//! for an existing state with an identical item set, acceptable for the
//! grammar sizes this generator targets, per the reference's own Design
//! Notes on state identity).

use indexmap::{IndexMap, IndexSet};

use crate::grammar::Grammar;
use crate::index::{ProdIndex, StateIndex, StateVec};
use crate::sets::{first_of_sequence, FirstSets};
use crate::symbol::SymbolIndex;

/// Which of the four table-construction disciplines governs item
/// construction and (later) reduce-fill.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Discipline {
    Lr0,
    Slr1,
    Lalr1,
    Clr1,
}

impl Discipline {
    /// LR(1) item construction (lookahead-carrying) is used by CLR(1) and
    /// LALR(1); LR(0) construction by LR(0) and SLR(1), per spec 4.3's
    /// last line.
    pub fn uses_lookahead(self) -> bool {
        matches!(self, Discipline::Lalr1 | Discipline::Clr1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Discipline::Lr0 => "lr0",
            Discipline::Slr1 => "slr1",
            Discipline::Lalr1 => "lalr1",
            Discipline::Clr1 => "clr1",
        }
    }
}

impl std::str::FromStr for Discipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lr0" => Ok(Discipline::Lr0),
            "slr1" => Ok(Discipline::Slr1),
            "lalr1" => Ok(Discipline::Lalr1),
            "clr1" => Ok(Discipline::Clr1),
            other => Err(format!("unknown discipline: {other}")),
        }
    }
}

/// `(lhs, rhs, dot[, lookahead])`. `lookahead` is `None` under LR(0)
/// construction and always `Some` under LR(1) construction; which is in
/// play for a given [`Item`] is determined by the [`Discipline`] that
/// built its owning state, not stored per-item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub prod: ProdIndex,
    pub dot: usize,
    pub lookahead: Option<SymbolIndex>,
}

impl Item {
    pub fn start(prod: ProdIndex, lookahead: Option<SymbolIndex>) -> Self {
        Item {
            prod,
            dot: 0,
            lookahead,
        }
    }

    pub fn dot_symbol(&self, grammar: &Grammar) -> Option<SymbolIndex> {
        grammar.production(self.prod).rhs.get(self.dot).copied()
    }

    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        self.dot >= grammar.production(self.prod).rhs.len()
    }

    pub fn advanced(&self) -> Self {
        Item {
            prod: self.prod,
            dot: self.dot + 1,
            lookahead: self.lookahead,
        }
    }

    pub fn rest(&self, grammar: &Grammar) -> Vec<SymbolIndex> {
        grammar.production(self.prod).rhs[self.dot + 1..].to_vec()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub items: IndexSet<Item>,
}

/// Expands `items` under the closure operation of spec 4.3, for either
/// discipline. Under LR(0) (`discipline.uses_lookahead() == false`) a new
/// item is added per production of every non-terminal immediately after a
/// dot; under LR(1), each new item additionally carries every lookahead in
/// FIRST(β a), where β is the rest of the expanding item and `a` its own
/// lookahead.
pub fn closure(
    mut items: IndexSet<Item>,
    grammar: &Grammar,
    firsts: &FirstSets,
    discipline: Discipline,
) -> IndexSet<Item> {
    let mut worklist: Vec<Item> = items.iter().cloned().collect();

    while let Some(item) = worklist.pop() {
        let Some(b) = item.dot_symbol(grammar) else {
            continue;
        };
        if !grammar.symbols.is_nonterminal(b) {
            continue;
        }

        let lookaheads: Vec<Option<SymbolIndex>> = if discipline.uses_lookahead() {
            let beta = item.rest(grammar);
            let a = item.lookahead.expect("LR(1) item missing lookahead");
            first_of_sequence(firsts, &beta, a)
                .into_iter()
                .map(Some)
                .collect()
        } else {
            vec![None]
        };

        for prod in grammar.productions_of(b) {
            for &la in &lookaheads {
                let new_item = Item::start(prod, la);
                if items.insert(new_item.clone()) {
                    worklist.push(new_item);
                }
            }
        }
    }

    items
}

/// `GOTO(I, X)`: advance every item in `I` whose dot sits before `X`, then
/// take the closure. Returns `None` if no item in `I` advances on `X`.
pub fn goto(
    state: &State,
    symbol: SymbolIndex,
    grammar: &Grammar,
    firsts: &FirstSets,
    discipline: Discipline,
) -> Option<IndexSet<Item>> {
    let mut advanced = IndexSet::new();
    for item in &state.items {
        if item.dot_symbol(grammar) == Some(symbol) {
            advanced.insert(item.advanced());
        }
    }

    if advanced.is_empty() {
        None
    } else {
        Some(closure(advanced, grammar, firsts, discipline))
    }
}

/// Every symbol that appears immediately after a dot in some item of
/// `state`, in first-seen order (so transition discovery is deterministic
/// across runs).
fn symbols_after_dot(state: &State, grammar: &Grammar) -> Vec<SymbolIndex> {
    let mut seen = IndexSet::new();
    for item in &state.items {
        if let Some(sym) = item.dot_symbol(grammar) {
            seen.insert(sym);
        }
    }
    seen.into_iter().collect()
}

pub struct Collection {
    pub states: StateVec<State>,
    pub transitions: IndexMap<(StateIndex, SymbolIndex), StateIndex>,
}

/// Builds the canonical collection of item sets (spec 4.3). State identity
/// is set-equality over items, exactly as specified; a newly computed
/// GOTO set is matched against existing states by a linear scan (see this
/// module's doc comment).
pub fn canonical_collection(
    grammar: &Grammar,
    firsts: &FirstSets,
    discipline: Discipline,
) -> Collection {
    let start_lookahead = discipline.uses_lookahead().then_some(grammar.end_marker);
    let start_item = Item::start(ProdIndex(0), start_lookahead);
    let mut start_items = IndexSet::new();
    start_items.insert(start_item);
    let start_state = State {
        items: closure(start_items, grammar, firsts, discipline),
    };

    let mut states: StateVec<State> = StateVec::new();
    states.push(start_state);
    let mut transitions = IndexMap::new();

    let mut worklist = vec![StateIndex(0)];
    while let Some(idx) = worklist.pop() {
        let symbols = symbols_after_dot(&states[idx], grammar);
        for sym in symbols {
            let Some(target_items) = goto(&states[idx], sym, grammar, firsts, discipline) else {
                continue;
            };
            let target = State {
                items: target_items,
            };

            let existing = states.indices().find(|&i| states[i] == target);
            let target_idx = match existing {
                Some(i) => i,
                None => {
                    let i = states.push(target);
                    worklist.push(i);
                    i
                }
            };

            transitions.insert((idx, sym), target_idx);
        }
    }

    Collection {
        states,
        transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sets::first_sets;
    use pretty_assertions::assert_eq;

    fn lines(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn start_state_is_closed() {
        let g = crate::grammar::Grammar::from_lines(&lines(&["S -> a"]), 1).unwrap();
        let firsts = first_sets(&g);
        let collection = canonical_collection(&g, &firsts, Discipline::Lr0);
        let state0 = &collection.states[StateIndex(0)];
        let closed = closure(state0.items.clone(), &g, &firsts, Discipline::Lr0);
        assert_eq!(closed, state0.items);
    }

    #[test]
    fn lr1_closure_carries_lookahead() {
        let g = crate::grammar::Grammar::from_lines(&lines(&["S -> A", "A -> a"]), 1).unwrap();
        let firsts = first_sets(&g);
        let collection = canonical_collection(&g, &firsts, Discipline::Clr1);
        let state0 = &collection.states[StateIndex(0)];
        assert!(state0
            .items
            .iter()
            .any(|it| it.lookahead == Some(g.end_marker)));
    }
}
