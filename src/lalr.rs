//! LALR(1) merger (spec Section 4.4): partitions the LR(1) canonical
//! collection by LR(0) core and unions lookaheads within each partition.
//!
//! Grounded on `lalr.cpp`'s core-merge pass (`original_source/parsers/
//! lalr.cpp`, lines ~230-390): group states sharing a core, union the
//! per-item lookahead sets, then remap every transition through the
//! resulting partition index.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use crate::index::{ProdIndex, StateIndex, StateVec};
use crate::items::{Collection, Item, State};
use crate::symbol::SymbolIndex;

type Core = BTreeSet<(ProdIndex, usize)>;

fn core_of(state: &State) -> Core {
    state.items.iter().map(|it| (it.prod, it.dot)).collect()
}

/// Merges LR(1) states sharing an LR(0) core into one LALR(1) state each,
/// remapping transitions accordingly. The input `collection` is assumed
/// to have been built with `Discipline::Clr1` (lookahead-carrying items).
pub fn merge(collection: &Collection) -> Collection {
    let mut partitions: IndexMap<Core, Vec<StateIndex>> = IndexMap::new();
    for idx in collection.states.indices() {
        let core = core_of(&collection.states[idx]);
        partitions.entry(core).or_default().push(idx);
    }

    let mut remap: IndexMap<StateIndex, StateIndex> = IndexMap::new();
    let mut merged_states: StateVec<State> = StateVec::new();

    for (lalr_idx, members) in partitions.values().enumerate() {
        let lalr_idx = StateIndex(lalr_idx);
        for &member in members {
            remap.insert(member, lalr_idx);
        }

        let mut by_core: IndexMap<(ProdIndex, usize), IndexSet<SymbolIndex>> = IndexMap::new();
        for &member in members {
            for item in &collection.states[member].items {
                let lookaheads = by_core.entry((item.prod, item.dot)).or_default();
                if let Some(la) = item.lookahead {
                    lookaheads.insert(la);
                }
            }
        }

        let mut items = IndexSet::new();
        for ((prod, dot), lookaheads) in by_core {
            for la in lookaheads {
                items.insert(Item {
                    prod,
                    dot,
                    lookahead: Some(la),
                });
            }
        }

        merged_states.push(State { items });
    }

    let mut transitions = IndexMap::new();
    for (&(from, sym), &to) in &collection.transitions {
        let new_from = remap[&from];
        let new_to = remap[&to];
        transitions.insert((new_from, sym), new_to);
    }

    Collection {
        states: merged_states,
        transitions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::items::{canonical_collection, Discipline};
    use crate::sets::first_sets;

    fn lines(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn merge_collapses_by_core() {
        // Classic LALR reduce/reduce-introducing grammar.
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
        let clr = canonical_collection(&g, &firsts, Discipline::Clr1);
        let lalr = merge(&clr);

        // The LALR state count must equal the number of distinct LR(0)
        // cores in the LR(1) collection (spec Section 8 invariant).
        let distinct_cores: std::collections::HashSet<Core> =
            clr.states.iter().map(core_of).collect();
        assert_eq!(lalr.states.len(), distinct_cores.len());
        assert!(lalr.states.len() < clr.states.len());
    }
}
