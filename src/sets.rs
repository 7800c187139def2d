//! FIRST and FOLLOW set computation (spec Section 4.2).
//!
//! Grounded on `first_sets`/`firsts`/`follow_sets` in
//! `andrewbaxter-fork_rustemo/src/table.rs`, adapted to carry nullability as
//! an explicit flag instead of an interned empty-string symbol, and to key
//! sets by [`SymbolIndex`] via [`SymbolVec`] rather than a `HashMap`.

use indexmap::IndexSet;

use crate::grammar::Grammar;
use crate::index::{SymbolIndex, SymbolVec};

#[derive(Debug, Clone, Default)]
pub struct FirstSet {
    pub terminals: IndexSet<SymbolIndex>,
    pub nullable: bool,
}

#[derive(Debug)]
pub struct FirstSets(SymbolVec<FirstSet>);

impl FirstSets {
    pub fn of(&self, symbol: SymbolIndex) -> &FirstSet {
        &self.0[symbol]
    }
}

/// Computes FIRST(X) for every symbol X by fixpoint iteration, per spec
/// 4.2. Terminals seed to `{X}`; non-terminals accumulate from their
/// productions' right-hand sides until a full pass adds nothing.
pub fn first_sets(grammar: &Grammar) -> FirstSets {
    let mut sets: SymbolVec<FirstSet> = SymbolVec::new();
    for sym in grammar.symbols.indices() {
        let mut set = FirstSet::default();
        if grammar.symbols.is_terminal(sym) {
            set.terminals.insert(sym);
        }
        sets.push(set);
    }

    loop {
        let mut changed = false;

        for prod in grammar.productions.indices() {
            let p = grammar.production(prod);
            if !grammar.symbols.is_nonterminal(p.lhs) {
                continue;
            }

            if p.is_empty() {
                if !sets[p.lhs].nullable {
                    sets[p.lhs].nullable = true;
                    changed = true;
                }
                continue;
            }

            let mut all_nullable = true;
            for &sym in &p.rhs {
                let before = sets[p.lhs].terminals.len();
                let sym_terms: Vec<SymbolIndex> = sets[sym].terminals.iter().copied().collect();
                sets[p.lhs].terminals.extend(sym_terms);
                if sets[p.lhs].terminals.len() > before {
                    changed = true;
                }

                if !sets[sym].nullable {
                    all_nullable = false;
                    break;
                }
            }

            if all_nullable && !sets[p.lhs].nullable {
                sets[p.lhs].nullable = true;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    FirstSets(sets)
}

/// FIRST of a sequence with a carried lookahead, per spec 4.2: FIRST(β)
/// with ε replaced by `{a}`. Used by LR(1) closure. `a` is always a single
/// terminal (possibly `$`).
pub fn first_of_sequence(
    firsts: &FirstSets,
    seq: &[SymbolIndex],
    lookahead: SymbolIndex,
) -> IndexSet<SymbolIndex> {
    let mut result = IndexSet::new();
    let mut all_nullable = true;

    for &sym in seq {
        let set = firsts.of(sym);
        result.extend(set.terminals.iter().copied());
        if !set.nullable {
            all_nullable = false;
            break;
        }
    }

    if all_nullable {
        result.insert(lookahead);
    }

    result
}

#[derive(Debug)]
pub struct FollowSets(SymbolVec<IndexSet<SymbolIndex>>);

impl FollowSets {
    pub fn of(&self, symbol: SymbolIndex) -> &IndexSet<SymbolIndex> {
        &self.0[symbol]
    }
}

/// Computes FOLLOW(A) for every non-terminal A, per spec 4.2. Used only by
/// SLR(1); CLR(1)/LALR(1) carry their own lookahead through closure
/// instead.
pub fn follow_sets(grammar: &Grammar, firsts: &FirstSets) -> FollowSets {
    let mut sets: SymbolVec<IndexSet<SymbolIndex>> = SymbolVec::new();
    for _ in grammar.symbols.indices() {
        sets.push(IndexSet::new());
    }

    sets[grammar.augmented_start].insert(grammar.end_marker);

    loop {
        let mut changed = false;

        for prod in grammar.productions.indices() {
            let p = grammar.production(prod);
            for (i, &b) in p.rhs.iter().enumerate() {
                if !grammar.symbols.is_nonterminal(b) {
                    continue;
                }

                let beta = &p.rhs[i + 1..];
                let before = sets[b].len();

                if beta.is_empty() {
                    let lhs_follow: Vec<SymbolIndex> = sets[p.lhs].iter().copied().collect();
                    sets[b].extend(lhs_follow);
                } else {
                    let beta_first = first_of_sequence(firsts, beta, grammar.end_marker);
                    let nullable = beta.iter().all(|&s| firsts.of(s).nullable);
                    for t in &beta_first {
                        if *t != grammar.end_marker || !nullable {
                            sets[b].insert(*t);
                        }
                    }
                    if nullable {
                        let lhs_follow: Vec<SymbolIndex> = sets[p.lhs].iter().copied().collect();
                        sets[b].extend(lhs_follow);
                    }
                }

                if sets[b].len() > before {
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    FollowSets(sets)
}
