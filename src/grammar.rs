//! Grammar intake: parses `LHS -> s1 s2 … sk` lines into an augmented
//! [`Grammar`].
//!
//! Grounded on the production-reading loop in `main()` of
//! `original_source/parsers/clr.cpp` (and its LR(0)/SLR(1)/LALR(1)
//! siblings, which all share this exact intake shape): read a line, split
//! on the literal `->`, trim both sides, tokenize the right-hand side on
//! whitespace, and classify every symbol encountered by its first
//! character.

use crate::error::{GrammarError, Result};
use crate::index::{ProdIndex, ProdVec, SymbolIndex};
use crate::symbol::{SymbolKind, SymbolTable, AUGMENTED_START, END_MARKER};

#[derive(Debug, Clone)]
pub struct Production {
    pub lhs: SymbolIndex,
    pub rhs: Vec<SymbolIndex>,
}

impl Production {
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

#[derive(Debug)]
pub struct Grammar {
    pub symbols: SymbolTable,
    pub productions: ProdVec<Production>,
    /// The augmented start symbol, `S'`.
    pub augmented_start: SymbolIndex,
    /// The grammar author's own start symbol, `S'`'s sole RHS.
    pub user_start: SymbolIndex,
    pub end_marker: SymbolIndex,
}

impl Grammar {
    /// Builds a grammar from already-read, not-yet-trimmed production
    /// lines (one per user production; `N` itself has already been
    /// consumed by the caller). `line_offset` is the 1-based line number
    /// of `lines[0]`, used only for error reporting.
    pub fn from_lines(lines: &[String], line_offset: usize) -> Result<Self> {
        if lines.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        let mut symbols = SymbolTable::new();
        let mut productions = ProdVec::new();

        for (i, raw) in lines.iter().enumerate() {
            let line_no = line_offset + i;
            let (lhs_part, rhs_part) = raw.split_once("->").ok_or_else(|| GrammarError::MissingArrow {
                line_no,
                text: raw.clone(),
            })?;

            let lhs_name = lhs_part.trim();
            if lhs_name.is_empty() {
                return Err(GrammarError::EmptyLhs {
                    line_no,
                    text: raw.clone(),
                });
            }

            // Unconditionally a non-terminal (spec 4.1/3): only RHS symbols
            // go through the uppercase-first-character classification.
            let lhs = symbols.intern(lhs_name, SymbolKind::NonTerminal);
            let rhs: Vec<SymbolIndex> = rhs_part
                .split_whitespace()
                .map(|tok| symbols.intern_classified(tok))
                .collect();

            productions.push(Production { lhs, rhs });
        }

        let user_start = productions[ProdIndex(0)].lhs;
        let augmented_start = symbols.intern_classified(AUGMENTED_START);
        let end_marker = symbols.intern_classified(END_MARKER);

        // Shift every user production to index >= 1 by inserting the
        // augmented production at index 0.
        let mut augmented = ProdVec::new();
        augmented.push(Production {
            lhs: augmented_start,
            rhs: vec![user_start],
        });
        for p in productions.0 {
            augmented.push(p);
        }

        Ok(Grammar {
            symbols,
            productions: augmented,
            augmented_start,
            user_start,
            end_marker,
        })
    }

    pub fn productions_of(&self, lhs: SymbolIndex) -> impl Iterator<Item = ProdIndex> + '_ {
        self.productions
            .indices()
            .filter(move |&p| self.productions[p].lhs == lhs)
    }

    pub fn production(&self, index: ProdIndex) -> &Production {
        &self.productions[index]
    }

    pub fn symbol_name(&self, index: SymbolIndex) -> &str {
        self.symbols.name(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn augments_and_shifts_indices() {
        let g = Grammar::from_lines(&lines(&["S -> x"]), 2).unwrap();
        assert_eq!(g.productions.len(), 2);
        assert_eq!(g.productions[ProdIndex(0)].lhs, g.augmented_start);
        assert_eq!(g.productions[ProdIndex(0)].rhs, vec![g.user_start]);
        assert_eq!(g.symbol_name(g.user_start), "S");
    }

    #[test]
    fn empty_rhs_is_epsilon() {
        let g = Grammar::from_lines(&lines(&["S -> "]), 1).unwrap();
        assert!(g.productions[ProdIndex(1)].is_empty());
    }

    #[test]
    fn missing_arrow_is_fatal() {
        let err = Grammar::from_lines(&lines(&["S x"]), 5).unwrap_err();
        match err {
            GrammarError::MissingArrow { line_no, .. } => assert_eq!(line_no, 5),
            other => panic!("expected MissingArrow, got {other:?}"),
        }
    }

    #[test]
    fn unknown_lowercase_symbol_is_terminal() {
        let g = Grammar::from_lines(&lines(&["S -> x"]), 1).unwrap();
        let x = g.symbols.index_of("x").unwrap();
        assert!(g.symbols.is_terminal(x));
    }

    #[test]
    fn uppercase_symbol_is_nonterminal() {
        let g = Grammar::from_lines(&lines(&["S -> A b", "A -> a"]), 1).unwrap();
        let a_nt = g.symbols.index_of("A").unwrap();
        assert!(g.symbols.is_nonterminal(a_nt));
    }

    #[test]
    fn lowercase_lhs_is_still_a_nonterminal() {
        // The uppercase-first-character rule applies only to RHS symbols
        // (spec 4.1); the LHS is unconditionally a non-terminal.
        let g = Grammar::from_lines(&lines(&["s -> a"]), 1).unwrap();
        let s = g.symbols.index_of("s").unwrap();
        assert!(g.symbols.is_nonterminal(s));
        assert_eq!(s, g.user_start);
    }
}
