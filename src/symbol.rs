//! Grammar symbols: interning, and the terminal/non-terminal classification
//! rule from spec Section 3 ("Symbol").
//!
//! Grounded on the symbol-classification loop in
//! `original_source/parsers/clr.cpp`'s `main()` (uppercase-first-character
//! rule) and on `table.rs`'s `SymbolIndex`/`SymbolVec` split of terminals
//! and non-terminals into one contiguous index space.

use indexmap::IndexMap;

use crate::index::SymbolVec;
pub use crate::index::SymbolIndex;

/// The reserved end-of-input terminal.
pub const END_MARKER: &str = "$";

/// The reserved augmented start non-terminal. Must not appear in user input.
pub const AUGMENTED_START: &str = "S'";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    pub fn is_nonterminal(&self) -> bool {
        self.kind == SymbolKind::NonTerminal
    }

    /// Classifies a symbol name by the uppercase-first-character rule: a
    /// name beginning with an uppercase ASCII letter is a non-terminal,
    /// everything else (lowercase letters, digits, punctuation, `$`) is a
    /// terminal.
    ///
    /// Known limitation (spec Design Notes, Open Question): a multi-word or
    /// symbolic terminal that happens to begin with an uppercase letter is
    /// misclassified as a non-terminal. This is not second-guessed; the
    /// rule is applied literally, as the corpus does.
    pub fn classify(name: &str) -> SymbolKind {
        match name.chars().next() {
            Some(c) if c.is_ascii_uppercase() => SymbolKind::NonTerminal,
            _ => SymbolKind::Terminal,
        }
    }
}

/// Interns grammar symbols into a single, contiguous, insertion-ordered
/// table shared by terminals and non-terminals alike.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: SymbolVec<Symbol>,
    by_name: IndexMap<String, SymbolIndex>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: SymbolVec::new(),
            by_name: IndexMap::new(),
        }
    }

    /// Interns `name` with the given kind. If the symbol already exists its
    /// kind is left untouched (first classification wins), matching the
    /// reference implementations, which never reclassify a symbol once
    /// seen.
    pub fn intern(&mut self, name: &str, kind: SymbolKind) -> SymbolIndex {
        if let Some(&idx) = self.by_name.get(name) {
            return idx;
        }
        let idx = self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
        });
        self.by_name.insert(name.to_string(), idx);
        idx
    }

    /// Interns `name`, classifying it by [`Symbol::classify`] if it is new.
    pub fn intern_classified(&mut self, name: &str) -> SymbolIndex {
        let kind = Symbol::classify(name);
        self.intern(name, kind)
    }

    pub fn index_of(&self, name: &str) -> Option<SymbolIndex> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, index: SymbolIndex) -> &Symbol {
        self.symbols
            .get(index)
            .expect("symbol index out of bounds")
    }

    pub fn name(&self, index: SymbolIndex) -> &str {
        &self.get(index).name
    }

    pub fn is_terminal(&self, index: SymbolIndex) -> bool {
        self.get(index).is_terminal()
    }

    pub fn is_nonterminal(&self, index: SymbolIndex) -> bool {
        self.get(index).is_nonterminal()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = SymbolIndex> {
        self.symbols.indices()
    }

    pub fn terminals(&self) -> impl Iterator<Item = SymbolIndex> + '_ {
        self.indices().filter(|&i| self.is_terminal(i))
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = SymbolIndex> + '_ {
        self.indices().filter(|&i| self.is_nonterminal(i))
    }
}
