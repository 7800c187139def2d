//! Construction-time progress tracing.
//!
//! Silent by default; active when the CLI's `-v`/`--verbose` flag sets
//! [`set_verbose`], or unconditionally under `debug_assertions`. Never
//! affects ACTION/GOTO contents — purely observational, as in
//! `rustemo/src/glr/parser.rs`'s use of a `log!` macro around the GLR
//! frontier/reducer/shifter loop.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    cfg!(debug_assertions) || VERBOSE.load(Ordering::Relaxed)
}

/// Emits a trace line to stderr when tracing is active.
#[macro_export]
macro_rules! log {
    ($($args:tt)*) => {
        if $crate::trace::is_verbose() {
            eprintln!($($args)*);
        }
    };
}
