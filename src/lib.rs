//! PHP array index fixer.
//!
//! Rewrites bare array subscript words into quoted string literals
//! (`$a[b]` becomes `$a['b']`) while leaving variables, expressions,
//! already-quoted keys and anything inside string literals alone.
//!
//! # Quick start
//!
//! ```
//! use php_aif::{Options, fix_str};
//!
//! let input = "<?php\n$a[b] = 'c';\n$b = \"$a[b]\";\n$d = $e[$f->g];\n";
//! let output = fix_str(input, Options::new()).unwrap();
//! assert_eq!(
//!     output,
//!     "<?php\n$a['b'] = 'c';\n$b = \"$a[b]\";\n$d = $e[$f->g];\n"
//! );
//! ```
//!
//! ## Step by step
//!
//! ```
//! use php_aif::{Options, StateMachine, TokenKind};
//!
//! let mut machine = StateMachine::new(Options::new());
//! let tokens = machine.tokenize("<?php $a[b];").unwrap();
//! assert_eq!(tokens[3].kind, TokenKind::Identifier);
//!
//! let output = machine.parse();
//! assert_eq!(output, "<?php $a['b'];");
//! assert_eq!(machine.rewrites().len(), 1);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod lexer;
pub mod machine;
pub mod token;

pub use config::Options;
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use machine::{Context, Rewrite, StateMachine};
pub use token::{Span, Token, TokenKind};

/// Unified error type for a rewrite.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The source could not be tokenized.
    #[error("{0}")]
    Lex(#[from] LexError),
}

/// Tokenize and rewrite a PHP source string in one step.
pub fn fix_str(source: &str, options: Options) -> Result<String, Error> {
    let mut machine = StateMachine::new(options);
    machine.tokenize(source)?;
    Ok(machine.parse())
}
