//! Single-pass state machine that quotes bare subscript words.
//!
//! The machine walks the token stream once, tracking whether it is in
//! plain code, inside a `'`/`"` literal, or inside a `[...]` subscript.
//! A bare word directly after a code-level `[` becomes a single-quoted
//! string literal; everything else passes through untouched.
//!
//! ```
//! use php_aif::{Options, StateMachine};
//!
//! let mut machine = StateMachine::new(Options::new());
//! machine.tokenize("<?php $a[b] = \"$a[b]\";").unwrap();
//! assert_eq!(machine.parse(), "<?php $a['b'] = \"$a[b]\";");
//! ```

use tracing::debug;

use crate::config::Options;
use crate::lexer::{self, LexError};
use crate::token::{Span, Token, TokenKind};

/// How the machine interprets the tokens it is looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Context {
    /// Plain code.
    #[default]
    Default,
    InSingleQuoted,
    InDoubleQuoted,
    /// Between `[` and `]`.
    InArrayIndex,
}

/// A subscript word that was quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub span: Span,
    /// The word before quoting.
    pub word: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Keep,
    Enter(Context),
    Quote,
}

/// Tokenizes one file and rewrites its bare subscripts.
///
/// One instance handles one source text: call [`tokenize`](Self::tokenize),
/// then [`parse`](Self::parse).
#[derive(Debug, Default)]
pub struct StateMachine {
    options: Options,
    context: Context,
    tokens: Option<Vec<Token>>,
    rewrites: Vec<Rewrite>,
}

impl StateMachine {
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self {
            options,
            context: Context::Default,
            tokens: None,
            rewrites: Vec::new(),
        }
    }

    /// Lex `source` and store the token sequence, replacing any
    /// previous one.
    ///
    /// # Errors
    ///
    /// Returns the lexer's `LexError` unchanged.
    pub fn tokenize(&mut self, source: &str) -> Result<&[Token], LexError> {
        let tokens = lexer::tokenize(source)?;
        self.context = Context::Default;
        self.rewrites.clear();
        Ok(self.tokens.insert(tokens).as_slice())
    }

    /// Run the rewrite pass over the stored tokens and return the
    /// resulting source text.
    ///
    /// # Panics
    ///
    /// Panics if called before [`tokenize`](Self::tokenize).
    pub fn parse(&mut self) -> String {
        let options = self.options;
        let Some(tokens) = self.tokens.as_mut() else {
            panic!("StateMachine::parse called before tokenize");
        };

        self.rewrites.clear();
        let mut context = Context::Default;
        let mut output = String::with_capacity(tokens.iter().map(|t| t.text.len()).sum());

        for index in 0..tokens.len() {
            let after_open = index
                .checked_sub(1)
                .is_some_and(|prev| tokens[prev].text == "[");
            let before_close = tokens.get(index + 1).is_some_and(|t| t.is_char(']'));

            let token = &mut tokens[index];
            match step(context, token, after_open, before_close, options) {
                Action::Keep => {}
                Action::Enter(next) => context = next,
                Action::Quote => {
                    self.rewrites.push(Rewrite {
                        span: token.span,
                        word: token.text.clone(),
                    });
                    token.quote();
                }
            }
            output.push_str(&token.text);
        }

        self.context = context;
        output
    }

    /// Tokens from the last `tokenize`, rewritten in place by `parse`.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        self.tokens.as_deref().unwrap_or_default()
    }

    /// Context the last pass ended in. Well-formed files end in
    /// [`Context::Default`]; nothing enforces it.
    #[must_use]
    pub const fn context(&self) -> Context {
        self.context
    }

    /// Words quoted by the last `parse`.
    #[must_use]
    pub fn rewrites(&self) -> &[Rewrite] {
        &self.rewrites
    }

    #[must_use]
    pub const fn options(&self) -> Options {
        self.options
    }
}

/// Decide what `token` does in `context`. Total over every context.
fn step(
    context: Context,
    token: &Token,
    after_open: bool,
    before_close: bool,
    options: Options,
) -> Action {
    let opens_extra_literal = options.strict_literals
        && (token.kind == TokenKind::StartHeredoc || token.is_char('`'));
    let closes_extra_literal = options.strict_literals
        && (token.kind == TokenKind::EndHeredoc || token.is_char('`'));

    match context {
        Context::Default => {
            if token.is_char('\'') {
                Action::Enter(Context::InSingleQuoted)
            } else if token.is_char('"') || opens_extra_literal {
                Action::Enter(Context::InDoubleQuoted)
            } else if token.is_char('[') {
                Action::Enter(Context::InArrayIndex)
            } else {
                Action::Keep
            }
        }
        Context::InSingleQuoted => {
            if token.is_char('\'') {
                Action::Enter(Context::Default)
            } else {
                Action::Keep
            }
        }
        Context::InDoubleQuoted => {
            if token.is_char('"') || closes_extra_literal {
                Action::Enter(Context::Default)
            } else {
                Action::Keep
            }
        }
        Context::InArrayIndex if token.is_bare_word() => {
            let quote = after_open && (before_close || !options.whole_subscript_only);
            if options.trace {
                debug!(
                    line = token.span.line,
                    column = token.span.column,
                    word = %token.text,
                    quoted = quote,
                    "subscript word"
                );
            }
            if quote {
                Action::Quote
            } else {
                Action::Keep
            }
        }
        Context::InArrayIndex => {
            if token.is_char(']') {
                Action::Enter(Context::Default)
            } else {
                Action::Keep
            }
        }
    }
}
