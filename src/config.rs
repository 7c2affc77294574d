//! Options controlling a rewrite pass.

/// Behaviour switches for [`StateMachine`](crate::StateMachine).
///
/// By default every bare word directly after a code-level `[` is quoted,
/// and `'`, `"`, heredoc and backtick literals are all guarded. Turning
/// `strict_literals` off gives the plain transition table, which also
/// rewrites interpolations inside heredoc and backtick strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Emit a debug event for every subscript word examined.
    pub trace: bool,
    /// Treat heredoc bodies and backtick strings as literals too.
    pub strict_literals: bool,
    /// Only quote a word that makes up the whole subscript, so
    /// `$a[foo()]` and `$a[A::B]` stay as they are.
    pub whole_subscript_only: bool,
}

impl Options {
    /// Default options: every literal guarded, no tracing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            trace: false,
            strict_literals: true,
            whole_subscript_only: false,
        }
    }

    /// Turn per-word tracing on or off.
    #[must_use]
    pub const fn trace(mut self, on: bool) -> Self {
        self.trace = on;
        self
    }

    /// Guard heredoc and backtick literals. Off means a second pass over
    /// the output may quote more words.
    #[must_use]
    pub const fn strict_literals(mut self, on: bool) -> Self {
        self.strict_literals = on;
        self
    }

    /// Require the quoted word to be followed by `]`.
    #[must_use]
    pub const fn whole_subscript_only(mut self, on: bool) -> Self {
        self.whole_subscript_only = on;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
