use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer.
///
/// Every kind except [`TokenKind::Char`] mirrors one of PHP's own
/// token classes (`T_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A single character the lexer did not classify any further.
    Char,
    /// Text outside `<?php ... ?>`.
    InlineHtml,
    /// `<?php` with one trailing whitespace character.
    OpenTag,
    /// `<?=`.
    OpenTagWithEcho,
    /// `?>` with an optional trailing newline.
    CloseTag,
    Whitespace,
    /// `// ...`, `# ...` or `/* ... */`.
    Comment,
    /// `/** ... */`.
    DocComment,
    /// `#[` opening an attribute.
    Attribute,
    /// `$name`.
    Variable,
    /// Bare word (`T_STRING`).
    Identifier,
    /// Namespaced name (`Foo\Bar`, `\Foo`).
    QualifiedName,
    /// Reserved word.
    Keyword,
    /// Type cast such as `(int)`.
    Cast,
    /// Integer literal.
    LNumber,
    /// Floating point literal.
    DNumber,
    /// Complete string literal with no interpolation.
    ConstantEncapsedString,
    /// Literal text between interpolations.
    EncapsedAndWhitespace,
    /// Numeric offset inside `"$a[0]"`.
    NumString,
    /// Variable name inside `"${name}"`.
    StringVarname,
    /// `{` opening `"{$expr}"`.
    CurlyOpen,
    /// `${`.
    DollarOpenCurlyBraces,
    /// `<<<LABEL` with its newline.
    StartHeredoc,
    /// Closing heredoc label.
    EndHeredoc,
    /// `->`.
    ObjectOperator,
    /// `?->`.
    NullsafeObjectOperator,
    /// `::`.
    DoubleColon,
    /// `=>`.
    DoubleArrow,
    /// `...`.
    Ellipsis,
    /// Any other multi-character operator.
    Operator,
}

impl TokenKind {
    /// Whether this token carries meaning for the grammar. Whitespace
    /// and comments do not.
    #[must_use]
    pub const fn is_significant(self) -> bool {
        !matches!(self, Self::Whitespace | Self::Comment | Self::DocComment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Char => "T_CHAR",
            Self::InlineHtml => "T_INLINE_HTML",
            Self::OpenTag => "T_OPEN_TAG",
            Self::OpenTagWithEcho => "T_OPEN_TAG_WITH_ECHO",
            Self::CloseTag => "T_CLOSE_TAG",
            Self::Whitespace => "T_WHITESPACE",
            Self::Comment => "T_COMMENT",
            Self::DocComment => "T_DOC_COMMENT",
            Self::Attribute => "T_ATTRIBUTE",
            Self::Variable => "T_VARIABLE",
            Self::Identifier => "T_STRING",
            Self::QualifiedName => "T_NAME_QUALIFIED",
            Self::Keyword => "T_KEYWORD",
            Self::Cast => "T_CAST",
            Self::LNumber => "T_LNUMBER",
            Self::DNumber => "T_DNUMBER",
            Self::ConstantEncapsedString => "T_CONSTANT_ENCAPSED_STRING",
            Self::EncapsedAndWhitespace => "T_ENCAPSED_AND_WHITESPACE",
            Self::NumString => "T_NUM_STRING",
            Self::StringVarname => "T_STRING_VARNAME",
            Self::CurlyOpen => "T_CURLY_OPEN",
            Self::DollarOpenCurlyBraces => "T_DOLLAR_OPEN_CURLY_BRACES",
            Self::StartHeredoc => "T_START_HEREDOC",
            Self::EndHeredoc => "T_END_HEREDOC",
            Self::ObjectOperator => "T_OBJECT_OPERATOR",
            Self::NullsafeObjectOperator => "T_NULLSAFE_OBJECT_OPERATOR",
            Self::DoubleColon => "T_DOUBLE_COLON",
            Self::DoubleArrow => "T_DOUBLE_ARROW",
            Self::Ellipsis => "T_ELLIPSIS",
            Self::Operator => "T_OPERATOR",
        };
        f.write_str(name)
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Wrap one lexical unit. Any text is accepted verbatim.
    #[must_use]
    pub const fn new(kind: TokenKind, text: String, span: Span) -> Self {
        Self { kind, text, span }
    }

    /// True if this is the unclassified character `ch`.
    #[must_use]
    pub fn is_char(&self, ch: char) -> bool {
        self.kind == TokenKind::Char && self.text.chars().eq(std::iter::once(ch))
    }

    /// True for a bare word as classified by the lexer.
    #[must_use]
    pub const fn is_bare_word(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier)
    }

    /// Turn a bare word into a single-quoted string literal.
    ///
    /// Kind and text change together.
    pub fn quote(&mut self) {
        self.text = format!("'{}'", self.text);
        self.kind = TokenKind::ConstantEncapsedString;
    }
}
