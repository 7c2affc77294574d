use std::fmt;

use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Single- or double-quoted string never closed.
    UnterminatedString,
    /// Backtick (shell) string never closed.
    UnterminatedBacktick,
    /// `/*` comment never closed.
    UnterminatedComment,
    /// Heredoc or nowdoc whose closing label never appears.
    UnterminatedHeredoc { label: String },
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated quoted string")
            }
            Self::UnterminatedBacktick => {
                write!(f, "unterminated backtick string")
            }
            Self::UnterminatedComment => {
                write!(f, "unterminated comment")
            }
            Self::UnterminatedHeredoc { label } => {
                write!(
                    f,
                    "unterminated heredoc, \
                     expected closing label: {label}"
                )
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize PHP source text into a sequence of tokens.
///
/// The stream follows the token classes of PHP's own tokenizer and
/// loses nothing: joining every token's text gives back `input`.
///
/// # Errors
///
/// Returns `LexError` on unterminated strings, comments or heredocs.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

const KEYWORDS: &[&str] = &[
    "abstract",
    "and",
    "array",
    "as",
    "break",
    "callable",
    "case",
    "catch",
    "class",
    "clone",
    "const",
    "continue",
    "declare",
    "default",
    "die",
    "do",
    "echo",
    "else",
    "elseif",
    "empty",
    "enddeclare",
    "endfor",
    "endforeach",
    "endif",
    "endswitch",
    "endwhile",
    "eval",
    "exit",
    "extends",
    "final",
    "finally",
    "fn",
    "for",
    "foreach",
    "function",
    "global",
    "goto",
    "if",
    "implements",
    "include",
    "include_once",
    "instanceof",
    "insteadof",
    "interface",
    "isset",
    "list",
    "match",
    "namespace",
    "new",
    "or",
    "print",
    "private",
    "protected",
    "public",
    "readonly",
    "require",
    "require_once",
    "return",
    "static",
    "switch",
    "throw",
    "trait",
    "try",
    "unset",
    "use",
    "var",
    "while",
    "xor",
    "yield",
    "__class__",
    "__dir__",
    "__file__",
    "__function__",
    "__halt_compiler",
    "__line__",
    "__method__",
    "__namespace__",
    "__trait__",
];

const CASTS: &[&str] = &[
    "int", "integer", "bool", "boolean", "float", "double", "real", "string", "array", "object",
    "unset", "binary",
];

// Longest first.
const OPERATORS: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::Operator),
    (">>=", TokenKind::Operator),
    ("**=", TokenKind::Operator),
    ("...", TokenKind::Ellipsis),
    ("<=>", TokenKind::Operator),
    ("===", TokenKind::Operator),
    ("!==", TokenKind::Operator),
    ("??=", TokenKind::Operator),
    ("?->", TokenKind::NullsafeObjectOperator),
    ("->", TokenKind::ObjectOperator),
    ("=>", TokenKind::DoubleArrow),
    ("::", TokenKind::DoubleColon),
    ("<<", TokenKind::Operator),
    (">>", TokenKind::Operator),
    ("**", TokenKind::Operator),
    ("==", TokenKind::Operator),
    ("!=", TokenKind::Operator),
    ("<>", TokenKind::Operator),
    ("<=", TokenKind::Operator),
    (">=", TokenKind::Operator),
    ("&&", TokenKind::Operator),
    ("||", TokenKind::Operator),
    ("??", TokenKind::Operator),
    ("++", TokenKind::Operator),
    ("--", TokenKind::Operator),
    ("+=", TokenKind::Operator),
    ("-=", TokenKind::Operator),
    ("*=", TokenKind::Operator),
    ("/=", TokenKind::Operator),
    (".=", TokenKind::Operator),
    ("%=", TokenKind::Operator),
    ("&=", TokenKind::Operator),
    ("|=", TokenKind::Operator),
    ("^=", TokenKind::Operator),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// Outside the PHP tags.
    Html,
    Code,
    /// Code inside `"{$...}"` or `"${...}"`, with nested brace depth.
    Interpolation { depth: usize },
    DoubleQuotes { open: Span },
    Backquote { open: Span },
    Heredoc { label: String, nowdoc: bool, open: Span },
    /// Offset of a simple interpolation, `"$a[...]"`.
    VarOffset,
}

const fn is_label_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

const fn is_label_char(b: u8) -> bool {
    is_label_start(b) || b.is_ascii_digit()
}

const fn is_dec_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

const fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

const fn is_bin_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

const fn is_oct_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    modes: Vec<Mode>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
            modes: vec![Mode::Html],
            tokens: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        while self.pos < self.input.len() {
            match self.mode() {
                Mode::Html => self.scan_html(),
                Mode::Code | Mode::Interpolation { .. } => self.scan_code()?,
                Mode::VarOffset => self.scan_var_offset(),
                mode @ (Mode::DoubleQuotes { .. } | Mode::Backquote { .. } | Mode::Heredoc { .. }) => {
                    self.scan_string_body(&mode);
                }
            }
        }

        // Innermost unclosed literal wins.
        for mode in self.modes.iter().rev() {
            let (kind, span) = match mode {
                Mode::DoubleQuotes { open } => (LexErrorKind::UnterminatedString, *open),
                Mode::Backquote { open } => (LexErrorKind::UnterminatedBacktick, *open),
                Mode::Heredoc { label, open, .. } => (
                    LexErrorKind::UnterminatedHeredoc {
                        label: label.clone(),
                    },
                    *open,
                ),
                _ => continue,
            };
            return Err(LexError { kind, span });
        }

        Ok(self.tokens)
    }

    fn mode(&self) -> Mode {
        self.modes.last().cloned().unwrap_or(Mode::Html)
    }

    fn set_mode(&mut self, mode: Mode) {
        self.modes.pop();
        self.modes.push(mode);
    }

    fn pop_mode(&mut self) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    /// Length of the label starting at `at`, zero if there is none.
    fn label_len_at(&self, at: usize) -> usize {
        match self.input.get(at) {
            Some(&b) if is_label_start(b) => self.input[at..]
                .iter()
                .take_while(|&&b| is_label_char(b))
                .count(),
            _ => 0,
        }
    }

    fn last_significant(&self) -> Option<TokenKind> {
        self.tokens
            .iter()
            .rev()
            .map(|t| t.kind)
            .find(|kind| kind.is_significant())
    }

    /// Cut the next `len` bytes into a token.
    fn emit(&mut self, kind: TokenKind, len: usize) {
        let end = (self.pos + len).min(self.input.len());
        let span = self.span();
        for &b in &self.input[self.pos..end] {
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        let text = String::from_utf8_lossy(&self.input[self.pos..end]).into_owned();
        self.pos = end;
        self.tokens.push(Token::new(kind, text, span));
    }

    fn scan_html(&mut self) {
        let open = (self.pos..self.input.len())
            .find_map(|at| self.open_tag_at(at).map(|tag| (at, tag)));

        match open {
            Some((at, (kind, len))) => {
                if at > self.pos {
                    self.emit(TokenKind::InlineHtml, at - self.pos);
                }
                self.emit(kind, len);
                self.set_mode(Mode::Code);
            }
            None => self.emit(TokenKind::InlineHtml, self.input.len() - self.pos),
        }
    }

    fn open_tag_at(&self, at: usize) -> Option<(TokenKind, usize)> {
        let rest = &self.input[at..];
        if rest.starts_with(b"<?=") {
            return Some((TokenKind::OpenTagWithEcho, 3));
        }
        if rest.len() < 5 || !rest[..5].eq_ignore_ascii_case(b"<?php") {
            return None;
        }
        match rest.get(5) {
            None => Some((TokenKind::OpenTag, 5)),
            Some(b'\r') if rest.get(6) == Some(&b'\n') => Some((TokenKind::OpenTag, 7)),
            Some(b' ' | b'\t' | b'\n' | b'\r') => Some((TokenKind::OpenTag, 6)),
            Some(_) => None,
        }
    }

    fn scan_code(&mut self) -> Result<(), LexError> {
        let ch = self.input[self.pos];
        let next = self.peek_at(1);

        match ch {
            b' ' | b'\t' | b'\n' | b'\r' => {
                let len = self.input[self.pos..]
                    .iter()
                    .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
                    .count();
                self.emit(TokenKind::Whitespace, len);
            }
            b'?' if next == Some(b'>') && self.mode() == Mode::Code => {
                let len = match (self.peek_at(2), self.peek_at(3)) {
                    (Some(b'\r'), Some(b'\n')) => 4,
                    (Some(b'\n' | b'\r'), _) => 3,
                    _ => 2,
                };
                self.emit(TokenKind::CloseTag, len);
                self.set_mode(Mode::Html);
            }
            b'#' if next == Some(b'[') => self.emit(TokenKind::Attribute, 2),
            b'#' => self.read_line_comment(),
            b'/' if next == Some(b'/') => self.read_line_comment(),
            b'/' if next == Some(b'*') => self.read_block_comment()?,
            b'$' if self.label_len_at(self.pos + 1) > 0 => {
                let len = 1 + self.label_len_at(self.pos + 1);
                self.emit(TokenKind::Variable, len);
            }
            b'\'' => self.read_single_quoted()?,
            b'"' => self.read_double_quoted()?,
            b'`' => {
                let open = self.span();
                self.emit(TokenKind::Char, 1);
                self.modes.push(Mode::Backquote { open });
            }
            b'<' if self.starts_with(b"<<<") => {
                if !self.try_read_heredoc_start() {
                    self.read_operator();
                }
            }
            b'(' => match self.cast_len() {
                Some(len) => self.emit(TokenKind::Cast, len),
                None => self.emit(TokenKind::Char, 1),
            },
            b'{' => {
                self.emit(TokenKind::Char, 1);
                if let Some(Mode::Interpolation { depth }) = self.modes.last_mut() {
                    *depth += 1;
                }
            }
            b'}' => {
                self.emit(TokenKind::Char, 1);
                let closes = match self.modes.last_mut() {
                    Some(Mode::Interpolation { depth: 0 }) => true,
                    Some(Mode::Interpolation { depth }) => {
                        *depth -= 1;
                        false
                    }
                    _ => false,
                };
                if closes {
                    self.pop_mode();
                }
            }
            b'0'..=b'9' => self.read_number(),
            b'.' if next.is_some_and(|b| b.is_ascii_digit()) => self.read_number(),
            b'\\' if next.is_some_and(is_label_start) => self.read_name(),
            _ if is_label_start(ch) => self.read_name(),
            _ => self.read_operator(),
        }

        Ok(())
    }

    fn read_line_comment(&mut self) {
        let rest = &self.input[self.pos..];
        let len = (0..rest.len())
            .find(|&i| matches!(rest[i], b'\n' | b'\r') || rest[i..].starts_with(b"?>"))
            .unwrap_or(rest.len());
        self.emit(TokenKind::Comment, len);
    }

    fn read_block_comment(&mut self) -> Result<(), LexError> {
        let rest = &self.input[self.pos..];
        let Some(close) = rest[2..].windows(2).position(|w| w == b"*/") else {
            return Err(LexError {
                kind: LexErrorKind::UnterminatedComment,
                span: self.span(),
            });
        };

        let doc = rest.starts_with(b"/**")
            && rest
                .get(3)
                .is_some_and(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
        let kind = if doc {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        self.emit(kind, close + 4);
        Ok(())
    }

    fn read_single_quoted(&mut self) -> Result<(), LexError> {
        let mut i = self.pos + 1;
        loop {
            match self.input.get(i) {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        span: self.span(),
                    });
                }
                Some(b'\\') => i += 2,
                Some(b'\'') => break,
                Some(_) => i += 1,
            }
        }
        self.emit(TokenKind::ConstantEncapsedString, i + 1 - self.pos);
        Ok(())
    }

    /// A double-quoted string is a single token unless it interpolates,
    /// in which case its quotes become `Char` tokens around the parts.
    fn read_double_quoted(&mut self) -> Result<(), LexError> {
        let mut i = self.pos + 1;
        let mut interpolated = false;
        loop {
            match self.input.get(i) {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        span: self.span(),
                    });
                }
                Some(b'\\') => i += 2,
                Some(b'"') => break,
                Some(b'$') => {
                    let after = self.input.get(i + 1).copied();
                    interpolated |= after.is_some_and(|b| is_label_start(b) || b == b'{');
                    i += 1;
                }
                Some(b'{') => {
                    interpolated |= self.input.get(i + 1) == Some(&b'$');
                    i += 1;
                }
                Some(_) => i += 1,
            }
        }

        if interpolated {
            let open = self.span();
            self.emit(TokenKind::Char, 1);
            self.modes.push(Mode::DoubleQuotes { open });
        } else {
            self.emit(TokenKind::ConstantEncapsedString, i + 1 - self.pos);
        }
        Ok(())
    }

    /// `<<<LABEL`, `<<<"LABEL"` or `<<<'LABEL'` followed by a newline.
    fn try_read_heredoc_start(&mut self) -> bool {
        let mut i = self.pos + 3;
        while matches!(self.input.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }

        let quote = match self.input.get(i) {
            Some(&q @ (b'\'' | b'"')) => {
                i += 1;
                Some(q)
            }
            _ => None,
        };

        let label_len = self.label_len_at(i);
        if label_len == 0 {
            return false;
        }
        let label = String::from_utf8_lossy(&self.input[i..i + label_len]).into_owned();
        i += label_len;

        if let Some(q) = quote {
            if self.input.get(i) != Some(&q) {
                return false;
            }
            i += 1;
        }

        match (self.input.get(i), self.input.get(i + 1)) {
            (Some(b'\r'), Some(b'\n')) => i += 2,
            (Some(b'\n' | b'\r'), _) => i += 1,
            _ => return false,
        }

        let open = self.span();
        self.emit(TokenKind::StartHeredoc, i - self.pos);
        self.modes.push(Mode::Heredoc {
            label,
            nowdoc: quote == Some(b'\''),
            open,
        });
        true
    }

    /// Length of a cast such as `(int)` or `( string )` at the cursor.
    fn cast_len(&self) -> Option<usize> {
        let skip_blanks = |mut i: usize| {
            while matches!(self.input.get(i), Some(b' ' | b'\t')) {
                i += 1;
            }
            i
        };

        let start = skip_blanks(self.pos + 1);
        let word_len = self.input[start..]
            .iter()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        let word = &self.input[start..start + word_len];
        if !CASTS.iter().any(|c| c.as_bytes().eq_ignore_ascii_case(word)) {
            return None;
        }

        let end = skip_blanks(start + word_len);
        (self.input.get(end) == Some(&b')')).then_some(end + 1 - self.pos)
    }

    fn read_number(&mut self) {
        let input = self.input;
        let rest = &input[self.pos..];
        let digits_from = |from: usize, accept: fn(u8) -> bool| {
            from + rest[from..]
                .iter()
                .take_while(|&&b| accept(b) || b == b'_')
                .count()
        };

        let radix: Option<fn(u8) -> bool> = match rest.get(..2) {
            Some(b"0x" | b"0X") => Some(is_hex_digit),
            Some(b"0b" | b"0B") => Some(is_bin_digit),
            Some(b"0o" | b"0O") => Some(is_oct_digit),
            _ => None,
        };
        if let Some(accept) = radix {
            if rest.get(2).is_some_and(|&b| accept(b)) {
                let len = digits_from(2, accept);
                self.emit(TokenKind::LNumber, len);
                return;
            }
        }

        let mut len = digits_from(0, is_dec_digit);
        let mut float = false;
        if rest.get(len) == Some(&b'.') {
            float = true;
            len = digits_from(len + 1, is_dec_digit);
        }
        if matches!(rest.get(len), Some(b'e' | b'E')) {
            let sign = usize::from(matches!(rest.get(len + 1), Some(b'+' | b'-')));
            if rest.get(len + 1 + sign).is_some_and(u8::is_ascii_digit) {
                float = true;
                len = digits_from(len + 1 + sign, is_dec_digit);
            }
        }

        let kind = if float {
            TokenKind::DNumber
        } else {
            TokenKind::LNumber
        };
        self.emit(kind, len);
    }

    fn read_name(&mut self) {
        let mut i = self.pos;
        let mut qualified = false;
        if self.input[i] == b'\\' {
            qualified = true;
            i += 1;
        }
        i += self.label_len_at(i);
        while self.input.get(i) == Some(&b'\\') && self.label_len_at(i + 1) > 0 {
            qualified = true;
            i += 1 + self.label_len_at(i + 1);
        }

        let word = &self.input[self.pos..i];
        let after_arrow = matches!(
            self.last_significant(),
            Some(TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator)
        );
        let kind = if qualified {
            TokenKind::QualifiedName
        } else if !after_arrow
            && KEYWORDS
                .iter()
                .any(|k| k.as_bytes().eq_ignore_ascii_case(word))
        {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.emit(kind, i - self.pos);
    }

    fn read_operator(&mut self) {
        let op = OPERATORS
            .iter()
            .find(|(text, _)| self.starts_with(text.as_bytes()));
        match op {
            Some(&(text, kind)) => self.emit(kind, text.len()),
            None => self.emit(TokenKind::Char, 1),
        }
    }

    /// Body of a double-quoted, backtick or heredoc string.
    fn scan_string_body(&mut self, mode: &Mode) {
        let ch = self.input[self.pos];
        let at_line_start = self.pos == 0 || self.input[self.pos - 1] == b'\n';

        match mode {
            Mode::DoubleQuotes { .. } if ch == b'"' => {
                self.emit(TokenKind::Char, 1);
                self.pop_mode();
                return;
            }
            Mode::Backquote { .. } if ch == b'`' => {
                self.emit(TokenKind::Char, 1);
                self.pop_mode();
                return;
            }
            Mode::Heredoc { label, .. } if at_line_start => {
                if let Some(len) = self.heredoc_end_len_at(self.pos, label) {
                    self.emit(TokenKind::EndHeredoc, len);
                    self.pop_mode();
                    return;
                }
            }
            _ => {}
        }

        let nowdoc = matches!(mode, Mode::Heredoc { nowdoc: true, .. });
        if !nowdoc && self.try_read_interpolation() {
            return;
        }

        let len = self.literal_len(mode);
        self.emit(TokenKind::EncapsedAndWhitespace, len);
    }

    fn try_read_interpolation(&mut self) -> bool {
        if self.starts_with(b"$") && self.label_len_at(self.pos + 1) > 0 {
            self.read_simple_interpolation();
        } else if self.starts_with(b"{$") {
            self.emit(TokenKind::CurlyOpen, 1);
            self.modes.push(Mode::Interpolation { depth: 0 });
        } else if self.starts_with(b"${") {
            self.emit(TokenKind::DollarOpenCurlyBraces, 2);
            let len = self.label_len_at(self.pos);
            if len > 0 && matches!(self.peek_at(len), Some(b'[' | b'}')) {
                self.emit(TokenKind::StringVarname, len);
            }
            self.modes.push(Mode::Interpolation { depth: 0 });
        } else {
            return false;
        }
        true
    }

    /// `$name`, `$name[offset]`, `$name->prop` inside a string.
    fn read_simple_interpolation(&mut self) {
        let len = 1 + self.label_len_at(self.pos + 1);
        self.emit(TokenKind::Variable, len);

        if self.starts_with(b"[") {
            self.emit(TokenKind::Char, 1);
            self.modes.push(Mode::VarOffset);
        } else if self.starts_with(b"->") && self.label_len_at(self.pos + 2) > 0 {
            self.emit(TokenKind::ObjectOperator, 2);
            let len = self.label_len_at(self.pos);
            self.emit(TokenKind::Identifier, len);
        } else if self.starts_with(b"?->") && self.label_len_at(self.pos + 3) > 0 {
            self.emit(TokenKind::NullsafeObjectOperator, 3);
            let len = self.label_len_at(self.pos);
            self.emit(TokenKind::Identifier, len);
        }
    }

    fn scan_var_offset(&mut self) {
        let ch = self.input[self.pos];
        match ch {
            b']' => {
                self.emit(TokenKind::Char, 1);
                self.pop_mode();
            }
            b'0'..=b'9' => {
                let len = self.input[self.pos..]
                    .iter()
                    .take_while(|&&b| is_label_char(b))
                    .count();
                self.emit(TokenKind::NumString, len);
            }
            b'-' if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.emit(TokenKind::Char, 1);
            }
            b'$' if self.label_len_at(self.pos + 1) > 0 => {
                let len = 1 + self.label_len_at(self.pos + 1);
                self.emit(TokenKind::Variable, len);
            }
            _ if is_label_start(ch) => {
                let len = self.label_len_at(self.pos);
                self.emit(TokenKind::Identifier, len);
            }
            // Not a simple offset; the enclosing string takes over.
            _ => self.pop_mode(),
        }
    }

    /// Length of literal text before the next interpolation, closing
    /// delimiter or heredoc closing label.
    fn literal_len(&self, mode: &Mode) -> usize {
        let (heredoc_label, nowdoc) = match mode {
            Mode::Heredoc { label, nowdoc, .. } => (Some(label.as_str()), *nowdoc),
            _ => (None, false),
        };

        let mut i = self.pos;
        while i < self.input.len() {
            let b = self.input[i];
            let next = self.input.get(i + 1).copied();

            if !nowdoc && b == b'\\' && next != Some(b'\n') {
                i += 2;
                continue;
            }

            let stop = match mode {
                Mode::DoubleQuotes { .. } => b == b'"',
                Mode::Backquote { .. } => b == b'`',
                _ => false,
            };
            let interpolation = !nowdoc
                && ((b == b'$' && next.is_some_and(|n| is_label_start(n) || n == b'{'))
                    || (b == b'{' && next == Some(b'$')));
            if i > self.pos && (stop || interpolation) {
                break;
            }

            i += 1;
            if b == b'\n' {
                if let Some(label) = heredoc_label {
                    if self.heredoc_end_len_at(i, label).is_some() {
                        break;
                    }
                }
            }
        }

        i.min(self.input.len()) - self.pos
    }

    /// Closing label, optionally indented, not followed by a label char.
    fn heredoc_end_len_at(&self, at: usize, label: &str) -> Option<usize> {
        let mut i = at;
        while matches!(self.input.get(i), Some(b' ' | b'\t')) {
            i += 1;
        }
        if !self.input[i..].starts_with(label.as_bytes()) {
            return None;
        }
        i += label.len();
        if self.input.get(i).is_some_and(|&b| is_label_char(b)) {
            return None;
        }
        Some(i - at)
    }
}
