// Lexer for the Mermaid graph subset accepted by mmc.
//
// Tokenizes the line-oriented flow-chart grammar using the `logos` crate.
// The grammar is deliberately forgiving: characters outside the supported
// subset lex as `Junk` rather than producing errors, and the parser decides
// per line whether anything useful remained.
//
// Preconditions: input is valid UTF-8.
// Postconditions: returns all tokens with byte-offset spans.
// Failure modes: none — unrecognised characters become `Junk`, not errors.
// Side effects: none.

use logos::Logos;
use std::fmt;

/// Byte-offset span in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Smallest span covering both `self` and `other`.
    pub fn join(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Mermaid subset token types.
///
/// Identifiers carry no value — use the span to retrieve the text from the
/// source. Descriptors and payloads carry their inner text (brackets and
/// parentheses stripped) since the parser never needs the delimiters.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+|%%[^\n]*")]
pub enum Token {
    /// Directed edge marker. The only supported flow direction.
    #[token("-->")]
    Arrow,

    /// Bracketed node descriptor, e.g. `[Constant3Vector(1,0,0)]`.
    /// Inner text is captured verbatim; it is resolved in a later phase.
    #[regex(r"\[[^\]\n]+\]", inner_text)]
    Descriptor(String),

    /// Parenthesised value payload, e.g. `(0.5)` in `A[Constant](0.5)`.
    #[regex(r"\(([^)\n]*)\)", inner_text)]
    Payload(String),

    /// Identifier: `[A-Za-z0-9_]+`. Leading digits are allowed — Mermaid
    /// node ids are not C identifiers.
    #[regex(r"[A-Za-z0-9_]+")]
    Ident,

    /// One or more newlines (significant — the grammar is line-oriented).
    #[regex(r"\n+")]
    Newline,

    /// Any other character. Kept as a token (not skipped) so the parser can
    /// tell that an edge segment did not begin with an identifier.
    #[regex(r"[^ \t\r\n]", priority = 0)]
    Junk,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Arrow => write!(f, "-->"),
            Token::Descriptor(d) => write!(f, "[{d}]"),
            Token::Payload(p) => write!(f, "({p})"),
            Token::Ident => write!(f, "<ident>"),
            Token::Newline => write!(f, "<newline>"),
            Token::Junk => write!(f, "<junk>"),
        }
    }
}

// ── Callbacks ──

/// Strip the single-character delimiters off a bracketed/parenthesised slice.
fn inner_text(lex: &mut logos::Lexer<'_, Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

// ── Public API ──

/// Lex a Mermaid source string into tokens.
///
/// Unrecognised characters (stray brackets, pipes from edge labels, other
/// Mermaid syntax outside the supported subset) lex as `Junk` — never an
/// error. Lexing therefore cannot fail.
pub fn lex(source: &str) -> Vec<(Token, Span)> {
    let lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    for (result, range) in lexer.spanned() {
        let span = Span {
            start: range.start,
            end: range.end,
        };
        if let Ok(token) = result {
            tokens.push((token, span));
        }
    }

    tokens
}
