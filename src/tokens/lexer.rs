//! logos-based token lexer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `indigo-500` as [`Lexeme::PaletteRef`] beats `indigo` as `Ident`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `gray-950` matches [`Lexeme::PaletteRef`], not `Ident` + `Number`
//! - `2x-large` matches [`Lexeme::ScaledName`], not `Length` + `Ident`
//! - `1.5rem` matches [`Lexeme::Length`], not `Number` + `Ident`

use std::ops::Range;

use logos::Logos;

/// Lexeme produced by the token lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Lexeme {
    // ── Compound lexemes (longer matches, defined first) ─────────────

    /// Palette reference: `indigo-500`, `gray-50`.
    #[regex(r"[a-zA-Z]+-[0-9]+")]
    PaletteRef,

    /// Multiplied size name: `2x-small`, `3x-large`.
    #[regex(r"[0-9]+x-[a-zA-Z]+")]
    ScaledName,

    /// Hash-prefixed hex digits: `#fff`, `#4f46e5`.
    #[regex(r"#[0-9a-fA-F]+")]
    Hex,

    /// Number with a unit suffix: `3px`, `1.5rem`, `50%`.
    #[regex(r"-?([0-9]+|[0-9]*\.[0-9]+)[a-zA-Z%]+")]
    Length,

    /// Bare number: `0`, `-4`, `0.75`.
    #[regex(r"-?([0-9]+|[0-9]*\.[0-9]+)")]
    Number,

    /// Identifier with optional dash-separated segments: `large`, `x-large`, `rgb`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*(-[a-zA-Z][a-zA-Z0-9]*)*")]
    Ident,

    // ── Punctuation ──────────────────────────────────────────────────

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `,`
    #[token(",")]
    Comma,

    /// `/`
    #[token("/")]
    Slash,
}

/// The overall shape of a token string, decided by lexing it as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenShape {
    /// Exactly one [`Lexeme::PaletteRef`] spanning the input.
    Palette,
    /// Exactly one identifier-like name (`large`, `2x-small`).
    Name,
    /// Exactly one number or length (`3px`, `0`).
    Length,
    /// Exactly one hex literal.
    Hex,
    /// Anything else, including empty input and lex errors.
    Other,
}

/// Lex `input` into `(Lexeme, span)` pairs.
///
/// Returns `None` if any part of the input fails to lex.
pub fn lex(input: &str) -> Option<Vec<(Lexeme, Range<usize>)>> {
    Lexeme::lexer(input)
        .spanned()
        .map(|(result, span)| result.ok().map(|lexeme| (lexeme, span)))
        .collect()
}

/// Classify a token string. Leading or trailing whitespace makes a token [`TokenShape::Other`].
pub fn classify(input: &str) -> TokenShape {
    let Some(lexemes) = lex(input) else {
        return TokenShape::Other;
    };
    match lexemes.as_slice() {
        [(lexeme, span)] if *span == (0..input.len()) => match lexeme {
            Lexeme::PaletteRef => TokenShape::Palette,
            Lexeme::Ident | Lexeme::ScaledName => TokenShape::Name,
            Lexeme::Length | Lexeme::Number => TokenShape::Length,
            Lexeme::Hex => TokenShape::Hex,
            _ => TokenShape::Other,
        },
        _ => TokenShape::Other,
    }
}
