//! Lexes a content-expression source string into tokens with a single
//! token of lookahead (spec.md §4.1), via a `logos`-derived token enum —
//! the same approach the teacher's own query lexers use
//! (`plotnik-lib/src/parser/lexer.rs`, `plotnik-lib/src/ql/lexer.rs`).
//!
//! Punctuation (`(`, `)`, `|`, `+`, `*`, `?`, `{`, `}`, `,`) each form a
//! one-character token; runs of `[A-Za-z0-9_]` form an identifier token;
//! whitespace is skipped by `logos` itself. A character matching none of
//! the above is an error token from `logos`'s point of view, but is still
//! pushed as its own one-character token here rather than dropped, so it
//! surfaces as a parse-time syntax error instead of silently vanishing.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Tok {
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("|")]
    Pipe,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("?")]
    Question,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token(",")]
    Comma,
    #[regex(r"[A-Za-z0-9_]+")]
    Ident,
}

fn tokenize(source: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut lexer = Tok::lexer(source);
    while let Some(result) = lexer.next() {
        // Whichever branch: a recognized token or a single unrecognized
        // character, both become one token slice of the original source.
        let _ = result;
        tokens.push(lexer.slice().to_string());
    }
    tokens
}

/// A random-access token array with a cursor, built from a content
/// expression's source text.
pub(crate) struct TokenStream<'a> {
    source: &'a str,
    tokens: Vec<String>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
        }
    }

    /// The original source text, for embedding in syntax error messages.
    pub(crate) fn source(&self) -> &'a str {
        self.source
    }

    /// The current token, or `None` at end of input.
    pub(crate) fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    /// Advance past the current token iff it equals `tok`, returning
    /// whether it did.
    pub(crate) fn eat(&mut self, tok: &str) -> bool {
        if self.peek() == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Unconditionally advance, returning the token that was current.
    pub(crate) fn next(&mut self) -> Option<String> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// True once every token has been consumed.
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_punctuation_and_identifiers() {
        let toks = tokenize("paragraph (horizontal_rule paragraph)+");
        assert_eq!(
            toks,
            vec!["paragraph", "(", "horizontal_rule", "paragraph", ")", "+"]
        );
    }

    #[test]
    fn trims_leading_and_trailing_whitespace() {
        let toks = tokenize("  heading  ");
        assert_eq!(toks, vec!["heading"]);
    }

    #[test]
    fn range_braces_and_comma() {
        let toks = tokenize("hard_break{2,4}");
        assert_eq!(toks, vec!["hard_break", "{", "2", ",", "4", "}"]);
    }

    #[test]
    fn open_upper_bound_range() {
        let toks = tokenize("code_block{1,}");
        assert_eq!(toks, vec!["code_block", "{", "1", ",", "}"]);
    }

    #[test]
    fn unrecognized_character_becomes_its_own_token() {
        let toks = tokenize("paragraph & heading");
        assert_eq!(toks, vec!["paragraph", "&", "heading"]);
    }

    #[test]
    fn cursor_peek_eat_next() {
        let mut ts = TokenStream::new("a | b");
        assert_eq!(ts.peek(), Some("a"));
        assert!(!ts.eat("b"));
        assert!(ts.eat("a"));
        assert_eq!(ts.next(), Some("|".to_string()));
        assert_eq!(ts.peek(), Some("b"));
        assert!(ts.eat("b"));
        assert!(ts.at_end());
        assert_eq!(ts.peek(), None);
    }

    #[test]
    fn empty_source_has_no_tokens() {
        let ts = TokenStream::new("");
        assert!(ts.at_end());
    }
}
