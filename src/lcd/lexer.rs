//! Lexer for LCD display text using logos
//!
//! Display text arrives already escaped for embedding in SVG, so the
//! five XML entities are recognized as single characters. Punctuation
//! marks get their own tokens because the LCD draws them inside the
//! preceding character cell.

use logos::Logos;

use crate::error::{RenderError, Span};

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum Token {
    #[token("&lt;")]
    LessThan,
    #[token("&gt;")]
    GreaterThan,
    #[token("&amp;")]
    Ampersand,
    #[token("&quot;")]
    Quote,
    #[token("&apos;")]
    Apostrophe,

    // Cell punctuation
    #[token(".")]
    Period,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    #[regex(r"[^.,:&]", |lex| lex.slice().chars().next())]
    Char(char),
}

impl Token {
    /// The character a glyph token stands for, `None` for punctuation
    pub fn glyph_char(self) -> Option<char> {
        match self {
            Token::LessThan => Some('<'),
            Token::GreaterThan => Some('>'),
            Token::Ampersand => Some('&'),
            Token::Quote => Some('"'),
            Token::Apostrophe => Some('\''),
            Token::Char(c) => Some(c),
            Token::Period | Token::Comma | Token::Colon => None,
        }
    }
}

/// Tokenize display text, reporting the first span that is not a token
pub fn lex(source: &str) -> Result<Vec<(Token, Span)>, RenderError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(RenderError::InvalidToken {
                    span: lexer.span(),
                    found: lexer.slice().to_string(),
                })
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_plain_characters() {
        assert_eq!(
            kinds("05 Z"),
            vec![
                Token::Char('0'),
                Token::Char('5'),
                Token::Char(' '),
                Token::Char('Z')
            ]
        );
    }

    #[test]
    fn test_entities() {
        assert_eq!(
            kinds("&lt;&gt;&amp;"),
            vec![Token::LessThan, Token::GreaterThan, Token::Ampersand]
        );
    }

    #[test]
    fn test_punctuation_tokens() {
        assert_eq!(
            kinds("1.2,3:"),
            vec![
                Token::Char('1'),
                Token::Period,
                Token::Char('2'),
                Token::Comma,
                Token::Char('3'),
                Token::Colon
            ]
        );
    }

    #[test]
    fn test_non_ascii_character() {
        assert_eq!(kinds("ÿ"), vec![Token::Char('ÿ')]);
    }

    #[test]
    fn test_spans_are_byte_ranges() {
        let tokens = lex("&lt;A").unwrap();
        assert_eq!(tokens[0].1, 0..4);
        assert_eq!(tokens[1].1, 4..5);
    }

    #[test]
    fn test_bare_ampersand_is_rejected() {
        let err = lex("A & B").unwrap_err();
        assert!(matches!(err, RenderError::InvalidToken { ref span, .. } if *span == (2..3)));
    }

    #[test]
    fn test_glyph_char() {
        assert_eq!(Token::LessThan.glyph_char(), Some('<'));
        assert_eq!(Token::Period.glyph_char(), None);
    }
}
