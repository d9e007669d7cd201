//! Assign lexed display text to LCD character cells

use crate::error::RenderError;

use super::font::{glyph, Glyph};
use super::lexer::{lex, Token};

/// Number of character cells on the display
pub const CELL_COUNT: usize = 12;

/// Punctuation drawn in the lower right of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    Period,
    Comma,
    Colon,
}

/// One character position on the display
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub glyph: Glyph,
    pub punct: Option<Punct>,
}

impl Cell {
    fn blank() -> Self {
        Self {
            ch: ' ',
            glyph: Glyph::BLANK,
            punct: None,
        }
    }
}

/// The full row of cells for one display state, left aligned
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCells {
    pub cells: Vec<Cell>,
}

impl DisplayCells {
    /// Lex and lay out display text
    pub fn parse(source: &str) -> Result<Self, RenderError> {
        let mut cells: Vec<Cell> = Vec::new();
        for (token, span) in lex(source)? {
            match token.glyph_char() {
                Some(ch) => {
                    let glyph = glyph(ch).ok_or_else(|| RenderError::UnknownCharacter {
                        ch,
                        span: span.clone(),
                    })?;
                    cells.push(Cell {
                        ch,
                        glyph,
                        punct: None,
                    });
                }
                None => {
                    let punct = match token {
                        Token::Period => Punct::Period,
                        Token::Comma => Punct::Comma,
                        _ => Punct::Colon,
                    };
                    // A mark shares the previous cell unless that cell already has one
                    match cells.last_mut() {
                        Some(cell) if cell.punct.is_none() => cell.punct = Some(punct),
                        _ => cells.push(Cell {
                            punct: Some(punct),
                            ..Cell::blank()
                        }),
                    }
                }
            }
            if cells.len() > CELL_COUNT {
                return Err(RenderError::TooLong {
                    span: span.start..source.len(),
                    cells: CELL_COUNT,
                });
            }
        }

        cells.resize_with(CELL_COUNT, Cell::blank);
        Ok(Self { cells })
    }

    /// Characters shown, for diagnostics
    pub fn text(&self) -> String {
        self.cells
            .iter()
            .map(|c| {
                let mut s = c.ch.to_string();
                match c.punct {
                    Some(Punct::Period) => s.push('.'),
                    Some(Punct::Comma) => s.push(','),
                    Some(Punct::Colon) => s.push(':'),
                    None => {}
                }
                s
            })
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}
