//! Error types for rendering display text

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Input that does not lex, such as a bare `&`
    #[error("invalid token '{found}' at {span:?}")]
    InvalidToken { span: Span, found: String },

    /// A character the LCD has no glyph for
    #[error("no LCD glyph for character {ch:?} at {span:?}")]
    UnknownCharacter { ch: char, span: Span },

    /// Text that needs more cells than the display has
    #[error("display text does not fit in {cells} cells (overflow at {span:?})")]
    TooLong { span: Span, cells: usize },
}

impl RenderError {
    pub fn span(&self) -> &Span {
        match self {
            RenderError::InvalidToken { span, .. }
            | RenderError::UnknownCharacter { span, .. }
            | RenderError::TooLong { span, .. } => span,
        }
    }

    fn hint(&self) -> String {
        match self {
            RenderError::InvalidToken { .. } => {
                "'&' must start one of &lt; &gt; &amp; &quot; &apos;".to_string()
            }
            RenderError::UnknownCharacter { ch, .. } => format!("{:?} cannot be shown", ch),
            RenderError::TooLong { cells, .. } => format!("only {} cells are available", cells),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        self.format_with_color(source, filename, false)
    }

    /// Like [`RenderError::format`], with ANSI colors for terminals
    pub fn format_with_color(&self, source: &str, filename: &str, color: bool) -> String {
        let span = char_span(source, self.span());
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_color(color))
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.hint())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

// ariadne counts characters, spans count bytes
fn char_span(source: &str, span: &Span) -> Span {
    let chars_before = |offset: usize| {
        source
            .get(..offset)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| source.chars().count())
    };
    chars_before(span.start)..chars_before(span.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = RenderError::UnknownCharacter {
            ch: '€',
            span: 2..5,
        };
        assert_eq!(err.to_string(), "no LCD glyph for character '€' at 2..5");

        let err = RenderError::TooLong {
            span: 12..13,
            cells: 12,
        };
        assert!(err.to_string().contains("12 cells"));
    }

    #[test]
    fn test_char_span() {
        assert_eq!(char_span("ab€c", &(2..5)), 2..3);
        assert_eq!(char_span("abc", &(1..2)), 1..2);
    }

    #[test]
    fn test_format_includes_source_and_hint() {
        let source = "AB & C";
        let err = RenderError::InvalidToken {
            span: 3..4,
            found: "&".to_string(),
        };
        let report = err.format(source, "display");
        assert!(report.contains("display"));
        assert!(report.contains("AB & C"));
        assert!(report.contains("must start one of"));
    }
}
