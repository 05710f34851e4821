//! Error types for reading legacy object definitions

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug)]
pub enum ParseError {
    /// A line that does not fit the `define <type> { key value }` grammar
    #[error("syntax error on line {line}: {message}: {text}")]
    Syntax {
        line: usize,
        span: Span,
        text: String,
        message: String,
    },

    /// The underlying reader failed (including invalid UTF-8)
    #[error("failed to read line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Create a syntax error for the given (normalized) line
    pub fn syntax(
        line: usize,
        span: Span,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            line,
            span,
            text: text.into(),
            message: message.into(),
        }
    }

    /// 1-based line number the error refers to
    pub fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. } | Self::Io { line, .. } => *line,
        }
    }

    /// Get the source span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Syntax { span, .. } => Some(span),
            Self::Io { .. } => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        self.format_with_config(source, filename, Config::default())
    }

    /// Like [`format`](Self::format), with explicit ariadne settings
    pub fn format_with_config(&self, source: &str, filename: &str, config: Config) -> String {
        let (span, message) = match self {
            ParseError::Syntax { span, message, .. } => (char_span(source, span), message.clone()),
            ParseError::Io { .. } => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(config)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
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

/// ariadne counts characters, the reader counts bytes
fn char_span(source: &str, span: &Span) -> Span {
    let to_chars = |offset: usize| {
        let offset = offset.min(source.len());
        match source.get(..offset) {
            Some(prefix) => prefix.chars().count(),
            None => source.char_indices().take_while(|(i, _)| *i < offset).count(),
        }
    };
    to_chars(span.start)..to_chars(span.end)
}
