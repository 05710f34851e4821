//! Lazy record reader over any buffered input

use std::io::BufRead;

use crate::error::{ParseError, Span};

use super::lexer::{classify, is_skipped, normalize_line, Line};
use super::record::Record;

/// A physical input line with its position
struct RawLine {
    number: usize,
    span: Span,
    text: String,
}

/// The block currently being read, with its normalized header text
struct OpenBlock {
    record: Record,
    header: String,
}

/// Iterator of [`Record`]s read one `define` block at a time
///
/// The first error ends the iteration.
pub struct RecordReader<R> {
    reader: R,
    buf: String,
    offset: usize,
    line_no: usize,
    finished: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            offset: 0,
            line_no: 0,
            finished: false,
        }
    }

    fn next_line(&mut self) -> Result<Option<RawLine>, ParseError> {
        self.buf.clear();
        let read = self
            .reader
            .read_line(&mut self.buf)
            .map_err(|source| ParseError::Io {
                line: self.line_no + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }

        self.line_no += 1;
        let start = self.offset;
        self.offset += read;
        let text = self.buf.trim_end_matches(&['\n', '\r'][..]).to_string();
        Ok(Some(RawLine {
            number: self.line_no,
            span: start..start + text.len(),
            text,
        }))
    }

    fn read_record(&mut self) -> Result<Option<Record>, ParseError> {
        let mut open: Option<OpenBlock> = None;

        while let Some(raw) = self.next_line()? {
            let line = normalize_line(&raw.text);
            if is_skipped(&line) {
                continue;
            }

            match classify(&line) {
                Line::Header(object_type) => {
                    if let Some(block) = &open {
                        return Err(ParseError::syntax(
                            raw.number,
                            raw.span,
                            line.clone(),
                            format!(
                                "nested object definition inside `{}` (line {})",
                                block.header, block.record.line
                            ),
                        ));
                    }
                    open = Some(OpenBlock {
                        record: Record::new(object_type, raw.number, raw.span),
                        header: line.clone(),
                    });
                }
                Line::Close => match open.take() {
                    Some(block) => return Ok(Some(block.record)),
                    None => return Err(expected_header(raw, &line)),
                },
                Line::Property { key, value } => match open.as_mut() {
                    Some(block) => {
                        block.record.properties.insert(key, value);
                    }
                    None => return Err(expected_header(raw, &line)),
                },
            }
        }

        match open {
            Some(block) => Err(ParseError::syntax(
                block.record.line,
                block.record.span,
                block.header,
                "unterminated object definition",
            )),
            None => Ok(None),
        }
    }
}

fn expected_header(raw: RawLine, line: &str) -> ParseError {
    ParseError::syntax(raw.number, raw.span, line, "expected `define <type> {`")
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
