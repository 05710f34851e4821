//! Reader for legacy `define <type> { ... }` object definitions

pub mod lexer;
mod reader;
mod record;

pub use reader::RecordReader;
pub use record::{Properties, Record};

use crate::error::ParseError;

/// Parse a complete source text into records
pub fn parse(source: &str) -> Result<Vec<Record>, ParseError> {
    RecordReader::new(source.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collects_records() {
        let records = parse("define host {\n host_name a\n}\ndefine host {\n host_name b\n}\n")
            .expect("Should parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].properties.get("host_name"), Some("b"));
    }

    #[test]
    fn test_parse_stops_at_first_error() {
        let err = parse("define host {\n}\nnot a header\n").unwrap_err();
        assert_eq!(err.line(), 3);
    }
}
