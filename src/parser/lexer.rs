//! Line lexer for legacy object definitions using logos

use logos::Logos;

/// Tokens of a `define <type> {` header line
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r" +")]
pub enum Token {
    #[token("define")]
    Define,

    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,

    // Any run of non-space characters; a lone brace lexes as a brace
    #[regex(r"[^ ]+", |lex| lex.slice().to_string(), priority = 1)]
    Word(String),
}

/// Classification of a single normalized, non-empty line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `define <type> {`
    Header(String),
    /// `}`
    Close,
    /// `<key> <value>`; the value may be empty
    Property { key: &'a str, value: &'a str },
}

/// Strip surrounding whitespace and turn tabs into single spaces
pub fn normalize_line(raw: &str) -> String {
    raw.trim().replace('\t', " ")
}

/// Blank lines and `#` comments carry no content
pub fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// Lex input string into header tokens, dropping anything logos rejects
pub fn lex(input: &str) -> impl Iterator<Item = Token> + '_ {
    Token::lexer(input).filter_map(|tok| tok.ok())
}

impl Token {
    fn text(&self) -> &str {
        match self {
            Token::Define => "define",
            Token::BraceOpen => "{",
            Token::BraceClose => "}",
            Token::Word(word) => word.as_str(),
        }
    }
}

/// Parse `define <type> {`, returning the object type
///
/// The type is any run of non-space characters, braces included, so
/// `define host{` and `define a{b {` are both headers.
pub fn header_type(line: &str) -> Option<String> {
    let tokens: Vec<Token> = lex(line).collect();
    match tokens.as_slice() {
        [Token::Define, object_type, Token::BraceOpen] => Some(object_type.text().to_string()),
        [Token::Define, Token::Word(word)] => word
            .strip_suffix('{')
            .filter(|object_type| !object_type.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// Classify a normalized line (see [`normalize_line`])
pub fn classify(line: &str) -> Line<'_> {
    if line == "}" {
        return Line::Close;
    }
    if let Some(object_type) = header_type(line) {
        return Line::Header(object_type);
    }
    let line = line.trim_start_matches(' ');
    match line.split_once(' ') {
        Some((key, value)) => Line::Property {
            key,
            value: value.trim_start_matches(' '),
        },
        None => Line::Property {
            key: line,
            value: "",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_tokens() {
        let tokens: Vec<_> = lex("define service {").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Define,
                Token::Word("service".to_string()),
                Token::BraceOpen
            ]
        );
    }

    #[test]
    fn test_define_prefix_is_a_word() {
        let tokens: Vec<_> = lex("defined host{").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Word("defined".to_string()),
                Token::Word("host{".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_type() {
        assert_eq!(header_type("define host {"), Some("host".to_string()));
        assert_eq!(header_type("define   hostgroup{"), Some("hostgroup".to_string()));
        assert_eq!(header_type("define host { extra"), None);
        assert_eq!(header_type("define {"), None);
        assert_eq!(header_type("definehost {"), None);
        assert_eq!(header_type("define host"), None);
        assert_eq!(header_type("define host {{"), None);
    }

    #[test]
    fn test_header_type_allows_braces_inside_the_type() {
        assert_eq!(header_type("define a{b {"), Some("a{b".to_string()));
        assert_eq!(header_type("define a{b{"), Some("a{b".to_string()));
        assert_eq!(header_type("define host}{"), Some("host}".to_string()));
        assert_eq!(header_type("define { {"), Some("{".to_string()));
        assert_eq!(header_type("define {{"), Some("{".to_string()));
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(normalize_line("\thost_name\trouter1  \n"), "host_name router1");
        assert!(is_skipped(&normalize_line("   ")));
        assert!(is_skipped(&normalize_line("  # a comment")));
        assert!(!is_skipped(&normalize_line("use generic-host")));
    }

    #[test]
    fn test_classify_property() {
        assert_eq!(
            classify("check_command check_http!-H!example.com"),
            Line::Property {
                key: "check_command",
                value: "check_http!-H!example.com"
            }
        );
        assert_eq!(
            classify("alias   Web   Servers"),
            Line::Property {
                key: "alias",
                value: "Web   Servers"
            }
        );
        assert_eq!(
            classify("notes"),
            Line::Property {
                key: "notes",
                value: ""
            }
        );
    }

    #[test]
    fn test_classify_structure() {
        assert_eq!(classify("}"), Line::Close);
        assert_eq!(classify("define command {"), Line::Header("command".to_string()));
    }
}
