//! BibTeX format parsing implementation.
//!
//! This module handles the low-level scanning of BibTeX text into
//! [`RawRecord`]s. Everything outside an `@` block is treated as a comment,
//! as BibTeX itself does.

use crate::bibtex::structure::RawRecord;
use crate::bibtex::tags::{MONTH_MACROS, is_standard_entry_type};
use crate::error::ParseError;
use std::collections::HashMap;
use tracing::debug;

/// Parse the content of a BibTeX file, returning its records in file order.
///
/// Records with a non-standard entry type are dropped unless
/// `keep_nonstandard` is set.
pub(crate) fn bibtex_parse<S: AsRef<str>>(
    bibtex_text: S,
    keep_nonstandard: bool,
) -> Result<Vec<RawRecord>, ParseError> {
    let text = bibtex_text.as_ref();
    let mut scanner = Scanner::new(text);
    let mut macros: HashMap<String, String> = MONTH_MACROS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let mut records = Vec::new();

    while scanner.skip_to_block() {
        let line = scanner.current_line();
        scanner.bump();
        scanner.skip_whitespace();

        let block_type = scanner.take_while(|c| c.is_ascii_alphanumeric()).to_lowercase();
        if block_type.is_empty() {
            continue;
        }
        scanner.skip_whitespace();

        let (open, close) = match scanner.peek() {
            Some(b'{') => (b'{', b'}'),
            Some(b'(') => (b'(', b')'),
            _ => {
                if block_type == "comment" {
                    scanner.skip_line();
                } else {
                    debug!(line, "ignoring stray '@{}' outside of an entry", block_type);
                }
                continue;
            }
        };

        match block_type.as_str() {
            "comment" => {
                scanner.take_delimited(open, close, line)?;
            }
            "preamble" => {
                scanner.bump();
                scanner.parse_value(&macros, line)?;
                scanner.expect_close(close, line)?;
            }
            "string" => {
                scanner.bump();
                let (name, value) = parse_string_definition(&mut scanner, &macros, close, line)?;
                macros.insert(name, value);
            }
            _ => {
                scanner.bump();
                let record = parse_entry(&mut scanner, block_type, close, &macros, line)?;
                if keep_nonstandard || is_standard_entry_type(record.entry_type()) {
                    if record.is_empty() {
                        debug!(line, "entry '{}' has no fields", record.id());
                    }
                    records.push(record);
                } else {
                    debug!(
                        line,
                        "skipping '{}': non-standard entry type '{}'",
                        record.id(),
                        record.entry_type()
                    );
                }
            }
        }
    }

    debug!(records = records.len(), "parsed BibTeX input");
    Ok(records)
}

/// Parse the body of an `@string` block after its opening delimiter.
fn parse_string_definition(
    scanner: &mut Scanner<'_>,
    macros: &HashMap<String, String>,
    close: u8,
    line: usize,
) -> Result<(String, String), ParseError> {
    scanner.skip_whitespace();
    let name = scanner.take_while(is_name_byte);
    if name.is_empty() {
        return Err(ParseError::at_line(line, "@string definition without a name"));
    }
    let name = name.to_lowercase();

    scanner.skip_whitespace();
    scanner.expect(b'=', line, || format!("expected '=' after @string name '{}'", name))?;
    let value = scanner.parse_value(macros, line)?;
    scanner.expect_close(close, line)?;

    Ok((name, value))
}

/// Parse the body of a regular entry after its opening delimiter.
fn parse_entry(
    scanner: &mut Scanner<'_>,
    entry_type: String,
    close: u8,
    macros: &HashMap<String, String>,
    line: usize,
) -> Result<RawRecord, ParseError> {
    scanner.skip_whitespace();
    let key = scanner.take_while(is_key_byte);
    if key.is_empty() {
        return Err(ParseError::at_line(
            line,
            format!("@{} entry without a cite key", entry_type),
        ));
    }

    let mut record = RawRecord::new(key, entry_type);
    record.line = line;

    scanner.skip_whitespace();
    match scanner.peek() {
        Some(c) if c == close => {
            scanner.bump();
            return Ok(record);
        }
        Some(b',') => scanner.bump(),
        _ => {
            return Err(ParseError::at_line(
                line,
                format!("expected ',' after cite key '{}'", record.id),
            ));
        }
    }

    loop {
        scanner.skip_whitespace();
        match scanner.peek() {
            Some(c) if c == close => {
                scanner.bump();
                return Ok(record);
            }
            None => {
                return Err(ParseError::at_line(
                    line,
                    format!("unterminated entry '{}'", record.id),
                ));
            }
            _ => {}
        }

        let name = scanner.take_while(is_name_byte);
        if name.is_empty() {
            return Err(ParseError::at_line(
                line,
                format!("expected a field name in entry '{}'", record.id),
            ));
        }

        scanner.skip_whitespace();
        scanner.expect(b'=', line, || {
            format!("expected '=' after field '{}' in entry '{}'", name, record.id)
        })?;
        let value = scanner.parse_value(macros, line)?;
        if record.insert(name, value).is_some() {
            debug!(line, "duplicate field '{}' in '{}', keeping the last value", name, record.id);
        }

        scanner.skip_whitespace();
        match scanner.peek() {
            Some(b',') => scanner.bump(),
            Some(c) if c == close => {}
            _ => {
                return Err(ParseError::at_line(
                    line,
                    format!("expected ',' after field '{}' in entry '{}'", name, record.id),
                ));
            }
        }
    }
}

/// Characters allowed in field, macro and entry type names.
fn is_name_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b'-' | b':' | b'.' | b'+' | b'/')
}

/// Characters allowed in a cite key.
fn is_key_byte(c: u8) -> bool {
    !c.is_ascii_whitespace() && !matches!(c, b',' | b'{' | b'}' | b'(' | b')' | b'=' | b'"' | b'#')
}

/// Byte cursor over BibTeX text.
///
/// Every structural character is ASCII, so positions where scanning stops are
/// always valid `str` boundaries.
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    line_mark: (usize, usize),
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line_mark: (0, 1),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        if self.pos < self.text.len() {
            self.pos += 1;
        }
    }

    /// 1-based line number of the current position.
    fn current_line(&mut self) -> usize {
        let (mut from, mut line) = self.line_mark;
        if self.pos < from {
            from = 0;
            line = 1;
        }
        line += self.text.as_bytes()[from..self.pos]
            .iter()
            .filter(|&&c| c == b'\n')
            .count();
        self.line_mark = (self.pos, line);
        line
    }

    /// Move to the next `@`, returning false at end of input.
    fn skip_to_block(&mut self) -> bool {
        match self.text[self.pos..].find('@') {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => {
                self.pos = self.text.len();
                false
            }
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|c| c.is_ascii_whitespace());
    }

    fn skip_line(&mut self) {
        self.take_while(|c| c != b'\n');
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && pred(bytes[self.pos]) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    fn expect(
        &mut self,
        expected: u8,
        line: usize,
        message: impl FnOnce() -> String,
    ) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(ParseError::at_line(line, message()))
        }
    }

    fn expect_close(&mut self, close: u8, line: usize) -> Result<(), ParseError> {
        self.skip_whitespace();
        self.expect(close, line, || {
            format!("expected closing '{}'", char::from(close))
        })
    }

    /// Consume a balanced `open ... close` group starting at the current
    /// position and return its inner text, nested groups included.
    fn take_delimited(&mut self, open: u8, close: u8, line: usize) -> Result<&'a str, ParseError> {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;

        while self.pos < bytes.len() {
            let c = bytes[self.pos];
            self.pos += 1;
            if c == open {
                depth += 1;
            } else if c == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Ok(&self.text[start + 1..self.pos - 1]);
                }
            }
        }

        Err(ParseError::at_line(
            line,
            format!("unterminated '{}' group", char::from(open)),
        ))
    }

    /// Consume a `"..."` value and return its inner text. Quotes inside a
    /// brace group do not terminate the value.
    fn take_quoted(&mut self, line: usize) -> Result<&'a str, ParseError> {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;
        self.pos += 1;

        while self.pos < bytes.len() {
            let c = bytes[self.pos];
            self.pos += 1;
            match c {
                b'{' => depth += 1,
                b'}' => depth = depth.saturating_sub(1),
                b'"' if depth == 0 => return Ok(&self.text[start + 1..self.pos - 1]),
                _ => {}
            }
        }

        Err(ParseError::at_line(line, "unterminated quoted value"))
    }

    /// Parse a field value: braced, quoted, numeric or macro parts joined by `#`.
    fn parse_value(
        &mut self,
        macros: &HashMap<String, String>,
        line: usize,
    ) -> Result<String, ParseError> {
        let mut value = String::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'{') => value.push_str(self.take_delimited(b'{', b'}', line)?),
                Some(b'"') => value.push_str(self.take_quoted(line)?),
                Some(c) if c.is_ascii_digit() => value.push_str(self.take_while(is_name_byte)),
                Some(c) if is_name_byte(c) => {
                    let name = self.take_while(is_name_byte);
                    match macros.get(&name.to_lowercase()) {
                        Some(expansion) => value.push_str(expansion),
                        None => {
                            debug!(line, "undefined macro '{}' kept verbatim", name);
                            value.push_str(name);
                        }
                    }
                }
                _ => return Err(ParseError::at_line(line, "expected a field value")),
            }

            self.skip_whitespace();
            if self.peek() == Some(b'#') {
                self.bump();
            } else {
                return Ok(value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bibtex::tags::BibtexField;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(input: &str) -> Vec<RawRecord> {
        bibtex_parse(input, false).unwrap()
    }

    #[test]
    fn test_parse_simple_entry() {
        let input = r#"
@article{Smith2024,
    author = {Smith, John},
    title = {A Great Paper},
    year = {2024},
    journal = {Nature},
}
"#;
        let records = parse(input);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.id(), "Smith2024");
        assert_eq!(record.entry_type(), "article");
        assert_eq!(record.line(), 2);
        assert_eq!(record.field(&BibtexField::Author), Some("Smith, John"));
        assert_eq!(record.field(&BibtexField::Title), Some("A Great Paper"));
        assert_eq!(record.field(&BibtexField::Year), Some("2024"));
        assert_eq!(record.field(&BibtexField::Journal), Some("Nature"));
    }

    #[test]
    fn test_entry_type_and_field_names_are_lower_cased() {
        let records = parse("@InProceedings{key, BookTitle = {Proc}, YEAR = 2020}");
        assert_eq!(records[0].entry_type(), "inproceedings");
        assert_eq!(records[0].field(&BibtexField::BookTitle), Some("Proc"));
        assert_eq!(records[0].field(&BibtexField::Year), Some("2020"));
    }

    #[rstest]
    #[case("title = {A {B}ook about {LaTeX}}", "A {B}ook about {LaTeX}")]
    #[case(r#"title = "Quoted {"Inner"} value""#, r#"Quoted {"Inner"} value"#)]
    #[case("title = 1999", "1999")]
    #[case(r#"title = "Part " # {two}"#, "Part two")]
    #[case("title = {Line one\n    line two}", "Line one\n    line two")]
    #[case("title = {Grüning über Ärzte}", "Grüning über Ärzte")]
    fn test_parse_field_values(#[case] field: &str, #[case] expected: &str) {
        let input = format!("@misc{{key, {} }}", field);
        let records = parse(&input);
        assert_eq!(records[0].field(&BibtexField::Title), Some(expected));
    }

    #[test]
    fn test_parse_string_macros() {
        let input = r#"
@String{nat = "Nature"}
@article{Test2024,
    journal = NAT,
    note = "Published in " # nat,
    month = jun,
    publisher = undefinedmacro,
}
"#;
        let records = parse(input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("journal"), Some("Nature"));
        assert_eq!(records[0].get("note"), Some("Published in Nature"));
        assert_eq!(records[0].get("month"), Some("June"));
        assert_eq!(records[0].get("publisher"), Some("undefinedmacro"));
    }

    #[test]
    fn test_parse_parenthesized_entry() {
        let records = parse("@book(key2000, title = {Parens (and more)}, year = 2000)");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "key2000");
        assert_eq!(records[0].get("title"), Some("Parens (and more)"));
    }

    #[test]
    fn test_comments_and_preambles_are_skipped() {
        let input = r#"
This text is outside any entry, mail me at someone@example.org.
@comment{ @article{hidden, year = 1} }
@preamble{ "\newcommand{\noop}[1]{}" }
% line comment
@article{visible, year = 2001}
"#;
        let records = parse(input);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "visible");
        assert_eq!(records[0].line(), 6);
    }

    #[test]
    fn test_parse_multiple_entries_in_order() {
        let input = r#"
@article{First2024, title = {First Paper}}

@book{Second2024, title = {Second Book}}
@inproceedings{Third2024, title = {Third Talk},}
"#;
        let records = parse(input);
        let ids: Vec<_> = records.iter().map(RawRecord::id).collect();
        assert_eq!(ids, vec!["First2024", "Second2024", "Third2024"]);
    }

    #[test]
    fn test_nonstandard_entry_types() {
        let input = "@online{web, url = {https://example.com}}\n@article{paper, year = 2020}";

        let records = bibtex_parse(input, false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "paper");

        let records = bibtex_parse(input, true).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].entry_type(), "online");
    }

    #[test]
    fn test_duplicate_field_keeps_last_value() {
        let records = parse("@misc{key, year = 2019, year = 2020}");
        assert_eq!(records[0].get("year"), Some("2020"));
    }

    #[test]
    fn test_entry_without_fields() {
        let records = parse("@misc{lonely}");
        assert_eq!(records.len(), 1);
        assert!(records[0].is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n just prose \n").is_empty());
    }

    #[rstest]
    #[case("@article{, title = {x}}", 1)]
    #[case("\n\n@article{key title = {x}}", 3)]
    #[case("@article{key, title {x}}", 1)]
    #[case("@article{key,\n title = {never closed,\n}", 1)]
    #[case("@article{key, title = \"open}", 1)]
    #[case("\n@article{key, title = {x}", 2)]
    #[case("@article{key, title = {x} year = 2}", 1)]
    #[case("@string{= \"x\"}", 1)]
    fn test_parse_errors_report_block_line(#[case] input: &str, #[case] line: usize) {
        let error = bibtex_parse(input, false).unwrap_err();
        assert_eq!(error.line, line);
    }
}
