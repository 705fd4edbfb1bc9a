//! CSV reading and writing
//!
//! A small RFC 4180 style codec: comma separated fields, double quotes around
//! fields that need them, quotes doubled inside quoted fields. The parser is
//! deliberately lenient where spreadsheet tooling is lenient (blank lines are
//! skipped, short records are padded with empty cells, CRLF and LF both
//! terminate records) and strict where silent data loss would follow (records
//! wider than the header and unterminated quotes are errors).

use crate::table::Table;

/// Error produced when CSV content cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line where the offending record starts.
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        ParseError {
            line,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for ParseError {}

/// Parse CSV text into a [`Table`].
///
/// The first record is the header. Records with fewer fields than the header
/// are padded with empty cells; records with more fields are rejected.
pub fn parse(source: &str) -> Result<Table, ParseError> {
    let mut records = parse_records(source)?;
    if records.is_empty() {
        return Err(ParseError::new(1, "empty input, expected a header record"));
    }

    let (_, columns) = records.remove(0);
    let width = columns.len();

    let mut rows = Vec::with_capacity(records.len());
    for (line, mut fields) in records {
        if fields.len() > width {
            return Err(ParseError::new(
                line,
                format!("record has {} fields, header has {}", fields.len(), width),
            ));
        }
        while fields.len() < width {
            fields.push(String::new());
        }
        rows.push(fields);
    }

    Ok(Table::from_parts(columns, rows))
}

/// Serialize a [`Table`] back to CSV text with a trailing newline.
pub fn serialize(table: &Table) -> String {
    let mut out = String::new();
    write_record(&mut out, table.columns());
    for row in table.rows() {
        write_record(&mut out, row);
    }
    out
}

/// Split raw text into records, each tagged with its starting line.
fn parse_records(source: &str) -> Result<Vec<(usize, Vec<String>)>, ParseError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut saw_quote = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            // A quote only opens a quoted field at the start of the field;
            // quotes later in a bare field stay literal.
            '"' if field.is_empty() => {
                in_quotes = true;
                saw_quote = true;
            }
            ',' => fields.push(std::mem::take(&mut field)),
            // CR outside quotes is dropped so CRLF and LF read the same.
            '\r' => {}
            '\n' => {
                line += 1;
                if !field.is_empty() || !fields.is_empty() || saw_quote {
                    fields.push(std::mem::take(&mut field));
                    records.push((record_line, std::mem::take(&mut fields)));
                }
                saw_quote = false;
                record_line = line;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(ParseError::new(record_line, "unterminated quoted field"));
    }

    // Last record when the input lacks a trailing newline.
    if !field.is_empty() || !fields.is_empty() || saw_quote {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}

fn write_record(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if needs_quoting(field) {
            out.push('"');
            for ch in field.chars() {
                if ch == '"' {
                    out.push('"');
                }
                out.push(ch);
            }
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

fn needs_quoting(field: &str) -> bool {
    field
        .chars()
        .any(|ch| matches!(ch, ',' | '"' | '\n' | '\r'))
}
