//! Quote-aware tokenizing of accounting file lines.
//!
//! Accounting lines are space-delimited; fields containing spaces are wrapped
//! in double quotes and an embedded quote is written twice (`""`).

use csv::{Reader, ReaderBuilder, StringRecord};
use std::io::Read;

/// Field delimiter of the accounting file.
pub const DELIMITER: u8 = b' ';

/// Quote character of the accounting file.
pub const QUOTE: u8 = b'"';

/// Build a tokenizing reader that yields one record per line.
///
/// Records are allowed to differ in length since each event type has its own
/// layout and job-finish lines carry variable-length host lists.
pub fn token_reader<R: Read>(rdr: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(DELIMITER)
        .quote(QUOTE)
        .double_quote(true)
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr)
}

/// Split a single accounting line into tokens, with quotes stripped.
///
/// Returns an empty vector for an empty line.
pub fn split_line(line: &str) -> Result<Vec<String>, csv::Error> {
    let mut reader = token_reader(line.as_bytes());
    let mut record = StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(record.iter().map(str::to_string).collect())
    } else {
        Ok(Vec::new())
    }
}
