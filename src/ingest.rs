use crate::model::Record;
use crate::parser::LineParser;
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;

/// Records parsed from a log, in file order.
#[derive(Debug, Default)]
pub struct Ingested {
    pub records: Vec<Record>,
    /// Non-blank lines that failed to parse.
    pub skipped: usize,
}

/// Parse every line of `content`. Malformed lines are logged and skipped.
pub fn parse_str(parser: &LineParser, content: &str) -> Ingested {
    let mut ingested = Ingested::default();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parser.parse_line(line) {
            Ok(record) => ingested.records.push(record),
            Err(e) => {
                warn!("skipping line {}: {}", i + 1, e);
                ingested.skipped += 1;
            }
        }
    }
    debug!(
        "parsed {} records, skipped {} lines",
        ingested.records.len(),
        ingested.skipped
    );
    ingested
}

pub fn read_file(parser: &LineParser, file: &Path) -> io::Result<Ingested> {
    let content = fs::read_to_string(file)?;
    Ok(parse_str(parser, &content))
}
