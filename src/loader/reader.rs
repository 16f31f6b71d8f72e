//! Header-driven reader for delimited extract files.
//!
//! The first non-blank line is the header. Column names are upper-cased and
//! trimmed; every later line becomes a [`Row`] whose fields are already
//! cleaned. Invalid UTF-8 is replaced rather than rejected.
//!
//! Fields that open with a double quote run to the matching closing quote, so
//! `"CAMERA, TELEVISION"` stays one field in a comma-delimited file. A doubled
//! quote inside a quoted field is a literal quote. Quoting never spans lines.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crate::error::{CatalogError, Result};

/// Candidate delimiters in tie-break order.
const CANDIDATES: [u8; 3] = [b'\t', b'|', b','];

/// Column name to field position.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let positions = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_ref().to_uppercase(), idx))
            .collect();
        Self { positions }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Each entry of `required` lists alternative names; one must be present.
    pub fn require(&self, required: &[&[&str]]) -> Result<()> {
        for alternatives in required {
            if !alternatives.iter().any(|name| self.contains(name)) {
                return Err(CatalogError::Load(format!(
                    "missing required column {}",
                    alternatives.join(" or ")
                )));
            }
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// One data line, cleaned and addressable by column name.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<ColumnMap>,
    fields: Vec<String>,
    line: usize,
}

impl Row {
    /// The cleaned value, or `""` when the column is absent or the line short.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.columns
            .position(name)
            .and_then(|idx| self.fields.get(idx))
            .map_or("", String::as_str)
    }

    /// Non-empty value of the first listed column that has one.
    #[must_use]
    pub fn first_of(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .map(|name| self.get(name))
            .find(|value| !value.is_empty())
    }

    #[must_use]
    pub fn optional(&self, name: &str) -> Option<String> {
        let value = self.get(name);
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Number of fields actually present on the line.
    #[must_use]
    pub fn width(&self) -> usize {
        self.fields.len()
    }

    /// 1-based line number in the source file.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

#[derive(Debug)]
pub struct TableReader<R> {
    reader: R,
    delimiter: u8,
    columns: Arc<ColumnMap>,
    line: usize,
    buf: Vec<u8>,
    /// First data row of a headerless file, read while probing for a header.
    pending: Option<Row>,
}

impl TableReader<BufReader<File>> {
    pub fn open(path: &Path, delimiter: Option<char>) -> Result<Self> {
        let file = File::open(path)
            .map_err(|err| CatalogError::Load(format!("open {}: {err}", path.display())))?;
        Self::from_reader(BufReader::new(file), delimiter)
    }
}

impl<R: BufRead> TableReader<R> {
    /// Read the header line, detecting the delimiter from it when `None`.
    pub fn from_reader(reader: R, delimiter: Option<char>) -> Result<Self> {
        let (mut table, first) = Self::start(reader, delimiter)?;
        let Some(header) = first else {
            return Err(CatalogError::Load("file has no header line".to_string()));
        };
        let names = split_fields(&header, table.delimiter);
        table.columns = Arc::new(ColumnMap::from_names(&names));
        Ok(table)
    }

    /// Reader for a file with a fixed column order and an optional header.
    ///
    /// `names` label the columns by position. The first line is dropped as a
    /// header only when its first field contains `header_marker`
    /// (case-insensitive); otherwise it is the first data row.
    pub fn positional(
        reader: R,
        delimiter: Option<char>,
        names: &[&str],
        header_marker: &str,
    ) -> Result<Self> {
        let (mut table, first) = Self::start(reader, delimiter)?;
        table.columns = Arc::new(ColumnMap::from_names(names));
        if let Some(line) = first {
            let fields = split_fields(&line, table.delimiter);
            let is_header = fields
                .first()
                .is_some_and(|field| field.to_lowercase().contains(header_marker));
            if !is_header {
                table.pending = Some(Row {
                    columns: Arc::clone(&table.columns),
                    fields,
                    line: table.line,
                });
            }
        }
        Ok(table)
    }

    /// Resolve the delimiter and read the first non-blank line.
    fn start(reader: R, delimiter: Option<char>) -> Result<(Self, Option<String>)> {
        let delimiter = match delimiter {
            Some(c) if c.is_ascii() => Some(c as u8),
            Some(c) => {
                return Err(CatalogError::Config(format!(
                    "delimiter {c:?} is not a single-byte character"
                )));
            }
            None => None,
        };

        let mut table = Self {
            reader,
            delimiter: delimiter.unwrap_or(b'\t'),
            columns: Arc::default(),
            line: 0,
            buf: Vec::new(),
            pending: None,
        };

        let first = loop {
            match table.next_line()? {
                Some(line) if line.trim().is_empty() => {}
                other => break other,
            }
        };

        if let (None, Some(line)) = (delimiter, &first) {
            table.delimiter = detect_delimiter_byte(line);
        }
        Ok((table, first))
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter as char
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

impl<R: BufRead> Iterator for TableReader<R> {
    type Item = Result<Row>;

    /// Yields data rows, skipping blank lines.
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(row) = self.pending.take() {
            return Some(Ok(row));
        }
        loop {
            match self.next_line() {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => {
                    return Some(Ok(Row {
                        columns: Arc::clone(&self.columns),
                        fields: split_fields(&line, self.delimiter),
                        line: self.line,
                    }));
                }
                Ok(None) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Most frequent of tab, pipe and comma in `header`. Ties go to tab, then pipe.
#[must_use]
pub fn detect_delimiter(header: &str) -> char {
    char::from(detect_delimiter_byte(header))
}

fn detect_delimiter_byte(header: &str) -> u8 {
    let bytes = header.as_bytes();
    let mut best = (CANDIDATES[0], memchr::memchr_iter(CANDIDATES[0], bytes).count());
    for &candidate in &CANDIDATES[1..] {
        let count = memchr::memchr_iter(candidate, bytes).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// Strip surrounding whitespace and quotes, collapse inner whitespace runs.
#[must_use]
pub fn clean_field(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\''))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cleaned fields of one line. A line that ends inside an open quote is split
/// on every delimiter instead.
fn split_fields(line: &str, delimiter: u8) -> Vec<String> {
    if delimiter != b'"' && memchr::memchr(b'"', line.as_bytes()).is_some() {
        if let Some(fields) = split_quoted(line, delimiter) {
            return fields;
        }
    }
    split_plain(line, delimiter)
}

fn split_plain(line: &str, delimiter: u8) -> Vec<String> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut start = 0;
    for pos in memchr::memchr_iter(delimiter, bytes) {
        fields.push(clean_field(&line[start..pos]));
        start = pos + 1;
    }
    fields.push(clean_field(&line[start..]));
    fields
}

/// `None` when a quoted field is still open at the end of the line.
fn split_quoted(line: &str, delimiter: u8) -> Option<Vec<String>> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut pos = 0;
    loop {
        let start = skip_blanks(bytes, pos, delimiter);
        if bytes.get(start) != Some(&b'"') {
            match memchr::memchr(delimiter, &bytes[pos..]) {
                Some(offset) => {
                    fields.push(clean_field(&line[pos..pos + offset]));
                    pos += offset + 1;
                    continue;
                }
                None => {
                    fields.push(clean_field(&line[pos..]));
                    return Some(fields);
                }
            }
        }

        let mut value = String::new();
        let mut cursor = start + 1;
        loop {
            let quote = cursor + memchr::memchr(b'"', &bytes[cursor..])?;
            value.push_str(&line[cursor..quote]);
            if bytes.get(quote + 1) == Some(&b'"') {
                value.push('"');
                cursor = quote + 2;
                continue;
            }
            let end = skip_blanks(bytes, quote + 1, delimiter);
            match bytes.get(end) {
                None => {
                    fields.push(clean_field(&value));
                    return Some(fields);
                }
                Some(&b) if b == delimiter => {
                    fields.push(clean_field(&value));
                    pos = end + 1;
                    break;
                }
                // Stray quote inside the field.
                Some(_) => {
                    value.push('"');
                    cursor = quote + 1;
                }
            }
        }
    }
}

/// Index of the first byte at or after `pos` that is not blank, treating the
/// delimiter as non-blank even when it is a tab.
fn skip_blanks(bytes: &[u8], mut pos: usize, delimiter: u8) -> usize {
    while let Some(&b) = bytes.get(pos) {
        if b == delimiter || !matches!(b, b' ' | b'\t') {
            break;
        }
        pos += 1;
    }
    pos
}
