//! Catalog loading.
//!
//! The catalog is a delimited text file with a header row, stored in a
//! legacy single-byte encoding. It is decoded as a whole, parsed once, and
//! kept as an immutable table the reports borrow from.

use crate::{
    errors::ReportError,
    models::{BookRecord, REQUIRED_COLUMNS},
};
use anyhow::Result;
use csv::ReaderBuilder;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

/// Ordered, read-only list of catalog rows.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<BookRecord>,
}

impl Catalog {
    pub fn new(books: Vec<BookRecord>) -> Self {
        Catalog { books }
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Reads and parses a catalog file.
///
/// # Arguments
/// * `path` - The catalog file.
/// * `encoding` - Text encoding of the file. A leading BOM, if any, wins.
/// * `delimiter` - Field separator byte.
///
/// # Returns
/// The catalog rows in file order.
pub fn load_catalog(path: &Path, encoding: &'static Encoding, delimiter: u8) -> Result<Catalog> {
    let bytes = fs::read(path).map_err(|e| ReportError::io(path, e))?;

    let (text, had_errors) = encoding.decode_with_bom_removal(&bytes);
    if had_errors || has_unassigned_bytes(encoding, &text) {
        Err(ReportError::Decoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;
    }

    let catalog = parse_catalog(&text, delimiter)?;
    log::info!("Loaded {} books from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Windows code pages leave a few bytes unassigned (0x98 in windows-1251).
/// `encoding_rs` passes them through as C1 controls instead of failing.
fn has_unassigned_bytes(encoding: &'static Encoding, text: &str) -> bool {
    encoding.name().starts_with("windows-")
        && text.chars().any(|c| ('\u{80}'..='\u{9f}').contains(&c))
}

/// Parses already decoded catalog text.
///
/// Fields past the end of the header are dropped.
pub fn parse_catalog(text: &str, delimiter: u8) -> Result<Catalog> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(ReportError::from)?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            Err(ReportError::MissingColumn(column.to_string()))?;
        }
    }
    log::debug!("Catalog header: {:?}", headers);

    let mut books = Vec::new();
    for rec in reader.deserialize::<BookRecord>() {
        let book: BookRecord = rec.map_err(ReportError::from)?;
        books.push(book);
    }

    Ok(Catalog::new(books))
}
