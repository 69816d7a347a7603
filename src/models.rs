use crate::errors::ReportError;
use anyhow::Result;
use getset::Getters;
use rust_decimal::prelude::*;
use serde::Deserialize;
use std::fmt;

/// Header names of the catalog columns a `BookRecord` is built from.
pub const TITLE_COLUMN: &str = "Book-Title";
pub const AUTHOR_COLUMN: &str = "Book-Author";
pub const YEAR_COLUMN: &str = "Year-Of-Publication";
pub const PUBLISHER_COLUMN: &str = "Publisher";

pub const REQUIRED_COLUMNS: [&str; 4] =
    [TITLE_COLUMN, AUTHOR_COLUMN, YEAR_COLUMN, PUBLISHER_COLUMN];

/// One catalog row. Columns other than the four below are skipped on load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct BookRecord {
    #[getset(get = "pub")]
    #[serde(rename = "Book-Title")]
    title: String,
    #[getset(get = "pub")]
    #[serde(rename = "Book-Author")]
    author: String,
    #[getset(get = "pub")]
    #[serde(rename = "Year-Of-Publication")]
    year_of_publication: String,
    #[getset(get = "pub")]
    #[serde(rename = "Publisher")]
    publisher: String,
}

impl BookRecord {
    #[cfg(test)]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year_of_publication: impl Into<String>,
        publisher: impl Into<String>,
    ) -> Self {
        BookRecord {
            title: title.into(),
            author: author.into(),
            year_of_publication: year_of_publication.into(),
            publisher: publisher.into(),
        }
    }

    /// Title length in characters, not bytes.
    pub fn title_len(&self) -> usize {
        self.title.chars().count()
    }
}

/// A currency code paired with its rate, as found in the rate file.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ExchangeRate {
    #[getset(get = "pub")]
    code: String,
    #[getset(get = "pub")]
    value: String,
}

impl ExchangeRate {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        ExchangeRate {
            code: code.into(),
            value: value.into(),
        }
    }

    /// Parses the rate text into a decimal.
    ///
    /// Rate files written with a Russian locale use a comma as decimal
    /// separator, so both `90,1234` and `90.1234` are accepted.
    ///
    /// # Returns
    /// The rate, or `ReportError::InvalidRate` when the text is not a decimal.
    pub fn rate(&self) -> Result<Decimal> {
        let normalized = self.value.trim().replace(',', ".");
        match Decimal::from_str(&normalized) {
            Ok(rate) => Ok(rate),
            Err(_) => Err(ReportError::InvalidRate {
                code: self.code.clone(),
                value: self.value.clone(),
            })?,
        }
    }
}

/// A formatted reference, rendered as `Author. Title - Year`.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct BibliographyEntry {
    #[getset(get = "pub")]
    author: String,
    #[getset(get = "pub")]
    title: String,
    #[getset(get = "pub")]
    year: String,
}

impl From<&BookRecord> for BibliographyEntry {
    fn from(book: &BookRecord) -> Self {
        BibliographyEntry {
            author: book.author.clone(),
            title: book.title.clone(),
            year: book.year_of_publication.clone(),
        }
    }
}

impl fmt::Display for BibliographyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} - {}", self.author, self.title, self.year)
    }
}

/// A title together with the number of catalog rows carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TitleCount {
    #[getset(get = "pub")]
    title: String,
    #[getset(get = "pub")]
    count: usize,
}

impl TitleCount {
    pub fn new(title: impl Into<String>, count: usize) -> Self {
        TitleCount {
            title: title.into(),
            count,
        }
    }
}
