use crate::{
    errors::ReportError,
    reports::{DEFAULT_BIBLIOGRAPHY_SIZE, DEFAULT_TITLE_THRESHOLD},
};
use anyhow::Result;
use clap::Parser;
use encoding_rs::Encoding;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "book-reports")]
#[command(about = "Reports over a book catalog and a currency rate file", long_about = None)]
pub struct Args {
    /// Delimited book catalog with a header row
    #[arg(short = 'c', long, default_value = "books-en.csv")]
    pub catalog: PathBuf,

    /// XML file with CharCode/Value elements
    #[arg(short = 'r', long, default_value = "currency.xml")]
    pub rates: PathBuf,

    /// Where the bibliography is written (overwritten on every run)
    #[arg(short = 'o', long, default_value = "result.txt")]
    pub output: PathBuf,

    /// Only show these currency codes (can be specified multiple times)
    #[arg(long = "currency")]
    pub currencies: Vec<String>,

    /// Author to look up; prompted for on stdin when omitted
    #[arg(short = 'a', long)]
    pub author: Option<String>,

    /// Text encoding of the catalog
    #[arg(long, default_value = "windows-1251")]
    pub encoding: String,

    /// Catalog field separator
    #[arg(long, default_value = ";")]
    pub delimiter: String,

    /// Titles longer than this many characters are counted
    #[arg(long, default_value_t = DEFAULT_TITLE_THRESHOLD)]
    pub title_threshold: usize,

    /// Number of catalog rows put in the bibliography
    #[arg(long, default_value_t = DEFAULT_BIBLIOGRAPHY_SIZE)]
    pub bibliography_size: usize,

    /// Verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated settings for one report run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub catalog_path: PathBuf,
    pub rates_path: PathBuf,
    pub output_path: PathBuf,
    pub currencies: Vec<String>,
    pub encoding: &'static Encoding,
    pub delimiter: u8,
    pub title_threshold: usize,
    pub bibliography_size: usize,
}

impl TryFrom<&Args> for ReportConfig {
    type Error = anyhow::Error;

    fn try_from(args: &Args) -> Result<Self> {
        let encoding = Encoding::for_label(args.encoding.trim().as_bytes())
            .ok_or_else(|| ReportError::UnknownEncoding(args.encoding.clone()))?;

        Ok(ReportConfig {
            catalog_path: args.catalog.clone(),
            rates_path: args.rates.clone(),
            output_path: args.output.clone(),
            currencies: args.currencies.clone(),
            encoding,
            delimiter: parse_delimiter(&args.delimiter)?,
            title_threshold: args.title_threshold,
            bibliography_size: args.bibliography_size,
        })
    }
}

fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ReportError::InvalidDelimiter(raw.to_string()))?,
    }
}
