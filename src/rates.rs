//! Exchange rate file parser

use crate::{errors::ReportError, models::ExchangeRate};
use anyhow::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const CODE_ELEMENT: &[u8] = b"CharCode";
const VALUE_ELEMENT: &[u8] = b"Value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Code,
    Value,
}

/// Rates in document order.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: Vec<ExchangeRate>,
}

impl RateTable {
    pub fn new(rates: Vec<ExchangeRate>) -> Self {
        RateTable { rates }
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExchangeRate> {
        self.rates.iter()
    }

    /// First rate whose code matches, ignoring case and surrounding blanks.
    pub fn get(&self, code: &str) -> Option<&ExchangeRate> {
        let code = code.trim();
        self.rates
            .iter()
            .find(|rate| rate.code().trim().eq_ignore_ascii_case(code))
    }
}

/// Parse a rate file and pair every `CharCode` with the `Value` at the same position
///
/// Element text is kept as written, whitespace included.
pub fn load_rates(path: &Path) -> Result<RateTable> {
    let file = File::open(path).map_err(|e| ReportError::io(path, e))?;
    let table = parse_rates(BufReader::new(file))?;
    log::info!("Loaded {} exchange rates from {:?}", table.len(), path);
    Ok(table)
}

pub fn parse_rates<R: BufRead>(source: R) -> Result<RateTable> {
    let mut reader = Reader::from_reader(source);

    let mut codes = Vec::new();
    let mut values = Vec::new();
    let mut current: Option<Field> = None;
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf).map_err(ReportError::from)? {
            Event::Start(e) => {
                if current.is_none() {
                    current = field_of(e.name().as_ref());
                    text.clear();
                }
            }
            Event::Empty(e) => {
                // <CharCode/> still occupies a position
                if current.is_none() {
                    match field_of(e.name().as_ref()) {
                        Some(Field::Code) => codes.push(String::new()),
                        Some(Field::Value) => values.push(String::new()),
                        None => {}
                    }
                }
            }
            Event::Text(e) => {
                if current.is_some() {
                    let unescaped = e.unescape().map_err(|e| ReportError::Xml(e.into()))?;
                    text.push_str(&unescaped);
                }
            }
            Event::CData(e) => {
                if current.is_some() {
                    let decoded = e.decode().map_err(|e| ReportError::Xml(e.into()))?;
                    text.push_str(&decoded);
                }
            }
            Event::End(e) => {
                if let Some(field) = current {
                    if field_of(e.name().as_ref()) == Some(field) {
                        let value = std::mem::take(&mut text);
                        match field {
                            Field::Code => codes.push(value),
                            Field::Value => values.push(value),
                        }
                        current = None;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if codes.len() != values.len() {
        log::warn!(
            "Rate file has {} CharCode and {} Value elements, unpaired ones are skipped",
            codes.len(),
            values.len()
        );
    }

    let rates = codes
        .into_iter()
        .zip(values)
        .map(|(code, value)| ExchangeRate::new(code, value))
        .collect();
    Ok(RateTable::new(rates))
}

fn field_of(name: &[u8]) -> Option<Field> {
    match name {
        CODE_ELEMENT => Some(Field::Code),
        VALUE_ELEMENT => Some(Field::Value),
        _ => None,
    }
}
