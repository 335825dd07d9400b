//! Country and currency reference tables.
//!
//! Both tables are bundled at compile time from `data/`:
//! - `country_codes.csv` - ISO 3166, `;`-delimited, name then alpha-2 code
//! - `currency_codes.csv` - ISO 4217, `,`-delimited, alphabetic code in the 3rd column
//!
//! They are parsed once when a [`crate::session::Session`] is created and
//! never change afterwards.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use crate::error::{ReferenceError, ReferenceResult};

const COUNTRY_CODES: &str = include_str!("../../data/country_codes.csv");
const CURRENCY_CODES: &str = include_str!("../../data/currency_codes.csv");

/// Read-only lookup tables used to validate records.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// alpha-2 code -> country name
    countries: HashMap<String, String>,
    currencies: HashSet<String>,
}

impl ReferenceData {
    /// Build from in-memory tables.
    pub fn new(countries: HashMap<String, String>, currencies: HashSet<String>) -> Self {
        Self {
            countries,
            currencies,
        }
    }

    /// Parse the tables bundled with the binary.
    pub fn bundled() -> ReferenceResult<Self> {
        Self::from_readers(COUNTRY_CODES.as_bytes(), CURRENCY_CODES.as_bytes())
    }

    /// Parse both tables from arbitrary readers. The first row of each is a header.
    pub fn from_readers<C: Read, M: Read>(countries: C, currencies: M) -> ReferenceResult<Self> {
        let countries = read_countries(countries)?;
        let currencies = read_currencies(currencies)?;
        log::debug!(
            "Reference data loaded: {} countries, {} currencies",
            countries.len(),
            currencies.len()
        );
        Ok(Self::new(countries, currencies))
    }

    pub fn is_country(&self, code: &str) -> bool {
        self.countries.contains_key(code)
    }

    /// Country name for a code, or the code itself when unknown.
    pub fn country_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.countries.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn is_currency(&self, code: &str) -> bool {
        self.currencies.contains(code)
    }

    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    pub fn currency_count(&self) -> usize {
        self.currencies.len()
    }
}

fn read_countries<R: Read>(reader: R) -> ReferenceResult<HashMap<String, String>> {
    let table = "country";
    let mut rdr = table_reader(reader, b';');
    let mut countries = HashMap::new();

    for result in rdr.records() {
        let record = result.map_err(|source| ReferenceError::Csv { table, source })?;
        let (Some(name), Some(code)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if code.is_empty() {
            continue;
        }
        countries.insert(code.to_string(), name.to_string());
    }

    if countries.is_empty() {
        return Err(ReferenceError::Empty(table));
    }
    Ok(countries)
}

fn read_currencies<R: Read>(reader: R) -> ReferenceResult<HashSet<String>> {
    let table = "currency";
    let mut rdr = table_reader(reader, b',');
    let mut currencies = HashSet::new();

    for result in rdr.records() {
        let record = result.map_err(|source| ReferenceError::Csv { table, source })?;
        match record.get(2) {
            Some(code) if !code.is_empty() => {
                currencies.insert(code.to_string());
            }
            _ => {}
        }
    }

    if currencies.is_empty() {
        return Err(ReferenceError::Empty(table));
    }
    Ok(currencies)
}

fn table_reader<R: Read>(reader: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}
