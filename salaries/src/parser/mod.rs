//! Record parser: one split row in, one validated [`Employee`] out.
//!
//! Checks run in a fixed order (countries, currency, enum tags, integers)
//! and the first failure rejects the row. The caller only ever sees
//! "malformed data at line N"; the precise [`RowError`] stays attached as
//! the error source.

use std::str::FromStr;

use crate::error::{DatasetError, DatasetResult, RowError};
use crate::models::{CompanySize, Employee, EmploymentType, ExperienceLevel, RemoteRatio};
use crate::reference::ReferenceData;

/// Field delimiter for dataset files.
pub const DELIMITER: u8 = b',';

/// Required file extension for dataset files.
pub const EXTENSION: &str = "csv";

/// Column headers, in file order. The first column is the unnamed row index.
pub const HEADERS: [&str; 12] = [
    "",
    "work_year",
    "experience_level",
    "employment_type",
    "job_title",
    "salary",
    "salary_currency",
    "salary_in_usd",
    "employee_residence",
    "remote_ratio",
    "company_location",
    "company_size",
];

// Column positions
const NUMBER: usize = 0;
const WORK_YEAR: usize = 1;
const EXPERIENCE_LEVEL: usize = 2;
const EMPLOYMENT_TYPE: usize = 3;
const JOB_TITLE: usize = 4;
const SALARY: usize = 5;
const SALARY_CURRENCY: usize = 6;
const SALARY_IN_USD: usize = 7;
const RESIDENCE: usize = 8;
const REMOTE_RATIO: usize = 9;
const COMPANY_LOCATION: usize = 10;
const COMPANY_SIZE: usize = 11;

/// True when `fields` is exactly [`HEADERS`]: same names, same order, same count.
pub fn is_expected_header<S: AsRef<str>>(fields: &[S]) -> bool {
    fields.len() == HEADERS.len()
        && fields
            .iter()
            .zip(HEADERS.iter())
            .all(|(field, expected)| field.as_ref() == *expected)
}

/// Parse and validate one data row.
///
/// `line` is the 1-based line number in the source file (header is line 1).
pub fn parse_employee<S: AsRef<str>>(
    fields: &[S],
    line: u64,
    reference: &ReferenceData,
) -> DatasetResult<Employee> {
    validate_row(fields, reference).map_err(|cause| DatasetError::MalformedRow { line, cause })
}

fn validate_row<S: AsRef<str>>(fields: &[S], reference: &ReferenceData) -> Result<Employee, RowError> {
    if fields.len() != HEADERS.len() {
        return Err(RowError::FieldCount {
            expected: HEADERS.len(),
            found: fields.len(),
        });
    }
    let field = move |index: usize| fields[index].as_ref();

    let residence = country(field(RESIDENCE), RESIDENCE, reference)?;
    let company_location = country(field(COMPANY_LOCATION), COMPANY_LOCATION, reference)?;

    let salary_currency = field(SALARY_CURRENCY);
    if !reference.is_currency(salary_currency) {
        return Err(RowError::UnknownCurrency(salary_currency.to_string()));
    }

    let experience_level = tag(field(EXPERIENCE_LEVEL), EXPERIENCE_LEVEL, ExperienceLevel::from_code)?;
    let employment_type = tag(field(EMPLOYMENT_TYPE), EMPLOYMENT_TYPE, EmploymentType::from_code)?;
    let remote_ratio = tag(field(REMOTE_RATIO), REMOTE_RATIO, |v| {
        RemoteRatio::from_code(v).or_else(|| RemoteRatio::from_percent(v))
    })?;
    let company_size = tag(field(COMPANY_SIZE), COMPANY_SIZE, CompanySize::from_code)?;

    Ok(Employee {
        number: integer(field(NUMBER), NUMBER)?,
        work_year: integer(field(WORK_YEAR), WORK_YEAR)?,
        experience_level,
        employment_type,
        job_title: field(JOB_TITLE).to_string(),
        salary: integer(field(SALARY), SALARY)?,
        salary_currency: salary_currency.to_string(),
        salary_in_usd: integer(field(SALARY_IN_USD), SALARY_IN_USD)?,
        residence,
        remote_ratio,
        company_location,
        company_size,
    })
}

fn country(value: &str, column: usize, reference: &ReferenceData) -> Result<String, RowError> {
    if reference.is_country(value) {
        Ok(value.to_string())
    } else {
        Err(RowError::UnknownCountry {
            column: HEADERS[column],
            value: value.to_string(),
        })
    }
}

fn tag<T>(value: &str, column: usize, parse: fn(&str) -> Option<T>) -> Result<T, RowError> {
    parse(value).ok_or_else(|| RowError::UnknownTag {
        column: HEADERS[column],
        value: value.to_string(),
    })
}

fn integer<T: FromStr<Err = std::num::ParseIntError>>(value: &str, column: usize) -> Result<T, RowError> {
    value.parse().map_err(|source| RowError::InvalidInteger {
        column: HEADERS[column],
        value: value.to_string(),
        source,
    })
}
