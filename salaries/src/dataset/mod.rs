//! Dataset loader and writer.
//!
//! ```text
//! ┌───────────┐     ┌──────────────┐     ┌────────────────┐     ┌───────────────┐
//! │ path.csv  │────▶│ header check │────▶│ parse_employee │────▶│ Vec<Employee> │
//! │ (checked) │     │   (line 1)   │     │  (line 2..N)   │     │ (all or none) │
//! └───────────┘     └──────────────┘     └────────────────┘     └───────────────┘
//! ```
//!
//! Loading is all-or-nothing: the first bad row aborts the whole file and
//! nothing is returned. Writing produces a file the loader accepts as-is.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{DatasetError, DatasetResult};
use crate::models::Employee;
use crate::parser::{is_expected_header, parse_employee, DELIMITER, EXTENSION, HEADERS};
use crate::reference::ReferenceData;

/// Fail unless the path ends with `.csv`. Checked before touching the file system.
pub fn check_extension(path: &Path) -> DatasetResult<()> {
    if path.to_string_lossy().ends_with(&format!(".{}", EXTENSION)) {
        Ok(())
    } else {
        Err(DatasetError::InvalidFilename(path.to_path_buf()))
    }
}

/// Load and validate a dataset file.
///
/// # Errors
/// `InvalidFilename`, `FileNotFound`, `FileBusy`, `InvalidHeader`,
/// `MalformedRow` or `EmptyDataset`; see [`read_records`].
pub fn read_dataset<P: AsRef<Path>>(path: P, reference: &ReferenceData) -> DatasetResult<Vec<Employee>> {
    let path = path.as_ref();
    check_extension(path)?;
    if !path.is_file() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }

    debug!("Opening dataset {}", path.display());
    let file = File::open(path).map_err(|e| DatasetError::from_io(path, e))?;
    let employees = read_records(file, reference)?;

    info!("Loaded {} records from {}", employees.len(), path.display());
    Ok(employees)
}

/// Read a dataset from any reader, streaming one line at a time.
///
/// Every physical line is split on the delimiter as-is: no quoting, and a
/// blank line is a malformed row. Invalid UTF-8 is decoded lossily.
pub fn read_records<R: Read>(reader: R, reference: &ReferenceData) -> DatasetResult<Vec<Employee>> {
    let mut buf = BufReader::new(reader);
    let mut raw = Vec::new();

    if !next_line(&mut buf, &mut raw)? {
        return Err(DatasetError::EmptyDataset);
    }
    let decoded = String::from_utf8_lossy(&raw);
    let header = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);
    if !is_expected_header(&split(header)) {
        warn!("Rejected header: {:?}", header);
        return Err(DatasetError::InvalidHeader);
    }

    let mut employees = Vec::new();
    let mut line_idx: u64 = 0;
    while next_line(&mut buf, &mut raw)? {
        let line_num = line_idx + 2; // +1 for 1-based, +1 for header
        line_idx += 1;

        let line = String::from_utf8_lossy(&raw);
        match parse_employee(&split(&line), line_num, reference) {
            Ok(employee) => employees.push(employee),
            Err(err) => {
                if let DatasetError::MalformedRow { cause, .. } = &err {
                    warn!("Rejected line {}: {}", line_num, cause);
                }
                return Err(err);
            }
        }
    }

    if employees.is_empty() {
        return Err(DatasetError::EmptyDataset);
    }
    Ok(employees)
}

fn split(line: &str) -> Vec<&str> {
    line.split(char::from(DELIMITER)).collect()
}

/// Read the next line into `raw` without its terminator; `false` at end of input.
fn next_line<B: BufRead>(buf: &mut B, raw: &mut Vec<u8>) -> io::Result<bool> {
    raw.clear();
    if buf.read_until(b'\n', raw)? == 0 {
        return Ok(false);
    }
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    Ok(true)
}

/// Write records to a `.csv` file, replacing any previous content.
///
/// No records produces a header-only file. Returns the number of rows written.
pub fn write_dataset<'a, P, I>(path: P, employees: I) -> DatasetResult<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Employee>,
{
    let path = path.as_ref();
    check_extension(path)?;

    debug!("Writing dataset {}", path.display());
    let file = File::create(path).map_err(|e| DatasetError::from_io(path, e))?;
    let count = write_records(file, employees)?;

    info!("Wrote {} records to {}", count, path.display());
    Ok(count)
}

/// Write the header and one row per record to any writer.
///
/// Fields are written unquoted, matching what [`read_records`] splits.
pub fn write_records<'a, W, I>(writer: W, employees: I) -> DatasetResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Employee>,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    wtr.write_record(HEADERS)?;
    let mut count = 0;
    for employee in employees {
        wtr.serialize(employee)?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const HEADER: &str = ",work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size";

    fn reference() -> ReferenceData {
        ReferenceData::bundled().unwrap()
    }

    fn file(rows: &[&str]) -> String {
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        content
    }

    #[test]
    fn test_read_valid() {
        let csv = file(&[
            "0,2020,MI,FT,Data Scientist,70000,EUR,79833,DE,NR,DE,L",
            "1,2021,SE,PT,Data Engineer,150000,USD,150000,US,FR,US,M",
        ]);
        let employees = read_records(csv.as_bytes(), &reference()).unwrap();

        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].residence, "DE");
        assert_eq!(employees[1].job_title, "Data Engineer");
    }

    #[test]
    fn test_malformed_row_reports_physical_line() {
        let csv = file(&[
            "0,2020,MI,FT,Data Scientist,70000,EUR,79833,DE,NR,DE,L",
            "1,2021,SE,PT,Data Engineer,150000,ZZZ,150000,US,FR,US,M",
        ]);
        let err = read_records(csv.as_bytes(), &reference()).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let csv = file(&["0,2020,MI,FT"]);
        let err = read_records(csv.as_bytes(), &reference()).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_invalid_header() {
        let csv = "id,work_year\n0,2020\n";
        let err = read_records(csv.as_bytes(), &reference()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidHeader));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = read_records(file(&[]).as_bytes(), &reference()).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyDataset));

        let err = read_records("".as_bytes(), &reference()).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyDataset));
    }

    #[test]
    fn test_extension_checked_before_existence() {
        let err = read_dataset("/definitely/missing/data.txt", &reference()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidFilename(_)));

        let err = read_dataset("/definitely/missing/data.csv", &reference()).unwrap_err();
        assert!(matches!(err, DatasetError::FileNotFound(_)));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("folder.csv");
        std::fs::create_dir(&path).unwrap();

        let err = read_dataset(&path, &reference()).unwrap_err();
        assert!(matches!(err, DatasetError::FileNotFound(_)));
    }

    #[test]
    fn test_write_header_only() {
        let none: &[Employee] = &[];
        let mut out = Vec::new();
        assert_eq!(write_records(&mut out, none).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", HEADER));
    }

    #[test]
    fn test_write_uses_tags() {
        let csv = file(&["7,2022,EX,CT,Head of Data,200000,USD,200000,US,PR,CA,S"]);
        let employees = read_records(csv.as_bytes(), &reference()).unwrap();

        let mut out = Vec::new();
        write_records(&mut out, &employees).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), csv);
    }

    #[test]
    fn test_write_rejects_bad_extension() {
        let dir = tempdir().unwrap();
        let none: &[Employee] = &[];
        let err = write_dataset(dir.path().join("out.json"), none).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidFilename(_)));
    }

    #[test]
    fn test_blank_line_is_malformed() {
        let csv = file(&[
            "0,2020,MI,FT,Data Scientist,70000,EUR,79833,DE,NR,DE,L",
            "",
            "1,2021,SE,PT,Data Engineer,150000,USD,150000,US,FR,US,M",
        ]);
        let err = read_records(csv.as_bytes(), &reference()).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_comma_in_title_splits_the_row() {
        let csv = file(&["0,2020,MI,FT,\"Analyst, Data\",70000,EUR,79833,DE,NR,DE,L"]);
        let err = read_records(csv.as_bytes(), &reference()).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_quote_in_title_is_plain_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.csv");
        let csv = file(&["0,2020,MI,FT,\"Lead,1,USD,1,US,NR,US,L"]);
        let employees = read_records(csv.as_bytes(), &reference()).unwrap();
        assert_eq!(employees[0].job_title, "\"Lead");

        assert_eq!(write_dataset(&path, &employees).unwrap(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), csv);
        assert_eq!(read_dataset(&path, &reference()).unwrap(), employees);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut bytes = file(&[]).into_bytes();
        bytes.extend_from_slice(b"0,2020,MI,FT,Data \xff\xfe,1,USD,1,US,NR,US,L\n");
        let employees = read_records(bytes.as_slice(), &reference()).unwrap();
        assert_eq!(employees[0].job_title, "Data \u{fffd}\u{fffd}");
    }

    #[test]
    fn test_crlf_and_bom_accepted() {
        let csv = format!("\u{feff}{HEADER}\r\n0,2020,MI,FT,A,1,USD,1,US,NR,US,L\r\n");
        let employees = read_records(csv.as_bytes(), &reference()).unwrap();
        assert_eq!(employees[0].company_size, crate::models::CompanySize::L);
    }

    #[test]
    fn test_bare_extension_file_name() {
        assert!(check_extension(Path::new(".csv")).is_ok());
        assert!(check_extension(Path::new("dir/data.CSV")).is_err());
        assert!(check_extension(Path::new("csv")).is_err());
    }
}
