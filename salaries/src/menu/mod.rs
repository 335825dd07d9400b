//! Interactive menu: reads commands, runs reports, prints results.
//!
//! # Commands
//!
//! ```text
//! 0   quit
//! 1   load a dataset file
//! 2   US residents (also saved to US_ds_salaries.csv)
//! 3   CA salary spread, then list sorted by residence and salary
//!     (also saved to sorted_ds_salaries.csv)
//! 4   average salary of non full-time employees, list, save to a chosen file
//! 5a  total number of records
//! 5b  number of records per country of residence
//! 5c  number of data engineers per country of residence
//! 5d  US residents working for a company outside the US
//! ```
//!
//! Errors never end the loop: they are printed and the menu is shown again.

pub mod console;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use log::debug;

use crate::dataset::write_dataset;
use crate::error::{DatasetError, SessionError, SessionResult};
use crate::report::{
    count_by_residence, count_living_in_working_elsewhere, filter_by_residence, not_full_time,
    sort_by_residence_then_salary, SalaryStats,
};
use crate::session::Session;

pub use console::{Console, Level};

/// Export file written by command 2.
pub const US_EXPORT: &str = "US_ds_salaries.csv";

/// Export file written by command 3.
pub const SORTED_EXPORT: &str = "sorted_ds_salaries.csv";

/// Menu settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the fixed-name exports of commands 2 and 3.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// What a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Load,
    UsResidents,
    SortedByResidence,
    NotFullTime,
    TotalCount,
    CountByResidence,
    DataEngineersByResidence,
    UsResidentsWorkingAbroad,
}

/// One line of the menu.
#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    /// Text the user types
    pub input: &'static str,
    pub description: &'static str,
    pub command: Command,
}

/// Menu entries in display order.
pub const MENU: [MenuItem; 9] = [
    MenuItem { input: "0", description: "quit", command: Command::Quit },
    MenuItem { input: "1", description: "load a file", command: Command::Load },
    MenuItem { input: "2", description: "show employees living in the US", command: Command::UsResidents },
    MenuItem {
        input: "3",
        description: "show the list sorted by country of residence and salary",
        command: Command::SortedByResidence,
    },
    MenuItem { input: "4", description: "show employees not on full-time", command: Command::NotFullTime },
    MenuItem { input: "5a", description: "show the total number of salary records", command: Command::TotalCount },
    MenuItem {
        input: "5b",
        description: "show the number of records for each country",
        command: Command::CountByResidence,
    },
    MenuItem {
        input: "5c",
        description: "show the number of data engineers in each country",
        command: Command::DataEngineersByResidence,
    },
    MenuItem {
        input: "5d",
        description: "show the number of US residents not working for a US company",
        command: Command::UsResidentsWorkingAbroad,
    },
];

/// Look up a command by the exact text typed.
pub fn find_command(input: &str) -> Option<Command> {
    MENU.iter().find(|item| item.input == input).map(|item| item.command)
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive loop over any input and output stream.
pub struct Menu<R: BufRead, W: Write> {
    input: R,
    console: Console<W>,
    config: Config,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            input,
            console: Console::new(output),
            config,
        }
    }

    /// Run until `0` is entered or input ends.
    pub fn run(&mut self, session: &mut Session) -> SessionResult<()> {
        loop {
            self.show_menu()?;
            let Some(input) = self.read_line()? else {
                break;
            };

            match self.dispatch(session, &input) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(SessionError::Console(err)) => return Err(SessionError::Console(err)),
                Err(err) => self.report(&err)?,
            }
        }
        self.console.flush()?;
        Ok(())
    }

    /// Give back the output writer.
    pub fn into_output(self) -> W {
        self.console.into_inner()
    }

    fn show_menu(&mut self) -> SessionResult<()> {
        for item in MENU.iter() {
            self.console
                .line(format!("Enter \"{}\" to {}", item.input, item.description))?;
        }
        self.console.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, session: &mut Session, input: &str) -> SessionResult<Flow> {
        let command = find_command(input).ok_or_else(|| SessionError::UnknownCommand(input.to_string()))?;
        debug!("Running command {:?}", command);

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Load => self.load(session)?,
            Command::UsResidents => self.us_residents(session)?,
            Command::SortedByResidence => self.sorted_by_residence(session)?,
            Command::NotFullTime => self.not_full_time(session)?,
            Command::TotalCount => self.total_count(session)?,
            Command::CountByResidence => self.count_by_residence(session)?,
            Command::DataEngineersByResidence => self.data_engineers_by_residence(session)?,
            Command::UsResidentsWorkingAbroad => self.us_residents_working_abroad(session)?,
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &SessionError) -> SessionResult<()> {
        if let SessionError::Dataset(DatasetError::MalformedRow { cause, line }) = err {
            debug!("Line {} rejected: {}", line, cause);
        }
        match err {
            SessionError::Dataset(DatasetError::FileBusy(_)) => {
                self.console.error("Close the file you are working with and try again")?
            }
            _ => self.console.error(err.to_string())?,
        }
        Ok(())
    }

    /// Next input line without its line terminator; `None` at end of input.
    fn read_line(&mut self) -> SessionResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        Ok(Some(trimmed.to_string()))
    }

    fn prompt(&mut self, question: &str) -> SessionResult<String> {
        self.console.info(question)?;
        self.console.flush()?;
        self.read_line()?.ok_or(SessionError::InputClosed)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn load(&mut self, session: &mut Session) -> SessionResult<()> {
        let path = self.prompt("Enter a file name or path")?;
        let count = session.load(&path)?;
        self.console.success(format!("Loaded {} records from {}", count, path))?;
        Ok(())
    }

    fn us_residents(&mut self, session: &Session) -> SessionResult<()> {
        let employees = session.employees()?;
        let us = filter_by_residence(employees, "US");

        for employee in &us {
            self.console.line(employee.to_string())?;
        }

        let path = self.config.output_dir.join(US_EXPORT);
        write_dataset(&path, us.iter().copied())?;
        self.console.success(format!("Saved {} records to {}", us.len(), path.display()))?;
        Ok(())
    }

    fn sorted_by_residence(&mut self, session: &Session) -> SessionResult<()> {
        let employees = session.employees()?;

        match SalaryStats::from_records(filter_by_residence(employees, "CA"), "residence CA") {
            Ok(stats) => self.console.info(format!("Salary spread in CA (USD): {}", stats.spread()))?,
            Err(err) => self.console.warning(err.to_string())?,
        }

        let sorted = sort_by_residence_then_salary(employees);
        for employee in &sorted {
            self.console.line(employee.to_string())?;
        }

        let path = self.config.output_dir.join(SORTED_EXPORT);
        write_dataset(&path, sorted.iter().copied())?;
        self.console.success(format!("Saved {} records to {}", sorted.len(), path.display()))?;
        Ok(())
    }

    fn not_full_time(&mut self, session: &Session) -> SessionResult<()> {
        let employees = session.employees()?;
        let subset = not_full_time(employees);

        let stats = SalaryStats::from_records(subset.iter().copied(), "employees not on full-time")?;
        self.console.info(format!("Average salary (USD): {:.2}", stats.average))?;
        for employee in &subset {
            self.console.line(employee.to_string())?;
        }

        let mut question = "Enter a file name or path to save the data";
        loop {
            let path = self.prompt(question)?;
            match write_dataset(&path, subset.iter().copied()) {
                Ok(count) => {
                    self.console.success(format!("Saved {} records to {}", count, path))?;
                    return Ok(());
                }
                Err(err) => {
                    self.report(&err.into())?;
                    question = "Enter another file name";
                }
            }
        }
    }

    fn total_count(&mut self, session: &Session) -> SessionResult<()> {
        let employees = session.employees()?;
        self.console
            .info(format!("Total number of salary records: {}", employees.len()))?;
        Ok(())
    }

    fn count_by_residence(&mut self, session: &Session) -> SessionResult<()> {
        let counts = count_by_residence(session.employees()?);
        let reference = session.reference();

        self.console.info(format!("Number of country groups: {}", counts.len()))?;
        for bucket in &counts {
            self.console
                .line(format!("{}: {}", reference.country_name(&bucket.residence), bucket.total))?;
        }
        Ok(())
    }

    fn data_engineers_by_residence(&mut self, session: &Session) -> SessionResult<()> {
        let counts = count_by_residence(session.employees()?);
        let reference = session.reference();

        self.console.info("Number of data engineers in each country:")?;
        for bucket in &counts {
            self.console.line(format!(
                "{}: {}",
                reference.country_name(&bucket.residence),
                bucket.data_engineers
            ))?;
        }
        Ok(())
    }

    fn us_residents_working_abroad(&mut self, session: &Session) -> SessionResult<()> {
        let count = count_living_in_working_elsewhere(session.employees()?, "US");
        self.console.info(format!(
            "US residents not working for a US company: {}",
            count
        ))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = ",work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size";

    fn run(session: &mut Session, input: &str, config: Config) -> String {
        let mut menu = Menu::new(input.as_bytes(), Vec::new(), config);
        menu.run(session).unwrap();
        String::from_utf8(menu.into_output()).unwrap()
    }

    fn session() -> Session {
        Session::new(ReferenceData::bundled().unwrap())
    }

    #[test]
    fn test_find_command() {
        assert_eq!(find_command("5a"), Some(Command::TotalCount));
        assert_eq!(find_command("0"), Some(Command::Quit));
        assert_eq!(find_command("5A"), None);
        assert_eq!(find_command(" 1"), None);
    }

    #[test]
    fn test_unknown_command_keeps_running() {
        let out = run(&mut session(), "9\n0\n", Config::default());
        assert!(out.contains("Unknown command '9'"));
        // menu shown again after the error
        assert_eq!(out.matches("Enter \"0\" to quit").count(), 2);
    }

    #[test]
    fn test_report_without_dataset() {
        let out = run(&mut session(), "5a\n", Config::default());
        assert!(out.contains("Load a file first"));
    }

    #[test]
    fn test_load_then_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(
            &path,
            format!("{HEADER}\n0,2020,MI,FT,Data Engineer,1,USD,1,US,NR,US,L\n1,2020,MI,PT,Analyst,2,USD,3,US,NR,DE,L\n"),
        )
        .unwrap();

        let mut session = session();
        let input = format!("1\n{}\n5a\n5d\n0\n", path.display());
        let out = run(&mut session, &input, Config::default());

        assert!(out.contains("Loaded 2 records"));
        assert!(out.contains("Total number of salary records: 2"));
        assert!(out.contains("US residents not working for a US company: 1"));
    }

    #[test]
    fn test_not_full_time_retries_until_saved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(
            &path,
            format!("{HEADER}\n0,2020,MI,FT,A,1,USD,100,US,NR,US,L\n1,2020,MI,PT,B,2,USD,300,US,NR,DE,L\n"),
        )
        .unwrap();
        let target = dir.path().join("part_time.csv");

        let mut session = session();
        session.load(&path).unwrap();
        let input = format!("4\nnot-a-csv.txt\n{}\n0\n", target.display());
        let out = run(&mut session, &input, Config::default());

        assert!(out.contains("Average salary (USD): 300.00"));
        assert!(out.contains("Invalid file name"));
        assert!(out.contains("Enter another file name"));

        let written = fs::read_to_string(&target).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.contains(",PT,B,"));
    }

    #[test]
    fn test_not_full_time_on_full_time_dataset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, format!("{HEADER}\n0,2020,MI,FT,A,1,USD,100,US,NR,US,L\n")).unwrap();

        let mut session = session();
        session.load(&path).unwrap();
        let out = run(&mut session, "4\n0\n", Config::default());
        assert!(out.contains("No records for employees not on full-time"));
    }

    #[test]
    fn test_sorted_export_goes_to_output_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(
            &path,
            format!("{HEADER}\n0,2020,MI,FT,A,1,USD,100,US,NR,US,L\n1,2020,MI,FT,B,1,USD,50,DE,NR,DE,L\n"),
        )
        .unwrap();

        let mut session = session();
        session.load(&path).unwrap();
        let config = Config { output_dir: dir.path().to_path_buf() };
        let out = run(&mut session, "3\n0\n", config);

        assert!(out.contains("No records for residence CA"));
        let sorted = fs::read_to_string(dir.path().join(SORTED_EXPORT)).unwrap();
        let numbers: Vec<&str> = sorted.lines().skip(1).map(|l| &l[..1]).collect();
        assert_eq!(numbers, vec!["1", "0"]);
    }
}
