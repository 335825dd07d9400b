//! Domain models for salary datasets.
//!
//! - [`Employee`] - one validated salary record
//! - [`ExperienceLevel`] - seniority tag (EN, MI, SE, EX)
//! - [`EmploymentType`] - contract tag (PT, FT, CT, FL)
//! - [`RemoteRatio`] - share of remote work (NR, PR, FR)
//! - [`CompanySize`] - employer size tag (S, M, L)
//!
//! Every enum is a closed set matched by its exact tag text. Parsing is
//! case-sensitive, so `"mi"` is not a valid experience level.

use std::fmt;

use serde::Serialize;

// =============================================================================
// Experience Level
// =============================================================================

/// Seniority of the employee.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    /// Entry level / junior
    EN,
    /// Mid level / intermediate
    MI,
    /// Senior level / expert
    SE,
    /// Executive level / director
    EX,
}

impl ExperienceLevel {
    /// Parse from the exact tag text.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EN" => Some(Self::EN),
            "MI" => Some(Self::MI),
            "SE" => Some(Self::SE),
            "EX" => Some(Self::EX),
            _ => None,
        }
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            Self::EN => "EN",
            Self::MI => "MI",
            Self::SE => "SE",
            Self::EX => "EX",
        }
    }
}

// =============================================================================
// Employment Type
// =============================================================================

/// Type of employment contract.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum EmploymentType {
    /// Part-time
    PT,
    /// Full-time
    FT,
    /// Contract
    CT,
    /// Freelance
    FL,
}

impl EmploymentType {
    /// Parse from the exact tag text.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PT" => Some(Self::PT),
            "FT" => Some(Self::FT),
            "CT" => Some(Self::CT),
            "FL" => Some(Self::FL),
            _ => None,
        }
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            Self::PT => "PT",
            Self::FT => "FT",
            Self::CT => "CT",
            Self::FL => "FL",
        }
    }
}

// =============================================================================
// Remote Ratio
// =============================================================================

/// Share of work done remotely.
///
/// Serialized by tag name everywhere (files and console). The numeric
/// share is available through [`RemoteRatio::percent`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum RemoteRatio {
    /// No remote work (0%)
    NR,
    /// Partially remote (50%)
    PR,
    /// Fully remote (100%)
    FR,
}

impl RemoteRatio {
    /// Parse from the exact tag text. Numeric shares are not accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NR" => Some(Self::NR),
            "PR" => Some(Self::PR),
            "FR" => Some(Self::FR),
            _ => None,
        }
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            Self::NR => "NR",
            Self::PR => "PR",
            Self::FR => "FR",
        }
    }

    /// Remote share in percent.
    /// Accept the numeric share some exports carry instead of the tag.
    pub fn from_percent(value: &str) -> Option<Self> {
        match value {
            "0" => Some(Self::NR),
            "50" => Some(Self::PR),
            "100" => Some(Self::FR),
            _ => None,
        }
    }

    pub fn percent(&self) -> u8 {
        match self {
            Self::NR => 0,
            Self::PR => 50,
            Self::FR => 100,
        }
    }
}

// =============================================================================
// Company Size
// =============================================================================

/// Size of the employing company.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum CompanySize {
    /// Small
    S,
    /// Medium
    M,
    /// Large
    L,
}

impl CompanySize {
    /// Parse from the exact tag text.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::S),
            "M" => Some(Self::M),
            "L" => Some(Self::L),
            _ => None,
        }
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        }
    }
}

macro_rules! display_as_code {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.to_code())
                }
            }
        )+
    };
}

display_as_code!(ExperienceLevel, EmploymentType, RemoteRatio, CompanySize);

// =============================================================================
// Employee
// =============================================================================

/// A fully validated salary record.
///
/// Instances only come out of the record parser, so every country and
/// currency code has already been checked against the reference tables.
/// Field order matches the file columns; `Serialize` is used by the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// Row index carried over from the source file.
    pub number: i32,
    pub work_year: i32,
    pub experience_level: ExperienceLevel,
    pub employment_type: EmploymentType,
    pub job_title: String,
    /// Salary in `salary_currency`.
    pub salary: i32,
    /// ISO 4217 code.
    pub salary_currency: String,
    pub salary_in_usd: i32,
    /// ISO 3166 alpha-2 code of the employee's country of residence.
    pub residence: String,
    pub remote_ratio: RemoteRatio,
    /// ISO 3166 alpha-2 code of the employer's country.
    pub company_location: String,
    pub company_size: CompanySize,
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number: {}, WorkYear: {}, ExperienceLevel: {}, EmploymentType: {}, \
             JobTitle: {}, Salary: {}, SalaryCurrency: {}, SalaryInUsd: {}, \
             EmployeeResidence: {}, RemoteRatio: {}, CompanyLocation: {}, CompanySize: {}",
            self.number,
            self.work_year,
            self.experience_level,
            self.employment_type,
            self.job_title,
            self.salary,
            self.salary_currency,
            self.salary_in_usd,
            self.residence,
            self.remote_ratio,
            self.company_location,
            self.company_size,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
