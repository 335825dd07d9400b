//! Report queries over a loaded dataset.
//!
//! All functions are read-only and borrow the records they return, so the
//! loaded dataset is never copied or reordered.

use std::collections::HashMap;

use crate::error::{QueryError, QueryResult};
use crate::models::{Employee, EmploymentType};

/// Job title counted by [`count_by_residence`].
pub const DATA_ENGINEER: &str = "Data Engineer";

/// Records whose residence matches `code` exactly.
pub fn filter_by_residence<'a>(employees: &'a [Employee], code: &str) -> Vec<&'a Employee> {
    employees.iter().filter(|e| e.residence == code).collect()
}

/// Records with any employment type other than full-time.
pub fn not_full_time(employees: &[Employee]) -> Vec<&Employee> {
    employees
        .iter()
        .filter(|e| e.employment_type != EmploymentType::FT)
        .collect()
}

/// Sorted by residence, then by salary in USD, both ascending.
///
/// The sort is stable: ties keep file order.
pub fn sort_by_residence_then_salary(employees: &[Employee]) -> Vec<&Employee> {
    let mut sorted: Vec<&Employee> = employees.iter().collect();
    sorted.sort_by(|a, b| {
        a.residence
            .cmp(&b.residence)
            .then(a.salary_in_usd.cmp(&b.salary_in_usd))
    });
    sorted
}

/// Min, max and mean of `salary_in_usd` over a non-empty subset.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryStats {
    pub count: usize,
    pub min: i32,
    pub max: i32,
    pub average: f64,
}

impl SalaryStats {
    /// Aggregate over `records`.
    ///
    /// # Errors
    /// [`QueryError::EmptySubset`] when `records` yields nothing; `subset`
    /// names the selection in the error message.
    pub fn from_records<'a, I>(records: I, subset: &str) -> QueryResult<Self>
    where
        I: IntoIterator<Item = &'a Employee>,
    {
        let mut count = 0usize;
        let mut min = i32::MAX;
        let mut max = i32::MIN;
        let mut sum = 0i64;

        for employee in records {
            let salary = employee.salary_in_usd;
            count += 1;
            min = min.min(salary);
            max = max.max(salary);
            sum += i64::from(salary);
        }

        if count == 0 {
            return Err(QueryError::EmptySubset(subset.to_string()));
        }

        Ok(Self {
            count,
            min,
            max,
            average: sum as f64 / count as f64,
        })
    }

    /// Difference between the highest and lowest salary.
    pub fn spread(&self) -> i64 {
        i64::from(self.max) - i64::from(self.min)
    }
}

/// Per-residence bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidenceCount {
    pub residence: String,
    pub total: usize,
    /// Records in the bucket titled [`DATA_ENGINEER`].
    pub data_engineers: usize,
}

/// Group by residence, buckets in order of first appearance.
pub fn count_by_residence(employees: &[Employee]) -> Vec<ResidenceCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<ResidenceCount> = Vec::new();

    for employee in employees {
        let slot = *index.entry(employee.residence.as_str()).or_insert_with(|| {
            buckets.push(ResidenceCount {
                residence: employee.residence.clone(),
                total: 0,
                data_engineers: 0,
            });
            buckets.len() - 1
        });

        let bucket = &mut buckets[slot];
        bucket.total += 1;
        if employee.job_title == DATA_ENGINEER {
            bucket.data_engineers += 1;
        }
    }

    buckets
}

/// Residents of `code` whose employer is located elsewhere.
pub fn count_living_in_working_elsewhere(employees: &[Employee], code: &str) -> usize {
    employees
        .iter()
        .filter(|e| e.residence == code && e.company_location != code)
        .count()
}
