//! Session context: reference tables plus the currently loaded dataset.
//!
//! The session is owned by the caller and passed to every report, so the
//! "current dataset" is never global state.

use std::path::Path;

use log::warn;

use crate::dataset::read_dataset;
use crate::error::{DatasetResult, QueryError, QueryResult};
use crate::models::Employee;
use crate::reference::ReferenceData;

pub struct Session {
    reference: ReferenceData,
    dataset: Option<Vec<Employee>>,
}

impl Session {
    /// Start with no dataset loaded.
    pub fn new(reference: ReferenceData) -> Self {
        Self {
            reference,
            dataset: None,
        }
    }

    /// Load a dataset file, replacing the current one on success.
    ///
    /// A failed load leaves the previously loaded dataset untouched.
    /// Returns the number of records loaded.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> DatasetResult<usize> {
        match read_dataset(path.as_ref(), &self.reference) {
            Ok(employees) => {
                let count = employees.len();
                self.dataset = Some(employees);
                Ok(count)
            }
            Err(err) => {
                if self.dataset.is_some() {
                    warn!("Load of {} failed, keeping previous dataset", path.as_ref().display());
                }
                Err(err)
            }
        }
    }

    /// Records of the loaded dataset, in file order.
    pub fn employees(&self) -> QueryResult<&[Employee]> {
        self.dataset.as_deref().ok_or(QueryError::NoDatasetLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }
}
