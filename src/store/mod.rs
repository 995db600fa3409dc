//! Persistence interface for patients and the match-request log.
//!
//! The matching and metrics code never talks to a database client directly.
//! It depends on the [`MatchStore`] trait, a filtered-scan provider over two
//! collections:
//!
//! - `patient`: submitted [`Patient`] records, unique by id
//! - `externalMatchQuery`: the append-only log of [`ExternalMatchQuery`] records
//!
//! [`InMemoryStore`] implements the trait and can be loaded from and saved to a
//! JSON document, which is what the command-line tool uses.

pub mod memory;

use thiserror::Error;

use crate::core::patient::Patient;
use crate::core::query::ExternalMatchQuery;
use crate::core::types::PatientId;

pub use memory::InMemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read store: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse store: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Patient '{0}' already exists in the store")]
    DuplicatePatient(PatientId),

    /// Failure reported by a database-backed `MatchStore` implementation
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Which patients to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatientFilter {
    #[default]
    All,
    /// Patients whose `disorders` list is non-empty
    WithDiagnosis,
}

impl PatientFilter {
    pub fn accepts(self, patient: &Patient) -> bool {
        match self {
            Self::All => true,
            Self::WithDiagnosis => patient.has_diagnosis(),
        }
    }
}

/// Which match-log records to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchQueryFilter {
    #[default]
    All,
    /// Records with `matchFound = true`
    MatchFound,
}

impl MatchQueryFilter {
    pub fn accepts(self, query: &ExternalMatchQuery) -> bool {
        match self {
            Self::All => true,
            Self::MatchFound => query.match_found,
        }
    }
}

/// Read access to the patient collection and the match-request log
pub trait MatchStore {
    /// Patients accepted by `filter`
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend cannot be queried.
    fn find_patients(&self, filter: PatientFilter) -> Result<Vec<Patient>, StoreError>;

    /// Match-log records accepted by `filter`
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend cannot be queried.
    fn find_match_queries(
        &self,
        filter: MatchQueryFilter,
    ) -> Result<Vec<ExternalMatchQuery>, StoreError>;

    /// Every patient in the store
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend cannot be queried.
    fn find_all_patients(&self) -> Result<Vec<Patient>, StoreError> {
        self.find_patients(PatientFilter::All)
    }
}
