use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::patient::Patient;
use crate::core::query::ExternalMatchQuery;
use crate::core::types::PatientId;
use crate::store::{MatchQueryFilter, MatchStore, PatientFilter, StoreError};

/// Store file version for compatibility checking
pub const STORE_VERSION: &str = "1.0.0";

/// Serializable store format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    pub version: String,
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub match_queries: Vec<ExternalMatchQuery>,
}

/// A [`MatchStore`] held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    patients: Vec<Patient>,

    /// Index: ids already present, for the uniqueness constraint
    patient_ids: HashSet<PatientId>,

    match_queries: Vec<ExternalMatchQuery>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ReadError` if the file cannot be read, or
    /// `StoreError::ParseError`/`StoreError::DuplicatePatient` if its content
    /// is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a store from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ParseError` on malformed JSON, or
    /// `StoreError::DuplicatePatient` if two patients share an id.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let data: StoreData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != STORE_VERSION {
            warn!(
                expected = STORE_VERSION,
                found = %data.version,
                "Store version mismatch"
            );
        }

        let mut store = Self::new();
        for patient in data.patients {
            store.insert_patient(patient)?;
        }
        for query in data.match_queries {
            store.record_match_query(query);
        }

        debug!(
            patients = store.patients.len(),
            match_queries = store.match_queries.len(),
            "Loaded store"
        );

        Ok(store)
    }

    /// Export the store to JSON
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, StoreError> {
        let data = StoreData {
            version: STORE_VERSION.to_string(),
            patients: self.patients.clone(),
            match_queries: self.match_queries.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Write the store to a JSON file
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if serialization or the write fails.
    pub fn save_to_file(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Add a patient, enforcing id uniqueness
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicatePatient` if a patient with the same id exists.
    pub fn insert_patient(&mut self, patient: Patient) -> Result<(), StoreError> {
        if !self.patient_ids.insert(patient.id.clone()) {
            return Err(StoreError::DuplicatePatient(patient.id));
        }
        self.patients.push(patient);
        Ok(())
    }

    /// Append a record to the match log
    pub fn record_match_query(&mut self, query: ExternalMatchQuery) {
        self.match_queries.push(query);
    }

    /// Number of patients in the store
    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Number of records in the match log
    pub fn match_query_count(&self) -> usize {
        self.match_queries.len()
    }
}

impl MatchStore for InMemoryStore {
    fn find_patients(&self, filter: PatientFilter) -> Result<Vec<Patient>, StoreError> {
        Ok(self
            .patients
            .iter()
            .filter(|p| filter.accepts(p))
            .cloned()
            .collect())
    }

    fn find_match_queries(
        &self,
        filter: MatchQueryFilter,
    ) -> Result<Vec<ExternalMatchQuery>, StoreError> {
        Ok(self
            .match_queries
            .iter()
            .filter(|q| filter.accepts(q))
            .cloned()
            .collect())
    }
}
