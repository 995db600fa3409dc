use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::patient::Patient;

/// A candidate patient considered a match for an incoming query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchmakerResult {
    pub patient: Patient,

    /// Gene ids of the query features that paired with this candidate
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched_genes: Vec<String>,
}

impl MatchmakerResult {
    pub fn new(patient: Patient) -> Self {
        Self {
            patient,
            matched_genes: Vec::new(),
        }
    }

    pub fn with_matched_genes(mut self, genes: Vec<String>) -> Self {
        self.matched_genes = genes;
        self
    }
}

/// One incoming match request and its outcome, as kept in the append-only log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMatchQuery {
    pub incoming_query: Patient,

    #[serde(default)]
    pub results: Vec<MatchmakerResult>,

    #[serde(default)]
    pub match_found: bool,

    #[serde(default = "Utc::now", rename = "timeStamp")]
    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_origin_hostname: Option<String>,
}

impl ExternalMatchQuery {
    /// Record a query; `match_found` is derived from `results`
    pub fn new(incoming_query: Patient, results: Vec<MatchmakerResult>) -> Self {
        let match_found = !results.is_empty();
        Self {
            incoming_query,
            results,
            match_found,
            timestamp: Utc::now(),
            request_origin_hostname: None,
        }
    }

    pub fn with_origin(mut self, hostname: impl Into<String>) -> Self {
        self.request_origin_hostname = Some(hostname.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
