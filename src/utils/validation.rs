//! Submission validation helpers.
//!
//! The matching and metrics code accepts any record and degrades to "no match"
//! on missing data. These checks are for the outer layer that accepts new
//! submissions, which should reject records no node could ever match.

use crate::core::patient::Patient;

/// Submission validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Patient id is required")]
    MissingId,
    #[error("Patient contact name is required")]
    MissingContactName,
    #[error("At least one of 'features' or 'genomicFeatures' must be provided")]
    NoFeatures,
    #[error("Genomic feature {0} has no gene id")]
    MissingGeneId(usize),
    #[error("Phenotype feature {0} has no id")]
    MissingPhenotypeId(usize),
}

/// Check that a patient is a well-formed Matchmaker Exchange submission.
///
/// # Errors
///
/// Returns the first `ValidationError` found.
pub fn validate_submission(patient: &Patient) -> Result<(), ValidationError> {
    if patient.id.as_str().trim().is_empty() {
        return Err(ValidationError::MissingId);
    }

    if patient.contact.name.trim().is_empty() {
        return Err(ValidationError::MissingContactName);
    }

    if patient.features.is_empty() && patient.genomic_features.is_empty() {
        return Err(ValidationError::NoFeatures);
    }

    if let Some(i) = patient
        .genomic_features
        .iter()
        .position(|gf| gf.gene.id.trim().is_empty())
    {
        return Err(ValidationError::MissingGeneId(i));
    }

    if let Some(i) = patient
        .features
        .iter()
        .position(|pf| pf.id.trim().is_empty())
    {
        return Err(ValidationError::MissingPhenotypeId(i));
    }

    Ok(())
}
