use serde::{Deserialize, Serialize};

use crate::core::feature::{GenomicFeature, PhenotypeFeature};
use crate::core::types::{deserialize_optional_sex, PatientId, Sex};

/// Who submitted a patient
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub institution: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = institution.into();
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = href.into();
        self
    }
}

/// A diagnosed disorder, e.g. `MIM:154700` or `Orphanet:558`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Disorder {
    pub id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
}

impl Disorder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
        }
    }
}

/// A patient record as submitted to (or returned by) a matchmaker node
///
/// Field order here is the wire key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub contact: Contact,

    /// NCBI taxon identifier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub species: String,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_sex",
        skip_serializing_if = "Option::is_none"
    )]
    pub sex: Option<Sex>,

    /// HPO code
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub age_of_onset: String,

    /// HPO code
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub inheritance_mode: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disorders: Vec<Disorder>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<PhenotypeFeature>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genomic_features: Vec<GenomicFeature>,
}

impl Patient {
    pub fn new(id: impl Into<String>, contact: Contact) -> Self {
        Self {
            id: PatientId::new(id),
            label: String::new(),
            contact,
            species: String::new(),
            sex: None,
            age_of_onset: String::new(),
            inheritance_mode: String::new(),
            disorders: Vec::new(),
            features: Vec::new(),
            genomic_features: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_disorders(mut self, disorders: Vec<Disorder>) -> Self {
        self.disorders = disorders;
        self
    }

    pub fn with_features(mut self, features: Vec<PhenotypeFeature>) -> Self {
        self.features = features;
        self
    }

    pub fn with_genomic_features(mut self, genomic_features: Vec<GenomicFeature>) -> Self {
        self.genomic_features = genomic_features;
        self
    }

    pub fn has_diagnosis(&self) -> bool {
        !self.disorders.is_empty()
    }

    /// Number of genomic features carrying a populated variant
    pub fn populated_variant_count(&self) -> usize {
        self.genomic_features
            .iter()
            .filter(|gf| gf.variant.is_populated())
            .count()
    }
}
