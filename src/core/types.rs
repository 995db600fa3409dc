use serde::{Deserialize, Deserializer, Serialize};

/// Zygosity sentinel meaning "not provided by the submitter"
pub const ZYGOSITY_NOT_PROVIDED: i64 = -1;

/// Heterozygous or hemizygous
pub const ZYGOSITY_HETEROZYGOUS: i64 = 1;

/// Homozygous
pub const ZYGOSITY_HOMOZYGOUS: i64 = 2;

/// Whether a zygosity value carries information.
///
/// Both the "not provided" sentinel and a literal zero count as absent.
#[must_use]
pub fn zygosity_is_absent(zygosity: &i64) -> bool {
    *zygosity == 0 || *zygosity == ZYGOSITY_NOT_PROVIDED
}

pub(crate) fn default_zygosity() -> i64 {
    ZYGOSITY_NOT_PROVIDED
}

/// Unique identifier for a patient in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub String);

impl PatientId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Genome build a variant was called against (e.g., `GRCh37`, `GRCh38`)
///
/// Unrecognised builds such as `GRCh37.p13` are kept verbatim in `Other`, so
/// equality stays literal string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Assembly {
    #[default]
    Unspecified,
    Ncbi36,
    Grch37,
    Grch38,
    Other(String),
}

impl Assembly {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" => Self::Unspecified,
            "NCBI36" => Self::Ncbi36,
            "GRCh37" => Self::Grch37,
            "GRCh38" => Self::Grch38,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl From<String> for Assembly {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Assembly> for String {
    fn from(assembly: Assembly) -> Self {
        assembly.to_string()
    }
}

impl std::fmt::Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unspecified => Ok(()),
            Self::Ncbi36 => write!(f, "NCBI36"),
            Self::Grch37 => write!(f, "GRCh37"),
            Self::Grch38 => write!(f, "GRCh38"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Reported sex of the patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Female,
    Male,
    Other,
    MixedSample,
    NotApplicable,
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Female => write!(f, "FEMALE"),
            Self::Male => write!(f, "MALE"),
            Self::Other => write!(f, "OTHER"),
            Self::MixedSample => write!(f, "MIXED_SAMPLE"),
            Self::NotApplicable => write!(f, "NOT_APPLICABLE"),
        }
    }
}

/// Accepts `"sex": ""` (legacy records store absent values as empty strings)
pub(crate) fn deserialize_optional_sex<'de, D>(deserializer: D) -> Result<Option<Sex>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            Sex::deserialize(serde::de::value::StrDeserializer::<D::Error>::new(value)).map(Some)
        }
    }
}

/// Whether variant-level data may leave this node.
///
/// Supplied per request by the consent/privacy layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantSharing {
    #[default]
    Share,
    Withhold,
}

impl VariantSharing {
    pub fn from_flag(share: bool) -> Self {
        if share {
            Self::Share
        } else {
            Self::Withhold
        }
    }

    pub fn allows_sharing(self) -> bool {
        matches!(self, Self::Share)
    }
}
