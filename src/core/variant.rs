use serde::{Deserialize, Serialize};

use crate::core::types::Assembly;

fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// A single genomic variant as described by a Matchmaker Exchange submission
///
/// Coordinates are kept exactly as submitted; no conversion between 0- and
/// 1-based conventions is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Genome build (e.g., `GRCh37`)
    #[serde(default, skip_serializing_if = "Assembly::is_unspecified")]
    pub assembly: Assembly,

    /// Chromosome or contig label ("1".."22", "X", "Y", "MT")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_name: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub start: i64,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub end: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reference_bases: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alternate_bases: String,
}

impl Variant {
    pub fn new(
        assembly: Assembly,
        reference_name: impl Into<String>,
        start: i64,
        end: i64,
    ) -> Self {
        Self {
            assembly,
            reference_name: reference_name.into(),
            start,
            end,
            reference_bases: String::new(),
            alternate_bases: String::new(),
        }
    }

    pub fn with_bases(
        mut self,
        reference_bases: impl Into<String>,
        alternate_bases: impl Into<String>,
    ) -> Self {
        self.reference_bases = reference_bases.into();
        self.alternate_bases = alternate_bases.into();
        self
    }

    /// True when no field was ever filled in
    pub fn is_unpopulated(&self) -> bool {
        self.assembly.is_unspecified()
            && self.reference_name.is_empty()
            && self.start == 0
            && self.end == 0
            && self.reference_bases.is_empty()
            && self.alternate_bases.is_empty()
    }

    pub fn is_populated(&self) -> bool {
        !self.is_unpopulated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unpopulated() {
        assert!(Variant::default().is_unpopulated());
    }

    #[test]
    fn test_any_field_populates() {
        let v = Variant {
            start: 12,
            ..Variant::default()
        };
        assert!(v.is_populated());

        let v = Variant {
            alternate_bases: "T".to_string(),
            ..Variant::default()
        };
        assert!(v.is_populated());

        let v = Variant::new(Assembly::Grch37, "", 0, 0);
        assert!(v.is_populated());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"assembly":"GRCh37.p13","referenceName":"1","start":100,"end":101,"referenceBases":"A","alternateBases":"G"}"#;
        let v: Variant = serde_json::from_str(json).unwrap();
        assert_eq!(v.assembly, Assembly::Other("GRCh37.p13".to_string()));
        assert_eq!(v.reference_name, "1");
        assert_eq!(v.start, 100);
        assert_eq!(v.end, 101);
        assert_eq!(v.reference_bases, "A");
        assert_eq!(v.alternate_bases, "G");
    }
}
