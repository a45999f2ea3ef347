//! Entity categories and the per-note categorized entity collection

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fixed ethnicity vocabulary used to reclassify `misc` NER tokens.
pub const ETHNICITIES: [&str; 12] = [
    "Asian",
    "Black",
    "Caucasian",
    "Eur-Asian",
    "First Nation",
    "Hispanic",
    "Indian not FN",
    "Inuit",
    "Metis",
    "Middle Eastern",
    "Mongoloid",
    "Other Non-White",
];

/// The category an entity surface string was detected under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// A person name from the NER tagger
    Person,
    /// An organization from the NER tagger
    Business,
    /// A location or facility from the NER tagger
    Address,
    /// NER span with no mapped category
    Misc,
    /// A misc token matched against the ethnicity vocabulary
    Ethnicity,
    /// Email address from the regex detector
    Email,
    /// Bare domain name from the regex detector
    Domain,
    /// Phone number from either phone detector pattern
    Phone,
    /// Weight annotation, e.g. "180lbs"
    Weight,
    /// Height annotation, e.g. "5'11"
    Height,
    /// Payment-card number
    Financial,
    /// IPv4 or IPv6 address
    Ip,
}

impl EntityCategory {
    /// Whether this category produces a typed graph record when dispatched.
    /// Misc, ethnicity, weight, height and financial entities are tracked in
    /// the seen set but never emitted.
    pub fn emits_record(&self) -> bool {
        matches!(
            self,
            Self::Person
                | Self::Business
                | Self::Address
                | Self::Email
                | Self::Domain
                | Self::Phone
                | Self::Ip
        )
    }
}

/// All entities detected in one note, grouped by category.
///
/// Built once per note by the aggregator and read-only afterward. Absent
/// detections are empty vectors, never missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorizedEntities {
    #[serde(default)]
    pub person: Vec<String>,
    #[serde(default)]
    pub business: Vec<String>,
    #[serde(default)]
    pub address: Vec<String>,
    #[serde(default)]
    pub misc: Vec<String>,
    #[serde(default)]
    pub ethnicity: Vec<String>,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub domain: Vec<String>,
    #[serde(default)]
    pub phone: Vec<String>,
    #[serde(default)]
    pub weight: Vec<String>,
    #[serde(default)]
    pub height: Vec<String>,
    #[serde(default)]
    pub financial: Vec<String>,
    #[serde(default)]
    pub ip: Vec<String>,
}

impl CategorizedEntities {
    /// The universe of known mentions, concatenated in the fixed category
    /// order. Duplicates are permitted; category membership, not identity,
    /// drives record dispatch. The order is load-bearing for the
    /// first-match antecedent tie-break and must stay stable.
    pub fn flat_list(&self) -> Vec<String> {
        let mut flat = Vec::with_capacity(self.len());
        flat.extend(self.person.iter().cloned());
        flat.extend(self.business.iter().cloned());
        flat.extend(self.address.iter().cloned());
        flat.extend(self.misc.iter().cloned());
        flat.extend(self.ethnicity.iter().cloned());
        flat.extend(self.email.iter().cloned());
        flat.extend(self.domain.iter().cloned());
        flat.extend(self.phone.iter().cloned());
        flat.extend(self.weight.iter().cloned());
        flat.extend(self.height.iter().cloned());
        flat.extend(self.financial.iter().cloned());
        flat.extend(self.ip.iter().cloned());
        flat
    }

    /// Classification index: entity string -> category, built once per note.
    ///
    /// When the same surface string appears in more than one category, the
    /// category earlier in dispatch precedence wins (person, ip, business,
    /// phone, domain, email, address, then the non-record categories).
    pub fn classification(&self) -> HashMap<String, EntityCategory> {
        let groups: [(&[String], EntityCategory); 12] = [
            (&self.person, EntityCategory::Person),
            (&self.ip, EntityCategory::Ip),
            (&self.business, EntityCategory::Business),
            (&self.phone, EntityCategory::Phone),
            (&self.domain, EntityCategory::Domain),
            (&self.email, EntityCategory::Email),
            (&self.address, EntityCategory::Address),
            (&self.misc, EntityCategory::Misc),
            (&self.ethnicity, EntityCategory::Ethnicity),
            (&self.weight, EntityCategory::Weight),
            (&self.height, EntityCategory::Height),
            (&self.financial, EntityCategory::Financial),
        ];

        let mut index = HashMap::with_capacity(self.len());
        for (entities, category) in groups {
            for entity in entities {
                index.entry(entity.clone()).or_insert(category);
            }
        }
        index
    }

    /// Total number of entities across all categories
    pub fn len(&self) -> usize {
        self.person.len()
            + self.business.len()
            + self.address.len()
            + self.misc.len()
            + self.ethnicity.len()
            + self.email.len()
            + self.domain.len()
            + self.phone.len()
            + self.weight.len()
            + self.height.len()
            + self.financial.len()
            + self.ip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategorizedEntities {
        CategorizedEntities {
            person: vec!["John Doe".into()],
            business: vec!["Acme Corp".into()],
            email: vec!["a@b.com".into()],
            domain: vec!["b.com".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_list_order() {
        let entities = sample();
        assert_eq!(
            entities.flat_list(),
            vec!["John Doe", "Acme Corp", "a@b.com", "b.com"]
        );
    }

    #[test]
    fn test_classification_precedence() {
        // The same string in person and business classifies as person.
        let mut entities = sample();
        entities.business.push("John Doe".into());

        let index = entities.classification();
        assert_eq!(index.get("John Doe"), Some(&EntityCategory::Person));
        assert_eq!(index.get("Acme Corp"), Some(&EntityCategory::Business));
    }

    #[test]
    fn test_empty_collection() {
        let entities = CategorizedEntities::default();
        assert!(entities.is_empty());
        assert!(entities.flat_list().is_empty());
        assert!(entities.classification().is_empty());
    }

    #[test]
    fn test_record_emitting_categories() {
        assert!(EntityCategory::Person.emits_record());
        assert!(EntityCategory::Ip.emits_record());
        assert!(!EntityCategory::Misc.emits_record());
        assert!(!EntityCategory::Financial.emits_record());
    }
}
