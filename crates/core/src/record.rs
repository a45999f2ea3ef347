//! Typed graph records emitted by the relationship builder

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Relationship-reason vocabulary accepted by downstream record entry.
/// The builder only ever assigns four of these; the rest are valid values
/// for manually entered relationships.
pub const REASONS: [&str; 48] = [
    "Alias",
    "Associate",
    "Associated Business",
    "Beneficiary",
    "Brother",
    "Business",
    "Business Owner",
    "Cash Flow",
    "Complainant",
    "Complainant Address",
    "Complainant Email",
    "Complainant Phone",
    "Correspondent Bank",
    "Cousin",
    "Current Address",
    "Current Email Address",
    "Current License Plate",
    "Current Phone Address",
    "Current Phone Number",
    "Destination Bank",
    "Displayed On",
    "Driver",
    "Editing Investigator",
    "Frequents No Fixed Address",
    "Incident Location",
    "Involved in Ticket",
    "Issued To",
    "Issuer",
    "Observed",
    "Origin Bank",
    "Other",
    "Owner",
    "Payee",
    "Payee Bank",
    "Payor",
    "Payor Bank",
    "Permit Element",
    "Person Owner",
    "Physical location",
    "Registered Owner",
    "Residence",
    "Seasonal Residence",
    "Sister",
    "Temporary residence",
    "Theft Of",
    "Ticketed Entity",
    "Ticketing Officer Note",
    "Uses",
];

/// Generate a fresh record identifier: a v4 UUID rendered as its 128-bit
/// integer in decimal. Unique within a session by construction.
pub fn remote_id() -> String {
    Uuid::new_v4().as_u128().to_string()
}

/// The fixed relationship reason the builder assigns per entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationReason {
    /// person, business and domain links
    Other,
    CurrentPhoneAddress,
    CurrentEmailAddress,
    CurrentAddress,
}

impl RelationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationReason::Other => "Other",
            RelationReason::CurrentPhoneAddress => "Current Phone Address",
            RelationReason::CurrentEmailAddress => "Current Email Address",
            RelationReason::CurrentAddress => "Current Address",
        }
    }
}

impl std::fmt::Display for RelationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A directed link from a record back to the record of the antecedent it
/// was extracted alongside
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// `remoteID` of the antecedent's record
    #[serde(rename = "remoteID")]
    pub remote_id: String,
    pub interlink_direction: String,
    pub reason: String,
}

impl Relationship {
    pub fn new(antecedent_id: impl Into<String>, reason: RelationReason) -> Self {
        Self {
            remote_id: antecedent_id.into(),
            interlink_direction: "Normal".to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A resolved person; only the name parts the parser produced are serialized
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PersonRecord {
    #[serde(rename = "remoteID")]
    pub remote_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    #[serde(rename = "remoteID")]
    pub remote_id: String,
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    #[serde(rename = "remoteID")]
    pub remote_id: String,
    pub domain_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    #[serde(rename = "remoteID")]
    pub remote_id: String,
    pub email_address: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// A phone number split by the dual-branch capture pattern
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelephoneRecord {
    #[serde(rename = "remoteID")]
    pub remote_id: String,
    pub country_code: String,
    pub area_code: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// An IP address, optionally geolocated. Coordinates are absent when the
/// lookup failed; `version6` is serialized only when true.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IpAddressRecord {
    #[serde(rename = "remoteID")]
    pub remote_id: String,
    pub ip_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version6: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// A parsed street address. When the parser rejected the string with a
/// repeated-label failure, `notes` is the only populated field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    #[serde(rename = "remoteID")]
    pub remote_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// A typed graph node. Serializes with exactly one top-level key naming
/// the record kind, e.g. `{"person": {...}}` or `{"telephoneNumber": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum GraphRecord {
    Person(PersonRecord),
    Business(BusinessRecord),
    TelephoneNumber(TelephoneRecord),
    Domain(DomainRecord),
    EmailAddress(EmailRecord),
    IpAddress(IpAddressRecord),
    Address(AddressRecord),
}

impl GraphRecord {
    /// The top-level key this record serializes under
    pub fn kind(&self) -> &'static str {
        match self {
            GraphRecord::Person(_) => "person",
            GraphRecord::Business(_) => "business",
            GraphRecord::TelephoneNumber(_) => "telephoneNumber",
            GraphRecord::Domain(_) => "domain",
            GraphRecord::EmailAddress(_) => "emailAddress",
            GraphRecord::IpAddress(_) => "ipAddress",
            GraphRecord::Address(_) => "address",
        }
    }

    pub fn remote_id(&self) -> &str {
        match self {
            GraphRecord::Person(r) => &r.remote_id,
            GraphRecord::Business(r) => &r.remote_id,
            GraphRecord::TelephoneNumber(r) => &r.remote_id,
            GraphRecord::Domain(r) => &r.remote_id,
            GraphRecord::EmailAddress(r) => &r.remote_id,
            GraphRecord::IpAddress(r) => &r.remote_id,
            GraphRecord::Address(r) => &r.remote_id,
        }
    }
}
