//! Address- and name-parsing collaborators, served by the NLP worker

use crate::nlp::NlpClient;
use crate::{PredictorError, Result};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Structured address fields as mapped by the worker. Every field is
/// optional; the worker only returns components it actually labeled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAddress {
    pub street_number: Option<String>,
    pub building_name: Option<String>,
    pub apartment_no: Option<String>,
    pub street_name: Option<String>,
    pub street_direction: Option<String>,
    pub street_type: Option<String>,
    pub city: Option<String>,
    pub province_state: Option<String>,
    pub country: Option<String>,
    pub po_box: Option<String>,
    pub post_code: Option<String>,
    pub notes: Option<String>,
}

/// Human-name parts; any part may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedName {
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
}

/// Address-string parser collaborator. Fails with
/// [`PredictorError::RepeatedLabel`] when the same component label occurs
/// twice; callers treat that failure as non-fatal.
#[allow(async_fn_in_trait)]
pub trait AddressParser {
    async fn parse_address(&self, text: &str) -> Result<ParsedAddress>;
}

/// Human-name parser collaborator
#[allow(async_fn_in_trait)]
pub trait NameParser {
    async fn parse_name(&self, text: &str) -> Result<ParsedName>;
}

#[derive(Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct AddressParseResponse {
    address: Option<ParsedAddress>,
    error: Option<AddressParseFailure>,
}

#[derive(Deserialize)]
struct AddressParseFailure {
    kind: String,
    #[serde(default)]
    parsed: String,
    #[serde(default)]
    original: String,
}

impl AddressParser for NlpClient {
    #[instrument(skip(self, text))]
    async fn parse_address(&self, text: &str) -> Result<ParsedAddress> {
        let response: AddressParseResponse = self
            .post_json("/parse/address", &ParseRequest { text })
            .await?;

        if let Some(failure) = response.error {
            if failure.kind == "repeated_label" {
                return Err(PredictorError::RepeatedLabel {
                    parsed: failure.parsed,
                    original: failure.original,
                });
            }
            return Err(PredictorError::Processing(format!(
                "Address parse failed: {}",
                failure.kind
            )));
        }

        response.address.ok_or_else(|| {
            PredictorError::Processing("Address parse response missing fields".to_string())
        })
    }
}

impl NameParser for NlpClient {
    #[instrument(skip(self, text))]
    async fn parse_name(&self, text: &str) -> Result<ParsedName> {
        self.post_json("/parse/name", &ParseRequest { text }).await
    }
}
