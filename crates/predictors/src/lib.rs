//! Collaborator clients for casegraph
//!
//! This crate contains the HTTP clients the pipeline talks to:
//! - NlpClient: the Python NLP worker (NER, coreference, SRL) plus its
//!   address- and name-parsing endpoints
//! - GeoClient: IP geolocation lookup
//!
//! Every collaborator is consumed through a trait so the pipeline can be
//! exercised with scripted implementations in tests.

pub mod error;
pub mod geo;
pub mod nlp;
pub mod parse;

pub use error::{PredictorError, Result};
pub use geo::{GeoClient, GeoLookup, GeoPoint};
pub use nlp::{CorefPrediction, NerPrediction, NlpClient, NlpPredictor, SrlPrediction, VerbFrame};
pub use parse::{AddressParser, NameParser, ParsedAddress, ParsedName};
