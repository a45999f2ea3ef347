//! The casegraph extraction pipeline
//!
//! Four stages, run strictly in order for each note:
//! 1. Entity aggregation - statistical NER spans merged with regex
//!    detectors into one categorized entity collection
//! 2. Coreference mention rewriting - pronoun/alias spans substituted
//!    with their most relevant named-entity antecedent
//! 3. Semantic frame extraction - per-sentence verb/argument structures
//! 4. Relationship & graph building - deduplicated typed graph records
//!    with inferred relationship reasons
//!
//! All mutable state lives in one [`session::Extractor`] call; nothing is
//! shared across notes.

pub mod aggregate;
pub mod builder;
pub mod coref;
pub mod detectors;
pub mod error;
pub mod frames;
pub mod sentence;
pub mod session;

pub use builder::GraphBuilder;
pub use error::{ExtractError, Result};
pub use session::{Extraction, Extractor};
