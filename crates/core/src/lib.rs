//! Core domain types for casegraph
//!
//! This crate defines the fundamental data structures used throughout
//! the application: entity categories, the categorized entity collection
//! built by the aggregator, and the typed graph records emitted by the
//! relationship builder.

pub mod entity;
pub mod record;

pub use entity::{CategorizedEntities, EntityCategory, ETHNICITIES};
pub use record::{
    remote_id, AddressRecord, BusinessRecord, DomainRecord, EmailRecord, GraphRecord,
    IpAddressRecord, PersonRecord, RelationReason, Relationship, TelephoneRecord, REASONS,
};
