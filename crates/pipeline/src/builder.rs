//! Relationship & graph builder
//!
//! Walks semantic frame groups (or, absent frames, the flat entity list)
//! to bind antecedents, assign relationship reasons, deduplicate entities
//! and emit typed graph records. All state here is scoped to one
//! extraction session and must never be shared across notes.

use casegraph_core::{
    remote_id, AddressRecord, BusinessRecord, DomainRecord, EmailRecord, EntityCategory,
    GraphRecord, IpAddressRecord, PersonRecord, RelationReason, Relationship, TelephoneRecord,
};
use casegraph_predictors::{AddressParser, GeoLookup, NameParser, PredictorError};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::detectors;
use crate::error::Result;

/// The fixed relationship reason assigned per category in the secondary
/// argument pass. IP addresses and the non-record categories carry none.
fn reason_for(category: EntityCategory) -> Option<RelationReason> {
    match category {
        EntityCategory::Person | EntityCategory::Business | EntityCategory::Domain => {
            Some(RelationReason::Other)
        }
        EntityCategory::Phone => Some(RelationReason::CurrentPhoneAddress),
        EntityCategory::Email => Some(RelationReason::CurrentEmailAddress),
        EntityCategory::Address => Some(RelationReason::CurrentAddress),
        _ => None,
    }
}

/// First-match antecedent binding: the first entity in flat-list order
/// whose text is a substring of any labeled segment's span, scanning the
/// group's segments in order and stopping at the first hit. The entity
/// order is fixed by category concatenation order, not by argument
/// position, so the bound segment need not be ARG0.
fn bind_antecedent(group: &[String], flat: &[String]) -> Option<String> {
    for entity in flat {
        for segment in group {
            if let Some((_, span)) = segment.split_once(": ") {
                if span.trim().contains(entity.as_str()) {
                    return Some(entity.clone());
                }
            }
        }
    }
    None
}

/// Session-scoped accumulation state for one extraction run
#[derive(Debug, Default)]
pub struct GraphBuilder {
    /// Entity strings already converted into a record this session
    seen: HashSet<String>,
    /// Antecedent -> entity pairs already recorded
    ledger: HashSet<(String, String)>,
    /// Entity string -> the remoteID of its emitted record
    record_ids: HashMap<String, String>,
    records: Vec<GraphRecord>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[GraphRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<GraphRecord> {
        self.records
    }

    /// Number of entities marked seen so far
    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// Process one verb's frame group: bind the antecedent, emit its
    /// record if unseen, then scan the remaining ARG segments for related
    /// entities.
    pub async fn process_group<P, G>(
        &mut self,
        group: &[String],
        flat: &[String],
        index: &HashMap<String, EntityCategory>,
        parsers: &P,
        geo: &G,
    ) -> Result<()>
    where
        P: AddressParser + NameParser,
        G: GeoLookup,
    {
        let Some(antecedent) = bind_antecedent(group, flat) else {
            debug!("Frame group has no known entity; skipping");
            return Ok(());
        };

        if !self.seen.contains(&antecedent) {
            self.seen.insert(antecedent.clone());
            self.dispatch(&antecedent, None, None, index, parsers, geo)
                .await?;
        }

        let antecedent_id = self.record_ids.get(&antecedent).cloned();

        // Secondary argument pass over segments after the first
        for segment in group.iter().skip(1) {
            let Some((label, span)) = segment.split_once(": ") else {
                continue;
            };
            if !label.contains("ARG") {
                continue;
            }
            let span = span.trim();

            for entity in flat {
                if self.seen.contains(entity) || !span.contains(entity.as_str()) {
                    continue;
                }
                let pair = (antecedent.clone(), entity.clone());
                if self.ledger.contains(&pair) {
                    continue;
                }

                self.seen.insert(entity.clone());
                self.ledger.insert(pair);

                let reason = index.get(entity).copied().and_then(reason_for);
                self.dispatch(entity, reason, antecedent_id.as_deref(), index, parsers, geo)
                    .await?;
            }
        }

        Ok(())
    }

    /// Fallback when the note produced no frames at all: one record per
    /// unseen entity in flat-list order, with no relationship attached.
    pub async fn flat_pass<P, G>(
        &mut self,
        flat: &[String],
        index: &HashMap<String, EntityCategory>,
        parsers: &P,
        geo: &G,
    ) -> Result<()>
    where
        P: AddressParser + NameParser,
        G: GeoLookup,
    {
        for entity in flat {
            if self.seen.contains(entity) {
                continue;
            }
            self.seen.insert(entity.clone());
            self.dispatch(entity, None, None, index, parsers, geo).await?;
        }
        Ok(())
    }

    /// Category dispatch shared by all emission points. The caller has
    /// already marked the entity seen; a dispatch that emits nothing
    /// (misc categories, unparseable phone) leaves it seen.
    async fn dispatch<P, G>(
        &mut self,
        entity: &str,
        reason: Option<RelationReason>,
        antecedent_id: Option<&str>,
        index: &HashMap<String, EntityCategory>,
        parsers: &P,
        geo: &G,
    ) -> Result<()>
    where
        P: AddressParser + NameParser,
        G: GeoLookup,
    {
        let Some(&category) = index.get(entity) else {
            return Ok(());
        };
        if !category.emits_record() {
            return Ok(());
        }

        let relationships = match (antecedent_id, reason) {
            (Some(id), Some(reason)) => vec![Relationship::new(id, reason)],
            _ => Vec::new(),
        };
        let id = remote_id();

        let record = match category {
            EntityCategory::Person => {
                let name = parsers.parse_name(entity).await?;
                let part = |value: Option<String>| value.filter(|v| !v.is_empty());
                GraphRecord::Person(PersonRecord {
                    remote_id: id.clone(),
                    given1: part(name.first),
                    given2: part(name.middle),
                    surname: part(name.last),
                    relationships,
                })
            }
            EntityCategory::Business => GraphRecord::Business(BusinessRecord {
                remote_id: id.clone(),
                business_name: entity.to_string(),
                relationships,
            }),
            EntityCategory::Domain => GraphRecord::Domain(DomainRecord {
                remote_id: id.clone(),
                domain_name: entity.to_string(),
                relationships,
            }),
            EntityCategory::Email => GraphRecord::EmailAddress(EmailRecord {
                remote_id: id.clone(),
                email_address: entity.to_string(),
                relationships,
            }),
            EntityCategory::Phone => match detectors::phone_parts(entity) {
                Some(parts) => GraphRecord::TelephoneNumber(TelephoneRecord {
                    remote_id: id.clone(),
                    country_code: parts.country_code,
                    area_code: parts.area_code,
                    number: parts.number,
                    relationships,
                }),
                None => {
                    debug!("No subscriber number in \"{}\"; no record emitted", entity);
                    return Ok(());
                }
            },
            EntityCategory::Ip => {
                // Lookup failure degrades the record, never the session
                let point = match geo.lookup(entity).await {
                    Ok(point) => Some(point),
                    Err(e) => {
                        warn!("Geolocation lookup failed for {}: {}", entity, e);
                        None
                    }
                };
                let coordinate =
                    |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
                GraphRecord::IpAddress(IpAddressRecord {
                    remote_id: id.clone(),
                    ip_address: entity.to_string(),
                    latitude: point.map(|p| coordinate(p.latitude)),
                    longitude: point.map(|p| coordinate(p.longitude)),
                    version6: entity.contains(':').then_some(true),
                    relationships,
                })
            }
            EntityCategory::Address => match parsers.parse_address(entity).await {
                Ok(parsed) => GraphRecord::Address(AddressRecord {
                    remote_id: id.clone(),
                    street_number: parsed.street_number,
                    building_name: parsed.building_name,
                    apartment_no: parsed.apartment_no,
                    street_name: parsed.street_name,
                    street_direction: parsed.street_direction,
                    street_type: parsed.street_type,
                    city: parsed.city,
                    province_state: parsed.province_state,
                    country: parsed.country,
                    po_box: parsed.po_box,
                    post_code: parsed.post_code,
                    notes: parsed.notes,
                    relationships,
                }),
                Err(PredictorError::RepeatedLabel { parsed, original }) => {
                    warn!("Address parse rejected \"{}\"; degrading to notes", entity);
                    GraphRecord::Address(AddressRecord {
                        remote_id: id.clone(),
                        notes: Some(format!(
                            "Error parsing \"{}\" from \"{}\"",
                            parsed, original
                        )),
                        relationships,
                        ..Default::default()
                    })
                }
                Err(e) => return Err(e.into()),
            },
            // Handled by the emits_record guard above
            _ => return Ok(()),
        };

        self.record_ids.insert(entity.to_string(), id);
        self.records.push(record);
        Ok(())
    }
}
