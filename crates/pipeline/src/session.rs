//! The extraction session orchestrator

use casegraph_core::{CategorizedEntities, GraphRecord};
use casegraph_predictors::{AddressParser, GeoLookup, NameParser, NlpPredictor};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::builder::GraphBuilder;
use crate::error::Result;
use crate::{aggregate, coref, frames};

/// The outcome of one extraction session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    /// Graph records in emission order
    pub records: Vec<GraphRecord>,
    /// The note after coreference rewriting
    pub rewritten_note: String,
    /// All detected entities, by category
    pub entities: CategorizedEntities,
    pub extracted_at: DateTime<Utc>,
}

/// Runs the pipeline against the external collaborators.
///
/// One `extract` call is one session: the seen set, the relationship
/// ledger and the accumulated records are created fresh inside it and
/// dropped with it, so extracting concurrent notes just takes one
/// extractor (or clone) per note. The stages run strictly in order; a
/// collaborator failure outside the documented degradations abandons the
/// session with no partial result.
pub struct Extractor<M, G> {
    nlp: M,
    geo: G,
}

impl<M, G> Extractor<M, G>
where
    M: NlpPredictor + AddressParser + NameParser,
    G: GeoLookup,
{
    pub fn new(nlp: M, geo: G) -> Self {
        Self { nlp, geo }
    }

    /// Run the full pipeline over one note
    #[instrument(skip(self, note))]
    pub async fn extract(&self, note: &str) -> Result<Extraction> {
        let entities = aggregate::detect(&self.nlp, note).await?;
        let flat = entities.flat_list();
        let index = entities.classification();

        let rewritten = coref::resolve(&self.nlp, note, &flat).await?;
        let groups = frames::collect(&self.nlp, &rewritten).await?;

        let mut builder = GraphBuilder::new();
        if groups.is_empty() {
            builder
                .flat_pass(&flat, &index, &self.nlp, &self.geo)
                .await?;
        } else {
            for group in &groups {
                builder
                    .process_group(group, &flat, &index, &self.nlp, &self.geo)
                    .await?;
            }
        }

        let records = builder.into_records();
        info!(
            "Extracted {} records from {} entities ({} frame groups)",
            records.len(),
            flat.len(),
            groups.len()
        );

        Ok(Extraction {
            records,
            rewritten_note: rewritten,
            entities,
            extracted_at: Utc::now(),
        })
    }
}
