//! Coreference mention rewriter
//!
//! Substitutes pronoun/alias mention spans with the named entity their
//! cluster refers to, so the semantic-role stage sees resolved names
//! instead of pronouns.

use casegraph_predictors::NlpPredictor;
use tracing::{debug, instrument};

use crate::error::Result;

/// Rewrite a note using the coreference predictor.
///
/// Clusters with no mention containing a known entity are left alone;
/// absent or empty clusters degrade to returning the note unchanged.
#[instrument(skip(nlp, note, flat))]
pub async fn resolve<N: NlpPredictor>(nlp: &N, note: &str, flat: &[String]) -> Result<String> {
    let prediction = nlp.coref(note).await?;

    if prediction.clusters.is_empty() {
        debug!("No coreference clusters; leaving note unchanged");
        return Ok(note.to_string());
    }

    let reps = representatives(&prediction.clusters, &prediction.document, flat);
    let useful = reps.iter().filter(|r| r.is_some()).count();
    debug!("{} of {} clusters are useful", useful, prediction.clusters.len());

    Ok(rewrite(prediction.document, &prediction.clusters, &reps))
}

/// Pick each cluster's representative entity: the first known entity
/// that is a substring of any mention's joined tokens. Mentions are
/// scanned in order; the first match wins for the whole cluster.
fn representatives(
    clusters: &[Vec<(usize, usize)>],
    document: &[String],
    flat: &[String],
) -> Vec<Option<String>> {
    clusters
        .iter()
        .map(|cluster| {
            cluster.iter().find_map(|&(start, end)| {
                let joined = join_span(document, start, end)?;
                flat.iter()
                    .find(|entity| joined.contains(entity.as_str()))
                    .cloned()
            })
        })
        .collect()
}

fn join_span(document: &[String], start: usize, end: usize) -> Option<String> {
    let tokens = document.get(start..=end)?;
    Some(tokens.join(" "))
}

/// Replace every single-token mention (start == end) of a useful cluster
/// with the cluster's representative, then re-join the document with
/// single spaces. Multi-token mentions are left in place.
fn rewrite(
    mut document: Vec<String>,
    clusters: &[Vec<(usize, usize)>],
    reps: &[Option<String>],
) -> String {
    for (cluster, rep) in clusters.iter().zip(reps.iter()) {
        let Some(rep) = rep else { continue };
        for &(start, end) in cluster {
            if start == end && start < document.len() {
                document[start] = rep.clone();
            }
        }
    }
    document.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_representative_from_first_matching_mention() {
        let document = doc(&["John", "Doe", "said", "he", "left"]);
        let clusters = vec![vec![(0, 1), (3, 3)]];
        let flat = vec!["John Doe".to_string()];

        let reps = representatives(&clusters, &document, &flat);
        assert_eq!(reps, vec![Some("John Doe".to_string())]);
    }

    #[test]
    fn test_unmatched_cluster_is_not_useful() {
        let document = doc(&["it", "rained", "today"]);
        let clusters = vec![vec![(0, 0)]];
        let flat = vec!["John Doe".to_string()];

        let reps = representatives(&clusters, &document, &flat);
        assert_eq!(reps, vec![None]);
    }

    #[test]
    fn test_rewrite_replaces_single_token_mentions() {
        let document = doc(&["John", "Doe", "said", "he", "left"]);
        let clusters = vec![vec![(0, 1), (3, 3)]];
        let reps = vec![Some("John Doe".to_string())];

        let rewritten = rewrite(document, &clusters, &reps);
        assert_eq!(rewritten, "John Doe said John Doe left");
    }

    #[test]
    fn test_rewrite_preserves_other_tokens() {
        let document = doc(&["she", "visited", "Acme", "yesterday"]);
        let clusters = vec![vec![(0, 0)], vec![(2, 2)]];
        let reps = vec![Some("Mary Smith".to_string()), None];

        let rewritten = rewrite(document, &clusters, &reps);
        assert_eq!(rewritten, "Mary Smith visited Acme yesterday");
    }

    #[test]
    fn test_rewrite_skips_multi_token_mentions() {
        let document = doc(&["the", "tall", "man", "ran"]);
        let clusters = vec![vec![(0, 2)]];
        let reps = vec![Some("John Doe".to_string())];

        let rewritten = rewrite(document, &clusters, &reps);
        assert_eq!(rewritten, "the tall man ran");
    }

    #[test]
    fn test_out_of_range_span_is_ignored() {
        let document = doc(&["short", "doc"]);
        let clusters = vec![vec![(5, 9)]];
        let flat = vec!["short".to_string()];

        let reps = representatives(&clusters, &document, &flat);
        assert_eq!(reps, vec![None]);
    }
}
