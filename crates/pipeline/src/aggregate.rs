//! Entity aggregator: statistical NER spans merged with regex detectors

use casegraph_core::{CategorizedEntities, ETHNICITIES};
use casegraph_predictors::NlpPredictor;
use tracing::{debug, instrument};

use crate::detectors;
use crate::error::Result;
use crate::sentence;

/// Detect all entities in a note.
///
/// Sentences are tagged one at a time by the NER predictor, in order; the
/// regex detectors run over the whole note. Pure function of the note
/// text plus the predictor responses, so re-running it yields identical
/// results.
#[instrument(skip(nlp, note))]
pub async fn detect<N: NlpPredictor>(nlp: &N, note: &str) -> Result<CategorizedEntities> {
    let mut entities = CategorizedEntities::default();

    for sent in sentence::split(note) {
        let prediction = nlp.ner(&sent).await?;
        collect_spans(&prediction.words, &prediction.tags, &mut entities);
    }

    entities.email = detectors::emails(note);
    entities.domain = detectors::domains(note);
    entities.phone = detectors::phone_numbers(note);
    entities.weight = detectors::weights(note);
    entities.height = detectors::heights(note);
    entities.ip = detectors::ips(note);
    entities.financial = detectors::card_numbers(note);

    // Misc tokens in the ethnicity vocabulary move to their own list
    let (ethnicity, misc) = entities
        .misc
        .drain(..)
        .partition(|token| ETHNICITIES.contains(&token.as_str()));
    entities.ethnicity = ethnicity;
    entities.misc = misc;

    debug!("Aggregated {} entities", entities.len());
    Ok(entities)
}

/// Reconstruct multi-token spans from a BILOU tag sequence.
///
/// `B`/`I` accumulate a pending span, `L` closes it and classifies by the
/// tag suffix, `U` emits a single-token span immediately, `O` is ignored.
fn collect_spans(words: &[String], tags: &[String], entities: &mut CategorizedEntities) {
    let mut pending = String::new();

    for (token, tag) in words.iter().zip(tags.iter()) {
        let mut parts = tag.splitn(2, '-');
        let marker = parts.next().unwrap_or_default().trim();
        let suffix = parts.next().unwrap_or_default().trim();

        match marker {
            "U" => push_span(entities, suffix, token.clone()),
            "B" | "I" => {
                pending.push_str(token);
                pending.push(' ');
            }
            "L" => {
                pending.push_str(token);
                push_span(entities, suffix, std::mem::take(&mut pending));
            }
            _ => {}
        }
    }
}

fn push_span(entities: &mut CategorizedEntities, suffix: &str, span: String) {
    match suffix {
        "PER" | "PERSON" => entities.person.push(span),
        "LOC" | "FAC" => entities.address.push(span),
        "ORG" => entities.business.push(span),
        _ => entities.misc.push(span),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collect_spans_multi_token_person() {
        let words = strings(&["John", "Doe", "visited", "Acme"]);
        let tags = strings(&["B-PER", "L-PER", "O", "U-ORG"]);

        let mut entities = CategorizedEntities::default();
        collect_spans(&words, &tags, &mut entities);

        assert_eq!(entities.person, vec!["John Doe"]);
        assert_eq!(entities.business, vec!["Acme"]);
    }

    #[test]
    fn test_collect_spans_location_and_misc() {
        let words = strings(&["221B", "Baker", "Street", "Asian"]);
        let tags = strings(&["B-FAC", "I-FAC", "L-FAC", "U-MISC"]);

        let mut entities = CategorizedEntities::default();
        collect_spans(&words, &tags, &mut entities);

        assert_eq!(entities.address, vec!["221B Baker Street"]);
        assert_eq!(entities.misc, vec!["Asian"]);
    }

    #[test]
    fn test_collect_spans_ignores_outside_tags() {
        let words = strings(&["nothing", "here"]);
        let tags = strings(&["O", "O"]);

        let mut entities = CategorizedEntities::default();
        collect_spans(&words, &tags, &mut entities);
        assert!(entities.is_empty());
    }
}
