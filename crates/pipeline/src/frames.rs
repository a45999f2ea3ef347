//! Semantic frame extractor
//!
//! Pulls the bracketed argument segments out of each verb's SRL
//! description, one frame group per verb, ordered by sentence then verb.

use casegraph_predictors::NlpPredictor;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::sentence;

// Captures the inside of each bracketed segment, e.g.
// "[ARG0: John] gave [ARG1: the car]" -> "ARG0: John", "ARG1: the car"
const BRACKET_PATTERN: &str = r"[^\[]*\[([^\]]*)\]";

fn bracket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BRACKET_PATTERN).expect("bracket pattern is valid"))
}

/// Collect every verb's frame group for the note. Verbs whose
/// description carries no bracketed segments are skipped.
#[instrument(skip(nlp, note))]
pub async fn collect<N: NlpPredictor>(nlp: &N, note: &str) -> Result<Vec<Vec<String>>> {
    let mut groups = Vec::new();

    for sent in sentence::split(note) {
        let prediction = nlp.srl(&sent).await?;
        for verb in prediction.verbs {
            let segments = bracketed_segments(&verb.description);
            if !segments.is_empty() {
                groups.push(segments);
            }
        }
    }

    debug!("Collected {} frame groups", groups.len());
    Ok(groups)
}

/// All bracketed segments of one SRL description, in order
fn bracketed_segments(description: &str) -> Vec<String> {
    bracket_re()
        .captures_iter(description)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_segments() {
        let segments = bracketed_segments("[ARG0: John Doe] [V: gave] [ARG1: the car]");
        assert_eq!(segments, vec!["ARG0: John Doe", "V: gave", "ARG1: the car"]);
    }

    #[test]
    fn test_bracketed_segments_with_surrounding_text() {
        let segments = bracketed_segments("yesterday [ARG0: Mary] suddenly [V: left]");
        assert_eq!(segments, vec!["ARG0: Mary", "V: left"]);
    }

    #[test]
    fn test_no_brackets_yields_empty() {
        assert!(bracketed_segments("no structure at all").is_empty());
    }
}
