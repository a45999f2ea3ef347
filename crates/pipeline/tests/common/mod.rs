//! Scripted collaborator implementations for pipeline tests

use casegraph_predictors::{
    AddressParser, CorefPrediction, GeoLookup, GeoPoint, NameParser, NerPrediction, NlpPredictor,
    ParsedAddress, ParsedName, PredictorError, Result, SrlPrediction, VerbFrame,
};
use std::collections::HashMap;

/// Scripted NLP worker. Unscripted sentences degrade gracefully: NER
/// tags every token `O`, coreference returns no clusters, SRL returns no
/// verbs.
#[derive(Default)]
pub struct MockNlp {
    ner: HashMap<String, NerPrediction>,
    coref: Option<CorefPrediction>,
    srl: HashMap<String, Vec<String>>,
    reject_addresses: bool,
}

impl MockNlp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ner(mut self, sentence: &str, words: &[&str], tags: &[&str]) -> Self {
        assert_eq!(words.len(), tags.len(), "words and tags must be parallel");
        self.ner.insert(
            sentence.to_string(),
            NerPrediction {
                words: words.iter().map(|w| w.to_string()).collect(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_coref(mut self, document: &[&str], clusters: Vec<Vec<(usize, usize)>>) -> Self {
        self.coref = Some(CorefPrediction {
            document: document.iter().map(|t| t.to_string()).collect(),
            clusters,
        });
        self
    }

    pub fn with_srl(mut self, sentence: &str, descriptions: &[&str]) -> Self {
        self.srl.insert(
            sentence.to_string(),
            descriptions.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    /// Make the address parser fail every parse with a repeated-label
    /// condition naming the first token and the original string
    pub fn rejecting_addresses(mut self) -> Self {
        self.reject_addresses = true;
        self
    }
}

impl NlpPredictor for MockNlp {
    async fn ner(&self, sentence: &str) -> Result<NerPrediction> {
        Ok(self.ner.get(sentence).cloned().unwrap_or_else(|| {
            let words: Vec<String> = sentence.split_whitespace().map(String::from).collect();
            let tags = vec!["O".to_string(); words.len()];
            NerPrediction { words, tags }
        }))
    }

    async fn coref(&self, document: &str) -> Result<CorefPrediction> {
        Ok(self.coref.clone().unwrap_or_else(|| CorefPrediction {
            document: document.split_whitespace().map(String::from).collect(),
            clusters: Vec::new(),
        }))
    }

    async fn srl(&self, sentence: &str) -> Result<SrlPrediction> {
        let verbs = self
            .srl
            .get(sentence)
            .map(|descriptions| {
                descriptions
                    .iter()
                    .map(|d| VerbFrame {
                        description: d.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(SrlPrediction { verbs })
    }
}

impl NameParser for MockNlp {
    async fn parse_name(&self, text: &str) -> Result<ParsedName> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let name = match parts.as_slice() {
            [] => ParsedName::default(),
            [first] => ParsedName {
                first: Some(first.to_string()),
                ..Default::default()
            },
            [first, last] => ParsedName {
                first: Some(first.to_string()),
                middle: None,
                last: Some(last.to_string()),
            },
            [first, middle @ .., last] => ParsedName {
                first: Some(first.to_string()),
                middle: Some(middle.join(" ")),
                last: Some(last.to_string()),
            },
        };
        Ok(name)
    }
}

impl AddressParser for MockNlp {
    async fn parse_address(&self, text: &str) -> Result<ParsedAddress> {
        if self.reject_addresses {
            return Err(PredictorError::RepeatedLabel {
                parsed: text.split_whitespace().next().unwrap_or_default().to_string(),
                original: text.to_string(),
            });
        }

        let mut tokens = text.split_whitespace();
        Ok(ParsedAddress {
            street_number: tokens.next().map(String::from),
            street_name: tokens.next().map(String::from),
            street_type: tokens.next().map(String::from),
            ..Default::default()
        })
    }
}

/// Scripted geolocation service
pub struct MockGeo {
    pub fail: bool,
    pub point: GeoPoint,
}

impl MockGeo {
    pub fn failing() -> Self {
        Self {
            fail: true,
            point: GeoPoint::default(),
        }
    }

    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            fail: false,
            point: GeoPoint {
                latitude: Some(latitude),
                longitude: Some(longitude),
            },
        }
    }
}

impl GeoLookup for MockGeo {
    async fn lookup(&self, ip: &str) -> Result<GeoPoint> {
        if self.fail {
            return Err(PredictorError::Processing(format!(
                "lookup failed for {}",
                ip
            )));
        }
        Ok(self.point)
    }
}
