//! HTTP client for the Python NLP worker (NER, coreference, SRL)

use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_WORKER_URL: &str = "http://localhost:8100";

fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// One sentence's NER tagging: parallel token and BILOU-tag sequences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerPrediction {
    pub words: Vec<String>,
    pub tags: Vec<String>,
}

/// Whole-note coreference result: the worker's tokenized document and
/// mention clusters as inclusive (start, end) token-index spans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorefPrediction {
    pub document: Vec<String>,
    #[serde(default)]
    pub clusters: Vec<Vec<(usize, usize)>>,
}

/// One verb frame from the SRL predictor. The description string encodes
/// bracketed argument labels, e.g. `[ARG0: John] gave [ARG1: the car]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbFrame {
    pub description: String,
}

/// One sentence's semantic-role decomposition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrlPrediction {
    #[serde(default)]
    pub verbs: Vec<VerbFrame>,
}

/// Statistical predictors consumed by the pipeline, one call per
/// sentence (NER, SRL) or per note (coreference)
#[allow(async_fn_in_trait)]
pub trait NlpPredictor {
    async fn ner(&self, sentence: &str) -> Result<NerPrediction>;
    async fn coref(&self, document: &str) -> Result<CorefPrediction>;
    async fn srl(&self, sentence: &str) -> Result<SrlPrediction>;
}

/// Client for the Python NLP worker service
#[derive(Clone)]
pub struct NlpClient {
    client: reqwest::Client,
    base_url: String,
}

impl NlpClient {
    /// Create a new NLP worker client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Client configured from `NLP_WORKER_URL`, defaulting to localhost
    pub fn default_local() -> Self {
        Self::new(env_or_default("NLP_WORKER_URL", DEFAULT_WORKER_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    pub(crate) async fn post_json<Req, Res>(&self, path: &str, request: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Res>()
            .await?;
        Ok(response)
    }
}

impl NlpPredictor for NlpClient {
    #[instrument(skip(self, sentence))]
    async fn ner(&self, sentence: &str) -> Result<NerPrediction> {
        let prediction: NerPrediction = self
            .post_json("/predict/ner", &SentenceRequest { sentence })
            .await?;
        debug!("NER tagged {} tokens", prediction.words.len());
        Ok(prediction)
    }

    #[instrument(skip(self, document))]
    async fn coref(&self, document: &str) -> Result<CorefPrediction> {
        let prediction: CorefPrediction = self
            .post_json("/predict/coref", &DocumentRequest { document })
            .await?;
        debug!(
            "Coreference produced {} clusters over {} tokens",
            prediction.clusters.len(),
            prediction.document.len()
        );
        Ok(prediction)
    }

    #[instrument(skip(self, sentence))]
    async fn srl(&self, sentence: &str) -> Result<SrlPrediction> {
        let prediction: SrlPrediction = self
            .post_json("/predict/srl", &SentenceRequest { sentence })
            .await?;
        debug!("SRL produced {} verb frames", prediction.verbs.len());
        Ok(prediction)
    }
}

#[derive(Serialize)]
struct SentenceRequest<'a> {
    sentence: &'a str,
}

#[derive(Serialize)]
struct DocumentRequest<'a> {
    document: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NlpClient::new("http://localhost:8100");
        assert_eq!(client.base_url(), "http://localhost:8100");
    }

    #[test]
    fn test_coref_prediction_deserializes_nested_spans() {
        let json = r#"{
            "document": ["John", "said", "he", "left"],
            "clusters": [[[0, 0], [2, 2]]]
        }"#;

        let prediction: CorefPrediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.document.len(), 4);
        assert_eq!(prediction.clusters, vec![vec![(0, 0), (2, 2)]]);
    }

    #[test]
    fn test_srl_prediction_defaults_missing_verbs() {
        let prediction: SrlPrediction = serde_json::from_str("{}").unwrap();
        assert!(prediction.verbs.is_empty());
    }
}
