// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Minimal Pinecone REST client: host resolution and hybrid query.

use std::time::Duration;

use hrdesk_config::model::PineconeConfig;
use hrdesk_core::HrDeskError;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::bm25::SparseVector;

const API_VERSION: &str = "2025-01";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    #[serde(skip_serializing_if = "Option::is_none")]
    sparse_vector: Option<&'a SparseVector>,
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<ScoredMatch>,
}

/// One hit returned by the index.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredMatch {
    pub id: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct DescribeIndexResponse {
    host: String,
}

/// Handle on one Pinecone index data plane.
#[derive(Debug, Clone)]
pub struct PineconeIndex {
    client: reqwest::Client,
    query_url: String,
    namespace: Option<String>,
    timeout: Duration,
}

impl PineconeIndex {
    /// Build a client and resolve the data-plane host.
    ///
    /// Uses `index_host` when set, otherwise asks the control plane for the
    /// host of `index_name`.
    pub async fn connect(config: &PineconeConfig) -> Result<Self, HrDeskError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| HrDeskError::RetrieverUnavailable("pinecone.api_key is not set".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "Api-Key",
            HeaderValue::from_str(api_key)
                .map_err(|e| HrDeskError::Config(format!("invalid Pinecone API key: {e}")))?,
        );
        headers.insert(
            "X-Pinecone-API-Version",
            HeaderValue::from_static(API_VERSION),
        );

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| HrDeskError::Retrieval {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let host = match (&config.index_host, &config.index_name) {
            (Some(host), _) => host.clone(),
            (None, Some(name)) => describe_host(&client, &config.controller_url, name).await?,
            (None, None) => {
                return Err(HrDeskError::RetrieverUnavailable(
                    "pinecone.index_name or pinecone.index_host must be set".into(),
                ));
            }
        };

        let base = with_scheme(&host);
        info!(host = %base, "Pinecone index resolved");

        Ok(Self {
            client,
            query_url: format!("{base}/query"),
            namespace: config.namespace.clone(),
            timeout,
        })
    }

    /// Hybrid query. An empty sparse vector is left out of the request.
    pub async fn query(
        &self,
        dense: &[f32],
        sparse: &SparseVector,
        top_k: usize,
    ) -> Result<Vec<ScoredMatch>, HrDeskError> {
        let body = QueryRequest {
            vector: dense,
            sparse_vector: (!sparse.is_empty()).then_some(sparse),
            top_k,
            include_metadata: true,
            namespace: self.namespace.as_deref(),
        };

        let response = self
            .client
            .post(&self.query_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(HrDeskError::Retrieval {
                message: format!("Pinecone query returned {status}: {detail}"),
                source: None,
            });
        }

        let parsed: QueryResponse = response.json().await.map_err(|e| HrDeskError::Retrieval {
            message: format!("failed to parse Pinecone response: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(matches = parsed.matches.len(), "Pinecone query complete");
        Ok(parsed.matches)
    }

    fn request_error(&self, e: reqwest::Error) -> HrDeskError {
        if e.is_timeout() {
            HrDeskError::Timeout {
                duration: self.timeout,
            }
        } else {
            HrDeskError::Retrieval {
                message: format!("Pinecone request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

async fn describe_host(
    client: &reqwest::Client,
    controller_url: &str,
    index_name: &str,
) -> Result<String, HrDeskError> {
    let url = format!("{}/indexes/{index_name}", controller_url.trim_end_matches('/'));
    let unavailable =
        |detail: String| HrDeskError::RetrieverUnavailable(format!("index `{index_name}`: {detail}"));

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| unavailable(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(unavailable(format!("control plane returned {status}")));
    }
    let described: DescribeIndexResponse = response
        .json()
        .await
        .map_err(|e| unavailable(e.to_string()))?;
    Ok(described.host)
}

fn with_scheme(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(
            with_scheme("hr-policies-abc.svc.aped-1.pinecone.io"),
            "https://hr-policies-abc.svc.aped-1.pinecone.io"
        );
        assert_eq!(with_scheme("http://127.0.0.1:9000/"), "http://127.0.0.1:9000");
    }

    #[test]
    fn query_body_uses_camel_case() {
        let sparse = SparseVector {
            indices: vec![7],
            values: vec![0.5],
        };
        let body = QueryRequest {
            vector: &[0.25],
            sparse_vector: Some(&sparse),
            top_k: 4,
            include_metadata: true,
            namespace: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "vector": [0.25],
                "sparseVector": {"indices": [7], "values": [0.5]},
                "topK": 4,
                "includeMetadata": true
            })
        );
    }
}
