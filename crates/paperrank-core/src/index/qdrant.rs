//! Qdrant REST adapter

use super::{Distance, IndexPoint, SearchHit, VectorIndex};
use crate::config::VectorIndexConfig;
use crate::error::{PaperRankError, Result};
use crate::paper::Paper;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Qdrant collection client
pub struct QdrantIndex {
    http_client: reqwest::Client,
    base_url: String,
    collection: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct VectorParams {
    size: usize,
    distance: Distance,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    result: T,
}

#[derive(Deserialize)]
struct CollectionInfo {
    config: CollectionConfig,
}

#[derive(Deserialize)]
struct CollectionConfig {
    params: CollectionParams,
}

#[derive(Deserialize)]
struct CollectionParams {
    vectors: serde_json::Value,
}

#[derive(Serialize)]
struct PointStruct<'a> {
    id: &'a str,
    vector: &'a [f32],
    payload: &'a Paper,
}

#[derive(Deserialize)]
struct ScoredPoint {
    score: f32,
    payload: Option<Paper>,
}

#[derive(Deserialize)]
struct ScrollResult {
    points: Vec<RecordPoint>,
}

#[derive(Deserialize)]
struct RecordPoint {
    payload: Option<Paper>,
}

#[derive(Deserialize)]
struct CountResult {
    count: usize,
}

impl QdrantIndex {
    /// Create new client from configuration
    pub fn new(config: &VectorIndexConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Collection name this client is bound to
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn url(&self, path: &str) -> String {
        format!("{}/collections/{}{}", self.base_url, self.collection, path)
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let req = self.http_client.request(method, url);
        match self.api_key {
            Some(ref key) => req.header("api-key", key),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let response = req.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(&self.collection, status, &body));
        }
        let parsed: ApiResponse<T> = response.json().await?;
        Ok(parsed.result)
    }

    async fn collection_info(&self) -> Result<Option<CollectionInfo>> {
        let response = self
            .request(reqwest::Method::GET, &self.url(""))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(&self.collection, status, &body));
        }
        let parsed: ApiResponse<CollectionInfo> = response.json().await?;
        Ok(Some(parsed.result))
    }
}

/// Map a failed Qdrant response to an error.
///
/// A missing collection and rejected requests are not upstream outages.
fn status_error(collection: &str, status: StatusCode, body: &str) -> PaperRankError {
    if status == StatusCode::NOT_FOUND {
        PaperRankError::Index(format!(
            "collection {} does not exist; run `paperrank init` or `paperrank ingest`",
            collection
        ))
    } else if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
        PaperRankError::Index(format!(
            "Qdrant rejected request (HTTP {}): {}",
            status, body
        ))
    } else {
        PaperRankError::ExternalError(format!("Qdrant error (HTTP {}): {}", status, body))
    }
}

/// Check an existing collection's vector config against what is requested
fn check_vector_params(
    collection: &str,
    existing: &serde_json::Value,
    dimensions: usize,
    distance: Distance,
) -> Result<()> {
    let params: VectorParams = serde_json::from_value(existing.clone()).map_err(|_| {
        PaperRankError::Config(format!(
            "collection {} uses named or unsupported vector config: {}",
            collection, existing
        ))
    })?;

    if params.size != dimensions || params.distance != distance {
        return Err(PaperRankError::Config(format!(
            "collection {} has {} dimensions ({}), expected {} ({})",
            collection,
            params.size,
            params.distance.as_str(),
            dimensions,
            distance.as_str()
        )));
    }
    Ok(())
}

fn search_body(vector: &[f32], limit: usize) -> serde_json::Value {
    json!({
        "vector": vector,
        "limit": limit,
        "with_payload": true,
    })
}

fn find_body(paper_id: &str) -> serde_json::Value {
    json!({
        "filter": {
            "must": [
                { "key": "id", "match": { "value": paper_id } }
            ]
        },
        "limit": 1,
        "with_payload": true,
        "with_vector": false,
    })
}

fn hits_from(points: Vec<ScoredPoint>) -> Vec<SearchHit> {
    points
        .into_iter()
        .filter_map(|p| {
            p.payload.map(|paper| SearchHit {
                paper,
                score: p.score,
            })
        })
        .collect()
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn ensure_collection(&self, dimensions: usize, distance: Distance) -> Result<()> {
        if let Some(info) = self.collection_info().await? {
            check_vector_params(&self.collection, &info.config.params.vectors, dimensions, distance)?;
            tracing::debug!(collection = %self.collection, "Qdrant collection already exists");
            return Ok(());
        }

        let params = VectorParams {
            size: dimensions,
            distance,
        };
        let body = json!({ "vectors": params });
        let _: serde_json::Value = self
            .send(self.request(reqwest::Method::PUT, &self.url("")).json(&body))
            .await?;
        tracing::info!(collection = %self.collection, dimensions, "Created Qdrant collection");
        Ok(())
    }

    async fn collection_exists(&self) -> Result<bool> {
        Ok(self.collection_info().await?.is_some())
    }

    async fn upsert(&self, points: Vec<IndexPoint>) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let structs: Vec<PointStruct<'_>> = points
            .iter()
            .map(|p| PointStruct {
                id: &p.id,
                vector: &p.vector,
                payload: &p.paper,
            })
            .collect();
        let body = json!({ "points": structs });
        let _: serde_json::Value = self
            .send(
                self.request(reqwest::Method::PUT, &self.url("/points?wait=true"))
                    .json(&body),
            )
            .await?;
        tracing::debug!(count = points.len(), "Upserted points");
        Ok(())
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<SearchHit>> {
        let points: Vec<ScoredPoint> = self
            .send(
                self.request(reqwest::Method::POST, &self.url("/points/search"))
                    .json(&search_body(vector, limit)),
            )
            .await?;
        Ok(hits_from(points))
    }

    async fn find_paper(&self, paper_id: &str) -> Result<Option<Paper>> {
        let scroll: ScrollResult = self
            .send(
                self.request(reqwest::Method::POST, &self.url("/points/scroll"))
                    .json(&find_body(paper_id)),
            )
            .await?;
        Ok(scroll.points.into_iter().find_map(|p| p.payload))
    }

    async fn count(&self) -> Result<usize> {
        let result: CountResult = self
            .send(
                self.request(reqwest::Method::POST, &self.url("/points/count"))
                    .json(&json!({ "exact": true })),
            )
            .await?;
        Ok(result.count)
    }
}
