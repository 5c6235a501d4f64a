use super::index::{IndexDocument, IndexHits, SearchIndex};

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Elasticsearch-backed index speaking the plain document REST API.
pub struct ElasticsearchIndex {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub hits: Hits,
}

#[derive(Debug, Deserialize)]
pub struct Hits {
    pub total: HitsTotal,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct HitsTotal {
    pub value: usize,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
}

impl ElasticsearchIndex {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Request body of a paged `multi_match` query over every indexed field.
    pub fn query_body(query: &str, page: usize, per_page: usize) -> serde_json::Value {
        json!({
            "query": {
                "multi_match": {
                    "query": query,
                    "fields": ["*"],
                }
            },
            "from": page.saturating_sub(1).saturating_mul(per_page),
            "size": per_page,
        })
    }

    /// Hit ids in rank order and the total match count.
    pub fn parse_hits(result: SearchResult) -> anyhow::Result<IndexHits> {
        let ids = result
            .hits
            .hits
            .into_iter()
            .map(|hit| {
                hit.id
                    .parse::<i64>()
                    .with_context(|| format!("non-numeric document id {:?}", hit.id))
            })
            .collect::<anyhow::Result<Vec<i64>>>()?;

        Ok(IndexHits {
            ids,
            total: result.hits.total.value,
        })
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    async fn add_to_index(&self, index: &str, document: &IndexDocument) -> anyhow::Result<()> {
        let url = format!("{}/{}/_doc/{}", self.base_url, index, document.id);
        let response = self
            .http_client
            .put(url)
            .json(&document.fields)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Index put failed {}", response.status()));
        }
        Ok(())
    }

    async fn remove_from_index(&self, index: &str, id: i64) -> anyhow::Result<()> {
        let url = format!("{}/{}/_doc/{}", self.base_url, index, id);
        let response = self.http_client.delete(url).send().await?;

        // Removing a document that was never indexed is not an error.
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow::anyhow!("Index delete failed {}", response.status()));
        }
        Ok(())
    }

    async fn query_index(
        &self,
        index: &str,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<IndexHits> {
        let url = format!("{}/{}/_search", self.base_url, index);
        let response = self
            .http_client
            .post(url)
            .json(&Self::query_body(query, page, per_page))
            .send()
            .await?;

        // Querying an index nobody has written to yet.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(IndexHits::default());
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Index search failed {}", response.status()));
        }

        let result: SearchResult = response.json().await?;
        Self::parse_hits(result)
    }
}
