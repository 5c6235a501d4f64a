//! Test doubles and HTTP helpers shared by the module test suites.

use crate::app::{Services, router};
use crate::provider::client::PassageProvider;
use crate::provider::types::{PassageText, ProviderError, ProviderResponse};
use crate::search::index::{IndexDocument, IndexHits, SearchIndex};
use crate::storage::memory::Database;
use crate::storage::types::{NewUser, User};
use crate::users::extract::USER_HEADER;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Provider answering from a fixed table and recording every call.
///
/// Unknown references come back as `PassageText::NotFound`, echoing the query.
#[derive(Default)]
pub struct ScriptedProvider {
    passages: HashMap<String, String>,
    calls: Mutex<Vec<(String, bool)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_passage(mut self, reference: &str, text: &str) -> Self {
        self.passages
            .insert(reference.to_string(), text.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PassageProvider for ScriptedProvider {
    async fn fetch(
        &self,
        passage: &str,
        include_verse_numbers: bool,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((passage.to_string(), include_verse_numbers));

        let passages = match self.passages.get(passage) {
            Some(text) => PassageText::Found(text.trim().to_string()),
            None => PassageText::NotFound,
        };

        Ok(ProviderResponse {
            passages,
            reference: passage.to_string(),
        })
    }
}

/// Index returning canned hits and recording every write.
#[derive(Default)]
pub struct RecordingIndex {
    hits: IndexHits,
    fail_writes: bool,
    upserts: Mutex<Vec<IndexDocument>>,
    removals: Mutex<Vec<i64>>,
    queries: Mutex<Vec<(String, usize, usize)>>,
}

impl RecordingIndex {
    pub fn returning(ids: Vec<i64>, total: usize) -> Self {
        Self {
            hits: IndexHits { ids, total },
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn upserted_ids(&self) -> Vec<i64> {
        self.upserts.lock().unwrap().iter().map(|doc| doc.id).collect()
    }

    pub fn upserts(&self) -> Vec<IndexDocument> {
        self.upserts.lock().unwrap().clone()
    }

    pub fn removals(&self) -> Vec<i64> {
        self.removals.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<(String, usize, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchIndex for RecordingIndex {
    async fn add_to_index(&self, _index: &str, document: &IndexDocument) -> anyhow::Result<()> {
        if self.fail_writes {
            return Err(anyhow::anyhow!("index unavailable"));
        }
        self.upserts.lock().unwrap().push(document.clone());
        Ok(())
    }

    async fn remove_from_index(&self, _index: &str, id: i64) -> anyhow::Result<()> {
        if self.fail_writes {
            return Err(anyhow::anyhow!("index unavailable"));
        }
        self.removals.lock().unwrap().push(id);
        Ok(())
    }

    async fn query_index(
        &self,
        _index: &str,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> anyhow::Result<IndexHits> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_string(), page, per_page));
        Ok(self.hits.clone())
    }
}

pub fn add_user(db: &Database, username: &str) -> User {
    db.insert_user(NewUser {
        username: username.to_string(),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", username),
        is_admin: false,
    })
    .unwrap()
}

pub fn services_with(
    provider: ScriptedProvider,
    index: Option<Arc<dyn SearchIndex>>,
) -> Services {
    Services::new(Arc::new(Database::new()), Arc::new(provider), index)
}

pub fn app(services: &Services) -> Router {
    router(services)
}

pub fn request(method: &str, uri: &str, user: Option<i64>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user {
        builder = builder.header(USER_HEADER, user_id.to_string());
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Runs one request through the router. Empty or non-JSON bodies come back as `Null`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}
