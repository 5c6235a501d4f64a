use crate::sets::types::SetSummary;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub term: String,
    pub total: usize,
    pub page: usize,
    pub sets: Vec<SetSummary>,
    pub next_url: Option<String>,
    pub prev_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReindexResponse {
    pub index: String,
    pub indexed: usize,
}
