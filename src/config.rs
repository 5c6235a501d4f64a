//! Process configuration.
//!
//! Values come from command-line flags, falling back to environment variables
//! (a `.env` file is loaded by `main` before parsing).

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::search::elastic::ElasticsearchIndex;
use crate::search::index::{MemoryIndex, SearchIndex};

pub const DEFAULT_API_URL: &str = "https://api.esv.org/v3/passage/text/";

/// Page size used by every paginated listing.
pub const PER_PAGE: usize = 10;

#[derive(Debug, Clone, Parser)]
#[command(name = "mtword", about = "Bible verse memorization service")]
pub struct Config {
    /// Address the HTTP server listens on.
    #[arg(long, env = "MTWORD_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Passage text endpoint of the scripture provider.
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Provider credential, sent as `Authorization: Token <key>`.
    #[arg(long, env = "API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Elasticsearch base URL. Takes precedence over `--memory-index`.
    #[arg(long, env = "ELASTICSEARCH_URL")]
    pub elasticsearch_url: Option<String>,

    /// Keep the search index in process instead of using Elasticsearch.
    #[arg(long, env = "MTWORD_MEMORY_INDEX", default_value_t = false)]
    pub memory_index: bool,

    /// Username granted administrator rights at startup (created if missing).
    #[arg(long, env = "MTWORD_ADMIN")]
    pub admin: Option<String>,

    /// Tracing filter directive, e.g. `info` or `mtword=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Builds the configured index backend. `None` selects the substring
    /// fallback in the search engine.
    pub fn search_index(&self) -> Option<Arc<dyn SearchIndex>> {
        match (&self.elasticsearch_url, self.memory_index) {
            (Some(url), _) if !url.trim().is_empty() => {
                tracing::info!("Search index backend: Elasticsearch at {}", url);
                Some(Arc::new(ElasticsearchIndex::new(url)))
            }
            (_, true) => {
                tracing::info!("Search index backend: in-process inverted index");
                Some(Arc::new(MemoryIndex::new()))
            }
            _ => {
                tracing::info!("No search index configured, using substring matching");
                None
            }
        }
    }
}
