//! Service wiring.
//!
//! Every shared component is built once in `Services::new` and handed to the
//! handlers as an `Extension`.

use crate::provider::client::PassageProvider;
use crate::provider::handlers::handle_lookup_verse;
use crate::search::engine::SearchEngine;
use crate::search::handlers::{handle_reindex, handle_search};
use crate::search::index::SearchIndex;
use crate::search::sync::IndexSynchronizer;
use crate::sets::handlers::*;
use crate::sets::service::SetService;
use crate::storage::memory::Database;
use crate::storage::types::{NewUser, StoreError, User};
use crate::users::handlers::*;
use crate::verses::resolver::ReferenceResolver;
use crate::verses::store::VerseStore;

use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct Services {
    pub db: Arc<Database>,
    pub provider: Arc<dyn PassageProvider>,
    pub search: Arc<SearchEngine>,
    pub sets: Arc<SetService>,
}

impl Services {
    pub fn new(
        db: Arc<Database>,
        provider: Arc<dyn PassageProvider>,
        index: Option<Arc<dyn SearchIndex>>,
    ) -> Self {
        let sync = IndexSynchronizer::new(index);
        let resolver = ReferenceResolver::new(provider.clone(), VerseStore::new(db.clone()));

        Self {
            sets: Arc::new(SetService::new(db.clone(), resolver, sync.clone())),
            search: Arc::new(SearchEngine::new(db.clone(), sync)),
            provider,
            db,
        }
    }

    /// Creates `username` as an administrator, or promotes the existing user.
    pub fn ensure_admin(&self, username: &str) -> Result<User, StoreError> {
        match self.db.find_user_by_username(username) {
            Some(mut user) => {
                user.is_admin = true;
                self.db.update_user(user)
            }
            None => self.db.insert_user(NewUser {
                username: username.to_string(),
                first_name: "Site".to_string(),
                last_name: "Admin".to_string(),
                email: String::new(),
                is_admin: true,
            }),
        }
    }
}

pub fn router(services: &Services) -> Router {
    Router::new()
        .route("/users", post(handle_register))
        .route("/users/:user_id", get(handle_show_profile))
        .route("/users/:user_id/favorites", get(handle_show_favorites))
        .route("/users/:user_id/edit", post(handle_edit_profile))
        .route("/sets", post(handle_create_set))
        .route("/sets/:set_id", get(handle_show_set))
        .route("/sets/:set_id/edit", post(handle_edit_set))
        .route("/sets/:set_id/copy", post(handle_copy_set))
        .route("/sets/:set_id/delete", post(handle_delete_set))
        .route("/explore", get(handle_explore))
        .route("/search", get(handle_search))
        .route("/api/verse", get(handle_lookup_verse))
        .route("/api/sets/:set_id", get(handle_set_cards))
        .route("/api/sets/:set_id/favorite", post(handle_toggle_favorite))
        .route("/admin/reindex", post(handle_reindex))
        .route("/admin/users/:user_id/delete", post(handle_delete_user))
        .layer(Extension(services.db.clone()))
        .layer(Extension(services.provider.clone()))
        .layer(Extension(services.search.clone()))
        .layer(Extension(services.sets.clone()))
        .layer(TraceLayer::new_for_http())
}
