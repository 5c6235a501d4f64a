//! User Module Tests
//!
//! ## Test Scopes
//! - **Registration**: Field validation, unique username and email.
//! - **Profiles**: Owned sets, favorites and self-only editing.
//! - **Administration**: Admin bootstrap and cascading user deletion.
//! - **Extractor**: Resolution of the acting user from the request header.

#[cfg(test)]
mod tests {
    use crate::search::index::MemoryIndex;
    use crate::sets::types::SetForm;
    use crate::storage::memory::Database;
    use crate::testing::{ScriptedProvider, add_user, app, request, send, services_with};
    use crate::users::extract::{CurrentUser, USER_HEADER};

    use axum::extract::FromRequestParts;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn registration(username: &str, email: &str) -> Value {
        json!({
            "username": username,
            "first_name": "Ruth",
            "last_name": "Moab",
            "email": email,
        })
    }

    fn form(name: &str) -> SetForm {
        SetForm {
            name: name.to_string(),
            description: None,
            refs: vec!["John 3:16".to_string()],
        }
    }

    fn provider() -> ScriptedProvider {
        ScriptedProvider::new().with_passage("John 3:16", "For God so loved the world")
    }

    // ============================================================
    // REGISTRATION
    // ============================================================

    #[tokio::test]
    async fn test_register_returns_public_profile() {
        let services = services_with(provider(), None);
        let router = app(&services);

        let (status, _, body) = send(
            &router,
            request("POST", "/users", None, Some(registration("ruth", "ruth@example.com"))),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["username"], "ruth");
        assert_eq!(body["full_name"], "Ruth Moab");
        assert!(body.get("email").is_none());
        assert!(services.db.find_user_by_username("ruth").is_some());
    }

    #[tokio::test]
    async fn test_register_duplicate_username_conflicts() {
        let services = services_with(provider(), None);
        let router = app(&services);
        send(&router, request("POST", "/users", None, Some(registration("ruth", "a@example.com")))).await;

        let (status, _, body) = send(
            &router,
            request("POST", "/users", None, Some(registration("ruth", "b@example.com"))),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Username is already taken");
    }

    #[tokio::test]
    async fn test_register_email_rules() {
        let services = services_with(provider(), None);
        let router = app(&services);
        send(&router, request("POST", "/users", None, Some(registration("ruth", "ruth@example.com")))).await;

        let (taken, _, taken_body) = send(
            &router,
            request("POST", "/users", None, Some(registration("naomi", "ruth@example.com"))),
        )
        .await;
        let (invalid, _, invalid_body) = send(
            &router,
            request("POST", "/users", None, Some(registration("boaz", "not-an-email"))),
        )
        .await;

        assert_eq!(taken, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(taken_body["errors"]["email"], json!(["This email is already being used"]));
        assert_eq!(invalid, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid_body["errors"]["email"], json!(["Invalid email address."]));
    }

    #[tokio::test]
    async fn test_register_username_length() {
        let services = services_with(provider(), None);
        let router = app(&services);

        let (status, _, body) = send(
            &router,
            request("POST", "/users", None, Some(registration(&"u".repeat(31), "long@example.com"))),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["errors"]["username"],
            json!(["Field must be between 1 and 30 characters long."])
        );
    }

    // ============================================================
    // PROFILES
    // ============================================================

    #[tokio::test]
    async fn test_profile_lists_own_sets() {
        let services = services_with(provider(), None);
        let owner = add_user(&services.db, "alice");
        let other = add_user(&services.db, "bob");
        let set = services.sets.create_set(&owner, form("Mine")).await.unwrap();
        services.sets.create_set(&other, form("Theirs")).await.unwrap();
        let router = app(&services);

        let (status, _, body) = send(&router, request("GET", &format!("/users/{}", owner.id), None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["total"], 1);
        assert_eq!(body["sets"][0]["id"], set.id);
    }

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let services = services_with(provider(), None);
        let router = app(&services);

        let (status, _, _) = send(&router, request("GET", "/users/42", None, None)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_favorites_listing() {
        let services = services_with(provider(), None);
        let owner = add_user(&services.db, "alice");
        let fan = add_user(&services.db, "bob");
        let liked = services.sets.create_set(&owner, form("Liked")).await.unwrap();
        services.sets.create_set(&owner, form("Ignored")).await.unwrap();
        services.sets.toggle_favorite(&fan, liked.id).unwrap();
        let router = app(&services);

        let (_, _, body) = send(&router, request("GET", &format!("/users/{}/favorites", fan.id), None, None)).await;

        assert_eq!(body["total"], 1);
        assert_eq!(body["sets"][0]["name"], "Liked");
    }

    #[tokio::test]
    async fn test_edit_own_profile() {
        let services = services_with(provider(), None);
        let user = add_user(&services.db, "alice");
        let router = app(&services);
        let body = json!({
            "username": "alicia",
            "first_name": "Alicia",
            "last_name": "Keys",
            "bio": "Memorizing Psalms",
        });

        let (status, _, body) = send(
            &router,
            request("POST", &format!("/users/{}/edit", user.id), Some(user.id), Some(body)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alicia");
        assert_eq!(body["bio"], "Memorizing Psalms");
        assert!(services.db.find_user_by_username("alice").is_none());
        assert_eq!(services.db.find_user_by_username("alicia").unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_edit_other_profile_is_not_found() {
        let services = services_with(provider(), None);
        let user = add_user(&services.db, "alice");
        let intruder = add_user(&services.db, "mallory");
        let router = app(&services);
        let body = json!({ "username": "hacked", "first_name": "H", "last_name": "X" });

        let (status, _, _) = send(
            &router,
            request("POST", &format!("/users/{}/edit", user.id), Some(intruder.id), Some(body)),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(services.db.get_user(user.id).unwrap().username, "alice");
    }

    // ============================================================
    // ADMINISTRATION
    // ============================================================

    #[test]
    fn test_ensure_admin_creates_or_promotes() {
        let services = services_with(provider(), None);
        let existing = add_user(&services.db, "elder");

        let promoted = services.ensure_admin("elder").unwrap();
        let created = services.ensure_admin("root").unwrap();

        assert_eq!(promoted.id, existing.id);
        assert!(promoted.is_admin);
        assert!(created.is_admin);
        assert!(services.db.get_user(created.id).unwrap().is_admin);
    }

    #[tokio::test]
    async fn test_admin_delete_user_cascades() {
        let index = Arc::new(MemoryIndex::new());
        let services = services_with(provider(), Some(index.clone()));
        let admin = services.ensure_admin("root").unwrap();
        let owner = add_user(&services.db, "alice");
        let set = services.sets.create_set(&owner, form("Cascade")).await.unwrap();
        assert_eq!(index.document_count("sets"), 1);
        let router = app(&services);
        let uri = format!("/admin/users/{}/delete", owner.id);

        let (forbidden, _, _) = send(&router, request("POST", &uri, Some(owner.id), None)).await;
        assert_eq!(forbidden, StatusCode::FORBIDDEN);

        let (status, _, body) = send(&router, request("POST", &uri, Some(admin.id), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "user_id": owner.id, "deleted_sets": 1 }));
        assert!(services.db.get_user(owner.id).is_none());
        assert!(services.db.get_set(set.id).is_none());
        assert_eq!(index.document_count("sets"), 0);

        let (again, _, _) = send(&router, request("POST", &uri, Some(admin.id), None)).await;
        assert_eq!(again, StatusCode::NOT_FOUND);
    }

    // ============================================================
    // EXTRACTOR
    // ============================================================

    #[tokio::test]
    async fn test_current_user_extraction() {
        let db = Arc::new(Database::new());
        let user = add_user(&db, "alice");

        let extract = |header: Option<&str>| {
            let mut builder = Request::builder().uri("/");
            if let Some(value) = header {
                builder = builder.header(USER_HEADER, value);
            }
            let (mut parts, _) = builder.body(()).unwrap().into_parts();
            parts.extensions.insert(db.clone());
            parts
        };

        let mut found = extract(Some(&format!(" {} ", user.id)));
        let CurrentUser(current) = CurrentUser::from_request_parts(&mut found, &()).await.unwrap();
        assert_eq!(current.id, user.id);

        for header in [None, Some("abc"), Some("999")] {
            let mut parts = extract(header);
            assert!(CurrentUser::from_request_parts(&mut parts, &()).await.is_err());
        }
    }

    #[tokio::test]
    async fn test_current_user_without_database_extension() {
        let (mut parts, _) = Request::builder()
            .uri("/")
            .header(USER_HEADER, "1")
            .body(())
            .unwrap()
            .into_parts();

        let err = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap_err();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
