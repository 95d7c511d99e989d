//! Organization profile CRUD endpoints
//!
//! Each handler issues exactly one statement against the `users` table.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{Profile, ProfilePayload};
use crate::error::{ApiError, ApiResult};

const PROFILE_COLUMNS: &str = "id, name, description, url, logo, created, updated, address, \
     email, domains, office_phone, fax_phone, twitter, facebook, linkedin, instagram, \
     pinterest, tiktok, ein, is_default, is_active";

/// GET /items/
///
/// All profiles in storage's natural iteration order.
pub async fn list_profiles(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Profile>>> {
    let profiles = sqlx::query_as::<_, Profile>(&format!("SELECT {PROFILE_COLUMNS} FROM users"))
        .fetch_all(&state.db)
        .await?;

    Ok(Json(profiles))
}

/// GET /items/{id}
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
) -> ApiResult<Json<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(item_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Item not found"))?;

    Ok(Json(profile))
}

/// POST /items/
///
/// Persists a new profile; the id is assigned by storage. No field
/// validation beyond type coercion in the extractor.
pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProfilePayload>,
) -> ApiResult<Json<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "INSERT INTO users (name, description, url, logo, created, updated, address, email, \
         domains, office_phone, fax_phone, twitter, facebook, linkedin, instagram, pinterest, \
         tiktok, ein, is_default, is_active) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(&payload.url)
    .bind(&payload.logo)
    .bind(&payload.created)
    .bind(&payload.updated)
    .bind(&payload.address)
    .bind(&payload.email)
    .bind(&payload.domains)
    .bind(&payload.office_phone)
    .bind(&payload.fax_phone)
    .bind(&payload.twitter)
    .bind(&payload.facebook)
    .bind(&payload.linkedin)
    .bind(&payload.instagram)
    .bind(&payload.pinterest)
    .bind(&payload.tiktok)
    .bind(&payload.ein)
    .bind(payload.is_default)
    .bind(payload.is_active)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(profile_id = profile.id, name = %profile.name, "Created profile");

    Ok(Json(profile))
}

/// PUT /items/{id}
///
/// Full replacement: every field is overwritten with the supplied value.
/// Never creates a row for an unknown id.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
    Json(payload): Json<ProfilePayload>,
) -> ApiResult<Json<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "UPDATE users SET \
         name = ?, description = ?, url = ?, logo = ?, created = ?, updated = ?, address = ?, \
         email = ?, domains = ?, office_phone = ?, fax_phone = ?, twitter = ?, facebook = ?, \
         linkedin = ?, instagram = ?, pinterest = ?, tiktok = ?, ein = ?, is_default = ?, \
         is_active = ? \
         WHERE id = ? \
         RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(&payload.url)
    .bind(&payload.logo)
    .bind(&payload.created)
    .bind(&payload.updated)
    .bind(&payload.address)
    .bind(&payload.email)
    .bind(&payload.domains)
    .bind(&payload.office_phone)
    .bind(&payload.fax_phone)
    .bind(&payload.twitter)
    .bind(&payload.facebook)
    .bind(&payload.linkedin)
    .bind(&payload.instagram)
    .bind(&payload.pinterest)
    .bind(&payload.tiktok)
    .bind(&payload.ein)
    .bind(payload.is_default)
    .bind(payload.is_active)
    .bind(item_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| ApiError::not_found("Item not found"))?;

    tracing::info!(profile_id = profile.id, "Updated profile");

    Ok(Json(profile))
}

/// DELETE /items/{id}
///
/// The success body is the bare message string, not an object.
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
) -> ApiResult<Json<&'static str>> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(item_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("Item not found"));
    }

    tracing::info!(profile_id = item_id, "Deleted profile");

    Ok(Json("Item Deleted Successfully"))
}

#[cfg(test)]
mod tests {
    use crate::app::{create_app, AppState};
    use crate::config::{Environment, Settings};
    use crate::db;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use sqlx::sqlite::SqlitePoolOptions;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        // Single connection so the in-memory database is shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::init_schema(&pool).await.unwrap();

        let settings = Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
        };

        create_app(AppState::new(pool, settings))
    }

    fn sample_payload() -> Value {
        json!({
            "name": "Acme",
            "description": "Directory listing for Acme",
            "url": "acme.test",
            "logo": "acme.test/logo.png",
            "created": "2024-01-01T00:00:00Z",
            "updated": "2024-01-01T00:00:00Z",
            "address": "1 Main St",
            "email": "info@acme.test",
            "domains": "acme.test",
            "office_phone": "555-0100",
            "fax_phone": "555-0101",
            "twitter": "@acme",
            "facebook": "acme",
            "linkedin": "acme",
            "instagram": "acme",
            "pinterest": "acme",
            "tiktok": "acme",
            "ein": "12-3456789",
            "is_default": true,
            "is_active": true
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn create_then_get_returns_created_profile() {
        let app = test_app().await;
        let payload = sample_payload();

        let (status, created) = send(&app, "POST", "/items/", Some(&payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 1);
        for (key, expected) in payload.as_object().unwrap() {
            assert_eq!(&created[key], expected, "field {key} differs");
        }

        let (status, fetched) = send(&app, "GET", "/items/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn missing_id_yields_not_found() {
        let app = test_app().await;
        let payload = sample_payload();

        let (status, body) = send(&app, "GET", "/items/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Item not found");

        let (status, _) = send(&app, "PUT", "/items/99", Some(&payload)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/items/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_overwrites_every_field() {
        let app = test_app().await;
        let (_, created) = send(&app, "POST", "/items/", Some(&sample_payload())).await;
        let id = created["id"].as_i64().unwrap();

        let mut replacement = sample_payload();
        let fields = replacement.as_object_mut().unwrap();
        fields.insert("name".into(), json!("Globex"));
        fields.insert("description".into(), Value::Null);
        fields.insert("updated".into(), json!("2024-06-01T00:00:00Z"));
        fields.insert("is_active".into(), json!(false));

        let (status, updated) = send(&app, "PUT", &format!("/items/{id}"), Some(&replacement)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id);
        for (key, expected) in replacement.as_object().unwrap() {
            assert_eq!(&updated[key], expected, "field {key} not overwritten");
        }

        // Nothing from the prior state survives
        let (_, fetched) = send(&app, "GET", &format!("/items/{id}"), None).await;
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn delete_then_get_yields_not_found() {
        let app = test_app().await;
        let (_, created) = send(&app, "POST", "/items/", Some(&sample_payload())).await;
        let id = created["id"].as_i64().unwrap();

        let (status, body) = send(&app, "DELETE", &format!("/items/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        // Bare JSON string, not an object
        assert!(body.is_string());
        assert_eq!(body, "Item Deleted Successfully");

        let (status, _) = send(&app, "GET", &format!("/items/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_contains_all_created_profiles() {
        let app = test_app().await;

        let (status, body) = send(&app, "GET", "/items/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let mut payload = sample_payload();
        for n in 1..=3 {
            payload["name"] = json!(format!("Org {n}"));
            let (status, _) = send(&app, "POST", "/items/", Some(&payload)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, "GET", "/items/", None).await;
        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 3);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item["name"], format!("Org {}", i + 1));
        }
    }

    #[tokio::test]
    async fn duplicate_default_profiles_are_permitted() {
        // is_default uniqueness is not an invariant
        let app = test_app().await;
        let payload = sample_payload();

        send(&app, "POST", "/items/", Some(&payload)).await;
        let (status, second) = send(&app, "POST", "/items/", Some(&payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["is_default"], true);
        assert_eq!(second["id"], 2);
    }

    #[tokio::test]
    async fn malformed_payload_is_rejected_before_handler() {
        let app = test_app().await;

        // Missing required fields fails deserialization in the extractor
        let (status, _) = send(&app, "POST", "/items/", Some(&json!({"name": "Acme"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn full_lifecycle_scenario() {
        let app = test_app().await;
        let payload = sample_payload();

        let (status, created) = send(&app, "POST", "/items/", Some(&payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 1);
        assert_eq!(created["is_active"], true);

        let (_, fetched) = send(&app, "GET", "/items/1", None).await;
        assert_eq!(fetched, created);

        let mut deactivated = payload.clone();
        deactivated["is_active"] = json!(false);
        let (status, _) = send(&app, "PUT", "/items/1", Some(&deactivated)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, fetched) = send(&app, "GET", "/items/1", None).await;
        assert_eq!(fetched["is_active"], false);

        let (status, _) = send(&app, "DELETE", "/items/1", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", "/items/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = test_app().await;

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["database"], "ok");
    }
}
