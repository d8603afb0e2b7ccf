//! End-to-end HTTP tests against an in-memory SQLite store.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower_http::normalize_path::NormalizePath;
use serde_json::{json, Value};
use starwars_api::{app, connect, ensure_tables, seed_demo_data, AppState, DeleteScope, Settings};
use tower::ServiceExt;

struct TestApp {
    router: NormalizePath<Router>,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_scope(DeleteScope::Target).await
    }

    async fn with_scope(scope: DeleteScope) -> Self {
        let (pool, dialect) = connect("sqlite::memory:", 1).await.expect("connect");
        ensure_tables(&pool, dialect).await.expect("tables");
        seed_demo_data(&pool).await.expect("seed");
        let settings = Settings {
            jwt_secret: "test-secret".into(),
            favorite_delete_scope: scope,
            ..Settings::default()
        };
        TestApp {
            router: app(AppState::new(pool, &settings)),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    async fn signup(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/signup",
            Some(json!({"email": email, "password": password})),
            None,
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/login",
            Some(json!({"email": email, "password": password})),
            None,
        )
        .await
    }
}

#[tokio::test]
async fn catalogue_lists_and_reads() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/people").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "ok");
    assert_eq!(body["results"].as_array().unwrap().len(), 4);

    let (status, body) = app.get("/planets/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "Tatooine");
    assert_eq!(body["result"]["climate"], "arid");

    let (status, body) = app.get("/vehicles?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_ids_are_404_without_result() {
    let app = TestApp::new().await;
    for uri in ["/people/999", "/planets/999"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.get("result").is_none());
        assert_eq!(body["code"], "not_found");
    }
    let (status, _) = app.get("/people/luke").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sitemap_lists_endpoints() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.contains(&json!({"method": "POST", "path": "/login"})));
}

#[tokio::test]
async fn signup_login_and_protected_favorites() {
    let app = TestApp::new().await;

    let (status, body) = app.signup("luke@rebellion.org", "usetheforce").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["result"]["email"], "luke@rebellion.org");
    assert!(body["result"].get("password_hash").is_none());
    let user_id = body["result"]["id"].as_i64().unwrap();

    let (status, _) = app.signup("luke@rebellion.org", "usetheforce").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.signup("", "usetheforce").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.login("luke@rebellion.org", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.login("nobody@rebellion.org", "usetheforce").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.login("luke@rebellion.org", "usetheforce").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            Method::POST,
            "/favorite/people/2",
            Some(json!({"user_id": user_id})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"msg": "ok"}));

    let (status, body) = app.send(Method::GET, "/favorites", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logged_in_as"], "luke@rebellion.org");
    assert_eq!(body["results"][0]["type"], "people");
    assert_eq!(body["results"][0]["name"], "Leia Organa");
    assert_eq!(body["results"][0]["resource_id"], 2);

    let (status, _) = app.get("/favorites").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.send(Method::GET, "/favorites", None, Some("forged.token.value")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn favorite_add_and_remove() {
    let app = TestApp::new().await;
    let (_, body) = app.signup("leia@rebellion.org", "help-me-obi-wan").await;
    let user_id = body["result"]["id"].as_i64().unwrap();

    let (status, _) = app.send(Method::POST, "/favorite/planet/2", Some(json!({})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app.send(Method::POST, "/favorite/planet/2", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app
        .send(Method::POST, "/favorite/planet/99", Some(json!({"user_id": user_id})), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::POST, "/favorite/planet/2", Some(json!({"user_id": user_id})), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/users/{}/favorites", user_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["type"], "planet");
    assert_eq!(body["results"][0]["name"], "Alderaan");

    let (status, body) = app.send(Method::DELETE, "/favorite/planet/2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "favorito eliminado");

    let (status, _) = app.send(Method::DELETE, "/favorite/planet/2", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_scope_requires_user_id_on_delete() {
    let app = TestApp::with_scope(DeleteScope::Owner).await;
    let (_, body) = app.signup("han@falcon.net", "kessel-run").await;
    let user_id = body["result"]["id"].as_i64().unwrap();
    app.send(Method::POST, "/favorite/people/1", Some(json!({"user_id": user_id})), None)
        .await;

    let (status, _) = app.send(Method::DELETE, "/favorite/people/1", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app
        .send(Method::DELETE, &format!("/favorite/people/1?user_id={}", user_id + 1), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .send(Method::DELETE, &format!("/favorite/people/1?user_id={}", user_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_own_account_cascades_favorites() {
    let app = TestApp::new().await;
    let (_, body) = app.signup("han@falcon.net", "kessel-run").await;
    let han = body["result"]["id"].as_i64().unwrap();
    let (_, body) = app.signup("chewie@falcon.net", "rrraaaggh").await;
    let chewie = body["result"]["id"].as_i64().unwrap();
    app.send(Method::POST, "/favorite/planet/1", Some(json!({"user_id": han})), None)
        .await;

    let (_, body) = app.login("chewie@falcon.net", "rrraaaggh").await;
    let chewie_token = body["access_token"].as_str().unwrap().to_string();
    let (status, _) = app
        .send(Method::DELETE, &format!("/users/{}", han), None, Some(&chewie_token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.login("han@falcon.net", "kessel-run").await;
    let han_token = body["access_token"].as_str().unwrap().to_string();
    let (status, _) = app
        .send(Method::DELETE, &format!("/users/{}", han), None, Some(&han_token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/users/{}", han)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    // The only favorite belonged to han, so nothing is left to delete.
    let (status, _) = app.send(Method::DELETE, "/favorite/planet/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["id"], chewie);
}

#[tokio::test]
async fn malformed_query_strings_are_json_bad_requests() {
    let app = TestApp::new().await;
    for uri in ["/people?limit=abc", "/people?limit=-1", "/users?offset=x"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "bad_request", "{}", uri);
        assert!(body["message"].as_str().unwrap().contains("query string"), "{}", uri);
    }
    let (status, body) = app
        .send(Method::DELETE, "/favorite/planet/1?user_id=x", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn malformed_auth_bodies_keep_the_rejection_reason() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/signup",
            Some(json!({"email": 5, "password": "usetheforce"})),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("email"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .body(Body::from(r#"{"email":"luke@rebellion.org","password":"usetheforce"}"#))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("Content-Type"));

    let (status, body) = app.send(Method::POST, "/login", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn trailing_slashes_are_ignored() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/people/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 4);
    let (status, body) = app.get("/planets/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "Tatooine");
}

#[tokio::test]
async fn version_reports_package() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "ok");
    assert_eq!(body["name"], "starwars-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_and_ready() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (status, body) = app.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
}
