// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    models::{IdentityResponse, LoginRequest, SignupRequest, UserResponse},
    state::AppState,
};

pub mod cookies;
pub mod health;
pub mod jwt;
pub mod middleware;
pub mod sessions;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/create-cookie", get(cookies::create_cookie))
        .route("/get-cookie", get(cookies::get_cookie))
        .route("/create-session", get(sessions::create_session))
        .route("/get-session", get(sessions::get_session))
        .route("/create-jwt", get(jwt::create_jwt))
        .route("/get-jwt", get(jwt::get_jwt))
        .route("/user/signup", post(users::signup))
        .route("/user/login", post(users::login))
        .with_state(state);

    // Layers wrap outwards: the request id is assigned before logging runs.
    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        cookies::create_cookie,
        cookies::get_cookie,
        sessions::create_session,
        sessions::get_session,
        jwt::create_jwt,
        jwt::get_jwt,
        users::signup,
        users::login,
        health::health
    ),
    components(
        schemas(
            IdentityResponse,
            LoginRequest,
            Role,
            SignupRequest,
            UserResponse,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Cookies", description = "Opaque cookie demo"),
        (name = "Sessions", description = "Server-side session demo"),
        (name = "JWT", description = "Signed bearer tokens in a cookie"),
        (name = "Users", description = "Registration and login"),
        (name = "Health", description = "Liveness")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{
            header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
            HeaderMap, Request, StatusCode,
        },
    };
    use base64ct::{Base64UrlUnpadded, Encoding};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::{
        cookie::{self, AUTHORIZATION_COOKIE},
        password::test_hasher,
        FixedClock, KeyMaterial, TokenCodec,
    };

    const SECRET: &str = "c2VjcmV0LXNlY3JldC1zZWNyZXQtc2VjcmV0LXNlY3JldC0=";
    const ADMIN_TOKEN: &str = "AAABnvxRVklrnYxKZ0aHgTBcXukeZygoC";

    fn test_app(now: i64) -> (Router, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(now));
        let key = KeyMaterial::from_base64(SECRET).unwrap();
        let state = AppState::with_hasher(
            TokenCodec::with_clock(key, clock.clone()),
            Arc::new(test_hasher()),
            Some(ADMIN_TOKEN.to_string()),
        );
        (router(state), clock)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// `name=value` part of the first `Set-Cookie` header for `name`.
    fn set_cookie_pair(headers: &HeaderMap, name: &str) -> String {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .find(|v| v.starts_with(&format!("{name}=")))
            .and_then(|v| v.split(';').next())
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn jwt_cookie_round_trip() {
        let (app, _) = test_app(1_700_000_000);

        let (status, headers, body) = send(&app, get("/api/create-jwt", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("createJwt : Bearer eyJ"));

        let pair = set_cookie_pair(&headers, AUTHORIZATION_COOKIE);
        let (name, value) = pair.split_once('=').unwrap();
        assert_eq!(name, "Authorization");
        let decoded = cookie::decode_value(value).unwrap();
        assert!(decoded.starts_with("Bearer "));
        assert_eq!(body, format!("createJwt : {decoded}"));

        let (status, _, body) = send(&app, get("/api/get-jwt", Some(&pair))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "getJwt : Robbie, USER");
    }

    #[tokio::test]
    async fn expired_jwt_is_unauthorized() {
        let (app, clock) = test_app(1_000_000_000);
        let (_, headers, _) = send(&app, get("/api/create-jwt", None)).await;
        let pair = set_cookie_pair(&headers, AUTHORIZATION_COOKIE);

        clock.set(1_000_003_600);
        let (status, _, body) = send(&app, get("/api/get-jwt", Some(&pair))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body.contains("expired"));
    }

    #[tokio::test]
    async fn tampered_jwt_is_unauthorized() {
        let (app, _) = test_app(1_700_000_000);
        let (_, headers, _) = send(&app, get("/api/create-jwt", None)).await;
        let pair = set_cookie_pair(&headers, AUTHORIZATION_COOKIE);
        let token = cookie::decode_value(pair.split_once('=').unwrap().1).unwrap();

        let mut segments: Vec<String> = token.split('.').map(str::to_string).collect();
        segments[1] = Base64UrlUnpadded::encode_string(
            br#"{"sub":"Robbie","auth":"ADMIN","iat":1700000000,"exp":1700003600}"#,
        );
        let forged = format!("Authorization={}", cookie::encode_value(&segments.join(".")));

        let (status, _, _) = send(&app, get("/api/get-jwt", Some(&forged))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn jwt_without_prefix_or_cookie_is_unauthorized() {
        let (app, _) = test_app(1_700_000_000);

        let (status, _, _) = send(&app, get("/api/get-jwt", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let bare = format!("Authorization={}", cookie::encode_value("eyJhbGciOiJIUzI1NiJ9.e30.x"));
        let (status, _, _) = send(&app, get("/api/get-jwt", Some(&bare))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn opaque_cookie_round_trip() {
        let (app, _) = test_app(1_700_000_000);

        let (status, headers, body) = send(&app, get("/api/create-cookie", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "createCookie");
        assert_eq!(
            headers.get(SET_COOKIE).unwrap(),
            "Authorization=Robbie%20Auth; Path=/; Max-Age=1800"
        );

        let pair = set_cookie_pair(&headers, AUTHORIZATION_COOKIE);
        let (status, _, body) = send(&app, get("/api/get-cookie", Some(&pair))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "getCookie : Robbie Auth");

        let (status, _, _) = send(&app, get("/api/get-cookie", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn session_round_trip() {
        let (app, _) = test_app(1_700_000_000);

        let (status, headers, body) = send(&app, get("/api/create-session", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "createSession");
        let pair = set_cookie_pair(&headers, "SESSIONID");

        let (status, _, body) = send(&app, get("/api/get-session", Some(&pair))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "getSession : Robbie Auth");

        // Reusing the session keeps the same id.
        let (_, headers, _) = send(&app, get("/api/create-session", Some(&pair))).await;
        assert_eq!(set_cookie_pair(&headers, "SESSIONID"), pair);
    }

    #[tokio::test]
    async fn get_session_never_creates_one() {
        let (app, _) = test_app(1_700_000_000);

        let (status, headers, _) = send(&app, get("/api/get-session", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(headers.get(SET_COOKIE).is_none());

        let stale = format!("SESSIONID={}", uuid::Uuid::new_v4());
        let (status, _, _) = send(&app, get("/api/get-session", Some(&stale))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn signup_then_login_issues_role_token() {
        let (app, _) = test_app(1_700_000_000);

        let (status, _, body) = send(
            &app,
            post_json(
                "/api/user/signup",
                serde_json::json!({
                    "username": "Robbie",
                    "password": "Robbie's password",
                    "email": "robbie@example.com",
                    "admin": true,
                    "admin_token": ADMIN_TOKEN
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: UserResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(created.role, Role::Admin);
        assert!(!body.contains("password"));

        let (status, headers, body) = send(
            &app,
            post_json(
                "/api/user/login",
                serde_json::json!({"username": "Robbie", "password": "Robbie's password"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let identity: IdentityResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(identity.role, Role::Admin);

        let pair = set_cookie_pair(&headers, AUTHORIZATION_COOKIE);
        let (status, _, body) = send(&app, get("/api/get-jwt", Some(&pair))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "getJwt : Robbie, ADMIN");
    }

    #[tokio::test]
    async fn signup_errors_map_to_status_codes() {
        let (app, _) = test_app(1_700_000_000);
        let user = serde_json::json!({
            "username": "Robbie",
            "password": "pw",
            "email": "robbie@example.com"
        });

        let (status, _, _) = send(&app, post_json("/api/user/signup", user.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _, body) = send(&app, post_json("/api/user/signup", user)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, r#"{"error":"Username already exists"}"#);

        let (status, _, _) = send(
            &app,
            post_json(
                "/api/user/signup",
                serde_json::json!({
                    "username": "Mallory",
                    "password": "pw",
                    "email": "mallory@example.com",
                    "admin": true,
                    "admin_token": "guess"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _, _) = send(
            &app,
            post_json(
                "/api/user/login",
                serde_json::json!({"username": "Robbie", "password": "wrong"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (app, _) = test_app(1_700_000_000);
        let (status, headers, body) = send(&app, get("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
        assert!(headers.get(middleware::REQUEST_ID_HEADER).is_some());
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (app, _) = test_app(1_700_000_000);
        let (status, _, body) = send(&app, get("/api-doc/openapi.json", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/api/get-jwt"));
    }
}
