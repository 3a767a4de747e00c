//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::jwt::{verify_token, JwtConfig};
use crate::domain::{AuthError, RoleName, User, UserRepositoryInterface};

/// Authentication state containing JWT config and the credential store
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub repo: Arc<dyn UserRepositoryInterface>,
}

/// The authenticated principal attached to a request.
///
/// Built per request from the verified token subject plus a fresh user
/// lookup, so a token whose user no longer exists is rejected. Passed
/// explicitly via request extensions; there is no ambient security
/// context.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            roles: user.role_names(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == RoleName::Admin.as_str())
    }
}

/// Extract token from Authorization header
fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware - requires a valid token whose
/// subject still resolves to an existing user
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(e) => return auth_error_response(e),
    };

    // The subject must still match a persisted user.
    let user = match auth_state.repo.find_by_username(&claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => return auth_error_response(AuthError::InvalidToken),
        Err(e) => return auth_error_response(e),
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from_user(&user));

    next.run(request).await
}

/// Admin-only middleware - must be layered after `auth_middleware`
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    let user = request.extensions().get::<AuthenticatedUser>();

    match user {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(user) => auth_error_response(AuthError::Unauthorized(format!(
            "user {} does not hold {}",
            user.username,
            RoleName::Admin
        ))),
        None => auth_error_response(AuthError::MissingToken),
    }
}

/// Create an authentication error response
fn auth_error_response(error: AuthError) -> Response {
    let status = match error {
        AuthError::MissingToken
        | AuthError::InvalidToken
        | AuthError::ExpiredToken
        | AuthError::InvalidSignature
        | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::Unauthorized(_) => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = Json(json!({
        "success": false,
        "error": error.to_string()
    }));

    (status, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use chrono::Utc;

    fn user_with_roles(roles: Vec<RoleName>) -> User {
        User {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            mobile_number: "1234567890".to_string(),
            address: "1 Main St".to_string(),
            pin: "560001".to_string(),
            roles: roles
                .into_iter()
                .enumerate()
                .map(|(i, name)| Role {
                    id: i as i32 + 1,
                    name,
                })
                .collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_principal_admin_check() {
        let admin = AuthenticatedUser::from_user(&user_with_roles(vec![RoleName::Admin]));
        assert!(admin.is_admin());

        let patient = AuthenticatedUser::from_user(&user_with_roles(vec![RoleName::Patient]));
        assert!(!patient.is_admin());
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_token("Basic abc"), None);
    }

    // ── Full-stack tests through the router ────────────────────

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tower::Service;

    use crate::application::AuthService;
    use crate::auth::jwt::{create_token, Claims};
    use crate::domain::{CreateUserDto, UserRepositoryInterface};
    use crate::infrastructure::storage::InMemoryUserRepository;
    use crate::interfaces::http::create_api_router;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            expiration_hours: 1,
            issuer: "hm-auth".to_string(),
        }
    }

    async fn seed_user(
        repo: &dyn UserRepositoryInterface,
        username: &str,
        email: &str,
        role: RoleName,
    ) {
        let role = repo.find_role_by_name(role).await.unwrap().unwrap();
        repo.create_user(CreateUserDto {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            mobile_number: "1234567890".to_string(),
            address: "1 Main St".to_string(),
            pin: "560001".to_string(),
            roles: vec![role],
        })
        .await
        .unwrap();
    }

    /// Router over an in-memory store seeded with one admin and one
    /// patient.
    async fn app() -> Router {
        let repo: Arc<dyn UserRepositoryInterface> = Arc::new(InMemoryUserRepository::new());
        seed_user(repo.as_ref(), "admin", "admin@example.com", RoleName::Admin).await;
        seed_user(repo.as_ref(), "pat", "pat@example.com", RoleName::Patient).await;

        let auth_service = Arc::new(AuthService::new(repo.clone(), jwt_config()));
        create_api_router(repo, jwt_config(), auth_service)
    }

    fn search_request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/auth/search")
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder
            .body(Body::from(r#"{"message":"pat"}"#))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> axum::http::Response<Body> {
        let mut svc = app.into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn test_search_without_token_is_401() {
        let resp = send(app().await, search_request(None)).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_search_with_tampered_token_is_401() {
        let token = create_token("admin", &jwt_config()).unwrap();
        let (payload, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", payload, replacement, &signature[1..]);

        let resp = send(app().await, search_request(Some(&tampered))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_search_with_expired_token_is_401() {
        let config = jwt_config();
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "admin".to_string(),
            exp: now - 10,
            iat: now - 3610,
            iss: config.issuer.clone(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let resp = send(app().await, search_request(Some(&token))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_search_with_token_for_missing_user_is_401() {
        // Valid signature, but the subject is not in the store.
        let token = create_token("deleted", &jwt_config()).unwrap();
        let resp = send(app().await, search_request(Some(&token))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_search_as_non_admin_is_403() {
        let token = create_token("pat", &jwt_config()).unwrap();
        let resp = send(app().await, search_request(Some(&token))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_search_as_admin_succeeds() {
        let token = create_token("admin", &jwt_config()).unwrap();
        let resp = send(app().await, search_request(Some(&token))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
