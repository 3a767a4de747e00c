//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AuthService;
use crate::auth::jwt::JwtConfig;
use crate::auth::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::domain::UserRepositoryInterface;
use crate::interfaces::http::modules::{auth, health, users};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::signin,
        auth::handlers::signup,
        users::handlers::search_user,
        users::handlers::search_patient,
        users::handlers::search_doctor,
        health::handlers::health_check,
    ),
    components(schemas(
        crate::domain::User,
        crate::domain::Role,
        crate::domain::RoleName,
        auth::dto::LoginRequest,
        auth::dto::SignupRequest,
        auth::dto::JwtResponse,
        auth::dto::MessageResponse,
        users::dto::MessageRequest,
        health::handlers::HealthResponse,
        health::handlers::ComponentHealth,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign-in and sign-up"),
        (name = "Users", description = "Admin-only user lookup"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;

/// Build the full API router.
pub fn create_api_router(
    repo: Arc<dyn UserRepositoryInterface>,
    jwt_config: JwtConfig,
    auth_service: Arc<AuthService>,
) -> Router {
    let auth_state = AuthState {
        jwt_config,
        repo: repo.clone(),
    };

    let public_routes = Router::new()
        .route("/api/auth/signin", post(auth::handlers::signin))
        .route("/api/auth/signup", post(auth::handlers::signup))
        .with_state(auth::handlers::AuthHandlerState {
            auth_service: auth_service.clone(),
        });

    // Search endpoints require a valid token AND the admin role.
    // Layers run outermost first, so auth_middleware (added last)
    // authenticates before admin_middleware authorizes.
    let admin_routes = Router::new()
        .route("/api/auth/search", post(users::handlers::search_user))
        .route(
            "/api/auth/patient/search",
            post(users::handlers::search_patient),
        )
        .route(
            "/api/auth/doctor/search",
            post(users::handlers::search_doctor),
        )
        .with_state(users::handlers::UserSearchState { auth_service })
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ));

    let health_routes = Router::new()
        .route("/health", get(health::handlers::health_check))
        .with_state(health::handlers::HealthState {
            repo,
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
