mod auth;
mod db;
mod users;

use std::sync::Arc;

use axum::{
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use chrono::Utc;
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthConfig, AuthService, TokenService, UserRepository, UserResponse};
use users::UpdateUserRequest;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        users::handlers::list_users_handler,
        users::handlers::get_user_handler,
        users::handlers::update_user_handler,
        users::handlers::delete_user_handler,
    ),
    components(
        schemas(UserResponse, UpdateUserRequest)
    ),
    tags(
        (name = "users", description = "User management endpoints")
    ),
    info(
        title = "User CRUD API",
        version = "1.0.0",
        description = "RESTful API for user registration, login, and management with JWT bearer tokens"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub user_repo: UserRepository,
    pub token_service: Arc<TokenService>,
    pub auth_service: Arc<AuthService>,
}

/// Handler for GET /health
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Auth routes
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/refresh", post(auth::refresh_handler))
        .route("/api/auth/me", get(auth::me_handler))
        // User CRUD routes
        .route("/api/users", get(users::list_users_handler))
        .route("/api/users/:id", get(users::get_user_handler))
        .route("/api/users/:id", put(users::update_user_handler))
        .route("/api/users/:id", delete(users::delete_user_handler))
        // Health check
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("User API - Starting...");

    // Get configuration from environment variables
    let auth_config = AuthConfig::from_env();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST")
        .unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Wire up services with the immutable startup configuration
    let token_service = Arc::new(TokenService::new(&auth_config));
    let user_repo = UserRepository::new(db_pool.clone());
    let auth_service = Arc::new(AuthService::new(user_repo.clone(), token_service.clone()));

    let state = AppState {
        db: db_pool,
        user_repo,
        token_service,
        auth_service,
    };

    // Create the application router
    let app = create_router(state);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("User API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
