use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    controllers::{
        audio::AudioController, auth::AuthController, health, health::HealthController,
        languages, phrases::PhrasesController,
    },
    domain::auth::JwtManager,
    infrastructure::auth::{auth_middleware, request_id_middleware},
    infrastructure::config::Config,
};

/// Everything the router needs
pub struct AppControllers {
    pub health: Arc<HealthController>,
    pub auth: Arc<AuthController>,
    pub phrases: Arc<PhrasesController>,
    pub audio: Arc<AudioController>,
}

/// Build the application router. Shared by the binary and the e2e tests.
pub fn create_router(controllers: AppControllers, jwt_manager: Arc<JwtManager>) -> Router {
    // Auth routes (public - no auth required)
    let auth_routes = Router::new()
        .route("/auth/login", post(AuthController::login))
        .with_state(controllers.auth);

    // Language catalogue (requires authentication)
    let language_routes = Router::new()
        .route("/api/languages", get(languages::list_languages))
        .layer(middleware::from_fn_with_state(
            jwt_manager.clone(),
            auth_middleware,
        ));

    // Phrase routes (require authentication)
    let phrase_routes = Router::new()
        .route("/api/phrases/batch", post(PhrasesController::prepare_batch))
        .route("/api/phrases/export", post(PhrasesController::export))
        .with_state(controllers.phrases)
        .layer(middleware::from_fn_with_state(
            jwt_manager.clone(),
            auth_middleware,
        ));

    // Audio routes (require authentication)
    let audio_routes = Router::new()
        .route("/api/audio/generate", post(AudioController::generate))
        .route(
            "/api/audio/:hash",
            get(AudioController::download).delete(AudioController::invalidate),
        )
        .with_state(controllers.audio)
        .layer(middleware::from_fn_with_state(
            jwt_manager.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(HealthController::health_ready))
        .with_state(controllers.health)
        .merge(auth_routes)
        .merge(language_routes)
        .merge(phrase_routes)
        .merge(audio_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    controllers: AppControllers,
    jwt_manager: Arc<JwtManager>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(controllers, jwt_manager);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
