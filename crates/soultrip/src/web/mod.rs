//! HTTP server: routes, layers and startup.

pub mod about;
pub mod admin;
pub mod api;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod public;
pub mod settings;
pub mod state;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::handler::Handler;
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::{ApiError, PageError};
pub use state::AppState;

use crate::auth::start_session_cleanup;
use crate::config::{Config, ServerConfig};
use crate::error::{Error, Result};
use crate::mail;
use crate::storage::Storage;

/// Room for multipart framing and text fields on top of the file size limit.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(15 * 60);
const LIMITER_CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Build the application router.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let settings_writes = Router::new()
        .route("/admin/settings/update", post(settings::update))
        .route("/admin/settings/upload-logo", post(settings::upload_logo))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_settings,
        ));

    let admin_area = Router::new()
        // Pages
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/admin/tours", get(admin::tours))
        .route("/admin/tours/add", get(admin::add_tour))
        .route("/admin/tours/edit/{id}", get(admin::edit_tour))
        .route("/admin/bookings", get(admin::bookings))
        .route("/admin/contacts", get(admin::contacts))
        .route("/admin/settings", get(settings::page))
        .route("/admin/about", get(admin::about))
        .route("/admin/analytics", get(admin::analytics))
        // JSON
        .route("/api/admin/stats", get(api::stats))
        .route("/api/admin/tours", get(api::list_tours).post(api::create_tour))
        .route(
            "/api/admin/tours/{id}",
            axum::routing::put(api::update_tour).delete(api::delete_tour),
        )
        .route(
            "/api/admin/bookings/{id}",
            get(api::get_booking)
                .put(api::update_booking)
                .delete(api::delete_booking),
        )
        .route(
            "/api/admin/contacts/{id}",
            axum::routing::put(api::update_contact).delete(api::delete_contact),
        )
        .route("/api/upload-image", post(api::upload_image))
        .route("/admin/settings/category/{category}", get(settings::category))
        .route("/admin/about/content", post(about::add_section))
        .route(
            "/admin/about/content/{id}",
            post(about::update_section).delete(about::delete_section),
        )
        .route("/admin/about/team", post(about::add_team_member))
        .route(
            "/admin/about/team/{id}",
            post(about::update_team_member).delete(about::delete_team_member),
        )
        .route("/admin/about/stats", post(about::add_stat))
        .route(
            "/admin/about/stats/{id}",
            post(about::update_stat).delete(about::delete_stat),
        )
        .route("/admin/about/values", post(about::add_value))
        .route(
            "/admin/about/values/{id}",
            post(about::update_value).delete(about::delete_value),
        )
        .merge(settings_writes)
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    let static_files = ServeDir::new(&server.public_dir)
        .not_found_service(public::not_found.with_state(state.clone()));
    let body_limit = state.uploads.max_bytes().saturating_add(MULTIPART_OVERHEAD);

    let app = Router::new()
        .route("/", get(public::home))
        .route("/tours", get(public::tours))
        .route("/tour/{id}", get(public::tour_detail))
        .route("/about", get(public::about))
        .route("/contact", get(public::contact).post(public::submit_contact))
        .route("/book", post(public::book))
        .route("/admin", get(|| async { Redirect::to("/admin/dashboard") }))
        .route("/admin/login", get(admin::login_page).post(admin::login))
        .route("/admin/logout", post(admin::logout))
        .merge(admin_area)
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit,
        ))
        .layer(TraceLayer::new_for_http());

    let app = if server.cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([CONTENT_TYPE])
                .max_age(Duration::from_secs(60 * 60)),
        )
    } else {
        app
    };

    app.with_state(state)
}

/// Open the database, start the background tasks and serve until a shutdown
/// signal arrives.
///
/// # Errors
///
/// Returns an error when the database cannot be opened, the mailer cannot be
/// built or the address cannot be bound.
pub async fn serve(config: &Config) -> Result<()> {
    let storage = Storage::open(config.database_path())?;
    let mailer = mail::mailer_from_config(&config.mail)?;
    let state = AppState::new(config, storage, mailer);

    start_session_cleanup(state.sessions.clone(), SESSION_CLEANUP_INTERVAL);
    state.limiter.start_cleanup_task(LIMITER_CLEANUP_INTERVAL);
    state
        .settings_limiter
        .start_cleanup_task(LIMITER_CLEANUP_INTERVAL);

    if !config.server.public_dir.is_dir() {
        warn!(
            "Public directory {} does not exist; static files will 404",
            config.server.public_dir.display()
        );
    }

    let app = router(state, &config.server);
    let address = config.bind_address()?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| Error::internal(format!("failed to bind {address}: {e}")))?;
    info!("Soul Trip Tours running on http://{}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
