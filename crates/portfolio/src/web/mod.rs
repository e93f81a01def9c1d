//! HTTP front end for the portfolio.
//!
//! The router serves the static pages, the project gallery, the add-project
//! form and the contact form. Project data is reached through a
//! [`ProjectRepository`], and one-shot messages travel between requests in a
//! signed flash cookie.

pub mod flash;
pub mod forms;
mod handlers;
pub mod pages;

use std::sync::Arc;

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::{Config, SiteConfig};
use crate::error::{Error, Result};
use crate::repository::{ProjectRepository, SqliteRepository};
use crate::storage::ProjectStore;

use self::flash::{Flash, FlashKey};
use self::pages::Nav;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    repo: Arc<dyn ProjectRepository>,
    site: Arc<SiteConfig>,
    flash_key: FlashKey,
}

impl AppState {
    /// Build handler state from a repository and the site settings.
    #[must_use]
    pub fn new(repo: Arc<dyn ProjectRepository>, site: SiteConfig) -> Self {
        let flash_key = FlashKey::from_secret(&site.secret_key);
        Self {
            repo,
            site: Arc::new(site),
            flash_key,
        }
    }

    /// Render a page, consuming any pending flashes.
    fn render(&self, headers: &HeaderMap, nav: Nav, title: &str, body: &str) -> Response {
        self.render_with(headers, nav, title, body, Vec::new())
    }

    /// Render a page showing pending flashes followed by `extra`.
    fn render_with(
        &self,
        headers: &HeaderMap,
        nav: Nav,
        title: &str,
        body: &str,
        extra: Vec<Flash>,
    ) -> Response {
        let pending = self.flash_key.read(headers);
        let consumed = pending.is_some();
        let mut flashes = pending.unwrap_or_default();
        flashes.extend(extra);

        let html = pages::layout(&self.site, nav, title, &flashes, body);
        let mut response = Html(html).into_response();
        if consumed {
            response
                .headers_mut()
                .insert(SET_COOKIE, flash::clear_cookie());
        }
        response
    }

    /// Redirect to `to`, queuing `flash` after any still-pending flashes.
    fn redirect_with_flash(&self, headers: &HeaderMap, to: &str, flash: Flash) -> Result<Response> {
        let mut flashes = self.flash_key.read(headers).unwrap_or_default();
        flashes.push(flash);
        let cookie = self.flash_key.set_cookie(&flashes)?;
        Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(to)).into_response())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(pages::internal_error()),
        )
            .into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.site.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/about", get(handlers::about))
        .route("/resume", get(handlers::resume))
        .route("/projects", get(handlers::projects))
        .route(
            "/add-project",
            get(handlers::add_project_form).post(handlers::add_project),
        )
        .route(
            "/contact",
            get(handlers::contact_form).post(handlers::contact),
        )
        .route("/thankyou", get(handlers::thank_you))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Open the store and serve the site until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the listener cannot be
/// bound, or the server fails while running.
pub async fn serve(config: &Config) -> Result<()> {
    let addr = config.listen_addr()?;

    let store = ProjectStore::open(config.database_path())?;
    if config.storage.seed_if_empty && store.count()? == 0 {
        store.seed_sample_data()?;
    }

    if config.site.uses_default_secret() {
        warn!("Using the default secret key; set site.secret_key before deploying");
    }

    let state = AppState::new(
        Arc::new(SqliteRepository::new(store)),
        config.site.clone(),
    );

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::ServerBind { addr, source })?;
    info!("Serving portfolio on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
