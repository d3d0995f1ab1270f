use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, get_service},
    Router,
};
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod frontmatter;
mod markdown;
mod models;
mod posts;
mod routes;
mod state;
mod views;

#[tokio::main]
async fn main() {
    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    info!(
        content_dir = %config.content_dir.display(),
        policy = ?config.listing_policy,
        "configuration loaded"
    );

    let projects = config::load_projects(&config.projects_file)
        .await
        .expect("Failed to load projects file");

    let static_dir = get_service(ServeDir::new(&config.static_dir));
    let favicon_ico = get_service(ServeFile::new(config.static_dir.join("favicon.ico")));

    let port = config.port;
    let app_state = Arc::new(state::AppState { config, projects });

    let app = Router::new()
        .route("/", get(routes::homepage))
        .route("/posts", get(routes::posts_index))
        .route("/posts/{slug}", get(routes::show_post))
        .route("/projects", get(routes::projects_page))
        .nest_service("/static", static_dir)
        .route_service("/favicon.ico", favicon_ico)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "listening");
    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
