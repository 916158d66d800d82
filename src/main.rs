use std::sync::Arc;

use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;

mod auth;
mod catalog;
mod compat;
mod config;
mod error;
mod feed;
mod model;
mod routes;
mod search;
mod tags;
#[cfg(test)]
mod testing;
mod text;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config_path = std::env::args()
        .nth(1)
        .expect("usage: richpress <config.toml>");
    let config: config::Config =
        toml::from_str(&std::fs::read_to_string(&config_path).expect("read config file"))
            .expect("parse config file");

    let db_path = &config.db.sqlite_file;
    if !tokio::fs::try_exists(db_path).await.expect("stat sqlite file") {
        tokio::fs::write(db_path, "").await.expect("create sqlite file");
    }

    let sqlite_url = format!("sqlite://{}", config.db.sqlite_file.display());
    let pool = SqlitePool::connect(&sqlite_url).await.expect("connect to sqlite");
    sqlx::query(include_str!("../schema.sql"))
        .execute(&pool)
        .await
        .expect("apply schema");

    let templates_glob = format!("{}/**/*.html", config.site.templates_dir.display());
    let tera = tera::Tera::new(&templates_glob).expect("load templates");

    let bind = config.net.bind;
    let state = routes::AppState {
        pool,
        tera: Arc::new(tera),
        config: Arc::new(config),
    };

    tracing::info!(%bind, "richpress listening");
    let listener = tokio::net::TcpListener::bind(bind).await.expect("bind");
    axum::serve(listener, routes::router(state))
        .await
        .expect("serve");
}
