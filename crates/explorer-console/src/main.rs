#![allow(non_snake_case)]

//! Serves the built Space Explorer bundle. Unknown paths fall back to
//! `index.html` so the client can take over.

mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Clone, Debug, PartialEq)]
    pub struct Config {
        pub server: ServerConfig,
        pub site: SiteConfig,
    }

    #[derive(Deserialize, Clone, Debug, PartialEq)]
    pub struct ServerConfig {
        pub bind: String,
        pub port: u16,
    }

    #[derive(Deserialize, Clone, Debug, PartialEq)]
    pub struct SiteConfig {
        /// Directory produced by `trunk build`.
        pub root: String,
    }

    impl Default for Config {
        fn default() -> Self {
            Self {
                server: ServerConfig {
                    bind: "127.0.0.1".into(),
                    port: 3000,
                },
                site: SiteConfig {
                    root: "crates/explorer-ui/dist".into(),
                },
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn load(path: &str) -> Config {
        match std::fs::read_to_string(path) {
            Ok(contents) => match parse(&contents) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("failed to parse config {path}: {e}, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("failed to read config {path}: {e}, using defaults");
                Config::default()
            }
        }
    }
}

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

fn site_router(root: &Path) -> Router {
    let indexFile = ServeFile::new(root.join("index.html"));
    let siteService = ServeDir::new(root).fallback(indexFile);

    Router::new()
        .fallback_service(siteService)
        .layer(TraceLayer::new_for_http())
}

fn config_path(args: &[String]) -> String {
    if let Some(idx) = args.iter().position(|a| a == "--config") {
        args.get(idx + 1)
            .cloned()
            .unwrap_or_else(|| "config.example.toml".into())
    } else {
        "config.example.toml".into()
    }
}

#[tokio::main]
async fn main() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let configPath = config_path(&args);

    let appConfig = config::load(&configPath);
    tracing::info!(
        "loaded config from {configPath}: bind={}:{} site={}",
        appConfig.server.bind,
        appConfig.server.port,
        appConfig.site.root
    );

    let siteRoot = Path::new(&appConfig.site.root);
    if !siteRoot.join("index.html").exists() {
        tracing::warn!(
            "no index.html under {}, run `trunk build` in crates/explorer-ui first",
            appConfig.site.root
        );
    }

    let app = site_router(siteRoot);

    let addr = format!("{}:{}", appConfig.server.bind, appConfig.server.port);
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server exited with error");
}
