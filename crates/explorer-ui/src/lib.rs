#![allow(non_snake_case)]

pub mod app;
pub mod components;
pub mod pages;
pub mod session;

pub use app::App;

/// Browser entry point: logging, client construction, mount.
#[cfg(feature = "csr")]
pub fn mount() {
    use explorer_client::{Client, ClientConfig};
    use leptos::prelude::*;
    use tracing_subscriber::prelude::*;

    console_error_panic_hook::set_once();

    let fmtLayer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());
    tracing_subscriber::registry().with(fmtLayer).init();

    let config = ClientConfig::from_build_env();
    tracing::info!("graphql endpoint: {}", config.uri);

    // Token store defaults to window.localStorage under config.token_key
    let client = match Client::builder(config).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("failed to build client: {e}");
            return;
        }
    };

    leptos::mount::mount_to_body(move || view! { <App client=client /> });
}
