use explorer_client::cache::IS_LOGGED_IN_FIELD;
use explorer_client::Client;
use leptos::prelude::*;
use leptos_meta::*;

use crate::components::nav::Nav;
use crate::components::toast::ToastProvider;
use crate::pages::cart::CartPanel;
use crate::pages::launches::LaunchesPage;
use crate::pages::login::LoginPage;
use crate::session::{use_cache_watch, use_client, CacheWatch};

/// Which tree the root renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    Pages,
    Login,
}

impl Landing {
    pub fn from_logged_in(isLoggedIn: bool) -> Self {
        if isLoggedIn {
            Self::Pages
        } else {
            Self::Login
        }
    }
}

/// Reads `isLoggedIn` from the client cache; anything but `true` means the
/// login view.
pub fn landing(client: &Client) -> Landing {
    let isLoggedIn = client
        .resolve_local(IS_LOGGED_IN_FIELD)
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    Landing::from_logged_in(isLoggedIn)
}

/// Root component. Makes `client` and the cache watch available to every
/// descendant through context.
#[component]
pub fn App(client: Client) -> impl IntoView {
    provide_meta_context();
    provide_context(client);
    provide_context(CacheWatch::new());

    view! {
        <Title text="Space Explorer" />
        <ToastProvider>
            <IsLoggedIn />
        </ToastProvider>
    }
}

/// Renders the authenticated pages when the cache says `isLoggedIn`,
/// the login view otherwise.
#[component]
pub fn IsLoggedIn() -> impl IntoView {
    let client = use_client();
    let watch = use_cache_watch();

    let current = Memo::new(move |_| {
        watch.track();
        landing(&client)
    });

    move || match current.get() {
        Landing::Pages => view! { <Pages /> }.into_any(),
        Landing::Login => view! { <LoginPage /> }.into_any(),
    }
}

#[component]
fn Pages() -> impl IntoView {
    view! {
        <div class="app-layout">
            <Nav />
            <main class="main-content">
                <LaunchesPage />
                <CartPanel />
            </main>
        </div>
    }
}
