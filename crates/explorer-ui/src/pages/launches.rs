use explorer_types::LaunchSummary;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::{use_cache_watch, use_client, use_local_state};

#[derive(Clone, Debug, PartialEq)]
enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[component]
pub fn LaunchesPage() -> impl IntoView {
    let client = use_client();
    let watch = use_cache_watch();

    let (launches, setLaunches) = signal(Vec::<LaunchSummary>::new());
    let (cursor, setCursor) = signal(Option::<String>::None);
    let (hasMore, setHasMore) = signal(false);
    let (status, setStatus) = signal(LoadStatus::Loading);

    let fetchPage = move |after: Option<String>| {
        let client = client.clone();
        setStatus.set(LoadStatus::Loading);
        spawn_local(async move {
            match client.launches(after).await {
                Ok(page) => {
                    setLaunches.update(|list| list.extend(page.launches));
                    setCursor.set(Some(page.cursor));
                    setHasMore.set(page.has_more);
                    setStatus.set(LoadStatus::Ready);
                }
                Err(e) => setStatus.set(LoadStatus::Failed(e.to_string())),
            }
        });
    };

    // First page on mount, and again from the top whenever cached results
    // are invalidated (booking changes `isBooked`)
    let refetch = fetchPage.clone();
    Effect::new(move |_| {
        watch.track_results();
        setLaunches.set(Vec::new());
        setCursor.set(None);
        refetch(None);
    });

    let loadMore = move |_: MouseEvent| fetchPage(cursor.get_untracked());

    view! {
        <div class="dashboard-header">
            <h1>"Space Explorer"</h1>
            <p class="subtitle">"Upcoming launches"</p>
        </div>
        <div class="launch-list">
            <For
                each=move || launches.get()
                key=|launch| launch.id.clone()
                let:launch
            >
                <LaunchTile launch=launch />
            </For>
        </div>
        {move || match status.get() {
            LoadStatus::Loading => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading launches..."
                    </div>
                }
                    .into_any()
            }
            LoadStatus::Failed(e) => {
                view! {
                    <div class="card">
                        <p class="login-error">"Failed to load launches: " {e}</p>
                    </div>
                }
                    .into_any()
            }
            LoadStatus::Ready => {
                if hasMore.get() {
                    let loadMore = loadMore.clone();
                    view! {
                        <button class="btn" on:click=loadMore>
                            "Load more"
                        </button>
                    }
                        .into_any()
                } else {
                    ().into_any()
                }
            }
        }}
    }
}

#[component]
fn LaunchTile(launch: LaunchSummary) -> impl IntoView {
    let client = use_client();
    let watch = use_cache_watch();
    let localState = use_local_state();

    let launchId = launch.id.clone();
    let inCart = {
        let launchId = launchId.clone();
        move || localState.get().cart_items.contains(&launchId)
    };

    let toggleCart = {
        let inCart = inCart.clone();
        move |_: MouseEvent| {
            if inCart() {
                client.remove_from_cart(&launchId);
            } else {
                client.add_to_cart(&launchId);
            }
            watch.notify();
        }
    };

    let subtitle = [launch.rocket_name.clone(), launch.site.clone()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" \u{00B7} ");

    view! {
        <div class="card launch-tile">
            {launch
                .mission_patch
                .clone()
                .map(|src| view! { <img class="mission-patch" src=src alt="" /> })}
            <div class="launch-body">
                <div class="card-title">{launch.title()}</div>
                <p class="subtitle">{subtitle}</p>
                {launch.is_booked.then(|| view! { <span class="badge">"Booked"</span> })}
            </div>
            <button class="btn btn-primary" on:click=toggleCart disabled=launch.is_booked>
                {move || if inCart() { "Remove from cart" } else { "Add to cart" }}
            </button>
        </div>
    }
}
