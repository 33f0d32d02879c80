use leptos::prelude::*;

use crate::components::toast::{use_toasts, ToastLevel};
use crate::session::{use_cache_watch, use_client, use_local_state};

#[component]
pub fn Nav() -> impl IntoView {
    let client = use_client();
    let watch = use_cache_watch();
    let toasts = use_toasts();
    let localState = use_local_state();

    let cartCount = move || localState.get().cart_items.len();

    let onLogout = move |_: leptos::ev::MouseEvent| match client.log_out() {
        Ok(()) => watch.notify(),
        Err(e) => toasts.push(format!("Logout failed: {e}"), ToastLevel::Error),
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"\u{1F680}"</div>
                <span class="brand-text">"Space Explorer"</span>
            </div>
            <ul class="nav-links">
                <li class="nav-item active">
                    <span>
                        <span class="nav-icon">"\u{25A3}"</span>
                        <span>"Launches"</span>
                    </span>
                </li>
                <li class="nav-item">
                    <span>
                        <span class="nav-icon">"\u{1F6D2}"</span>
                        <span>{move || format!("Cart ({})", cartCount())}</span>
                    </span>
                </li>
                <li class="nav-item">
                    <button class="nav-logout" on:click=onLogout>
                        <span class="nav-icon">"\u{21AA}"</span>
                        <span>"Log out"</span>
                    </button>
                </li>
            </ul>
        </nav>
    }
}
