use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::toast::{use_toasts, ToastLevel};
use crate::session::{use_cache_watch, use_client, use_local_state};

/// Launch ids held in the local cart, with a button to book them all.
#[component]
pub fn CartPanel() -> impl IntoView {
    let client = use_client();
    let watch = use_cache_watch();
    let toasts = use_toasts();
    let localState = use_local_state();

    let (booking, setBooking) = signal(false);

    let onBook = move |_: MouseEvent| {
        if booking.get_untracked() {
            return;
        }
        setBooking.set(true);
        let client = client.clone();
        spawn_local(async move {
            match client.book_cart().await {
                Ok(result) if result.success => {
                    toasts.push(
                        result.message.unwrap_or_else(|| "Trips booked".into()),
                        ToastLevel::Success,
                    );
                    watch.invalidate_results();
                }
                Ok(result) => toasts.push(
                    result
                        .message
                        .unwrap_or_else(|| "Some trips could not be booked".into()),
                    ToastLevel::Warning,
                ),
                Err(e) => toasts.push(format!("Booking failed: {e}"), ToastLevel::Error),
            }
            setBooking.set(false);
        });
    };

    let cartItems = move || localState.get().cart_items;

    view! {
        <div class="card cart-panel">
            <div class="card-title">"My Cart"</div>
            {move || {
                let items = cartItems();
                if items.is_empty() {
                    view! { <p class="subtitle">"No items in your cart"</p> }.into_any()
                } else {
                    view! {
                        <ul class="cart-items">
                            {items
                                .into_iter()
                                .map(|id| view! { <li>{format!("Launch {id}")}</li> })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
            <button
                class="btn btn-primary"
                on:click=onBook
                disabled=move || booking.get() || cartItems().is_empty()
            >
                {move || if booking.get() { "Booking..." } else { "Book all" }}
            </button>
        </div>
    }
}
