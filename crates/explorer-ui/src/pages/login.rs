use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::session::{use_cache_watch, use_client};

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = use_client();
    let watch = use_cache_watch();

    let (email, setEmail) = signal(String::new());
    let (pending, setPending) = signal(false);
    let (loginError, setLoginError) = signal(Option::<String>::None);

    let onSubmit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let emailValue = email.get_untracked().trim().to_string();
        if emailValue.is_empty() || pending.get_untracked() {
            return;
        }

        setPending.set(true);
        setLoginError.set(None);
        let client = client.clone();
        spawn_local(async move {
            match client.log_in(&emailValue).await {
                Ok(_) => watch.notify(),
                Err(e) => setLoginError.set(Some(e.to_string())),
            }
            setPending.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"\u{1F680}"</div>
                    <h1>"Space Explorer"</h1>
                    <p>"Enter your email to continue"</p>
                </div>

                {move || {
                    loginError
                        .get()
                        .map(|message| {
                            view! { <div class="login-error">{message}</div> }
                        })
                }}

                <form on:submit=onSubmit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            placeholder="you@example.com"
                            required
                            prop:value=email
                            on:input=move |ev| setEmail.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Logging in..." } else { "Log in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
