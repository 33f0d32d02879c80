use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast-success",
            ToastLevel::Error => "toast-error",
            ToastLevel::Warning => "toast-warning",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    pub fn push(&self, message: String, level: ToastLevel) {
        let toastId = self.next_id.get_value();
        self.next_id.set_value(toastId + 1);

        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id: toastId,
                message,
                level,
            });
        });

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|list| list.retain(|t| t.id != toastId)),
            std::time::Duration::from_secs(5),
        );
    }
}

pub fn use_toasts() -> ToastContext {
    expect_context::<ToastContext>()
}

/// Provides toast context and renders the toast container.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let ctx = ToastContext {
        toasts: RwSignal::new(Vec::new()),
        next_id: StoredValue::new(0),
    };
    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                let:toast
            >
                <div class=format!("toast {}", toast.level.class())>{toast.message.clone()}</div>
            </For>
        </div>
    }
}
