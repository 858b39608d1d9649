//! Site header with the brand link and the account entry point.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <header class="site-header">
            <a class="site-header__brand" href="/">
                "Web"<span class="site-header__brand-accent">"Carros"</span>
            </a>
            <Show when=move || !auth.get().loading_auth>
                <Show
                    when=move || auth.get().signed()
                    fallback=|| view! { <a class="site-header__account" href="/login">"Sign in"</a> }
                >
                    <a class="site-header__account" href="/dashboard">
                        {move || auth.get().session.and_then(|s| s.name).unwrap_or_else(|| "My panel".to_owned())}
                    </a>
                </Show>
            </Show>
        </header>
    }
}
