//! Owner panel navigation: dashboard, new listing and sign-out.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::backend::AuthClient;
use crate::net::supabase::SupabaseClient;

#[component]
pub fn DashboardHeader() -> impl IntoView {
    let client = expect_context::<SupabaseClient>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = client.sign_out().await {
                log::warn!("sign-out failed: {e}");
            }
            navigate("/", NavigateOptions::default());
        });
    };

    view! {
        <nav class="dashboard-header">
            <div class="dashboard-header__links">
                <a href="/dashboard">"Dashboard"</a>
                <a href="/dashboard/new">"Register car"</a>
            </div>
            <button class="dashboard-header__logout" on:click=on_logout>
                "Sign out"
            </button>
        </nav>
    }
}
