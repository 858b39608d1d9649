//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::private::Private;
use crate::config::SupabaseConfig;
use crate::net::listings::ListingRepository;
use crate::net::supabase::SupabaseClient;
use crate::pages::{
    car::CarPage, dashboard::DashboardPage, home::HomePage, login::LoginPage, new_listing::NewListingPage,
    register::RegisterPage,
};
use crate::state::auth::{AuthState, SessionInit, init_session};

/// Listing repository backed by the hosted project; provided as context.
pub type Repository = ListingRepository<SupabaseClient>;

/// Root application component.
///
/// Resolves the backend config, provides the session signal, the auth
/// client and the listing repository, then starts the session lifecycle:
/// one existing-session query plus a change subscription that lives until
/// the root is disposed.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = match SupabaseConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("backend configuration: {e}");
            return view! {
                <Title text="WebCarros"/>
                <main class="config-error">"The site is not configured to reach its backend."</main>
            }
            .into_any();
        }
    };

    let client = SupabaseClient::new(config);
    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);
    provide_context(client.clone());
    provide_context(ListingRepository::new(client.clone()));

    let SessionInit { initial, subscription } = init_session(client, move |update| auth.update(|s| s.apply(update)));
    leptos::task::spawn_local(initial);
    on_cleanup(move || subscription.unsubscribe());

    view! {
        <Stylesheet id="leptos" href="/pkg/webcarros.css"/>
        <Title text="WebCarros"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("car"), ParamSegment("id")) view=CarPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <Private><DashboardPage/></Private> }
                />
                <Route
                    path=(StaticSegment("dashboard"), StaticSegment("new"))
                    view=|| view! { <Private><NewListingPage/></Private> }
                />
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
            </Routes>
        </Router>
    }
    .into_any()
}
