//! Wrapper that gates owner-only routes on the session state.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, guard};

/// Render `children` only for a signed-in user.
///
/// Shows an empty placeholder until the initial session query resolves,
/// then either the protected view or a redirect to the login route.
#[component]
pub fn Private(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    move || match guard(&auth.get()) {
        GuardDecision::Loading => view! { <div></div> }.into_any(),
        GuardDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
        GuardDecision::Allow => children().into_any(),
    }
}
