//! Login page: email + password sign-in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::field::Field;
use crate::net::backend::AuthClient;
use crate::net::supabase::SupabaseClient;
use crate::state::account_form::{LoginField, submit_login};
use crate::util::validation::Form;

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = expect_context::<SupabaseClient>();
    let navigate = use_navigate();
    let form = RwSignal::new(Form::<LoginField>::default());
    let busy = RwSignal::new(false);

    // Landing here always starts from a signed-out state.
    let sign_out_client = client.clone();
    leptos::task::spawn_local(async move {
        if let Err(e) = sign_out_client.sign_out().await {
            log::warn!("sign-out on login mount failed: {e}");
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let Some(Ok(credentials)) = form.try_update(submit_login) else {
            return;
        };
        busy.set(true);
        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match client.sign_in_with_password(&credentials.email, &credentials.password).await {
                Ok(_) => {
                    log::info!("signed in");
                    navigate("/dashboard", NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
                Err(e) => log::error!("sign-in failed: {e}"),
            }
            busy.set(false);
        });
    };

    let input = move |field: LoginField, kind: &'static str, placeholder: &'static str| {
        view! {
            <Field
                name=format!("{field:?}").to_lowercase()
                kind=kind
                placeholder=placeholder
                value=Signal::derive(move || form.with(|f| f.value(field).to_owned()))
                error=Signal::derive(move || form.with(|f| f.error(field)))
                on_input=Callback::new(move |value: String| form.update(|f| f.set_field(field, value)))
            />
        }
    };

    view! {
        <div class="login-page">
            <a class="login-page__brand" href="/">"WebCarros"</a>
            <form class="login-form" on:submit=on_submit>
                {input(LoginField::Email, "email", "Type your email...")}
                {input(LoginField::Password, "password", "Type your password...")}
                <button class="login-button" type="submit" disabled=move || busy.get()>
                    "Sign in"
                </button>
            </form>
            <a href="/register">"Don't have an account yet? Sign up"</a>
        </div>
    }
}
