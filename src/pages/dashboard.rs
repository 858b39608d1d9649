//! Dashboard page listing the signed-in owner's cars.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `Private`, so a session exists by the time this renders.
//! Listings are fetched once the owner uid is known. Deleting a card runs
//! the repository's two-phase delete and only removes the card after the
//! row is gone.

use leptos::prelude::*;

use crate::app::Repository;
use crate::components::dashboard_header::DashboardHeader;
use crate::components::header::Header;
use crate::components::listing_card::ListingCard;
use crate::state::auth::AuthState;
use crate::state::listings::{ListingsState, load_owned};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let repo = expect_context::<Repository>();
    let listings = RwSignal::new(ListingsState::default());

    let fetch_repo = repo.clone();
    Effect::new(move || {
        let Some(uid) = auth.with(|a| a.uid().map(str::to_owned)) else {
            return;
        };
        let repo = fetch_repo.clone();
        leptos::task::spawn_local(async move {
            if let Some(items) = load_owned(&repo, &uid).await {
                listings.update(|s| s.replace(items));
            }
        });
    });

    let on_image_load = Callback::new(move |id: String| listings.update(|s| s.mark_image_loaded(&id)));

    let on_delete = Callback::new(move |id: String| {
        let Some(target) = listings.with_untracked(|s| s.find(&id).cloned()) else {
            return;
        };
        let repo = repo.clone();
        leptos::task::spawn_local(async move {
            let result = repo.delete_listing(&target).await;
            listings.update(|s| {
                s.apply_delete(&target.id, &result);
            });
        });
    });

    view! {
        <Header/>
        <main class="dashboard-page">
            <DashboardHeader/>
            <div class="listing-grid">
                <For
                    each=move || listings.get().items
                    key=|listing| listing.id.clone()
                    children=move |listing| {
                        let id = listing.id.clone();
                        view! {
                            <ListingCard
                                listing=listing
                                loaded=Signal::derive(move || listings.get().is_image_loaded(&id))
                                on_load=on_image_load
                                on_delete=on_delete
                            />
                        }
                    }
                />
            </div>
        </main>
    }
}
