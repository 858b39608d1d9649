//! Home page: public grid of every listing, newest first.

use leptos::prelude::*;

use crate::app::Repository;
use crate::components::header::Header;
use crate::components::listing_card::ListingCard;
use crate::state::listings::{ListingsState, load_all};

#[component]
pub fn HomePage() -> impl IntoView {
    let repo = expect_context::<Repository>();
    let listings = RwSignal::new(ListingsState::default());

    leptos::task::spawn_local(async move {
        if let Some(items) = load_all(&repo).await {
            listings.update(|s| s.replace(items));
        }
    });

    let on_image_load = Callback::new(move |id: String| listings.update(|s| s.mark_image_loaded(&id)));

    view! {
        <Header/>
        <main class="home-page">
            <h1 class="home-page__title">"New and used cars all over Brazil"</h1>
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
                            />
                        }
                    }
                />
            </div>
        </main>
    }
}
