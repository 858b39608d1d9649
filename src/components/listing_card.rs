//! Card for one listing in the home grid and the owner dashboard.
//!
//! DESIGN
//! ======
//! The cover photo stays hidden behind a placeholder until the browser
//! reports it loaded, so slow images never flash half-drawn. Deletion is
//! only offered on the dashboard, where the caller passes `on_delete`.

use leptos::prelude::*;

use crate::net::types::Listing;
use crate::util::format::format_brl;

/// A clickable card representing a listing.
#[component]
pub fn ListingCard(
    listing: Listing,
    #[prop(into)] loaded: Signal<bool>,
    on_load: Callback<String>,
    #[prop(optional)] on_delete: Option<Callback<String>>,
) -> impl IntoView {
    let href = format!("/car/{}", listing.id);
    let cover = listing.cover().map(|img| img.url.clone()).unwrap_or_default();
    let price = format_brl(&listing.price);
    let deletable = on_delete.is_some();

    let on_load_image = {
        let id = listing.id.clone();
        move |_| on_load.run(id.clone())
    };
    let on_delete_click = {
        let id = listing.id.clone();
        move |ev: leptos::ev::MouseEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            if let Some(on_delete) = on_delete.as_ref() {
                on_delete.run(id.clone());
            }
        }
    };

    view! {
        <a class="listing-card" href=href>
            <Show when=move || deletable>
                <button
                    class="listing-card__delete"
                    on:click=on_delete_click.clone()
                    title="Delete listing"
                    aria-label="Delete listing"
                >
                    "✕"
                </button>
            </Show>
            <div class="listing-card__placeholder" class:hidden=move || loaded.get()></div>
            <img
                class="listing-card__image"
                class:hidden=move || !loaded.get()
                src=cover
                alt=listing.name.clone()
                on:load=on_load_image
            />
            <div class="listing-card__body">
                <span class="listing-card__name">{listing.name.clone()}</span>
                <span class="listing-card__meta">{format!("{} | {} km", listing.year, listing.km)}</span>
                <strong class="listing-card__price">{price}</strong>
            </div>
            <div class="listing-card__city">{listing.city.clone()}</div>
        </a>
    }
}
