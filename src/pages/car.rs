//! Detail page for a single listing at `/car/:id`.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::Repository;
use crate::components::header::Header;
use crate::state::listings::ListingDetail;
use crate::util::format::{format_brl, whatsapp_link};

#[component]
pub fn CarPage() -> impl IntoView {
    let repo = expect_context::<Repository>();
    let params = use_params_map();
    let detail = RwSignal::new(ListingDetail::default());

    Effect::new(move || {
        let Some(id) = params.get().get("id") else {
            detail.set(ListingDetail::Unavailable);
            return;
        };
        let repo = repo.clone();
        detail.set(ListingDetail::Loading);
        leptos::task::spawn_local(async move {
            let result = repo.get_by_id(&id).await;
            detail.set(ListingDetail::from_result(&id, result));
        });
    });

    move || {
        let Some(listing) = detail.get().listing().cloned() else {
            return view! { <Header/> <main class="car-page"></main> }.into_any();
        };
        let contact = whatsapp_link(&listing.whatsapp, &listing.name);
        let photos = listing
            .images
            .iter()
            .map(|img| view! { <img class="car-page__photo" src=img.url.clone() alt=listing.name.clone()/> })
            .collect_view();

        view! {
            <Header/>
            <main class="car-page">
                <div class="car-page__gallery">{photos}</div>
                <section class="car-page__info">
                    <div class="car-page__headline">
                        <h1>{listing.name.clone()}</h1>
                        <h1>{format_brl(&listing.price)}</h1>
                    </div>
                    <p>{listing.model.clone()}</p>
                    <div class="car-page__facts">
                        <div>
                            <p>"City"</p>
                            <strong>{listing.city.clone()}</strong>
                        </div>
                        <div>
                            <p>"Year"</p>
                            <strong>{listing.year.clone()}</strong>
                        </div>
                        <div>
                            <p>"Mileage"</p>
                            <strong>{format!("{} km", listing.km)}</strong>
                        </div>
                    </div>
                    <strong>"Description:"</strong>
                    <p class="car-page__description">{listing.description.clone()}</p>
                    <strong>"Phone / WhatsApp"</strong>
                    <p>{listing.whatsapp.clone()}</p>
                    <a class="car-page__contact" href=contact target="_blank" rel="noopener">
                        "Talk to the seller"
                    </a>
                </section>
            </main>
        }
        .into_any()
    }
}
