//! New-listing page: photo picker plus the validated listing form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Photos upload the moment they are picked, so the listing form only
//! carries their public URLs. Submitting validates every field and logs the
//! draft; no row is written from here.

use leptos::prelude::*;

use crate::app::Repository;
use crate::components::dashboard_header::DashboardHeader;
use crate::components::field::Field;
use crate::components::header::Header;
use crate::net::types::ImageFile;
use crate::state::auth::AuthState;
use crate::state::listing_form::{FormError, IMAGE_REJECTED_ALERT, ListingField, ListingForm, upload_selected_image};

#[component]
pub fn NewListingPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let repo = expect_context::<Repository>();
    let form = RwSignal::new(ListingForm::default());

    let on_file = move |ev: leptos::ev::Event| {
        let repo = repo.clone();
        leptos::task::spawn_local(async move {
            let Some(file) = read_picked_file(ev).await else {
                return;
            };
            let session = auth.with_untracked(|a| a.session.clone());
            match upload_selected_image(&repo, session.as_ref(), &file).await {
                Ok(Some(image)) => form.update(|f| f.add_image(image)),
                Ok(None) => log::debug!("image picked without a session; ignored"),
                Err(FormError::ImageRejected(mime)) => {
                    log::warn!("rejected image type {mime}");
                    alert(IMAGE_REJECTED_ALERT);
                }
                Err(e) => log::error!("image upload failed: {e}"),
            }
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        form.update(|f| match f.submit() {
            Ok(draft) => log::info!("listing draft: {draft:?}"),
            Err(errors) => log::debug!("listing form has {} invalid field(s)", errors.len()),
        });
    };

    let input = move |field: ListingField, placeholder: &'static str| {
        view! {
            <Field
                name=format!("{field:?}").to_lowercase()
                placeholder=placeholder
                value=Signal::derive(move || form.with(|f| f.fields.value(field).to_owned()))
                error=Signal::derive(move || form.with(|f| f.fields.error(field)))
                on_input=Callback::new(move |value: String| form.update(|f| f.set_field(field, value)))
            />
        }
    };

    view! {
        <Header/>
        <main class="new-listing-page">
            <DashboardHeader/>
            <section class="new-listing-page__photos">
                <label class="photo-picker">
                    <input type="file" accept="image/*" class="photo-picker__input" on:change=on_file/>
                    "+"
                </label>
                <For
                    each=move || form.get().images
                    key=|image| image.name.clone()
                    children=|image| view! { <img class="photo-preview" src=image.url alt="Car photo"/> }
                />
            </section>
            <form class="listing-form" on:submit=on_submit>
                <p>"Car name"</p>
                {input(ListingField::Name, "Ex: Onix 1.0")}
                <p>"Car model"</p>
                {input(ListingField::Model, "Ex: 1.0 Flex PLUS MANUAL")}
                <div class="listing-form__row">
                    <div>
                        <p>"Year"</p>
                        {input(ListingField::Year, "Ex: 2016/2016")}
                    </div>
                    <div>
                        <p>"Mileage"</p>
                        {input(ListingField::Km, "Ex: 23.900")}
                    </div>
                </div>
                <div class="listing-form__row">
                    <div>
                        <p>"Phone / WhatsApp"</p>
                        {input(ListingField::Whatsapp, "Ex: 011999101923")}
                    </div>
                    <div>
                        <p>"City"</p>
                        {input(ListingField::City, "Ex: Campo Grande - MS")}
                    </div>
                </div>
                <p>"Price"</p>
                {input(ListingField::Price, "Ex: 69000")}
                <p>"Description"</p>
                <textarea
                    class="listing-form__description"
                    name="description"
                    placeholder="Type the full description of the car..."
                    prop:value=move || form.with(|f| f.fields.value(ListingField::Description).to_owned())
                    on:input=move |ev| form.update(|f| f.set_field(ListingField::Description, event_target_value(&ev)))
                ></textarea>
                <Show when=move || form.with(|f| f.fields.error(ListingField::Description).is_some())>
                    <p class="field__error">
                        {move || form.with(|f| f.fields.error(ListingField::Description)).unwrap_or_default()}
                    </p>
                </Show>
                <button class="listing-form__submit" type="submit">"Register"</button>
            </form>
        </main>
    }
}

#[cfg(feature = "csr")]
async fn read_picked_file(ev: leptos::ev::Event) -> Option<ImageFile> {
    let input = event_target::<web_sys::HtmlInputElement>(&ev);
    let file = input.files().and_then(|files| files.get(0))?;
    let buffer = match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
        Ok(buffer) => buffer,
        Err(e) => {
            log::error!("reading picked file failed: {e:?}");
            return None;
        }
    };
    Some(ImageFile { name: file.name(), content_type: file.type_(), bytes: js_sys::Uint8Array::new(&buffer).to_vec() })
}

#[cfg(not(feature = "csr"))]
#[allow(clippy::unused_async)]
async fn read_picked_file(_ev: leptos::ev::Event) -> Option<ImageFile> {
    None
}

#[cfg(feature = "csr")]
fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[cfg(not(feature = "csr"))]
fn alert(message: &str) {
    log::warn!("{message}");
}
