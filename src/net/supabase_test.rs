use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;
use crate::config::{DEFAULT_IMAGES_BUCKET, DEFAULT_LISTINGS_TABLE};

fn client() -> SupabaseClient {
    SupabaseClient::new(SupabaseConfig {
        url: "https://proj.supabase.co".to_owned(),
        anon_key: "anon-key".to_owned(),
        table: DEFAULT_LISTINGS_TABLE.to_owned(),
        bucket: DEFAULT_IMAGES_BUCKET.to_owned(),
    })
}

// =============================================================
// Request builders
// =============================================================

#[test]
fn owner_query_filters_on_user_id() {
    let req = client().select_by_owner_request("u-1");
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, "https://proj.supabase.co/rest/v1/carros?select=*&user_id=eq.u-1");
    assert_eq!(req.header_value("apikey"), Some("anon-key"));
    assert_eq!(req.header_value("Authorization"), Some("Bearer anon-key"));
}

#[test]
fn single_query_requests_object_representation() {
    let req = client().select_single_request("c-7");
    assert_eq!(req.url, "https://proj.supabase.co/rest/v1/carros?select=*&id=eq.c-7");
    assert_eq!(req.header_value("Accept"), Some(PGRST_OBJECT));
}

#[test]
fn delete_request_targets_row_by_id() {
    let req = client().delete_request("c-7");
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url, "https://proj.supabase.co/rest/v1/carros?id=eq.c-7");
    assert_eq!(req.body, Body::Empty);
}

#[test]
fn filter_values_cannot_add_query_parameters() {
    let req = client().select_single_request("1&user_id=eq.someone-else");
    assert_eq!(req.url, "https://proj.supabase.co/rest/v1/carros?select=*&id=eq.1%26user_id%3Deq.someone-else");

    let req = client().delete_request("c 7#frag");
    assert_eq!(req.url, "https://proj.supabase.co/rest/v1/carros?id=eq.c%207%23frag");

    let req = client().select_by_owner_request("u-1&select=secret");
    assert_eq!(req.url, "https://proj.supabase.co/rest/v1/carros?select=*&user_id=eq.u-1%26select%3Dsecret");
}

#[test]
fn upload_request_posts_raw_bytes_under_bucket_path() {
    let bytes = [1_u8, 2, 3];
    let req = client().upload_request("images/U1/abc", &bytes, "image/jpeg");
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "https://proj.supabase.co/storage/v1/object/car/images/U1/abc");
    assert_eq!(req.header_value("Content-Type"), Some("image/jpeg"));
    assert_eq!(req.body, Body::Bytes(&bytes));
}

#[test]
fn remove_request_sends_all_prefixes_in_one_body() {
    let paths = vec!["images/U1/a".to_owned(), "images/U1/b".to_owned()];
    let req = client().remove_request(&paths);
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url, "https://proj.supabase.co/storage/v1/object/car");
    assert_eq!(req.body, Body::Json(serde_json::json!({ "prefixes": ["images/U1/a", "images/U1/b"] })));
}

#[test]
fn signup_request_carries_name_metadata() {
    let req = client().signup_request("ana@example.com", "secret1", "Ana");
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/signup");
    assert_eq!(
        req.body,
        Body::Json(serde_json::json!({
            "email": "ana@example.com",
            "password": "secret1",
            "data": { "name": "Ana" }
        }))
    );
}

#[test]
fn password_grant_request_uses_token_endpoint() {
    let req = client().password_grant_request("ana@example.com", "secret1");
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/token?grant_type=password");
}

#[test]
fn public_url_is_pure_function_of_path() {
    let c = client();
    let first = c.public_url("images/U1/abc");
    assert_eq!(first, "https://proj.supabase.co/storage/v1/object/public/car/images/U1/abc");
    assert_eq!(first, c.public_url("images/U1/abc"));
}

// =============================================================
// Error bodies
// =============================================================

#[test]
fn auth_error_message_prefers_description() {
    let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
    assert_eq!(auth_error_message(body).as_deref(), Some("Invalid login credentials"));
}

#[test]
fn auth_error_message_reads_msg_field() {
    assert_eq!(auth_error_message(r#"{"code":422,"msg":"User already registered"}"#).as_deref(), Some("User already registered"));
    assert_eq!(auth_error_message("not json"), None);
}

#[test]
fn auth_failure_lifts_gotrue_message() {
    let err = auth_failure(BackendError::Status { status: 400, body: r#"{"msg":"nope"}"#.to_owned() });
    assert_eq!(err, AuthError::Rejected("nope".to_owned()));
    let err = auth_failure(BackendError::Http("offline".to_owned()));
    assert_eq!(err, AuthError::Backend(BackendError::Http("offline".to_owned())));
}

// =============================================================
// Native behavior
// =============================================================

#[test]
fn native_requests_are_unavailable() {
    let c = client();
    assert_eq!(block_on(c.select_all()), Err(BackendError::Unavailable));
    assert_eq!(
        block_on(c.sign_in_with_password("a@b.com", "x")),
        Err(AuthError::Backend(BackendError::Unavailable))
    );
}

#[test]
fn failed_sign_in_emits_no_change() {
    let c = client();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let _sub = c.on_auth_state_change(Arc::new(move |_: &AuthChange| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let _ = block_on(c.sign_in_with_password("a@b.com", "x"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn sign_out_without_session_still_emits_signed_out() {
    let c = client();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = c.on_auth_state_change(Arc::new(move |change: &AuthChange| {
        sink.lock().unwrap().push(change.event);
    }));
    assert_eq!(block_on(c.sign_out()), Ok(()));
    assert_eq!(*seen.lock().unwrap(), vec![AuthChangeEvent::SignedOut]);
    assert_eq!(block_on(c.get_session()), Ok(None));
}
