use crate::constants::*;
use crate::dom::ListenerHandle;
use flow_core::waitlist::{is_valid_email, SubmitResponse, FAILURE_MESSAGE, INVALID_EMAIL_MESSAGE};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Keeps the waitlist form's submit listener alive.
pub struct WaitlistForm {
    _submit: ListenerHandle,
}

pub fn wire(document: &web::Document) -> Option<WaitlistForm> {
    let form = document.get_element_by_id(WAITLIST_FORM_ID)?;
    let doc = document.clone();
    let submit = ListenerHandle::new(&form, "submit", move |ev: web::Event| {
        ev.prevent_default();
        let Some(input) = doc
            .get_element_by_id(WAITLIST_EMAIL_ID)
            .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        else {
            return;
        };
        let email = input.value().trim().to_owned();
        if !is_valid_email(&email) {
            show_message(&doc, &SubmitResponse::failed(INVALID_EMAIL_MESSAGE));
            return;
        }
        let doc = doc.clone();
        spawn_local(async move {
            let resp = match post_email(&email).await {
                Ok(r) => r,
                Err(e) => {
                    log::error!("[waitlist] request failed: {:?}", e);
                    SubmitResponse::failed(FAILURE_MESSAGE)
                }
            };
            if resp.success {
                input.set_value("");
            }
            show_message(&doc, &resp);
        });
    })
    .map_err(|e| log::error!("[waitlist] listener error: {:?}", e))
    .ok()?;
    log::info!("[waitlist] form wired");
    Some(WaitlistForm { _submit: submit })
}

fn show_message(document: &web::Document, resp: &SubmitResponse) {
    if let Some(el) = document.get_element_by_id(WAITLIST_MESSAGE_ID) {
        el.set_text_content(Some(&resp.message));
        _ = el.set_attribute("data-success", if resp.success { "true" } else { "false" });
    }
}

async fn post_email(email: &str) -> Result<SubmitResponse, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let body = js_sys::Object::new();
    js_sys::Reflect::set(&body, &"email".into(), &email.into())?;
    let body = js_sys::JSON::stringify(&body)?;

    let headers = web::Headers::new()?;
    headers.set("Content-Type", "application/json")?;
    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_mode(web::RequestMode::SameOrigin);
    init.set_headers(&headers);
    init.set_body(&body);
    let request = web::Request::new_with_str_and_init(WAITLIST_ENDPOINT, &init)?;

    let resp: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    let json = JsFuture::from(resp.json()?).await?;
    let success = js_sys::Reflect::get(&json, &"success".into())?
        .as_bool()
        .unwrap_or(false);
    let message = js_sys::Reflect::get(&json, &"message".into())?
        .as_string()
        .unwrap_or_else(|| FAILURE_MESSAGE.to_owned());
    Ok(SubmitResponse { success, message })
}
