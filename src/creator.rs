//! Creator form: validate names and photos, upload, insert the record, and
//! present the share link. One inline error at a time; the user retries by
//! resubmitting (no rollback of partially uploaded photos).

use crate::constants::SAVED_NAME_KEY;
use crate::core::{
    object_path, share_url, validate_image, validate_image_count, validate_name, NewGreeting,
    ShareCode,
};
use crate::gateway::Gateway;
use crate::{dom, overlay};
use anyhow::{anyhow, Context};
use rand::prelude::*;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub fn wire_creator(document: &web::Document, gateway: Rc<Gateway>) {
    // remembered partner name
    if let Some(saved) = dom::local_storage_get(SAVED_NAME_KEY) {
        if let Some(input) = input_element(document, "partner-name") {
            input.set_value(&saved);
        }
    }

    let doc = document.clone();
    dom::add_click_listener(document, "btn-create", move || {
        overlay::clear_error(&doc);
        let doc = doc.clone();
        let gateway = gateway.clone();
        spawn_local(async move {
            if let Err(e) = submit(&doc, &gateway).await {
                log::warn!("[creator] submit failed: {e:#}");
                overlay::show_error(&doc, &format!("{e:#}"));
            }
        });
    });

    let doc = document.clone();
    dom::add_click_listener(document, "btn-copy-link", move || {
        if let Some(el) = doc.get_element_by_id("share-link") {
            if let Some(link) = el.text_content() {
                dom::copy_to_clipboard(&link);
            }
        }
    });
}

async fn submit(document: &web::Document, gateway: &Gateway) -> anyhow::Result<()> {
    let partner = field_value(document, "partner-name")?;
    let partner = validate_name(&partner)?.to_owned();
    let creator = field_value(document, "creator-name")?;
    let creator = if creator.trim().is_empty() {
        String::new()
    } else {
        validate_name(&creator)?.to_owned()
    };

    let files = selected_files(document, "photo-input");
    validate_image_count(files.len())?;

    let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);
    let code = ShareCode::generate(&mut rng);

    let mut image_urls = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        let mime = file.type_();
        let ext = validate_image(index, file.size() as u64, &mime)?;
        let bytes = read_file(file)
            .await
            .with_context(|| format!("read photo {index}"))?;
        let path = object_path(code.as_str(), index, ext);
        let url = gateway
            .upload_object(&bytes, &path, &mime)
            .await
            .with_context(|| format!("upload photo {index}"))?;
        image_urls.push(url);
    }

    let record = gateway
        .create_record(&NewGreeting {
            unique_code: code.as_str().to_owned(),
            partner_name: partner.clone(),
            creator_name: creator,
            image_urls,
            view_count: 0,
        })
        .await
        .context("create record")?;
    log::info!("[creator] created record id={} code={}", record.id, code);

    dom::local_storage_set(SAVED_NAME_KEY, &partner);

    let origin = web::window()
        .map(|w| w.location().origin().unwrap_or_default())
        .unwrap_or_default();
    let link = share_url(&origin, &code);
    dom::set_text(document, "share-link", &link);
    dom::set_attr(document, "share-link", "href", &link);
    overlay::show_only(document, overlay::PANEL_SHARE);
    Ok(())
}

fn input_element(document: &web::Document, element_id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(element_id)?
        .dyn_into::<web::HtmlInputElement>()
        .ok()
}

fn field_value(document: &web::Document, element_id: &str) -> anyhow::Result<String> {
    input_element(document, element_id)
        .map(|i| i.value())
        .ok_or_else(|| anyhow!("missing #{element_id}"))
}

fn selected_files(document: &web::Document, element_id: &str) -> Vec<web::File> {
    let Some(input) = input_element(document, element_id) else {
        return Vec::new();
    };
    let Some(list) = input.files() else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

async fn read_file(file: &web::File) -> anyhow::Result<Vec<u8>> {
    let buf = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| anyhow!("array_buffer: {e:?}"))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
