//! Thin fetch client for the hosted backend (PostgREST rows + object
//! storage). No retry policy: one failed attempt surfaces as one error.

use crate::core::{GreetingRecord, NewGreeting};
use crate::dom;
use anyhow::{anyhow, Context};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const TABLE: &str = "valentine_experiences";
const BUCKET: &str = "valentine-images";

pub struct Gateway {
    base: String,
    key: String,
}

impl Gateway {
    /// Configuration comes from `<meta>` tags in the served page; a missing
    /// tag is an init error, not a runtime surprise.
    pub fn from_meta(document: &web::Document) -> anyhow::Result<Self> {
        let base = dom::meta_content(document, "storage-base")
            .ok_or_else(|| anyhow!("missing meta storage-base"))?;
        let key = dom::meta_content(document, "storage-key")
            .ok_or_else(|| anyhow!("missing meta storage-key"))?;
        Ok(Self {
            base: base.trim_end_matches('/').to_owned(),
            key,
        })
    }

    /// Insert the greeting row; returns the stored record.
    pub async fn create_record(&self, greeting: &NewGreeting) -> anyhow::Result<GreetingRecord> {
        let url = format!("{}/rest/v1/{}", self.base, TABLE);
        let body = serde_json::to_string(greeting).context("serialize greeting")?;
        let headers = self.headers()?;
        set_header(&headers, "Content-Type", "application/json")?;
        set_header(&headers, "Prefer", "return=representation")?;
        let text = self
            .fetch("POST", &url, &headers, Some(&JsValue::from_str(&body)))
            .await?;
        let mut rows: Vec<GreetingRecord> =
            serde_json::from_str(&text).context("parse created record")?;
        rows.pop().ok_or_else(|| anyhow!("insert returned no rows"))
    }

    /// Upload raw bytes under `{path}` in the public bucket; returns the
    /// public URL.
    pub async fn upload_object(
        &self,
        bytes: &[u8],
        path: &str,
        content_type: &str,
    ) -> anyhow::Result<String> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base, BUCKET, path);
        let headers = self.headers()?;
        set_header(&headers, "Content-Type", content_type)?;
        let body: JsValue = js_sys::Uint8Array::from(bytes).into();
        self.fetch("POST", &url, &headers, Some(&body)).await?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base, BUCKET, path
        ))
    }

    /// Lookup by share code. A miss is `None`, not an error.
    pub async fn get_record_by_key(&self, code: &str) -> anyhow::Result<Option<GreetingRecord>> {
        let url = format!(
            "{}/rest/v1/{}?unique_code=eq.{}&select=*",
            self.base, TABLE, code
        );
        let headers = self.headers()?;
        let text = self.fetch("GET", &url, &headers, None).await?;
        let mut rows: Vec<GreetingRecord> = serde_json::from_str(&text).context("parse record")?;
        Ok(rows.pop())
    }

    /// View-count bump. Callers treat this as fire-and-forget and only log
    /// a failure; the recipient experience must not break over analytics.
    pub async fn increment_view_count(&self, code: &str, current: u32) -> anyhow::Result<()> {
        let url = format!("{}/rest/v1/{}?unique_code=eq.{}", self.base, TABLE, code);
        let body = format!("{{\"view_count\":{}}}", current + 1);
        let headers = self.headers()?;
        set_header(&headers, "Content-Type", "application/json")?;
        self.fetch("PATCH", &url, &headers, Some(&JsValue::from_str(&body)))
            .await?;
        Ok(())
    }

    fn headers(&self) -> anyhow::Result<web::Headers> {
        let headers = web::Headers::new().map_err(|e| js_err("headers", e))?;
        set_header(&headers, "apikey", &self.key)?;
        set_header(&headers, "Authorization", &format!("Bearer {}", self.key))?;
        Ok(headers)
    }

    async fn fetch(
        &self,
        method: &str,
        url: &str,
        headers: &web::Headers,
        body: Option<&JsValue>,
    ) -> anyhow::Result<String> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let init = web::RequestInit::new();
        init.set_method(method);
        init.set_headers(headers);
        if let Some(body) = body {
            init.set_body(body);
        }
        let resp_value = JsFuture::from(window.fetch_with_str_and_init(url, &init))
            .await
            .map_err(|e| js_err("fetch", e))?;
        let resp: web::Response = resp_value
            .dyn_into()
            .map_err(|e| js_err("response", e))?;
        let text_promise = resp.text().map_err(|e| js_err("text", e))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| js_err("text", e))?
            .as_string()
            .unwrap_or_default();
        if !resp.ok() {
            return Err(anyhow!("{method} {url}: status {} {text}", resp.status()));
        }
        Ok(text)
    }
}

fn set_header(headers: &web::Headers, name: &str, value: &str) -> anyhow::Result<()> {
    headers.set(name, value).map_err(|e| js_err("header", e))
}

fn js_err(context: &str, e: JsValue) -> anyhow::Error {
    anyhow!("{context}: {e:?}")
}
