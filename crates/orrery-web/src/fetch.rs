use std::future::Future;

use orrery_engine::{AssetError, AssetSource};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Asset source backed by `window.fetch`, relative to a base URL.
pub struct FetchSource {
    base_url: String,
}

impl FetchSource {
    /// `base_url` may be empty (page-relative) or end with or without a slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", base, path.trim_start_matches('/'))
        }
    }
}

impl Default for FetchSource {
    fn default() -> Self {
        Self::new("")
    }
}

fn js_err(url: &str, e: JsValue) -> AssetError {
    AssetError::Fetch {
        url: url.to_string(),
        message: format!("{:?}", e),
    }
}

async fn fetch_text(url: String) -> Result<String, AssetError> {
    let win = web_sys::window().ok_or_else(|| AssetError::Fetch {
        url: url.clone(),
        message: "no window".to_string(),
    })?;
    let resp_val = JsFuture::from(win.fetch_with_str(&url))
        .await
        .map_err(|e| js_err(&url, e))?;
    let resp: web_sys::Response = resp_val.dyn_into().map_err(|e| js_err(&url, e))?;

    if resp.status() == 404 {
        return Err(AssetError::NotFound(url));
    }
    if !resp.ok() {
        return Err(AssetError::Http {
            url,
            status: resp.status(),
        });
    }

    let text_promise = resp.text().map_err(|e| js_err(&url, e))?;
    let text_val = JsFuture::from(text_promise)
        .await
        .map_err(|e| js_err(&url, e))?;
    text_val.as_string().ok_or_else(|| AssetError::Fetch {
        url,
        message: "response.text() was not a string".to_string(),
    })
}

impl AssetSource for FetchSource {
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, AssetError>> {
        fetch_text(self.url_for(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_with_one_slash() {
        assert_eq!(FetchSource::new("").url_for("earth/earth.obj"), "earth/earth.obj");
        assert_eq!(
            FetchSource::new("/assets/").url_for("earth/earth.obj"),
            "/assets/earth/earth.obj"
        );
        assert_eq!(
            FetchSource::new("https://cdn.example.org/orrery").url_for("/moon.jpeg"),
            "https://cdn.example.org/orrery/moon.jpeg"
        );
    }
}
