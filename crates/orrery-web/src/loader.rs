//! Browser asset loading: one `fetch` or image decode per manifest entry,
//! joined by an `AssetBarrier`.

use std::cell::RefCell;
use std::rc::Rc;

use orrery_engine::{AssetBarrier, AssetError, AssetKind, AssetManifest, LoadReport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlImageElement, Response};

/// A loaded asset before it is handed to the device.
#[derive(Debug)]
pub enum WebAsset {
    Text(String),
    Json(serde_json::Value),
    Image(HtmlImageElement),
}

/// Start loading every entry. `on_complete` runs once, after the last entry
/// resolves, with everything that loaded. For an empty manifest it runs
/// before this function returns, so callers must not hold the runner borrowed.
pub fn load_all(manifest: &AssetManifest, on_complete: impl FnOnce(LoadReport<WebAsset>) + 'static) {
    let barrier = Rc::new(RefCell::new(AssetBarrier::new(
        manifest.assets.clone(),
        on_complete,
    )));
    for (index, entry) in manifest.assets.iter().enumerate() {
        let url = manifest.url(entry);
        let kind = entry.kind;
        let barrier = Rc::clone(&barrier);
        spawn_local(async move {
            let result = load(&url, kind).await;
            barrier.borrow_mut().resolve(index, result);
        });
    }
}

async fn load(url: &str, kind: AssetKind) -> Result<WebAsset, AssetError> {
    match kind {
        AssetKind::Text => fetch_text(url).await.map(WebAsset::Text),
        AssetKind::Json => {
            let text = fetch_text(url).await?;
            serde_json::from_str(&text)
                .map(WebAsset::Json)
                .map_err(|e| AssetError::Decode {
                    path: url.to_string(),
                    reason: e.to_string(),
                })
        }
        AssetKind::Image => load_image(url).await.map(WebAsset::Image),
    }
}

fn fetch_error(url: &str, e: JsValue) -> AssetError {
    AssetError::Fetch {
        path: url.to_string(),
        reason: format!("{:?}", e),
    }
}

async fn fetch_text(url: &str) -> Result<String, AssetError> {
    let window = web_sys::window().ok_or_else(|| AssetError::Fetch {
        path: url.to_string(),
        reason: "no global window".into(),
    })?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .and_then(|value| value.dyn_into())
        .map_err(|e| fetch_error(url, e))?;
    if !response.ok() {
        return Err(AssetError::Status {
            path: url.to_string(),
            status: response.status(),
        });
    }
    let text = response.text().map_err(|e| fetch_error(url, e))?;
    JsFuture::from(text)
        .await
        .map_err(|e| fetch_error(url, e))?
        .as_string()
        .ok_or_else(|| AssetError::Decode {
            path: url.to_string(),
            reason: "response body is not text".into(),
        })
}

async fn load_image(url: &str) -> Result<HtmlImageElement, AssetError> {
    let image = HtmlImageElement::new().map_err(|e| fetch_error(url, e))?;
    image.set_src(url);
    JsFuture::from(image.decode())
        .await
        .map_err(|e| AssetError::Decode {
            path: url.to_string(),
            reason: format!("{:?}", e),
        })?;
    Ok(image)
}
