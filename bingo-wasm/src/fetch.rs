use bingo_core::{BackgroundImage, ImageSource, RenderError, item_image_url};
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, Request, RequestInit, RequestMode, Response};

/// Item images fetched from the wiki CDN.
pub struct FetchSource;

impl ImageSource for FetchSource {
    async fn fetch(&self, item: &str) -> bingo_core::Result<Vec<u8>> {
        fetch_bytes(&item_image_url(item))
            .await
            .map_err(|e| RenderError::Fetch(format!("{item}: {e:?}")))
    }
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(url, &opts)?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer()?).await?;
    Ok(Uint8Array::new(&buf).to_vec())
}

/// Read an uploaded background. Unreadable files are logged and skipped.
pub async fn read_background(file: Option<File>) -> Option<BackgroundImage> {
    let file = file?;
    match JsFuture::from(file.array_buffer()).await {
        Ok(buf) => Some(BackgroundImage::new(file.name(), Uint8Array::new(&buf).to_vec())),
        Err(e) => {
            log::warn!("background file '{}' unreadable: {e:?}", file.name());
            None
        }
    }
}
