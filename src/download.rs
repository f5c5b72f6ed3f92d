use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

use crate::error::DownloadError;
use crate::payload;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    content: Vec<u8>,
    file_name: String,
    mime_type: String,
}

impl DownloadRequest {
    pub fn new(
        content: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
    ) -> Result<DownloadRequest, DownloadError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(DownloadError::MissingFileName);
        }
        Ok(DownloadRequest {
            content: content.into(),
            file_name,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
        })
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> DownloadRequest {
        let mime_type = mime_type.into();
        if !mime_type.trim().is_empty() {
            self.mime_type = mime_type;
        }
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    pub fn trigger(self) -> Result<(), DownloadError> {
        log::debug!(
            "triggering download of {} ({} bytes, {})",
            self.file_name,
            self.content.len(),
            self.mime_type
        );

        let document = web_sys::window()
            .ok_or(DownloadError::UnsupportedEnvironment("window"))?
            .document()
            .ok_or(DownloadError::UnsupportedEnvironment("document"))?;

        let blob = build_blob(&self.content, &self.mime_type)?;
        // the URL is revoked when `url` drops, error paths included
        let url = ObjectUrl::mint(&blob)?;
        click_transient_anchor(&document, url.as_str(), &self.file_name)
    }
}

pub fn trigger_download(
    content: impl Into<Vec<u8>>,
    file_name: &str,
    mime_type: Option<&str>,
) -> Result<(), DownloadError> {
    let mut request = DownloadRequest::new(content, file_name)?;
    if let Some(mime_type) = mime_type {
        request = request.with_mime_type(mime_type);
    }
    request.trigger()
}

pub fn download_file(file_name: &str, content: &str) -> Result<(), DownloadError> {
    trigger_download(content, file_name, None)
}

#[wasm_bindgen(js_name = downloadFile)]
pub fn download_file_js(
    content: JsValue,
    file_name: String,
    mime_type: Option<String>,
) -> Result<(), JsValue> {
    let content = payload::bytes_from_js(&content)?;
    trigger_download(content, &file_name, mime_type.as_deref()).map_err(JsValue::from)
}

fn build_blob(content: &[u8], mime_type: &str) -> Result<Blob, DownloadError> {
    let parts = Array::of1(&Uint8Array::from(content));
    let mut options = BlobPropertyBag::new();
    options.type_(mime_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| DownloadError::UnsupportedEnvironment("Blob support"))
}

struct ObjectUrl(String);

impl ObjectUrl {
    fn mint(blob: &Blob) -> Result<ObjectUrl, DownloadError> {
        Url::create_object_url_with_blob(blob)
            .map(ObjectUrl)
            .map_err(|_| DownloadError::UnsupportedEnvironment("object URLs"))
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.0);
    }
}

fn click_transient_anchor(
    document: &Document,
    url: &str,
    file_name: &str,
) -> Result<(), DownloadError> {
    let body = document
        .body()
        .ok_or(DownloadError::UnsupportedEnvironment("document body"))?;
    let anchor = document
        .create_element("a")
        .map_err(|_| DownloadError::UnsupportedEnvironment("anchor elements"))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| DownloadError::UnsupportedEnvironment("anchor elements"))?;

    anchor.set_href(url);
    anchor.set_download(file_name);
    // the anchor only exists to route the click, keep it out of the layout
    let _ = anchor.style().set_property("display", "none");

    body.append_child(&anchor)
        .map_err(|_| DownloadError::UnsupportedEnvironment("document body"))?;
    anchor.click();
    let _ = body.remove_child(&anchor);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn rejects_empty_file_name() {
        assert_eq!(
            DownloadError::MissingFileName,
            DownloadRequest::new("hello", "").unwrap_err()
        );
        assert_eq!(
            DownloadError::MissingFileName,
            DownloadRequest::new("hello", "   ").unwrap_err()
        );
    }

    #[wasm_bindgen_test]
    fn defaults_to_binary_mime_type() {
        let request = DownloadRequest::new("hello", "hello.txt").unwrap();
        assert_eq!(DEFAULT_MIME_TYPE, request.mime_type());

        let request = request.with_mime_type("");
        assert_eq!(DEFAULT_MIME_TYPE, request.mime_type());

        let request = request.with_mime_type("text/plain");
        assert_eq!("text/plain", request.mime_type());
        assert_eq!("hello.txt", request.file_name());
        assert_eq!(5, request.content_len());
    }

    #[wasm_bindgen_test]
    fn builds_typed_blob() {
        let blob = build_blob(b"hello", "text/plain").unwrap();
        assert_eq!(5.0, blob.size());
        assert_eq!("text/plain", blob.type_());
    }

    #[wasm_bindgen_test]
    fn mints_object_urls() {
        let blob = build_blob(b"hello", "text/plain").unwrap();
        let url = ObjectUrl::mint(&blob).unwrap();
        assert!(url.as_str().starts_with("blob:"));
    }

    #[wasm_bindgen_test]
    fn leaves_the_document_unchanged() {
        let document = web_sys::window().unwrap().document().unwrap();
        let body = document.body().unwrap();

        let before = body.child_element_count();
        trigger_download("hello", "hello.txt", Some("text/plain")).unwrap();
        assert_eq!(before, body.child_element_count());
    }

    #[wasm_bindgen_test]
    fn sequential_downloads_are_independent() {
        trigger_download("first", "first.txt", Some("text/plain")).unwrap();
        trigger_download(vec![0u8, 1, 2], "second.bin", None).unwrap();
        download_file("third.txt", "third").unwrap();
    }
}
