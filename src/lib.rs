#![recursion_limit = "1024"]

#[macro_use]
extern crate serde_derive;

mod app;
mod download;
mod error;
mod payload;

pub use app::App;
pub use download::{download_file, trigger_download, DownloadRequest, DEFAULT_MIME_TYPE};
pub use error::DownloadError;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// This is the entry point for the web app
#[wasm_bindgen]
pub fn run_app() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());
    yew::start_app::<app::App>();
    Ok(())
}
