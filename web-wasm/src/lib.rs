//! Plate Detect Web App (Leptos + WASM)

mod app;
mod components;
mod logger;
mod pages;
mod storage;
mod transport;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });
    leptos::mount::mount_to_body(app::App);
}
