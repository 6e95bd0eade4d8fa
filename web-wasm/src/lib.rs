//! Invoice Analyzer Web App (Leptos + WASM)
//!
//! PDFを選んで `/api/analyze` に送り、抽出結果かエラーを表示する1ページのフォーム

mod app;
mod components;
pub mod api;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}
