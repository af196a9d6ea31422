//! WebAssembly bindings for the blog editor core.
//!
//! The page owns one `BlogEditor` per open draft and renders from
//! `stateJson()` after every call.

mod api;

pub use api::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
