//! Boxmark Viewer - place marker boxes on a 3D model
//!
//! Runs natively through the `boxmark` binary, or in the browser as a WASM
//! module rendering into `#boxmark-canvas`.

pub mod app;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// WASM entry point
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build()
    );

    // No filesystem in the browser - defaults only
    app::run(boxmark_core::EditorConfig::default());
}
