use wasm_bindgen::prelude::*;

// ============================================================================
// PETAL FIELD - Falling petal ambience drawn on a 2d canvas
// ============================================================================

pub mod config;
pub mod constants;
pub mod error;
pub mod render;
pub mod sim;
pub mod surface;
pub mod web;

pub use config::{PetalConfig, Preset, Span};
pub use error::{PetalError, Result};
pub use render::{Canvas, PetalPath, RadialGradient};
pub use sim::{Boundary, Petal, PetalField, StepStats};
pub use surface::{SurfaceScale, Viewport};
pub use web::{init_petals, PetalAnimation};

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    console_log::init_with_level(log::Level::Info).ok();
    log::debug!("[petals] WASM loaded v{}", env!("CARGO_PKG_VERSION"));
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
