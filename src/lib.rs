pub mod config;
pub mod reveal;
pub mod sim;

pub use config::{ConfigError, FieldConfig, PageConfig, RevealConfig};
pub use reveal::RevealMask;
pub use sim::{BoundsSource, Particle, ParticleField, RandomSource, Rect, Size, Vec2};

// Browser driver: only compiled when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;
    use web_sys::console;

    mod dom;
    mod render;
    mod reveal;

    /// Canvas the bubbles live on. Its `data-*` attributes carry the config.
    pub const CANVAS_ID: &str = "particle-canvas";
    /// Canvas the portrait is revealed on, inside the portrait container.
    pub const REVEAL_CANVAS_ID: &str = "reveal-canvas";

    fn log(msg: &str) {
        console::log_1(&msg.into());
    }

    fn warn(msg: &str) {
        console::warn_1(&msg.into());
    }

    fn request_frame(cb: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
        web_sys::window()
            .ok_or("no window")?
            .request_animation_frame(cb.as_ref().unchecked_ref())
    }

    fn canvas_by_id(canvas_id: &str) -> Result<web_sys::HtmlCanvasElement, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        Ok(canvas)
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;
        // each effect only runs when its canvas is on the page
        if document.get_element_by_id(CANVAS_ID).is_some() {
            start_on(CANVAS_ID)?;
        } else {
            log("bubbles: no canvas, not starting");
        }
        if document.get_element_by_id(REVEAL_CANVAS_ID).is_some() {
            start_reveal_on(REVEAL_CANVAS_ID)?;
        }
        Ok(())
    }

    /// Starts the bubble field on the canvas with the given id.
    #[wasm_bindgen]
    pub fn start_on(canvas_id: &str) -> Result<(), JsValue> {
        render::start(canvas_by_id(canvas_id)?)
    }

    /// Starts the portrait reveal on the canvas with the given id.
    #[wasm_bindgen]
    pub fn start_reveal_on(canvas_id: &str) -> Result<(), JsValue> {
        reveal::start(canvas_by_id(canvas_id)?)
    }
}
