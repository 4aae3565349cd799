//! Full-screen animated gradient background for a browser canvas.
//!
//! The frame cycle, scene and shader are plain Rust and run anywhere; the
//! WebGL2 and `requestAnimationFrame` bindings only exist on wasm32.

pub mod config;
pub mod error;
pub mod frame;
pub mod scene;
pub mod shader;
pub mod uniforms;

pub use config::Config;
pub use error::{Error, Result};
pub use frame::{resize_to_display_size, FrameDriver, FrameReport, Render, Size, Surface};
pub use scene::{OrthographicCamera, Quad, Scene, ShaderMaterial};
pub use uniforms::Uniforms;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

    use crate::config::Config;
    use crate::error::{Error, Result};
    use crate::frame::FrameDriver;
    use crate::scene::Scene;

    mod program;
    mod render;

    pub use program::GlRenderer;
    pub use render::{start_loop, AnimationHandle, CanvasSurface};

    /// Installs the panic hook and console logger when the module loads.
    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();
        let level = page_config().map(|c| c.log_level).unwrap_or(log::Level::Info);
        if console_log::init_with_level(level).is_err() {
            log::debug!("console logger already installed");
        }
    }

    /// Starts the gradient on the canvas `canvas_id`, or the one named by the
    /// page query string (default `c`).
    #[wasm_bindgen(js_name = startGradient)]
    pub fn start_gradient(canvas_id: Option<String>) -> Result<AnimationHandle, JsValue> {
        let mut config = page_config()?;
        if let Some(id) = canvas_id {
            config.canvas_id = id;
        }
        Ok(start(&config)?)
    }

    pub fn start(config: &Config) -> Result<AnimationHandle> {
        let canvas = find_canvas(&config.canvas_id)?;
        start_on(canvas, config)
    }

    pub fn start_on(canvas: HtmlCanvasElement, config: &Config) -> Result<AnimationHandle> {
        let gl: WebGl2RenderingContext = canvas
            .get_context("webgl2")?
            .ok_or(Error::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| Error::ContextUnavailable)?;

        let scene = Scene::gradient();
        let renderer = GlRenderer::new(gl, &scene, config.auto_clear_color)?;
        let driver = FrameDriver::new(CanvasSurface::new(canvas), renderer, scene);
        log::info!("gradient background on #{}", config.canvas_id);
        start_loop(driver)
    }

    pub fn find_canvas(id: &str) -> Result<HtmlCanvasElement> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;
        document
            .get_element_by_id(id)
            .ok_or_else(|| Error::CanvasNotFound(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::NotACanvas(id.to_string()))
    }

    fn page_config() -> Result<Config> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let search = window.location().search()?;
        config_from_search(&search)
    }

    /// Reads a `?canvas=..&log=..&clear=..` query string. Values are
    /// percent-decoded by the browser.
    pub fn config_from_search(search: &str) -> Result<Config> {
        let params = web_sys::UrlSearchParams::new_with_str(search)?;
        Config::from_params(|key| params.get(key))
    }
}
