#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gradient_bg::wasm::{config_from_search, start_loop, start_on, CanvasSurface, GlRenderer};
use gradient_bg::{Config, Error, FrameDriver, Render, Result, Scene, Size, Surface, Uniforms};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

wasm_bindgen_test_configure!(run_in_browser);

fn styled_canvas(css_width: u32, css_height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    let style = canvas.style();
    style.set_property("display", "block").unwrap();
    style.set_property("width", &format!("{css_width}px")).unwrap();
    style.set_property("height", &format!("{css_height}px")).unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[derive(Default)]
struct Recorder(Vec<Uniforms>);

impl Render for Recorder {
    fn render(&mut self, _scene: &Scene, uniforms: &Uniforms) -> Result<()> {
        self.0.push(*uniforms);
        Ok(())
    }
}

#[wasm_bindgen_test]
fn canvas_buffer_follows_layout_size() {
    let canvas = styled_canvas(600, 800);
    canvas.set_width(300);
    canvas.set_height(400);

    let mut driver = FrameDriver::new(
        CanvasSurface::new(canvas.clone()),
        Recorder::default(),
        Scene::gradient(),
    );
    let report = driver.frame(16.0).unwrap();

    assert!(report.resized);
    assert_eq!((canvas.width(), canvas.height()), (600, 800));
    assert_eq!(driver.uniforms().resolution, [600.0, 800.0, 1.0]);
    assert_eq!(canvas.style().get_property_value("width").unwrap(), "600px");
    canvas.remove();
}

#[wasm_bindgen_test]
fn gradient_program_draws_when_webgl2_is_available() {
    let canvas = styled_canvas(32, 32);
    let gl = match canvas.get_context("webgl2").unwrap() {
        Some(ctx) => ctx.dyn_into::<WebGl2RenderingContext>().unwrap(),
        // Headless runners without GPU support have nothing to test here.
        None => return,
    };

    let scene = Scene::gradient();
    let renderer = GlRenderer::new(gl.clone(), &scene, false).unwrap();
    let mut driver = FrameDriver::new(CanvasSurface::new(canvas.clone()), renderer, scene);
    driver.frame(0.0).unwrap();

    assert_eq!(driver.surface().buffer_size(), Size::new(32, 32));
    assert_eq!(gl.get_error(), WebGl2RenderingContext::NO_ERROR);
    canvas.remove();
}

#[wasm_bindgen_test]
fn stopped_loop_reports_not_running() {
    let canvas = styled_canvas(16, 16);
    let handle = match start_on(canvas.clone(), &Config::default()) {
        Ok(handle) => handle,
        Err(Error::ContextUnavailable) => return,
        Err(err) => panic!("start failed: {err}"),
    };
    assert!(handle.running());
    handle.stop();
    assert!(!handle.running());
    canvas.remove();
}

/// Fixed-size surface so loop tests need no layout.
struct Offscreen(Size);

impl Surface for Offscreen {
    fn buffer_size(&self) -> Size {
        self.0
    }

    fn display_size(&self) -> Size {
        Size::new(64, 48)
    }

    fn set_buffer_size(&mut self, size: Size) {
        self.0 = size;
    }
}

struct SharedRecorder(Rc<RefCell<Vec<Uniforms>>>);

impl Render for SharedRecorder {
    fn render(&mut self, _scene: &Scene, uniforms: &Uniforms) -> Result<()> {
        self.0.borrow_mut().push(*uniforms);
        Ok(())
    }
}

struct FailingRenderer(Rc<Cell<usize>>);

impl Render for FailingRenderer {
    fn render(&mut self, _scene: &Scene, _uniforms: &Uniforms) -> Result<()> {
        self.0.set(self.0.get() + 1);
        Err(Error::Js("context lost".into()))
    }
}

async fn next_frames(count: usize) {
    for _ in 0..count {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            web_sys::window()
                .unwrap()
                .request_animation_frame(&resolve)
                .unwrap();
        });
        JsFuture::from(promise).await.unwrap();
    }
}

#[wasm_bindgen_test]
async fn loop_keeps_drawing_every_frame() {
    let drawn = Rc::new(RefCell::new(Vec::new()));
    let driver = FrameDriver::new(
        Offscreen(Size::new(1, 1)),
        SharedRecorder(drawn.clone()),
        Scene::gradient(),
    );
    let handle = start_loop(driver).unwrap();

    next_frames(5).await;
    handle.stop();

    let drawn = drawn.borrow();
    assert!(drawn.len() >= 3, "only {} frames drawn", drawn.len());
    assert!(drawn.iter().all(|u| u.resolution == [64.0, 48.0, 1.0]));
    assert!(drawn.windows(2).all(|w| w[0].time <= w[1].time));
}

#[wasm_bindgen_test]
async fn failed_frame_halts_the_loop() {
    let attempts = Rc::new(Cell::new(0));
    let driver = FrameDriver::new(
        Offscreen(Size::new(64, 48)),
        FailingRenderer(attempts.clone()),
        Scene::gradient(),
    );
    let handle = start_loop(driver).unwrap();

    next_frames(4).await;

    assert!(!handle.running());
    assert_eq!(attempts.get(), 1);
}

#[wasm_bindgen_test]
async fn stopped_loop_draws_no_more_frames() {
    let drawn = Rc::new(RefCell::new(Vec::new()));
    let driver = FrameDriver::new(
        Offscreen(Size::new(64, 48)),
        SharedRecorder(drawn.clone()),
        Scene::gradient(),
    );
    let handle = start_loop(driver).unwrap();

    next_frames(2).await;
    handle.stop();
    let before = drawn.borrow().len();
    next_frames(3).await;

    assert_eq!(drawn.borrow().len(), before);
}

#[wasm_bindgen_test]
fn query_values_are_percent_decoded() {
    let config = config_from_search("?canvas=my%2Dbg&log=DEBUG&clear=0").unwrap();
    assert_eq!(config.canvas_id, "my-bg");
    assert_eq!(config.log_level, log::Level::Debug);
    assert!(!config.auto_clear_color);

    let defaults = config_from_search("").unwrap();
    assert_eq!(defaults, Config::default());
}
