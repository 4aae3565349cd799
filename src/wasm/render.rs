use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast};
use web_sys::{window, HtmlCanvasElement};

use crate::error::{Error, Result};
use crate::frame::{FrameDriver, Render, Size, Surface};

/// Canvas backing buffer (`width`/`height`) against its CSS layout size
/// (`clientWidth`/`clientHeight`).
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl Surface for CanvasSurface {
    fn buffer_size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }

    fn display_size(&self) -> Size {
        Size::new(
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    fn set_buffer_size(&mut self, size: Size) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }
}

/// Keeps the animation going until [`AnimationHandle::stop`] is called.
#[wasm_bindgen]
#[derive(Clone)]
pub struct AnimationHandle {
    running: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl AnimationHandle {
    /// The next frame callback sees this and does not re-register.
    pub fn stop(&self) {
        if self.running.replace(false) {
            log::info!("stopping animation loop");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.running.get()
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drives `driver` from `requestAnimationFrame`, one frame per display refresh.
pub fn start_loop<S, R>(mut driver: FrameDriver<S, R>) -> Result<AnimationHandle>
where
    S: Surface + 'static,
    R: Render + 'static,
{
    let running = Rc::new(Cell::new(true));
    let handle = AnimationHandle {
        running: running.clone(),
    };

    // `f` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. The `Option` lets us create the
    // `Closure` first and reach it from inside afterwards.
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if !running.get() {
            // Dropping our own handle lets the closure be freed once it returns.
            let _ = f.borrow_mut().take();
            return;
        }

        if let Err(err) = driver.frame(timestamp) {
            log::error!("frame {} failed, halting: {err}", driver.frames());
            running.set(false);
            let _ = f.borrow_mut().take();
            return;
        }

        if let Err(err) = request_frame(&f) {
            log::error!("could not schedule next frame: {err}");
            running.set(false);
            let _ = f.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(&g)?;
    log::info!("animation loop started");
    Ok(handle)
}

fn request_frame(f: &FrameCallback) -> Result<()> {
    let window = window().ok_or(Error::NoWindow)?;
    let callback = f.borrow();
    let closure = callback
        .as_ref()
        .ok_or_else(|| Error::Js("frame callback already released".into()))?;
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    Ok(())
}
