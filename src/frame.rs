//! The per-frame cycle: resize, update uniforms, draw.

use crate::error::Result;
use crate::scene::Scene;
use crate::uniforms::{millis_to_seconds, Uniforms};

/// Pixel dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Something with a backing pixel buffer and a laid-out display size.
pub trait Surface {
    /// Size of the backing pixel buffer.
    fn buffer_size(&self) -> Size;
    /// Size the element is currently laid out at.
    fn display_size(&self) -> Size;
    /// Resizes only the backing buffer; the element's style is left alone.
    fn set_buffer_size(&mut self, size: Size);
}

/// Draws the scene with the current uniform values.
pub trait Render {
    fn render(&mut self, scene: &Scene, uniforms: &Uniforms) -> Result<()>;
}

/// Matches the backing buffer to the display size. Returns true if it had to.
pub fn resize_to_display_size<S: Surface + ?Sized>(surface: &mut S) -> bool {
    let display = surface.display_size();
    let needs_resize = surface.buffer_size() != display;
    if needs_resize {
        surface.set_buffer_size(display);
    }
    needs_resize
}

/// What happened during one call to [`FrameDriver::frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub resized: bool,
    pub size: Size,
    pub time: f32,
    pub frame: u64,
}

pub struct FrameDriver<S, R> {
    surface: S,
    renderer: R,
    scene: Scene,
    uniforms: Uniforms,
    frames: u64,
}

impl<S: Surface, R: Render> FrameDriver<S, R> {
    pub fn new(surface: S, renderer: R, scene: Scene) -> Self {
        Self {
            surface,
            renderer,
            scene,
            uniforms: Uniforms::default(),
            frames: 0,
        }
    }

    /// Runs one frame for an animation timestamp in milliseconds.
    pub fn frame(&mut self, timestamp_ms: f64) -> Result<FrameReport> {
        let seconds = millis_to_seconds(timestamp_ms);

        let resized = resize_to_display_size(&mut self.surface);
        let size = self.surface.buffer_size();
        if resized {
            log::debug!("resized backing buffer to {}x{}", size.width, size.height);
        }

        self.uniforms.set_resolution(size);
        self.uniforms.set_time(seconds);

        self.renderer.render(&self.scene, &self.uniforms)?;

        let frame = self.frames;
        self.frames += 1;
        Ok(FrameReport {
            resized,
            size,
            time: seconds,
            frame,
        })
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct FakeSurface {
        buffer: Size,
        display: Size,
        resizes: usize,
    }

    impl Surface for FakeSurface {
        fn buffer_size(&self) -> Size {
            self.buffer
        }

        fn display_size(&self) -> Size {
            self.display
        }

        fn set_buffer_size(&mut self, size: Size) {
            self.buffer = size;
            self.resizes += 1;
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Uniforms>,
        fail: bool,
    }

    impl Render for Recorder {
        fn render(&mut self, _scene: &Scene, uniforms: &Uniforms) -> Result<()> {
            if self.fail {
                return Err(Error::Js("context lost".into()));
            }
            self.seen.push(*uniforms);
            Ok(())
        }
    }

    fn surface(buffer: (u32, u32), display: (u32, u32)) -> FakeSurface {
        FakeSurface {
            buffer: Size::new(buffer.0, buffer.1),
            display: Size::new(display.0, display.1),
            resizes: 0,
        }
    }

    #[test]
    fn resize_only_when_sizes_differ() {
        let mut s = surface((300, 150), (300, 150));
        assert!(!resize_to_display_size(&mut s));
        assert_eq!(s.resizes, 0);

        s.display = Size::new(640, 480);
        assert!(resize_to_display_size(&mut s));
        assert_eq!(s.buffer, Size::new(640, 480));
        assert!(!resize_to_display_size(&mut s));
        assert_eq!(s.resizes, 1);
    }

    #[test]
    fn uniforms_are_written_before_draw() {
        let mut driver = FrameDriver::new(
            surface((300, 150), (800, 600)),
            Recorder::default(),
            Scene::gradient(),
        );
        let report = driver.frame(2500.0).unwrap();
        assert!(report.resized);
        assert_eq!(report.size, Size::new(800, 600));
        assert_eq!(report.frame, 0);

        let drawn = driver.renderer().seen[0];
        assert_eq!(drawn.resolution, [800.0, 600.0, 1.0]);
        assert_eq!(drawn.time, 2.5);
        assert_eq!(driver.uniforms(), &drawn);
    }

    #[test]
    fn render_failure_propagates() {
        let mut driver = FrameDriver::new(
            surface((10, 10), (10, 10)),
            Recorder {
                fail: true,
                ..Recorder::default()
            },
            Scene::gradient(),
        );
        assert!(matches!(driver.frame(0.0), Err(Error::Js(_))));
        assert_eq!(driver.frames(), 0);
    }
}
