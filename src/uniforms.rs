use crate::frame::Size;

/// Values pushed into the gradient shader every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Uniforms {
    pub resolution: [f32; 3],
    pub time: f32,
}

impl Uniforms {
    pub fn set_resolution(&mut self, size: Size) {
        self.resolution = [size.width as f32, size.height as f32, 1.0];
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.time = seconds;
    }
}

/// Converts an animation-frame timestamp (milliseconds) to seconds.
pub fn millis_to_seconds(ms: f64) -> f32 {
    (ms / 1000.0) as f32
}
