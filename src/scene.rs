//! The fixed scene: one orthographic camera looking at one full-viewport quad.

use crate::shader;

/// Orthographic view volume. Looks down -z from the origin with an identity
/// view matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthographicCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthographicCamera {
    /// [-1,1] on every axis, exactly framing [`Quad::fullscreen`].
    pub fn fullscreen() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            near: -1.0,
            far: 1.0,
        }
    }

    /// Column-major projection matrix, ready for `uniformMatrix4fv`.
    #[rustfmt::skip]
    pub fn projection_matrix(&self) -> [f32; 16] {
        let w = self.right - self.left;
        let h = self.top - self.bottom;
        let d = self.far - self.near;
        let tx = -(self.right + self.left) / w;
        let ty = -(self.top + self.bottom) / h;
        let tz = -(self.far + self.near) / d;
        [
            2.0 / w, 0.0, 0.0, 0.0,
            0.0, 2.0 / h, 0.0, 0.0,
            0.0, 0.0, -2.0 / d, 0.0,
            tx, ty, tz, 1.0,
        ]
    }
}

/// Planar rectangle centred on the origin at z = 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub width: f32,
    pub height: f32,
}

impl Quad {
    pub fn fullscreen() -> Self {
        Self {
            width: 2.0,
            height: 2.0,
        }
    }

    /// Vertex positions as a 4-vertex triangle strip.
    #[rustfmt::skip]
    pub fn positions(&self) -> [f32; 12] {
        let x = self.width * 0.5;
        let y = self.height * 0.5;
        [
            -x, -y, 0.0,
            x, -y, 0.0,
            -x, y, 0.0,
            x, y, 0.0,
        ]
    }

    pub const VERTEX_COUNT: i32 = 4;
}

/// Shader pair the quad is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShaderMaterial {
    pub vertex_source: &'static str,
    pub fragment_source: &'static str,
}

impl ShaderMaterial {
    pub fn gradient() -> Self {
        Self {
            vertex_source: shader::VERTEX_SHADER,
            fragment_source: shader::FRAGMENT_SHADER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scene {
    pub camera: OrthographicCamera,
    pub quad: Quad,
    pub material: ShaderMaterial,
}

impl Scene {
    pub fn gradient() -> Self {
        Self {
            camera: OrthographicCamera::fullscreen(),
            quad: Quad::fullscreen(),
            material: ShaderMaterial::gradient(),
        }
    }
}
