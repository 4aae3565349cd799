use web_sys::{
    WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::error::{Error, Result};
use crate::frame::Render;
use crate::scene::Scene;
use crate::shader::{POSITION_ATTRIBUTE, PROJECTION_UNIFORM, RESOLUTION_UNIFORM, TIME_UNIFORM};
use crate::uniforms::Uniforms;

/// Draws the scene's quad with its shader material through WebGL2.
pub struct GlRenderer {
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    resolution: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    auto_clear_color: bool,
}

impl GlRenderer {
    pub fn new(gl: GL, scene: &Scene, auto_clear_color: bool) -> Result<Self> {
        let vs = compile_shader(&gl, GL::VERTEX_SHADER, scene.material.vertex_source)?;
        let fs = compile_shader(&gl, GL::FRAGMENT_SHADER, scene.material.fragment_source)?;
        let program = link_program(&gl, &vs, &fs)?;
        // The program keeps what it needs once linked.
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));

        let vao = gl
            .create_vertex_array()
            .ok_or(Error::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = gl.create_buffer().ok_or(Error::Resource("buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let positions = js_sys::Float32Array::from(&scene.quad.positions()[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &positions, GL::STATIC_DRAW);

        let location = gl.get_attrib_location(&program, POSITION_ATTRIBUTE);
        if location < 0 {
            return Err(Error::ProgramLink(format!(
                "attribute `{POSITION_ATTRIBUTE}` is not active"
            )));
        }
        let location = location as u32;
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_with_i32(location, 3, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        let resolution = gl.get_uniform_location(&program, RESOLUTION_UNIFORM);
        let time = gl.get_uniform_location(&program, TIME_UNIFORM);
        let projection = gl.get_uniform_location(&program, PROJECTION_UNIFORM);

        Ok(Self {
            gl,
            program,
            vao,
            resolution,
            time,
            projection,
            auto_clear_color,
        })
    }
}

impl Render for GlRenderer {
    fn render(&mut self, scene: &Scene, uniforms: &Uniforms) -> Result<()> {
        let gl = &self.gl;
        let [width, height, _] = uniforms.resolution;
        gl.viewport(0, 0, width as i32, height as i32);
        if self.auto_clear_color {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(GL::COLOR_BUFFER_BIT);
        }

        gl.use_program(Some(&self.program));
        let [x, y, z] = uniforms.resolution;
        gl.uniform3f(self.resolution.as_ref(), x, y, z);
        gl.uniform1f(self.time.as_ref(), uniforms.time);
        gl.uniform_matrix4fv_with_f32_array(
            self.projection.as_ref(),
            false,
            &scene.camera.projection_matrix(),
        );

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, crate::scene::Quad::VERTEX_COUNT);
        gl.bind_vertex_array(None);
        Ok(())
    }
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let stage = if kind == GL::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let shader = gl.create_shader(kind).ok_or(Error::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error".to_string());
        gl.delete_shader(Some(&shader));
        Err(Error::ShaderCompile { stage, log })
    }
}

fn link_program(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl.create_program().ok_or(Error::Resource("program"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error".to_string());
        gl.delete_program(Some(&program));
        Err(Error::ProgramLink(log))
    }
}
