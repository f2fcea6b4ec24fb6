use std::fmt;
use std::sync::Arc;

use eframe::glow;
use glow::HasContext as _;

extern crate nalgebra_glm as glm;

use crate::error::ShaderError;

/// Compiler and linker logs are cut to this many bytes.
pub const INFO_LOG_CAPACITY: usize = 512;

/// Name of the 4x4 matrix uniform the vertex stage must declare.
pub const TRANSFORM_UNIFORM: &str = "transform";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "Vertex"),
            ShaderStage::Fragment => write!(f, "Fragment"),
        }
    }
}

/// A linked vertex + fragment program with its `transform` location
/// resolved once at link time.
pub struct ShaderProgram {
    pub shader_program: glow::Program,
    transform_location: Option<glow::NativeUniformLocation>,
    pub gl: Arc<glow::Context>,
}

impl ShaderProgram {
    /// Compiles both stages, links them and releases the stage objects.
    /// Both stages are always compiled so every compiler log gets reported.
    ///
    /// Errors carry the compiler or linker log, bounded to
    /// `INFO_LOG_CAPACITY` bytes.
    pub fn build(gl: Arc<glow::Context>, vertex_source: &str, fragment_source: &str)
    -> Result<Self, ShaderError> {
        let vertex = compile_stage(&gl, ShaderStage::Vertex, vertex_source);
        let fragment = compile_stage(&gl, ShaderStage::Fragment, fragment_source);
        let (vertex_shader, fragment_shader) =
            pair_stages(vertex, fragment, |shader| unsafe { gl.delete_shader(shader) })?;
        let linked = link(&gl, vertex_shader, fragment_shader);
        unsafe {
            gl.delete_shader(vertex_shader);
            gl.delete_shader(fragment_shader);
        }
        let shader_program = linked?;

        let transform_location = unsafe {
            gl.get_uniform_location(shader_program, TRANSFORM_UNIFORM)
        };
        if transform_location.is_none() {
            log::warn!("uniform \"{}\" not found in shader program", TRANSFORM_UNIFORM);
        }
        return Ok(Self { shader_program, transform_location, gl });
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.use_program(Some(self.shader_program));
        }
    }

    /// Uploads `transform` column-major, untransposed. The program must be bound.
    pub fn set_transform(&self, transform: &glm::Mat4) {
        unsafe {
            self.gl.uniform_matrix_4_f32_slice(
                self.transform_location.as_ref(), false, transform.as_slice());
        }
    }

    pub fn destroy(self) {
        unsafe {
            self.gl.delete_program(self.shader_program);
        }
    }
}

fn compile_stage(gl: &glow::Context, stage: ShaderStage, source: &str)
-> Result<glow::NativeShader, ShaderError> {
    unsafe {
        let shader = gl.create_shader(stage.gl_type()).map_err(ShaderError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let err = ShaderError::Compile {
                stage,
                log: bounded_info_log(gl.get_shader_info_log(shader)),
            };
            gl.delete_shader(shader);
            return Err(err);
        }
        return Ok(shader);
    }
}

/// Pairs the two compile results. The compiled stage of a failed pair goes
/// to `release`. When both fail, the fragment error is logged here and the
/// vertex error is returned for the caller to report.
fn pair_stages<S>(
    vertex: Result<S, ShaderError>,
    fragment: Result<S, ShaderError>,
    mut release: impl FnMut(S),
) -> Result<(S, S), ShaderError> {
    match (vertex, fragment) {
        (Ok(vertex), Ok(fragment)) => Ok((vertex, fragment)),
        (Err(err), Ok(fragment)) => {
            release(fragment);
            Err(err)
        }
        (Ok(vertex), Err(err)) => {
            release(vertex);
            Err(err)
        }
        (Err(vertex_err), Err(fragment_err)) => {
            log::error!("{}", fragment_err);
            Err(vertex_err)
        }
    }
}

fn link(gl: &glow::Context, vertex: glow::NativeShader, fragment: glow::NativeShader)
-> Result<glow::Program, ShaderError> {
    unsafe {
        let program = gl.create_program().map_err(ShaderError::Create)?;
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        let linked = gl.get_program_link_status(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        if !linked {
            let err = ShaderError::Link {
                log: bounded_info_log(gl.get_program_info_log(program)),
            };
            gl.delete_program(program);
            return Err(err);
        }
        return Ok(program);
    }
}

/// Cuts a driver log to `INFO_LOG_CAPACITY` bytes without splitting a char.
pub fn bounded_info_log(log: String) -> String {
    let trimmed = log.trim_end();
    if trimmed.len() <= INFO_LOG_CAPACITY {
        return trimmed.to_string();
    }
    let mut end = INFO_LOG_CAPACITY;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    return trimmed[..end].to_string();
}
