use thiserror::Error;

use crate::rendering::ShaderStage;

/// Exit status used when the window or GL context cannot be brought up.
pub const FATAL_EXIT_CODE: i32 = -1;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("could not create GL shader object: {0}")]
    Create(String),
    #[error("{stage} shader compilation error: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program linking error: {log}")]
    Link { log: String },
}

/// Failures that stop the program before the first frame.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no OpenGL context available, GL entry points were not loaded")]
    MissingGlContext,
    #[error("OpenGL {required_major}.{required_minor} core is required, driver reports \"{found}\"")]
    UnsupportedGl {
        found: String,
        required_major: u32,
        required_minor: u32,
    },
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("could not upload triangle geometry: {0}")]
    Geometry(String),
}
