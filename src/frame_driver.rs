use std::sync::Arc;

use eframe::glow;
use glow::HasContext as _;

extern crate nalgebra_glm as glm;
use glm::Mat4;

use crate::config::RenderConfig;
use crate::error::StartupError;
use crate::rendering::{
    load_shader_source, ModelBuffer, ShaderProgram, ViewportTracker, TRIANGLE_VERTICES,
};
use crate::rotation::{RotationAngle, RotationClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Set up, no frame drawn yet
    Idle,
    Rendering,
    /// Window closed; nothing is drawn again
    Closed,
}

impl DriverState {
    /// Moves into `Rendering` unless closed. Returns whether a frame may be drawn.
    pub fn begin_frame(&mut self) -> bool {
        match self {
            DriverState::Idle | DriverState::Rendering => {
                *self = DriverState::Rendering;
                true
            }
            DriverState::Closed => false,
        }
    }

    /// Returns true the first time only.
    pub fn close(&mut self) -> bool {
        let was_open = *self != DriverState::Closed;
        *self = DriverState::Closed;
        was_open
    }
}

/// What a single frame draws with.
#[derive(Debug, Clone, Copy)]
pub struct FramePlan {
    pub angle: RotationAngle,
    pub transform: Mat4,
}

impl FramePlan {
    pub fn new(angle: RotationAngle) -> Self {
        return Self { angle, transform: angle.transform() };
    }

    pub fn log_angle(&self) {
        log::info!("Rotation Angle (radians): {}", self.angle.radians);
        log::info!("Rotation Angle (degrees): {}", self.angle.degrees);
    }
}

/// The single program, triangle and viewport the driver draws with.
pub struct RenderContext {
    geometry: ModelBuffer,
    program: ShaderProgram,
    viewport: ViewportTracker,
    clear_color: [f32; 4],
    gl: Arc<glow::Context>,
}

impl RenderContext {
    /// Loads and builds the shader program, then uploads the triangle.
    pub fn new(gl: Arc<glow::Context>, config: &RenderConfig) -> Result<Self, StartupError> {
        let vertex_source = load_shader_source(&config.vertex_shader_path);
        let fragment_source = load_shader_source(&config.fragment_shader_path);
        let program = ShaderProgram::build(gl.clone(), &vertex_source, &fragment_source)?;
        log::info!("shader program linked");

        let geometry = match ModelBuffer::upload(gl.clone(), &TRIANGLE_VERTICES) {
            Ok(geometry) => geometry,
            Err(err) => {
                program.destroy();
                return Err(StartupError::Geometry(err));
            }
        };
        log::debug!("uploaded {} vertices", geometry.vertex_count);

        return Ok(Self {
            geometry,
            program,
            viewport: ViewportTracker::default(),
            clear_color: config.clear_color,
            gl,
        });
    }

    /// Draws one frame into a framebuffer of `size` pixels.
    pub fn render(&mut self, plan: &FramePlan, size: [u32; 2]) {
        if let Some(viewport) = self.viewport.observe(size[0], size[1]) {
            log::debug!("framebuffer resized to {}x{}", viewport.width, viewport.height);
        }
        if let Some(viewport) = self.viewport.current() {
            viewport.apply(&self.gl);
        }
        let [r, g, b, a] = self.clear_color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
        self.program.bind();
        self.program.set_transform(&plan.transform);
        self.geometry.draw();
    }

    /// Releases the vertex array and buffer, then the program.
    pub fn destroy(self) {
        self.geometry.destroy();
        self.program.destroy();
        log::debug!("GPU objects released");
    }
}

/// Runs the per-frame body until the window closes.
pub struct FrameDriver {
    state: DriverState,
    clock: RotationClock,
    context: Option<RenderContext>,
}

impl FrameDriver {
    pub fn new(context: RenderContext, clock: RotationClock) -> Self {
        Self {
            state: DriverState::Idle,
            clock,
            context: Some(context),
        }
    }

    pub fn frame(&mut self, framebuffer_size: [u32; 2]) {
        if !self.state.begin_frame() {
            return;
        }
        let plan = FramePlan::new(self.clock.angle());
        if let Some(context) = self.context.as_mut() {
            context.render(&plan, framebuffer_size);
        }
        plan.log_angle();
    }

    pub fn close(&mut self) {
        if self.state.close() {
            if let Some(context) = self.context.take() {
                context.destroy();
            }
        }
    }
}
