use std::sync::Arc;

use eframe::glow;
use glow::HasContext as _;

/// One triangle, position only, three floats per vertex.
pub const TRIANGLE_VERTICES: [f32; 9] = [
    0.0, 0.5, 0.0,
    -0.5, -0.5, 0.0,
    0.5, -0.5, 0.0,
];

pub const POSITION_ATTRIBUTE: u32 = 0;
pub const FLOATS_PER_VERTEX: i32 = 3;
/// Tightly packed positions
pub const VERTEX_STRIDE: i32 = FLOATS_PER_VERTEX * std::mem::size_of::<f32>() as i32;

/// Immutable GPU copy of the triangle and the vertex array describing it.
pub struct ModelBuffer {
    pub vertex_buffer: glow::Buffer,
    pub vertex_array: glow::VertexArray,
    pub vertex_count: i32,
    pub gl: Arc<glow::Context>,
}

impl ModelBuffer {
    /// Copies `vertices` into a STATIC_DRAW buffer and describes attribute 0
    /// as vec3 positions on a fresh vertex array.
    pub fn upload(gl: Arc<glow::Context>, vertices: &[f32]) -> Result<Self, String> {
        let u8_buffer: &[u8] = bytemuck::cast_slice(vertices);
        unsafe {
            let vertex_array = gl.create_vertex_array()?;
            let vertex_buffer = match gl.create_buffer() {
                Ok(val) => { val },
                Err(val) => {
                    // Delete the vertex array before erroring
                    gl.delete_vertex_array(vertex_array);
                    return Err(val);
                }
            };
            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, u8_buffer, glow::STATIC_DRAW);

            let model = Self {
                vertex_buffer,
                vertex_array,
                vertex_count: vertex_count(vertices),
                gl,
            };
            model.describe_layout();
            model.gl.bind_vertex_array(None);
            model.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            return Ok(model);
        }
    }

    /// Binds attribute slot 0 to the buffer's vec3 positions. Expects the
    /// vertex array and buffer to be bound.
    fn describe_layout(&self) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                POSITION_ATTRIBUTE, FLOATS_PER_VERTEX, glow::FLOAT, false, VERTEX_STRIDE, 0);
            self.gl.enable_vertex_attrib_array(POSITION_ATTRIBUTE);
        }
    }

    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vertex_array));
            self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
        }
    }

    pub fn destroy(self) {
        unsafe {
            self.gl.delete_vertex_array(self.vertex_array);
            self.gl.delete_buffer(self.vertex_buffer);
        }
    }
}

fn vertex_count(vertices: &[f32]) -> i32 {
    return (vertices.len() / FLOATS_PER_VERTEX as usize) as i32;
}
