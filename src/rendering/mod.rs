mod model_buffer;
mod shader_program;
mod shader_source;
mod viewport;

pub use model_buffer::*;
pub use shader_program::*;
pub use shader_source::*;
pub use viewport::*;
