use std::fs;
use std::path::Path;

/// Reads a shader stage's source text.
///
/// An unreadable or non-UTF-8 file is logged and yields an empty string;
/// the empty source then fails compilation, which is where startup stops.
pub fn load_shader_source(path: &Path) -> String {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::error!("Failed to open shader file: {} ({})", path.display(), err);
            return String::new();
        }
    };
    match String::from_utf8(bytes) {
        Ok(source) => {
            log::debug!("loaded shader source {} ({} bytes)", path.display(), source.len());
            return source;
        }
        Err(err) => {
            log::error!("Shader file is not valid UTF-8: {} ({})", path.display(), err.utf8_error());
            return String::new();
        }
    }
}
