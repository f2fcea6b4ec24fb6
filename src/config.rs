use std::path::PathBuf;

/// Everything the window host and renderer need to know up front.
///
/// There are no flags or config files; `Default` is the configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub vertex_shader_path: PathBuf,
    pub fragment_shader_path: PathBuf,
    /// RGBA used when clearing the color buffer each frame
    pub clear_color: [f32; 4],
    /// Minimum (major, minor) desktop GL version the context must report
    pub required_gl_version: (u32, u32),
}

impl Default for RenderConfig {
    fn default() -> Self {
        return Self {
            title: "Rotating Triangle".to_string(),
            width: 800.,
            height: 600.,
            vertex_shader_path: PathBuf::from("shaders/vertex_shader.glsl"),
            fragment_shader_path: PathBuf::from("shaders/fragment_shader.glsl"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            required_gl_version: (3, 3),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_800_by_600() {
        let config = RenderConfig::default();
        assert_eq!(config.title, "Rotating Triangle");
        assert_eq!((config.width, config.height), (800., 600.));
    }

    #[test]
    fn default_shader_paths_are_relative() {
        let config = RenderConfig::default();
        assert_eq!(config.vertex_shader_path, PathBuf::from("shaders/vertex_shader.glsl"));
        assert_eq!(config.fragment_shader_path, PathBuf::from("shaders/fragment_shader.glsl"));
        assert!(config.vertex_shader_path.is_relative());
    }

    #[test]
    fn default_requires_gl_3_3() {
        assert_eq!(RenderConfig::default().required_gl_version, (3, 3));
    }
}
