use serde::{Deserialize, Serialize};

/// Parameters for the window and the OpenGL context request. A core profile
/// is always requested; only the version is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub gl_major: u8,
    pub gl_minor: u8,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Modern OpenGL".to_string(),
            gl_major: 3,
            gl_minor: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_720p() {
        let config = WindowConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
    }

    #[test]
    fn default_context_is_gl_3_3() {
        let config = WindowConfig::default();
        assert_eq!((config.gl_major, config.gl_minor), (3, 3));
    }
}
