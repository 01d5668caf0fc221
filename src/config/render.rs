use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// RGBA color the framebuffer is cleared to at the start of every frame.
    pub clear_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [1.0, 0.25, 1.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clear_color_is_opaque() {
        let config = RenderConfig::default();
        assert_eq!(config.clear_color[3], 1.0);
    }
}
