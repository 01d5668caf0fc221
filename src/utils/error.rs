use crate::render::shaders::ShaderError;
use thiserror::Error;

/// Everything that can go wrong before the frame loop starts. All of these
/// are fatal: the process reports the failure and exits non-zero.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to create window and OpenGL context: {0}")]
    WindowCreationFailed(String),

    #[error("Failed to load OpenGL function pointers: {0}")]
    FunctionLoadingFailed(String),

    #[error(transparent)]
    Shader(#[from] ShaderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shaders::ShaderStage;

    #[test]
    fn window_and_loader_failures_have_distinct_tags() {
        let window = StartupError::WindowCreationFailed("no display".to_string());
        let loader = StartupError::FunctionLoadingFailed("glClear missing".to_string());
        assert!(window.to_string().contains("create window"));
        assert!(loader.to_string().contains("function pointers"));
    }

    #[test]
    fn shader_failures_keep_their_stage_tag() {
        let err: StartupError = ShaderError::CompilationFailed {
            stage: ShaderStage::Vertex,
            log: "0:1: unexpected token".to_string(),
        }
        .into();
        assert!(err.to_string().contains("VERTEX"));
    }
}
