pub mod config;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use config::render::RenderConfig;
pub use config::window::WindowConfig;
pub use render::mesh::TriangleMesh;
pub use render::pipeline::RenderPipeline;
pub use render::shaders::{Shader, ShaderError, ShaderProgram, ShaderStage};
pub use utils::error::StartupError;
