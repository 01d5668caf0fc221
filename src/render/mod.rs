pub mod mesh;
pub mod pipeline;
pub mod shaders;

pub use pipeline::RenderPipeline;
pub use shaders::ShaderProgram;
