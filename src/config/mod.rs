pub mod render;
pub mod window;

pub use render::RenderConfig;
pub use window::WindowConfig;
