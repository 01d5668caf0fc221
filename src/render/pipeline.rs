use crate::config::render::RenderConfig;
use crate::render::mesh::TriangleMesh;
use crate::render::shaders::{triangle_shaders, ShaderError, ShaderProgram};
use log::info;

/// Everything needed to render a frame: the linked program (bound once,
/// never switched), the uploaded triangle and the clear color.
pub struct RenderPipeline {
    program: ShaderProgram,
    mesh: TriangleMesh,
    clear_color: [f32; 4],
}

impl RenderPipeline {
    /// Compiles and links the fixed shader pair and uploads the triangle.
    /// Any compile or link failure aborts startup; there is no fallback
    /// program to draw with.
    pub fn new(config: &RenderConfig) -> Result<Self, ShaderError> {
        let program = triangle_shaders::create()?;
        let mesh = TriangleMesh::upload();

        program.bind();
        info!("Shader program {} linked and bound", program.id());

        Ok(Self {
            program,
            mesh,
            clear_color: config.clear_color,
        })
    }

    /// Clears the color buffer and redraws the triangle. The same vertex
    /// data is drawn every frame.
    pub fn draw_frame(&self) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        self.mesh.draw();
    }

    /// Maps rendering output onto the new surface size. Called from the
    /// window-resize notification, so the next clear and draw already use
    /// the new dimensions.
    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }
}
