use gl::types::*;
use std::mem;
use std::ptr;

/// The three corners of the triangle in normalized device coordinates,
/// positions only. Uploaded once and never mutated.
pub const VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0, //
];

pub struct TriangleMesh {
    vao: GLuint,
    vbo: GLuint,
}

impl TriangleMesh {
    pub fn upload() -> Self {
        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                mem::size_of_val(&VERTICES) as GLsizeiptr,
                VERTICES.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            // Attribute 0: vec3 position, tightly packed
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                (3 * mem::size_of::<f32>()) as GLsizei,
                ptr::null(),
            );
            gl::EnableVertexAttribArray(0);
        }

        TriangleMesh { vao, vbo }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
        }
    }
}

impl Drop for TriangleMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_three_vertices_of_three_floats() {
        assert_eq!(VERTICES.len(), 9);
    }

    #[test]
    fn vertices_lie_on_the_z_zero_plane_within_ndc() {
        for vertex in VERTICES.chunks_exact(3) {
            assert_eq!(vertex[2], 0.0);
            assert!(vertex.iter().all(|c| (-1.0..=1.0).contains(c)));
        }
    }
}
