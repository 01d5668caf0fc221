use gl::types::*;
use std::ffi::{CString, NulError};
use std::fmt;
use std::ptr;
use thiserror::Error;

/// Fixed size of the driver info-log buffer: up to 511 characters of
/// diagnostic text plus the terminator.
pub const INFO_LOG_CAPACITY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("ERROR::SHADER::{stage}::COMPILATION_FAILED\n{log}")]
    CompilationFailed { stage: ShaderStage, log: String },

    #[error("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{0}")]
    LinkingFailed(String),

    #[error("shader source contains an interior NUL byte")]
    NulError(#[from] NulError),
}

/// One compiled shader stage. Only useful as a link input; the driver
/// object is released when the value is dropped, on every path.
pub struct Shader {
    id: GLuint,
    stage: ShaderStage,
}

impl Shader {
    pub fn compile(stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let source = CString::new(source)?;
        let shader = Shader {
            id: unsafe { gl::CreateShader(stage.gl_enum()) },
            stage,
        };

        unsafe {
            gl::ShaderSource(shader.id, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader.id);
        }

        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader.id, gl::COMPILE_STATUS, &mut success);
        }
        if success == 0 {
            let log = read_info_log(|capacity, written, buffer| unsafe {
                gl::GetShaderInfoLog(shader.id, capacity, written, buffer);
            });
            return Err(ShaderError::CompilationFailed { stage, log });
        }

        Ok(shader)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

/// The linked combination of one vertex and one fragment stage. A value of
/// this type exists only if both stages compiled and the link succeeded.
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    /// Compiles both stages and links them. A vertex-stage failure is
    /// reported without attempting the fragment compile or the link. The
    /// stage objects are deleted as soon as the program is linked.
    pub fn from_sources(
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = Shader::compile(ShaderStage::Vertex, vertex_source)?;
        let fragment = Shader::compile(ShaderStage::Fragment, fragment_source)?;
        Self::link(&vertex, &fragment)
    }

    pub fn link(vertex: &Shader, fragment: &Shader) -> Result<Self, ShaderError> {
        debug_assert_eq!(vertex.stage(), ShaderStage::Vertex);
        debug_assert_eq!(fragment.stage(), ShaderStage::Fragment);

        let program = ShaderProgram {
            id: unsafe { gl::CreateProgram() },
        };

        unsafe {
            gl::AttachShader(program.id, vertex.id());
            gl::AttachShader(program.id, fragment.id());
            gl::LinkProgram(program.id);
        }

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program.id, gl::LINK_STATUS, &mut success);
        }
        if success == 0 {
            let log = read_info_log(|capacity, written, buffer| unsafe {
                gl::GetProgramInfoLog(program.id, capacity, written, buffer);
            });
            return Err(ShaderError::LinkingFailed(log));
        }

        Ok(program)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn read_info_log<F>(read: F) -> String
where
    F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar),
{
    let mut buffer = vec![0u8; INFO_LOG_CAPACITY];
    let mut written: GLsizei = 0;
    read(
        INFO_LOG_CAPACITY as GLsizei,
        &mut written,
        buffer.as_mut_ptr() as *mut GLchar,
    );
    log_from_buffer(&buffer, written.max(0) as usize)
}

/// Extracts the diagnostic text from a driver-filled buffer. `written` is
/// the length the driver reported, which never includes the terminator but
/// is clamped anyway in case of a misbehaving driver.
fn log_from_buffer(buffer: &[u8], written: usize) -> String {
    let bytes = &buffer[..written.min(buffer.len().saturating_sub(1))];
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim_end().to_string()
}

// The fixed shader pair for the triangle: a pass-through vertex stage and a
// constant orange fragment stage.
pub mod triangle_shaders {
    use super::*;

    pub const VERTEX_SOURCE: &str = r#"
        #version 330 core
        layout (location = 0) in vec3 aPos;

        void main() {
            gl_Position = vec4(aPos, 1.0);
        }
    "#;

    pub const FRAGMENT_SOURCE: &str = r#"
        #version 330 core
        out vec4 FragColor;

        void main() {
            FragColor = vec4(1.0, 0.5, 0.2, 1.0);
        }
    "#;

    pub fn create() -> Result<ShaderProgram, ShaderError> {
        ShaderProgram::from_sources(VERTEX_SOURCE, FRAGMENT_SOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_maps_to_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn compile_error_carries_stage_tag() {
        let err = ShaderError::CompilationFailed {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("FRAGMENT"));
        assert!(text.contains("COMPILATION_FAILED"));
        assert!(text.contains("0:3: syntax error"));
    }

    #[test]
    fn link_error_tag_is_distinct_from_compile_tags() {
        let err = ShaderError::LinkingFailed("undefined varying".to_string());
        let text = err.to_string();
        assert!(text.contains("LINKING_FAILED"));
        assert!(!text.contains("COMPILATION_FAILED"));
    }

    #[test]
    fn interior_nul_is_rejected_before_any_driver_call() {
        let err: ShaderError = CString::new("void main\0()").unwrap_err().into();
        assert!(matches!(err, ShaderError::NulError(_)));
    }

    #[test]
    fn info_log_is_trimmed_at_the_terminator() {
        let mut buffer = vec![b'x'; INFO_LOG_CAPACITY];
        buffer[5] = 0;
        assert_eq!(log_from_buffer(&buffer, 20), "xxxxx");
    }

    #[test]
    fn info_log_is_bounded_to_511_characters() {
        let buffer = vec![b'x'; INFO_LOG_CAPACITY];
        let log = log_from_buffer(&buffer, INFO_LOG_CAPACITY * 2);
        assert_eq!(log.len(), INFO_LOG_CAPACITY - 1);
    }

    #[test]
    fn builtin_sources_target_gl_3_3_core() {
        assert!(triangle_shaders::VERTEX_SOURCE.contains("#version 330 core"));
        assert!(triangle_shaders::FRAGMENT_SOURCE.contains("#version 330 core"));
    }
}
