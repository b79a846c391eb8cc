//! Graphics context capability.
//!
//! The [`GraphicsContext`] trait is the narrow slice of an OpenGL-style driver the program
//! builder needs: shader and program objects, their status queries and introspection of active
//! uniforms and attributes. It is implemented for [`glow::Context`].

use std::fmt::Debug;

use glow::HasContext;

use super::ShaderStage;

/// Shader/program object management on a graphics driver.
///
/// All calls are synchronous and must happen on the thread that owns the context.
pub trait GraphicsContext {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type UniformLocation: Clone + Debug + PartialEq;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn validate_program(&self, program: Self::Program);
    fn program_validate_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);
    fn delete_program(&self, program: Self::Program);

    /// Number of active uniforms reported for a linked program.
    fn active_uniform_count(&self, program: Self::Program) -> u32;
    /// Declared name of the active uniform at `index`.
    fn active_uniform_name(&self, program: Self::Program, index: u32) -> Option<String>;
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    /// Number of active vertex attributes reported for a linked program.
    fn active_attribute_count(&self, program: Self::Program) -> u32;
    /// Declared name of the active attribute at `index`.
    fn active_attribute_name(&self, program: Self::Program, index: u32) -> Option<String>;
    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32>;
}

impl GraphicsContext for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage.gl_type()) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn validate_program(&self, program: Self::Program) {
        unsafe { HasContext::validate_program(self, program) }
    }

    fn program_validate_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_validate_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn active_uniform_count(&self, program: Self::Program) -> u32 {
        unsafe { self.get_active_uniforms(program) }
    }

    fn active_uniform_name(&self, program: Self::Program, index: u32) -> Option<String> {
        unsafe { self.get_active_uniform(program, index) }.map(|uniform| uniform.name)
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn active_attribute_count(&self, program: Self::Program) -> u32 {
        unsafe { self.get_active_attributes(program) }
    }

    fn active_attribute_name(&self, program: Self::Program, index: u32) -> Option<String> {
        unsafe { self.get_active_attribute(program, index) }.map(|attribute| attribute.name)
    }

    fn attribute_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }
}
