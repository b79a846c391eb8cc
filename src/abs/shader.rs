//! Shaders and shader programs
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs, which own a compiled shader
//! and a linked program on a [`GraphicsContext`] and release them when dropped.

use std::{fmt, sync::Arc};

use super::GraphicsContext;

/// Pipeline role of a shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Both stages, vertex first.
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

    /// File extension of the stage's source, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ShaderStage::Vertex => ".vert",
            ShaderStage::Fragment => ".frag",
        }
    }

    /// The OpenGL shader type enum.
    pub fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Failure to produce a [`Shader`].
#[derive(thiserror::Error, Debug)]
pub enum ShaderError {
    #[error("could not create shader object: {0}")]
    Create(String),
    #[error("{0}")]
    Compile(String),
}

/// Failure to produce a [`ShaderProgram`].
#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    #[error("could not create program object: {0}")]
    Create(String),
    #[error("{0}")]
    Link(String),
    #[error("{0}")]
    Validate(String),
}

/// Represents an individual compiled shader.
pub struct Shader<C: GraphicsContext> {
    ctx: Arc<C>,
    id: C::Shader,
    stage: ShaderStage,
}

impl<C: GraphicsContext> Shader<C> {
    /// Compiles a new shader from the given source code.
    ///
    /// On failure the shader object is deleted and the driver's info log is returned.
    pub fn new(ctx: &Arc<C>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let id = ctx.create_shader(stage).map_err(ShaderError::Create)?;
        let shader = Self {
            ctx: Arc::clone(ctx),
            id,
            stage,
        };

        ctx.shader_source(id, source);
        ctx.compile_shader(id);

        if !ctx.shader_compile_status(id) {
            return Err(ShaderError::Compile(ctx.shader_info_log(id)));
        }

        // Drivers may leave warnings in the log of a successful compile
        let log = ctx.shader_info_log(id);
        if !log.trim().is_empty() {
            log::warn!("{stage} shader compiled with warnings: {}", log.trim());
        }

        Ok(shader)
    }

    pub fn id(&self) -> C::Shader {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<C: GraphicsContext> fmt::Debug for Shader<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .finish()
    }
}

impl<C: GraphicsContext> Drop for Shader<C> {
    fn drop(&mut self) {
        self.ctx.delete_shader(self.id);
    }
}

/// Represents a linked and validated shader program.
pub struct ShaderProgram<C: GraphicsContext> {
    ctx: Arc<C>,
    id: C::Program,
}

impl<C: GraphicsContext> ShaderProgram<C> {
    /// Links a new shader program from the given shaders, then validates it.
    ///
    /// Validation is only attempted once linking succeeded. The program object is deleted if
    /// either step fails.
    pub fn new(ctx: &Arc<C>, shaders: &[&Shader<C>]) -> Result<Self, LinkError> {
        let id = ctx.create_program().map_err(LinkError::Create)?;
        let program = Self {
            ctx: Arc::clone(ctx),
            id,
        };

        for shader in shaders {
            ctx.attach_shader(id, shader.id);
        }

        ctx.link_program(id);

        if !ctx.program_link_status(id) {
            return Err(LinkError::Link(ctx.program_info_log(id)));
        }

        ctx.validate_program(id);

        if !ctx.program_validate_status(id) {
            return Err(LinkError::Validate(ctx.program_info_log(id)));
        }

        for shader in shaders {
            ctx.detach_shader(id, shader.id);
        }

        Ok(program)
    }

    pub fn id(&self) -> C::Program {
        self.id
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.ctx.use_program(Some(self.id));
    }

    pub fn context(&self) -> &Arc<C> {
        &self.ctx
    }
}

impl<C: GraphicsContext> fmt::Debug for ShaderProgram<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").field("id", &self.id).finish()
    }
}

impl<C: GraphicsContext> Drop for ShaderProgram<C> {
    fn drop(&mut self) {
        self.ctx.delete_program(self.id);
    }
}
