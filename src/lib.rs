//! Shader program loading for Mineplace3D.
//!
//! The crate fetches the vertex and fragment sources of a named program, compiles and links them
//! on an OpenGL context and records the locations of the program's active uniforms and
//! attributes, so values can be set by name every frame without querying the driver.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mp3d_shaderkit::{FsFetcher, ProgramBuilder};
//!
//! # fn example(gl: Arc<glow::Context>) -> Result<(), mp3d_shaderkit::ProgramError> {
//! let mut builder = ProgramBuilder::new(gl, "basic", Some("assets/shaders"))?;
//! let program = pollster::block_on(builder.ready(&FsFetcher))?;
//! program.use_program();
//! program.set_uniform("u_tint", glam::Vec4::ONE);
//! # Ok(())
//! # }
//! ```

pub mod abs;
pub mod config;
pub mod error;
pub mod fetch;
pub mod math;
pub mod program;

#[cfg(test)]
mod mock;

pub use abs::{GraphicsContext, Shader, ShaderProgram, ShaderStage, Uniform};
pub use config::LoaderConfig;
pub use error::ProgramError;
pub use fetch::{EmbeddedFetcher, FetchError, FsFetcher, MemoryFetcher, SourceFetcher};
pub use math::Vec3Chain;
pub use program::{
    BuildState, LinkedProgram, Location, ParameterClass, ParameterMap, ProgramBuilder,
};
