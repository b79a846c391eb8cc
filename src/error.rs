//! Error types returned while building a shader program.

use crate::{abs::ShaderStage, fetch::FetchError};

/// Everything that can go wrong between constructing a
/// [`ProgramBuilder`](crate::ProgramBuilder) and holding a ready program.
///
/// None of these are retried internally. A failed build leaves no usable
/// program behind, and every object it created on the graphics context has
/// already been released by the time the error reaches the caller.
#[derive(thiserror::Error, Debug)]
pub enum ProgramError {
    /// The builder was given arguments it cannot work with.
    #[error("invalid program configuration: {0}")]
    Configuration(String),

    /// The source text for one of the stages could not be fetched.
    #[error("shader source '{path}' is unavailable: {cause}")]
    ShaderSourceUnavailable {
        path: String,
        #[source]
        cause: FetchError,
    },

    /// The driver rejected the source of a stage.
    #[error("failed to compile {stage} shader of program '{name}': {log}")]
    ShaderCompilation {
        stage: ShaderStage,
        name: String,
        log: String,
    },

    /// Both stages compiled but the driver refused to link them together.
    #[error("failed to link program '{name}': {log}")]
    ProgramLink { name: String, log: String },

    /// The linked program did not pass validation.
    #[error("program '{name}' failed validation: {log}")]
    ProgramValidation { name: String, log: String },

    /// [`ProgramBuilder::ready`](crate::ProgramBuilder::ready) was invoked on
    /// a builder that already started a build.
    #[error("program '{name}' is already {state}")]
    AlreadyBuildingOrBuilt { name: String, state: String },

    /// The graphics context could not allocate a shader or program object.
    #[error("graphics context error while building '{name}': {reason}")]
    Context { name: String, reason: String },
}
