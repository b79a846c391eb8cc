//! Fetching, compiling and linking the stages of a program.

use std::sync::Arc;

use crate::{
    abs::{GraphicsContext, LinkError, Shader, ShaderError, ShaderProgram, ShaderStage},
    error::ProgramError,
    fetch::SourceFetcher,
};

/// Fetches the source at `path` and compiles it as `stage` of program `name`.
pub(crate) async fn compile_stage<C, F>(
    ctx: &Arc<C>,
    fetcher: &F,
    name: &str,
    stage: ShaderStage,
    path: String,
) -> Result<Shader<C>, ProgramError>
where
    C: GraphicsContext,
    F: SourceFetcher,
{
    let fetched = fetcher.fetch(&path).await;
    let source = match fetched {
        Ok(source) => source,
        Err(cause) => return Err(ProgramError::ShaderSourceUnavailable { path, cause }),
    };

    log::debug!("Compiling {stage} shader of '{name}' from {path}");

    Shader::new(ctx, stage, &source).map_err(|err| match err {
        ShaderError::Create(reason) => ProgramError::Context {
            name: name.to_string(),
            reason,
        },
        ShaderError::Compile(log) => ProgramError::ShaderCompilation {
            stage,
            name: name.to_string(),
            log,
        },
    })
}

/// Links and validates the compiled stages of program `name`.
pub(crate) fn link<C: GraphicsContext>(
    ctx: &Arc<C>,
    name: &str,
    shaders: &[&Shader<C>],
) -> Result<ShaderProgram<C>, ProgramError> {
    log::debug!("Linking program '{name}'");

    ShaderProgram::new(ctx, shaders).map_err(|err| match err {
        LinkError::Create(reason) => ProgramError::Context {
            name: name.to_string(),
            reason,
        },
        LinkError::Link(log) => ProgramError::ProgramLink {
            name: name.to_string(),
            log,
        },
        LinkError::Validate(log) => ProgramError::ProgramValidation {
            name: name.to_string(),
            log,
        },
    })
}
