//! Building ready-to-use shader programs.
//!
//! A [`ProgramBuilder`] turns a program name and a base path into a [`LinkedProgram`]:
//!
//! 1. The vertex and fragment sources are fetched from `<base>/<name>/<name>.vert` and
//!    `<base>/<name>/<name>.frag` and compiled, both stages progressing concurrently.
//! 2. Once both compiled, they are linked into a program which is then validated.
//! 3. The active uniforms and attributes of the program are collected, so values can be set by
//!    name without asking the driver for locations every frame.
//!
//! A builder runs this sequence at most once. Every object the sequence creates on the graphics
//! context is owned by the builder and released when it is dropped, or as soon as the sequence
//! fails.

mod compile;
pub mod introspect;

use std::{fmt, sync::Arc};

use fxhash::FxHashMap;

pub use introspect::{Location, ParameterClass, ParameterMap, ParameterTable};

use crate::{
    abs::{GraphicsContext, Shader, ShaderProgram, ShaderStage, Uniform},
    config::LoaderConfig,
    error::ProgramError,
    fetch::SourceFetcher,
};

/// Separator used in resource paths.
pub const PATH_SEPARATOR: char = '/';

/// Appends a trailing separator to `path` unless it already has one.
///
/// An empty path is taken to mean the current directory.
pub fn normalize_base_path(path: &str) -> String {
    if path.is_empty() {
        format!(".{PATH_SEPARATOR}")
    } else if path.ends_with(PATH_SEPARATOR) {
        path.to_string()
    } else {
        format!("{path}{PATH_SEPARATOR}")
    }
}

/// Where a builder is in its build sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildState {
    Unbuilt,
    Compiling,
    Linking,
    Introspecting,
    Ready,
    Failed { reason: String },
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildState::Unbuilt => write!(f, "unbuilt"),
            BuildState::Compiling => write!(f, "compiling"),
            BuildState::Linking => write!(f, "linking"),
            BuildState::Introspecting => write!(f, "introspecting"),
            BuildState::Ready => write!(f, "built"),
            BuildState::Failed { reason } => write!(f, "failed ({reason})"),
        }
    }
}

/// A linked program along with the locations of its active parameters.
pub struct LinkedProgram<C: GraphicsContext> {
    program: ShaderProgram<C>,
    parameters: ParameterTable<C::UniformLocation>,
}

impl<C: GraphicsContext> LinkedProgram<C> {
    pub fn id(&self) -> C::Program {
        self.program.id()
    }

    /// Binds the program for use.
    pub fn use_program(&self) {
        self.program.use_program();
    }

    /// Active parameters of the given class.
    pub fn parameters(&self, class: ParameterClass) -> &ParameterMap<C::UniformLocation> {
        self.parameters.get(class)
    }

    pub fn uniform_location(&self, name: &str) -> Option<&C::UniformLocation> {
        self.parameters.uniform(name)
    }

    pub fn attribute_location(&self, name: &str) -> Option<u32> {
        self.parameters.attribute(name)
    }

    /// Sets a uniform variable of the program, which must be bound.
    ///
    /// Returns `false` without touching the driver if the program has no active uniform called
    /// `name`.
    pub fn set_uniform<T: Uniform<C>>(&self, name: &str, value: T) -> bool {
        match self.parameters.uniform(name) {
            Some(location) => {
                value.set_uniform(self.program.context(), location);
                true
            }
            None => false,
        }
    }
}

impl<C: GraphicsContext> fmt::Debug for LinkedProgram<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("program", &self.program)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Builds a [`LinkedProgram`] from the sources of a named program.
pub struct ProgramBuilder<C: GraphicsContext> {
    ctx: Arc<C>,
    name: String,
    base_path: String,
    state: BuildState,
    program: Option<LinkedProgram<C>>,
    shaders: FxHashMap<ShaderStage, Shader<C>>,
}

impl<C: GraphicsContext> ProgramBuilder<C> {
    /// Creates a builder for program `name`. Without a `path`, the default base path of
    /// [`LoaderConfig`] is used.
    pub fn new(ctx: Arc<C>, name: &str, path: Option<&str>) -> Result<Self, ProgramError> {
        Self::with_config(ctx, name, path, &LoaderConfig::default())
    }

    /// Creates a builder for program `name`, falling back to `config.default_path` when no
    /// `path` is given. Performs no I/O.
    pub fn with_config(
        ctx: Arc<C>,
        name: &str,
        path: Option<&str>,
        config: &LoaderConfig,
    ) -> Result<Self, ProgramError> {
        if name.is_empty() {
            return Err(ProgramError::Configuration(
                "program name must not be empty".to_string(),
            ));
        }

        let base_path = normalize_base_path(path.unwrap_or(&config.default_path));

        Ok(Self {
            ctx,
            name: name.to_string(),
            base_path,
            state: BuildState::Unbuilt,
            program: None,
            shaders: FxHashMap::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized base path, always ending with a separator.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Directory holding the program's sources: `<base>/<name>/`.
    pub fn resource_path(&self) -> String {
        format!("{}{}{PATH_SEPARATOR}", self.base_path, self.name)
    }

    /// Location of the source of `stage`: `<base>/<name>/<name>.<ext>`.
    pub fn source_path(&self, stage: ShaderStage) -> String {
        format!("{}{}{}", self.resource_path(), self.name, stage.extension())
    }

    pub fn state(&self) -> &BuildState {
        &self.state
    }

    pub fn context(&self) -> &Arc<C> {
        &self.ctx
    }

    /// The compiled shader of `stage`, once compiled.
    pub fn shader(&self, stage: ShaderStage) -> Option<&Shader<C>> {
        self.shaders.get(&stage)
    }

    /// The ready program, once [`ready`](Self::ready) succeeded.
    pub fn program(&self) -> Option<&LinkedProgram<C>> {
        self.program.as_ref()
    }

    /// Active parameters of `class`, once [`ready`](Self::ready) succeeded.
    pub fn parameters(&self, class: ParameterClass) -> Option<&ParameterMap<C::UniformLocation>> {
        self.program.as_ref().map(|program| program.parameters(class))
    }

    /// Gives up the builder, keeping only the ready program.
    pub fn into_program(self) -> Option<LinkedProgram<C>> {
        self.program
    }

    /// Fetches, compiles, links and introspects the program.
    ///
    /// Resolves with the ready program, or with the first error encountered. When both stages
    /// fail to fetch or compile, the vertex stage's error is the one reported. A builder can
    /// only be readied once: any later call fails with
    /// [`ProgramError::AlreadyBuildingOrBuilt`], including after an abandoned call.
    pub async fn ready<F: SourceFetcher>(
        &mut self,
        fetcher: &F,
    ) -> Result<&LinkedProgram<C>, ProgramError> {
        if self.state != BuildState::Unbuilt {
            return Err(ProgramError::AlreadyBuildingOrBuilt {
                name: self.name.clone(),
                state: self.state.to_string(),
            });
        }

        let result = self.build(fetcher).await;
        match result {
            Ok(program) => {
                log::debug!("Program '{}' is ready", self.name);
                self.state = BuildState::Ready;
                let program: &LinkedProgram<C> = self.program.insert(program);
                Ok(program)
            }
            Err(err) => {
                self.shaders.clear();
                self.state = BuildState::Failed {
                    reason: err.to_string(),
                };
                Err(err)
            }
        }
    }

    async fn build<F: SourceFetcher>(
        &mut self,
        fetcher: &F,
    ) -> Result<LinkedProgram<C>, ProgramError> {
        self.state = BuildState::Compiling;

        let (vertex, fragment) = futures::join!(
            compile::compile_stage(
                &self.ctx,
                fetcher,
                &self.name,
                ShaderStage::Vertex,
                self.source_path(ShaderStage::Vertex),
            ),
            compile::compile_stage(
                &self.ctx,
                fetcher,
                &self.name,
                ShaderStage::Fragment,
                self.source_path(ShaderStage::Fragment),
            ),
        );
        // vertex first, so its error wins when both stages failed
        let vertex = vertex?;
        let fragment = fragment?;
        self.shaders.insert(ShaderStage::Vertex, vertex);
        self.shaders.insert(ShaderStage::Fragment, fragment);

        self.state = BuildState::Linking;
        let shaders: Vec<&Shader<C>> = ShaderStage::ALL
            .iter()
            .filter_map(|stage| self.shaders.get(stage))
            .collect();
        let program = compile::link(&self.ctx, &self.name, &shaders)?;

        self.state = BuildState::Introspecting;
        let parameters = introspect::introspect_all(self.ctx.as_ref(), program.id()).await;
        log::debug!(
            "Program '{}' has {} active uniforms and {} active attributes",
            self.name,
            parameters.get(ParameterClass::Uniform).len(),
            parameters.get(ParameterClass::Attribute).len(),
        );

        Ok(LinkedProgram {
            program,
            parameters,
        })
    }
}

impl<C: GraphicsContext> fmt::Debug for ProgramBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramBuilder")
            .field("name", &self.name)
            .field("base_path", &self.base_path)
            .field("state", &self.state)
            .field("program", &self.program)
            .finish()
    }
}
