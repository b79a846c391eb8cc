//! A recording [`GraphicsContext`] for tests.
//!
//! Sources are "compiled" by scanning their declarations: `uniform <type> <name>;` becomes an
//! active uniform, a vertex `in <type> <name>;` an active attribute, and every fragment `in` must
//! be matched by a vertex `out` for linking to succeed. `SYNTAX_ERROR` anywhere in a source fails
//! its compilation and `FAIL_VALIDATION` fails program validation. Names starting with `gl_` are
//! active but have no location.
//!
//! A few switches make the context misbehave the way real drivers can: refusing to allocate
//! shader or program objects, or listing a uniform shared by both stages once per stage.

use std::cell::RefCell;

use fxhash::FxHashMap;

use crate::abs::{GraphicsContext, ShaderStage, Uniform};

struct MockShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Default)]
struct MockProgram {
    attached: Vec<u32>,
    linked: bool,
    validated: bool,
    log: String,
    uniforms: Vec<String>,
    attributes: Vec<String>,
}

#[derive(Default)]
struct MockState {
    next_id: u32,
    created: usize,
    shaders: FxHashMap<u32, MockShader>,
    programs: FxHashMap<u32, MockProgram>,
    validations: usize,
    introspection_queries: usize,
    location_queries: usize,
    uploads: Vec<(u32, String)>,
    bound: Option<u32>,
    fail_shader_creation: bool,
    fail_program_creation: bool,
    duplicate_shared_uniforms: bool,
}

impl MockState {
    fn allocate(&mut self) -> u32 {
        self.next_id += 1;
        self.created += 1;
        self.next_id
    }
}

#[derive(Default)]
pub(crate) struct MockContext {
    state: RefCell<MockState>,
}

fn declarations(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("//"))
        .filter_map(|line| {
            let tokens: Vec<&str> = line.trim_end_matches(';').split_whitespace().collect();
            let position = tokens.iter().position(|token| *token == qualifier)?;
            tokens.get(position + 2).map(|name| name.to_string())
        })
        .collect()
}

/// Sources of a small textured program: four uniforms (one shared by both stages) and two
/// attributes.
pub(crate) fn basic_sources() -> (String, String) {
    let vert = "#version 330 core
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec2 a_uv;
uniform mat4 u_model;
uniform mat4 u_view_projection;
uniform vec4 u_tint;
out vec2 v_uv;
void main() {
    v_uv = a_uv;
    gl_Position = u_view_projection * u_model * vec4(a_position, 1.0) * u_tint.a;
}
";
    let frag = "#version 330 core
in vec2 v_uv;
uniform vec4 u_tint;
uniform sampler2D u_texture;
out vec4 frag_color;
void main() {
    frag_color = texture(u_texture, v_uv) * u_tint;
}
";
    (vert.to_string(), frag.to_string())
}

impl MockContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Shader and program objects that have been created and not yet deleted.
    pub(crate) fn live_objects(&self) -> usize {
        let state = self.state.borrow();
        state.shaders.len() + state.programs.len()
    }

    pub(crate) fn objects_created(&self) -> usize {
        self.state.borrow().created
    }

    pub(crate) fn validation_attempts(&self) -> usize {
        self.state.borrow().validations
    }

    /// Calls asking for active parameter counts or names.
    pub(crate) fn introspection_queries(&self) -> usize {
        self.state.borrow().introspection_queries
    }

    pub(crate) fn location_queries(&self) -> usize {
        self.state.borrow().location_queries
    }

    pub(crate) fn uploads(&self) -> Vec<(u32, String)> {
        self.state.borrow().uploads.clone()
    }

    pub(crate) fn bound_program(&self) -> Option<u32> {
        self.state.borrow().bound
    }

    /// Makes every following `create_shader` call fail.
    pub(crate) fn fail_shader_creation(&self) {
        self.state.borrow_mut().fail_shader_creation = true;
    }

    /// Makes every following `create_program` call fail.
    pub(crate) fn fail_program_creation(&self) {
        self.state.borrow_mut().fail_program_creation = true;
    }

    /// Programs linked from now on list a uniform declared in both stages twice.
    pub(crate) fn duplicate_shared_uniforms(&self) {
        self.state.borrow_mut().duplicate_shared_uniforms = true;
    }

    fn record_upload(&self, location: u32, value: String) {
        self.state.borrow_mut().uploads.push((location, value));
    }
}

impl GraphicsContext for MockContext {
    type Shader = u32;
    type Program = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        if state.fail_shader_creation {
            return Err("out of shader objects".to_string());
        }
        let id = state.allocate();
        state.shaders.insert(
            id,
            MockShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
            },
        );
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(shader) = self.state.borrow_mut().shaders.get_mut(&shader) {
            shader.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        if let Some(shader) = self.state.borrow_mut().shaders.get_mut(&shader) {
            shader.compiled = !shader.source.contains("SYNTAX_ERROR");
            shader.log = if shader.compiled {
                String::new()
            } else {
                format!("0:1(1): error: syntax error in {} shader", shader.stage)
            };
        }
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .is_some_and(|shader| shader.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.state
            .borrow()
            .shaders
            .get(&shader)
            .map(|shader| shader.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        if state.fail_program_creation {
            return Err("out of program objects".to_string());
        }
        let id = state.allocate();
        state.programs.insert(id, MockProgram::default());
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(program) = self.state.borrow_mut().programs.get_mut(&program) {
            program.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(program) = self.state.borrow_mut().programs.get_mut(&program) {
            program.attached.retain(|attached| *attached != shader);
        }
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let MockState {
            shaders,
            programs,
            duplicate_shared_uniforms,
            ..
        } = &mut *state;
        let Some(program) = programs.get_mut(&program) else {
            return;
        };

        let stage_source = |stage: ShaderStage| {
            program
                .attached
                .iter()
                .filter_map(|id| shaders.get(id))
                .find(|shader| shader.stage == stage && shader.compiled)
                .map(|shader| shader.source.clone())
        };
        let (Some(vert), Some(frag)) = (
            stage_source(ShaderStage::Vertex),
            stage_source(ShaderStage::Fragment),
        ) else {
            program.linked = false;
            program.log = "error: program needs a compiled vertex and fragment shader".to_string();
            return;
        };

        let outputs = declarations(&vert, "out");
        if let Some(input) = declarations(&frag, "in")
            .into_iter()
            .find(|input| !outputs.contains(input))
        {
            program.linked = false;
            program.log =
                format!("error: fragment shader input `{input}` has no matching vertex output");
            return;
        }

        let mut uniforms = declarations(&vert, "uniform");
        for uniform in declarations(&frag, "uniform") {
            if *duplicate_shared_uniforms || !uniforms.contains(&uniform) {
                uniforms.push(uniform);
            }
        }

        program.linked = true;
        program.validated = !(vert.contains("FAIL_VALIDATION") || frag.contains("FAIL_VALIDATION"));
        program.log = String::new();
        program.uniforms = uniforms;
        program.attributes = declarations(&vert, "in");
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|program| program.linked)
    }

    fn validate_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.validations += 1;
        if let Some(program) = state.programs.get_mut(&program) {
            if !program.validated {
                program.log = "error: program is not valid in the current state".to_string();
            }
        }
    }

    fn program_validate_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .programs
            .get(&program)
            .is_some_and(|program| program.linked && program.validated)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|program| program.log.clone())
            .unwrap_or_default()
    }

    fn use_program(&self, program: Option<u32>) {
        self.state.borrow_mut().bound = program;
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        if state.bound == Some(program) {
            state.bound = None;
        }
    }

    fn active_uniform_count(&self, program: u32) -> u32 {
        let mut state = self.state.borrow_mut();
        state.introspection_queries += 1;
        state
            .programs
            .get(&program)
            .map_or(0, |program| program.uniforms.len() as u32)
    }

    fn active_uniform_name(&self, program: u32, index: u32) -> Option<String> {
        let mut state = self.state.borrow_mut();
        state.introspection_queries += 1;
        state
            .programs
            .get(&program)?
            .uniforms
            .get(index as usize)
            .cloned()
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        let mut state = self.state.borrow_mut();
        state.location_queries += 1;
        let program = state.programs.get(&program).filter(|program| program.linked)?;
        if name.starts_with("gl_") {
            return None;
        }
        program
            .uniforms
            .iter()
            .position(|uniform| uniform == name)
            .map(|index| index as u32)
    }

    fn active_attribute_count(&self, program: u32) -> u32 {
        let mut state = self.state.borrow_mut();
        state.introspection_queries += 1;
        state
            .programs
            .get(&program)
            .map_or(0, |program| program.attributes.len() as u32)
    }

    fn active_attribute_name(&self, program: u32, index: u32) -> Option<String> {
        let mut state = self.state.borrow_mut();
        state.introspection_queries += 1;
        state
            .programs
            .get(&program)?
            .attributes
            .get(index as usize)
            .cloned()
    }

    fn attribute_location(&self, program: u32, name: &str) -> Option<u32> {
        let mut state = self.state.borrow_mut();
        state.location_queries += 1;
        let program = state.programs.get(&program).filter(|program| program.linked)?;
        if name.starts_with("gl_") {
            return None;
        }
        program
            .attributes
            .iter()
            .position(|attribute| attribute == name)
            .map(|index| index as u32)
    }
}

impl Uniform<MockContext> for f32 {
    fn set_uniform(&self, ctx: &MockContext, location: &u32) {
        ctx.record_upload(*location, self.to_string());
    }
}

impl Uniform<MockContext> for glam::Vec4 {
    fn set_uniform(&self, ctx: &MockContext, location: &u32) {
        ctx.record_upload(*location, self.to_string());
    }
}

impl Uniform<MockContext> for glam::Mat4 {
    fn set_uniform(&self, ctx: &MockContext, location: &u32) {
        ctx.record_upload(*location, self.to_string());
    }
}
