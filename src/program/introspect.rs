//! Introspection of a linked program's active uniforms and attributes.

use std::fmt;

use fxhash::FxHashMap;

use crate::abs::GraphicsContext;

/// The two kinds of parameters a program exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterClass {
    Uniform,
    Attribute,
}

impl ParameterClass {
    pub const ALL: [ParameterClass; 2] = [ParameterClass::Uniform, ParameterClass::Attribute];
}

impl fmt::Display for ParameterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterClass::Uniform => write!(f, "uniform"),
            ParameterClass::Attribute => write!(f, "attribute"),
        }
    }
}

/// Where a parameter is bound.
#[derive(Clone, Debug, PartialEq)]
pub enum Location<U> {
    /// A uniform location, opaque to the crate.
    Uniform(U),
    /// A vertex attribute index.
    Attribute(u32),
}

/// Declared name → location, for one parameter class.
pub type ParameterMap<U> = FxHashMap<String, Location<U>>;

/// The active parameters of a linked program, by class.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterTable<U> {
    uniforms: ParameterMap<U>,
    attributes: ParameterMap<U>,
}

impl<U> ParameterTable<U> {
    pub fn get(&self, class: ParameterClass) -> &ParameterMap<U> {
        match class {
            ParameterClass::Uniform => &self.uniforms,
            ParameterClass::Attribute => &self.attributes,
        }
    }

    pub fn uniform(&self, name: &str) -> Option<&U> {
        match self.uniforms.get(name) {
            Some(Location::Uniform(location)) => Some(location),
            _ => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<u32> {
        match self.attributes.get(name) {
            Some(Location::Attribute(index)) => Some(*index),
            _ => None,
        }
    }
}

fn active_count<C: GraphicsContext>(ctx: &C, program: C::Program, class: ParameterClass) -> u32 {
    match class {
        ParameterClass::Uniform => ctx.active_uniform_count(program),
        ParameterClass::Attribute => ctx.active_attribute_count(program),
    }
}

fn active_name<C: GraphicsContext>(
    ctx: &C,
    program: C::Program,
    class: ParameterClass,
    index: u32,
) -> Option<String> {
    match class {
        ParameterClass::Uniform => ctx.active_uniform_name(program, index),
        ParameterClass::Attribute => ctx.active_attribute_name(program, index),
    }
}

fn location<C: GraphicsContext>(
    ctx: &C,
    program: C::Program,
    class: ParameterClass,
    name: &str,
) -> Option<Location<C::UniformLocation>> {
    match class {
        ParameterClass::Uniform => ctx.uniform_location(program, name).map(Location::Uniform),
        ParameterClass::Attribute => ctx
            .attribute_location(program, name)
            .map(Location::Attribute),
    }
}

/// Collects every active parameter of `class` on a linked program.
///
/// Never fails. Entries the driver reports without a name or without a location (built-ins,
/// uniform block members) are skipped and logged.
pub async fn introspect<C: GraphicsContext>(
    ctx: &C,
    program: C::Program,
    class: ParameterClass,
) -> ParameterMap<C::UniformLocation> {
    let count = active_count(ctx, program, class);
    let mut parameters: ParameterMap<C::UniformLocation> = FxHashMap::default();

    for index in 0..count {
        let Some(name) = active_name(ctx, program, class, index) else {
            log::warn!("Active {class} #{index} of program {program:?} has no name, skipping");
            continue;
        };
        if parameters.contains_key(&name) {
            log::warn!("Active {class} '{name}' reported twice, keeping the first location");
            continue;
        }
        let Some(location) = location(ctx, program, class, &name) else {
            log::warn!("Active {class} '{name}' has no location, skipping");
            continue;
        };
        parameters.insert(name, location);
    }

    parameters
}

/// Collects uniforms and attributes, as two independent passes joined together.
pub async fn introspect_all<C: GraphicsContext>(
    ctx: &C,
    program: C::Program,
) -> ParameterTable<C::UniformLocation> {
    let (uniforms, attributes) = futures::join!(
        introspect(ctx, program, ParameterClass::Uniform),
        introspect(ctx, program, ParameterClass::Attribute),
    );
    ParameterTable {
        uniforms,
        attributes,
    }
}
