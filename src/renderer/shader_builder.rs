//! GLSL program builder.
//!
//! Programs are assembled textually from reusable fragments. Each stage keeps
//! its declarations in insertion order and deduplicates them by name (or by
//! full text for functions and initializers), so identical call sequences
//! always produce byte-identical source.
//!
//! The vertex `main` runs, in order: initializers, the raw position fetch from
//! the vertex look-up table, then the optional [`VertexShaderComponent`] slots,
//! and finally the computed varyings. The fragment `main` runs its initializers
//! followed by the optional [`FragmentShaderComponent`] slots.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::renderer::{
    geometry::{MeshGeometry, VertexArrayBinding},
    glsl::vertex::add_vertex_table,
    types::VariableType,
};

/// Resolves an attribute's vertex array from the geometry being drawn.
///
/// Binders assert that the geometry is of the kind the attribute expects; a
/// mismatch is a caller bug and panics.
pub type AttributeBinder = for<'a> fn(&'a MeshGeometry) -> VertexArrayBinding<'a>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderVariable {
    pub name: String,
    pub ty: VariableType,
    /// Initial value for globals, value for constants.
    pub value: Option<String>,
}

impl ShaderVariable {
    fn new(name: &str, ty: VariableType, value: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            ty,
            value: value.map(str::to_string),
        }
    }

    fn declaration(&self, qualifier: &str) -> String {
        let mut decl = String::new();
        if !qualifier.is_empty() {
            decl.push_str(qualifier);
            decl.push(' ');
        }
        decl.push_str(self.ty.glsl());
        decl.push(' ');
        decl.push_str(&self.name);
        if let Some(value) = &self.value {
            decl.push_str(" = ");
            decl.push_str(value);
        }
        decl.push(';');
        decl
    }
}

/// Selects how vertex positions reach the vertex shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderBuilderFlags {
    /// Quantized positions read from the vertex look-up table.
    VertexTable,
    /// As `VertexTable`, plus per-instance transforms.
    InstancedVertexTable,
}

impl ShaderBuilderFlags {
    pub fn is_instanced(self) -> bool {
        self == ShaderBuilderFlags::InstancedVertexTable
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexShaderComponent {
    AdjustRawPosition,
    CheckForEarlyDiscard,
    ComputeBaseColor,
    ComputePosition,
}

impl VertexShaderComponent {
    fn prototype(self) -> &'static str {
        match self {
            VertexShaderComponent::AdjustRawPosition => "vec4 adjustRawPosition(vec4 rawPos)",
            VertexShaderComponent::CheckForEarlyDiscard => "bool checkForEarlyDiscard(vec4 rawPos)",
            VertexShaderComponent::ComputeBaseColor => "vec4 computeBaseColor()",
            VertexShaderComponent::ComputePosition => "vec4 computePosition(vec4 rawPos)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FragmentShaderComponent {
    ComputeBaseColor,
    FinalizeBaseColor,
    ApplyWhiteOnWhiteReversal,
}

impl FragmentShaderComponent {
    fn prototype(self) -> &'static str {
        match self {
            FragmentShaderComponent::ComputeBaseColor => "vec4 computeBaseColor()",
            FragmentShaderComponent::FinalizeBaseColor => {
                "vec4 finalizeBaseColor(vec4 baseColor)"
            }
            FragmentShaderComponent::ApplyWhiteOnWhiteReversal => {
                "vec4 applyWhiteOnWhiteReversal(vec4 baseColor)"
            }
        }
    }
}

/// Declarations shared by both stages.
#[derive(Clone, Debug, Default)]
pub struct ShaderBuilder {
    defines: Vec<(String, String)>,
    uniforms: Vec<ShaderVariable>,
    varyings: Vec<ShaderVariable>,
    constants: Vec<ShaderVariable>,
    globals: Vec<ShaderVariable>,
    functions: Vec<String>,
    initializers: Vec<String>,
}

impl ShaderBuilder {
    /// First definition of a name wins.
    pub fn add_define(&mut self, name: &str, value: &str) {
        if !self.defines.iter().any(|(n, _)| n == name) {
            self.defines.push((name.to_string(), value.to_string()));
        }
    }

    pub fn add_uniform(&mut self, name: &str, ty: VariableType) {
        if !self.has_uniform(name) {
            self.uniforms.push(ShaderVariable::new(name, ty, None));
        }
    }

    pub fn add_constant(&mut self, name: &str, ty: VariableType, value: &str) {
        if !self.constants.iter().any(|c| c.name == name) {
            self.constants.push(ShaderVariable::new(name, ty, Some(value)));
        }
    }

    pub fn add_global(&mut self, name: &str, ty: VariableType, value: Option<&str>) {
        if !self.has_global(name) {
            self.globals.push(ShaderVariable::new(name, ty, value));
        }
    }

    /// Functions are emitted in insertion order; a function must be added
    /// after the functions it calls.
    pub fn add_function(&mut self, source: &str) {
        let source = source.trim();
        if !self.functions.iter().any(|f| f == source) {
            self.functions.push(source.to_string());
        }
    }

    /// Initializers run at the top of `main`, each in its own scope.
    pub fn add_initializer(&mut self, source: &str) {
        if !self.has_initializer(source) {
            self.initializers.push(source.to_string());
        }
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.iter().any(|u| u.name == name)
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.iter().any(|g| g.name == name)
    }

    pub fn has_varying(&self, name: &str) -> bool {
        self.varyings.iter().any(|v| v.name == name)
    }

    pub fn has_function(&self, source: &str) -> bool {
        let source = source.trim();
        self.functions.iter().any(|f| f == source)
    }

    pub fn has_initializer(&self, source: &str) -> bool {
        let source = source.trim();
        self.initializers.iter().any(|i| i.trim() == source)
    }

    fn add_varying(&mut self, name: &str, ty: VariableType) {
        if !self.has_varying(name) {
            self.varyings.push(ShaderVariable::new(name, ty, None));
        }
    }

    fn emit_header(&self, out: &mut String) {
        for (name, value) in &self.defines {
            out.push_str(&format!("#define {name} {value}\n"));
        }
        out.push_str("precision highp float;\n");
    }

    fn emit_declarations(&self, out: &mut String, attributes: &[ShaderVariable]) {
        push_block(out, self.uniforms.iter().map(|u| u.declaration("uniform")));
        push_block(out, attributes.iter().map(|a| a.declaration("attribute")));
        push_block(out, self.varyings.iter().map(|v| v.declaration("varying")));
        push_block(out, self.constants.iter().map(|c| c.declaration("const")));
        push_block(out, self.globals.iter().map(|g| g.declaration("")));
        for function in &self.functions {
            out.push('\n');
            out.push_str(function);
            out.push('\n');
        }
    }

    fn emit_initializers(&self, out: &mut String) {
        for init in &self.initializers {
            out.push_str("  {\n");
            out.push_str(&indent_glsl_body(init, 2));
            out.push_str("\n  }\n");
        }
    }
}

fn push_block(out: &mut String, lines: impl Iterator<Item = String>) {
    let mut any = false;
    for line in lines {
        if !any {
            out.push('\n');
            any = true;
        }
        out.push_str(&line);
        out.push('\n');
    }
}

fn emit_component(out: &mut String, prototype: &str, body: &str) {
    out.push('\n');
    out.push_str(prototype);
    out.push_str(" {\n");
    out.push_str(&indent_glsl_body(body, 1));
    out.push_str("\n}\n");
}

fn indent_glsl_body(source: &str, indent_levels: usize) -> String {
    let indent = "  ".repeat(indent_levels);
    let normalized = source.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.lines().collect();
    // Strip the common leading indentation of the fragment before re-indenting.
    // Only ASCII spaces and tabs count, so the cut always lands on a char boundary.
    let common = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| {
            let line = line.trim_end();
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{indent}{}", &line[common..])
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

pub struct VertexShaderBuilder {
    base: ShaderBuilder,
    flags: ShaderBuilderFlags,
    attributes: Vec<(ShaderVariable, AttributeBinder)>,
    components: BTreeMap<VertexShaderComponent, String>,
    computed_varyings: Vec<(String, String)>,
}

impl Deref for VertexShaderBuilder {
    type Target = ShaderBuilder;

    fn deref(&self) -> &ShaderBuilder {
        &self.base
    }
}

impl DerefMut for VertexShaderBuilder {
    fn deref_mut(&mut self) -> &mut ShaderBuilder {
        &mut self.base
    }
}

impl VertexShaderBuilder {
    fn new(flags: ShaderBuilderFlags) -> Self {
        Self {
            base: ShaderBuilder::default(),
            flags,
            attributes: Vec::new(),
            components: BTreeMap::new(),
            computed_varyings: Vec::new(),
        }
    }

    pub fn flags(&self) -> ShaderBuilderFlags {
        self.flags
    }

    pub fn is_instanced(&self) -> bool {
        self.flags.is_instanced()
    }

    pub fn add_attribute(&mut self, name: &str, ty: VariableType, binder: AttributeBinder) {
        if !self.has_attribute(name) {
            self.attributes
                .push((ShaderVariable::new(name, ty, None), binder));
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(a, _)| a.name == name)
    }

    /// Replaces any previous body for the slot.
    pub fn set(&mut self, component: VertexShaderComponent, body: &str) {
        self.components.insert(component, body.to_string());
    }

    pub fn get(&self, component: VertexShaderComponent) -> Option<&str> {
        self.components.get(&component).map(String::as_str)
    }

    fn build(&self) -> String {
        let mut out = String::new();
        self.base.emit_header(&mut out);
        let attributes: Vec<ShaderVariable> =
            self.attributes.iter().map(|(a, _)| a.clone()).collect();
        self.base.emit_declarations(&mut out, &attributes);
        for (component, body) in &self.components {
            emit_component(&mut out, component.prototype(), body);
        }

        let has = |c: VertexShaderComponent| self.components.contains_key(&c);
        out.push_str("\nvoid main() {\n");
        self.base.emit_initializers(&mut out);
        out.push_str("  vec4 rawPosition = computeVertexPosition();\n");
        if has(VertexShaderComponent::AdjustRawPosition) {
            out.push_str("  rawPosition = adjustRawPosition(rawPosition);\n");
        }
        if has(VertexShaderComponent::CheckForEarlyDiscard) {
            out.push_str("  if (checkForEarlyDiscard(rawPosition)) {\n");
            out.push_str("    gl_Position = vec4(2.0, 2.0, 2.0, 1.0);\n");
            out.push_str("    return;\n");
            out.push_str("  }\n");
        }
        if has(VertexShaderComponent::ComputeBaseColor) {
            out.push_str("  vec4 baseColor = computeBaseColor();\n");
        } else {
            out.push_str("  vec4 baseColor = vec4(1.0);\n");
        }
        if has(VertexShaderComponent::ComputePosition) {
            out.push_str("  gl_Position = computePosition(rawPosition);\n");
        } else {
            out.push_str("  gl_Position = rawPosition;\n");
        }
        for (name, computation) in &self.computed_varyings {
            out.push_str(&format!("  {name} = {computation};\n"));
        }
        out.push_str("}\n");
        out
    }
}

pub struct FragmentShaderBuilder {
    base: ShaderBuilder,
    components: BTreeMap<FragmentShaderComponent, String>,
}

impl Deref for FragmentShaderBuilder {
    type Target = ShaderBuilder;

    fn deref(&self) -> &ShaderBuilder {
        &self.base
    }
}

impl DerefMut for FragmentShaderBuilder {
    fn deref_mut(&mut self) -> &mut ShaderBuilder {
        &mut self.base
    }
}

impl FragmentShaderBuilder {
    fn new() -> Self {
        Self {
            base: ShaderBuilder::default(),
            components: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, component: FragmentShaderComponent, body: &str) {
        self.components.insert(component, body.to_string());
    }

    pub fn get(&self, component: FragmentShaderComponent) -> Option<&str> {
        self.components.get(&component).map(String::as_str)
    }

    fn build(&self) -> String {
        let mut out = String::new();
        self.base.emit_header(&mut out);
        self.base.emit_declarations(&mut out, &[]);
        for (component, body) in &self.components {
            emit_component(&mut out, component.prototype(), body);
        }

        let has = |c: FragmentShaderComponent| self.components.contains_key(&c);
        out.push_str("\nvoid main() {\n");
        self.base.emit_initializers(&mut out);
        if has(FragmentShaderComponent::ComputeBaseColor) {
            out.push_str("  vec4 baseColor = computeBaseColor();\n");
        } else {
            out.push_str("  vec4 baseColor = vec4(1.0);\n");
        }
        if has(FragmentShaderComponent::FinalizeBaseColor) {
            out.push_str("  baseColor = finalizeBaseColor(baseColor);\n");
        }
        if has(FragmentShaderComponent::ApplyWhiteOnWhiteReversal) {
            out.push_str("  baseColor = applyWhiteOnWhiteReversal(baseColor);\n");
        }
        out.push_str("  gl_FragColor = baseColor;\n");
        out.push_str("}\n");
        out
    }
}

/// Builds a vertex and fragment shader pair.
pub struct ProgramBuilder {
    pub vert: VertexShaderBuilder,
    pub frag: FragmentShaderBuilder,
}

impl ProgramBuilder {
    pub fn new(flags: ShaderBuilderFlags) -> Self {
        let mut builder = Self {
            vert: VertexShaderBuilder::new(flags),
            frag: FragmentShaderBuilder::new(),
        };
        add_vertex_table(&mut builder.vert);
        builder
    }

    /// Declares a varying in both stages.
    pub fn add_varying(&mut self, name: &str, ty: VariableType) {
        self.vert.add_varying(name, ty);
        self.frag.add_varying(name, ty);
    }

    /// Declares a varying assigned from `computation` at the end of the vertex `main`.
    pub fn add_function_computed_varying(&mut self, name: &str, ty: VariableType, computation: &str) {
        self.add_varying(name, ty);
        if !self.vert.computed_varyings.iter().any(|(n, _)| n == name) {
            self.vert
                .computed_varyings
                .push((name.to_string(), computation.to_string()));
        }
    }

    pub fn build(&self) -> ShaderProgramSource {
        ShaderProgramSource {
            vertex: self.vert.build(),
            fragment: self.frag.build(),
            attributes: self
                .vert
                .attributes
                .iter()
                .map(|(var, binder)| ProgramAttribute {
                    name: var.name.clone(),
                    ty: var.ty,
                    binder: *binder,
                })
                .collect(),
        }
    }
}

#[derive(Clone)]
pub struct ProgramAttribute {
    pub name: String,
    pub ty: VariableType,
    pub binder: AttributeBinder,
}

impl fmt::Debug for ProgramAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgramAttribute")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

/// Assembled program: both stage sources and the attribute binders.
#[derive(Clone, Debug)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
    pub attributes: Vec<ProgramAttribute>,
}

impl ShaderProgramSource {
    pub fn attribute(&self, name: &str) -> Option<&ProgramAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Resolves every attribute against `geometry`, in declaration order.
    pub fn bind_attributes<'a>(&self, geometry: &'a MeshGeometry) -> Vec<VertexArrayBinding<'a>> {
        self.attributes
            .iter()
            .map(|attr| (attr.binder)(geometry))
            .collect()
    }

    /// True when both stage sources and the attribute layout match.
    pub fn same_source(&self, other: &ShaderProgramSource) -> bool {
        self.vertex == other.vertex
            && self.fragment == other.fragment
            && self.attributes.len() == other.attributes.len()
            && self
                .attributes
                .iter()
                .zip(&other.attributes)
                .all(|(a, b)| a.name == b.name && a.ty == b.ty)
    }
}
