//! GLSL validation using the naga library.
//!
//! Assembled programs target GLSL ES 1.00, which naga does not accept as a
//! whole. The self-contained helper functions of the fragment library are
//! plain enough to be checked on their own, wrapped in a synthetic
//! `#version 450` entry point.

use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, Copy)]
pub enum GlslShaderStage {
    Vertex,
    Fragment,
}

impl GlslShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            GlslShaderStage::Vertex => naga::ShaderStage::Vertex,
            GlslShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

fn parse_and_validate(
    source: &str,
    stage: GlslShaderStage,
) -> Result<(naga::Module, naga::valid::ModuleInfo)> {
    let mut parser = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options {
        stage: stage.naga(),
        defines: Default::default(),
    };

    let module = parser
        .parse(&options, source)
        .map_err(|e| anyhow!("GLSL parse failed: {e:?}\n{}", numbered_source(source)))?;

    let info = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| anyhow!("GLSL validation failed: {e:?}\n{}", numbered_source(source)))?;

    Ok((module, info))
}

/// Parse and type-check a complete GLSL 450 shader.
pub fn validate_glsl(source: &str, stage: GlslShaderStage) -> Result<naga::Module> {
    parse_and_validate(source, stage).map(|(module, _)| module)
}

pub fn glsl_to_wgsl(source: &str, stage: GlslShaderStage) -> Result<String> {
    let (module, info) = parse_and_validate(source, stage)?;
    naga::back::wgsl::write_string(
        &module,
        &info,
        naga::back::wgsl::WriterFlags::EXPLICIT_TYPES,
    )
    .map_err(|e| anyhow!("WGSL writer failed: {e:?}"))
}

/// Wraps helper functions in a fragment entry point.
///
/// `main_body` runs with `v_in` (a `vec4` input) in scope and must assign
/// `o_color` (a `vec4` output).
pub fn helper_test_shader(functions: &[&str], main_body: &str) -> String {
    let mut out = String::from(
        "#version 450\n\
         layout(location = 0) in vec4 v_in;\n\
         layout(location = 0) out vec4 o_color;\n",
    );
    for function in functions {
        out.push_str(function.trim());
        out.push('\n');
    }
    out.push_str("void main() {\n");
    out.push_str(main_body.trim());
    out.push_str("\n}\n");
    out
}

/// Validate a set of GLSL helper functions by calling them from `main_body`.
pub fn validate_glsl_functions(functions: &[&str], main_body: &str) -> Result<naga::Module> {
    let source = helper_test_shader(functions, main_body);
    validate_glsl(&source, GlslShaderStage::Fragment)
        .with_context(|| format!("{} helper function(s) failed to validate", functions.len()))
}

fn numbered_source(source: &str) -> String {
    let mut output = String::from("---\n");
    for (line_num, line) in source.lines().enumerate() {
        output.push_str(&format!("{:4} | {}\n", line_num + 1, line));
    }
    output.push_str("---\n");
    output
}
