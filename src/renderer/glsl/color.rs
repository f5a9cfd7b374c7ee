//! Base color resolution.

use crate::renderer::{
    glsl::common::add_shader_flags,
    shader_builder::{FragmentShaderComponent, ProgramBuilder, VertexShaderComponent},
    types::VariableType,
};

const COMPUTE_VERTEX_BASE_COLOR: &str = r#"
  vec4 color = u_color;
  if (isShaderBitSet(kShaderBit_Monochrome))
    color.rgb = u_monoRgb;
  return color;
"#;

const COMPUTE_FRAGMENT_BASE_COLOR: &str = "return v_color;";

/// Uniform color resolved per vertex and interpolated into `v_color`.
pub fn add_color(builder: &mut ProgramBuilder) {
    add_shader_flags(builder);
    builder.vert.add_uniform("u_color", VariableType::Vec4);
    builder.vert.add_uniform("u_monoRgb", VariableType::Vec3);
    builder
        .vert
        .set(VertexShaderComponent::ComputeBaseColor, COMPUTE_VERTEX_BASE_COLOR);
    builder.add_function_computed_varying("v_color", VariableType::Vec4, "baseColor");
    builder
        .frag
        .set(FragmentShaderComponent::ComputeBaseColor, COMPUTE_FRAGMENT_BASE_COLOR);
}
