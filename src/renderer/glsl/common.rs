//! Shader flags and render-pass constants shared by both stages.

use crate::renderer::{
    shader_builder::{ProgramBuilder, ShaderBuilder},
    types::{RenderPass, VariableType},
};

/// Bit positions within `u_shaderFlags`.
pub const SHADER_BITS: [(&str, u32); 5] = [
    ("kShaderBit_Monochrome", 0),
    ("kShaderBit_NonUniformColor", 1),
    ("kShaderBit_OITFlatAlphaWeight", 2),
    ("kShaderBit_OITScaleOutput", 3),
    ("kShaderBit_IgnoreNonLocatable", 4),
];

const IS_SHADER_BIT_SET: &str = r#"
bool isShaderBitSet(float flag) {
  return 0.0 != mod(floor(u_shaderFlags / pow(2.0, flag)), 2.0);
}
"#;

fn add_flags_to(shader: &mut ShaderBuilder) {
    shader.add_uniform("u_shaderFlags", VariableType::Float);
    shader.add_uniform("u_renderPass", VariableType::Float);
    for (name, bit) in SHADER_BITS {
        shader.add_constant(name, VariableType::Float, &format!("{bit}.0"));
    }
    for pass in RenderPass::ALL {
        shader.add_constant(
            &format!("kRenderPass_{}", pass.glsl_name()),
            VariableType::Float,
            &format!("{}.0", pass as u32),
        );
    }
    shader.add_function(IS_SHADER_BIT_SET);
}

/// Injects `u_shaderFlags`, `u_renderPass` and their constants into both stages.
pub fn add_shader_flags(builder: &mut ProgramBuilder) {
    add_flags_to(&mut builder.vert);
    add_flags_to(&mut builder.frag);
}

#[cfg(test)]
mod tests {
    use crate::renderer::shader_builder::ShaderBuilderFlags;

    use super::*;

    #[test]
    fn render_pass_constants_match_discriminants() {
        let mut builder = ProgramBuilder::new(ShaderBuilderFlags::VertexTable);
        add_shader_flags(&mut builder);
        let source = builder.build();

        assert!(source.fragment.contains("const float kRenderPass_Translucent = 6.0;"));
        assert!(source.vertex.contains("const float kRenderPass_Hilite = 8.0;"));
        assert!(source.vertex.contains("const float kShaderBit_Monochrome = 0.0;"));
    }
}
