//! Fragment-stage post-processing of the base color.

use crate::renderer::{
    shader_builder::{FragmentShaderBuilder, FragmentShaderComponent},
    types::VariableType,
};

// Near-white geometry drawn over a near-white background turns black.
const REVERSE_WHITE_ON_WHITE: &str = r#"
  if (u_reverseWhiteOnWhite > 0.5) {
    vec3 rgb = baseColor.a > 0.0 ? baseColor.rgb / baseColor.a : baseColor.rgb;
    if (all(greaterThanEqual(rgb, vec3(0.95))) && all(greaterThanEqual(u_bgColor, vec3(0.95))))
      baseColor.rgb = vec3(0.0);
  }
  return baseColor;
"#;

pub fn add_white_on_white_reversal(frag: &mut FragmentShaderBuilder) {
    frag.add_uniform("u_reverseWhiteOnWhite", VariableType::Float);
    frag.add_uniform("u_bgColor", VariableType::Vec3);
    frag.set(
        FragmentShaderComponent::ApplyWhiteOnWhiteReversal,
        REVERSE_WHITE_ON_WHITE,
    );
}
