//! Per-vertex animation displacement read from a look-up texture.

use crate::renderer::{
    glsl::vertex::add_lut_decoding,
    shader_builder::{VertexShaderBuilder, VertexShaderComponent},
    types::VariableType,
};

// Displacements are quantized like positions: two texels per vertex, three
// 16-bit components.
const COMPUTE_ANIMATION_DISPLACEMENT: &str = r#"
vec3 computeAnimationDisplacement(float vertIndex, float texelsPerVertex, float width, float height, vec3 origin, vec3 scale) {
  if (0.0 == width)
    return vec3(0.0);

  vec2 dims = vec2(width, height);
  vec2 tc = computeLUTCoords(vertIndex, dims, vec2(0.5) / dims, texelsPerVertex);
  vec4 enc1 = floor(TEXTURE(u_animDispTexture, tc) * 255.0 + 0.5);
  tc.x += 1.0 / width;
  vec4 enc2 = floor(TEXTURE(u_animDispTexture, tc) * 255.0 + 0.5);
  vec3 qdisp = vec3(decodeUInt16(enc1.xy), decodeUInt16(enc1.zw), decodeUInt16(enc2.xy));
  return origin + scale * qdisp;
}
"#;

const ADJUST_RAW_POSITION: &str = r#"
  rawPos.xyz += computeAnimationDisplacement(g_vertexLUTIndex, u_animDispParams.x, u_animDispParams.y, u_animDispParams.z, u_qAnimDispOrigin, u_qAnimDispScale);
  return rawPos;
"#;

/// Displaces the vertex's own position. `u_animDispParams` is
/// (texels per vertex, texture width, texture height).
pub fn add_animation(vert: &mut VertexShaderBuilder) {
    vert.add_uniform("u_animDispTexture", VariableType::Sampler2D);
    vert.add_uniform("u_animDispParams", VariableType::Vec3);
    vert.add_uniform("u_qAnimDispOrigin", VariableType::Vec3);
    vert.add_uniform("u_qAnimDispScale", VariableType::Vec3);
    add_lut_decoding(vert);
    vert.add_function(COMPUTE_ANIMATION_DISPLACEMENT);
    vert.set(VertexShaderComponent::AdjustRawPosition, ADJUST_RAW_POSITION);
}
