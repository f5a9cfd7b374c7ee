//! Surface normal decoding.

use crate::renderer::shader_builder::VertexShaderBuilder;

/// Decodes a normal stored as two bytes of an octahedral map.
pub const OCT_DECODE_NORMAL: &str = r#"
vec3 octDecodeNormal(vec2 e) {
  vec2 f = e * (2.0 / 255.0) - vec2(1.0);
  vec3 n = vec3(f.x, f.y, 1.0 - abs(f.x) - abs(f.y));
  if (n.z < 0.0) {
    float sx = n.x >= 0.0 ? 1.0 : -1.0;
    float sy = n.y >= 0.0 ? 1.0 : -1.0;
    n = vec3((1.0 - abs(f.y)) * sx, (1.0 - abs(f.x)) * sy, n.z);
  }
  return normalize(n);
}
"#;

pub fn add_oct_decode_normal(vert: &mut VertexShaderBuilder) {
    vert.add_function(OCT_DECODE_NORMAL);
}
