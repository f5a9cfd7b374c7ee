//! Viewport and model-to-window projection.

use crate::renderer::{
    glsl::vertex::add_model_view_projection_matrix, shader_builder::VertexShaderBuilder,
    types::VariableType,
};

// Returns w == 0 when the point and its neighbour are both behind the eye.
// Otherwise a point behind the eye is pulled along the segment to just in
// front of it before the perspective divide.
const MODEL_TO_WINDOW_COORDINATES: &str = r#"
vec4 modelToWindowCoordinates(vec4 position, vec4 next) {
  vec4 q = MAT_MVP * position;
  if (q.w <= 0.0) {
    vec4 n = MAT_MVP * next;
    if (n.w <= 0.0)
      return vec4(0.0);

    float t = (0.0001 - q.w) / (n.w - q.w);
    q = mix(q, n, t);
  }

  q.xyz /= q.w;
  q.xy = (q.xy * 0.5 + 0.5) * u_viewport.zw + u_viewport.xy;
  q.w = 1.0;
  return q;
}
"#;

/// `u_viewport` is (x, y, width, height) in pixels.
pub fn add_viewport(vert: &mut VertexShaderBuilder) {
    vert.add_uniform("u_viewport", VariableType::Vec4);
}

pub fn add_model_to_window_coordinates(vert: &mut VertexShaderBuilder) {
    add_model_view_projection_matrix(vert);
    add_viewport(vert);
    vert.add_function(MODEL_TO_WINDOW_COORDINATES);
}
