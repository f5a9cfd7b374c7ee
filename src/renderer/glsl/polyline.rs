//! Line-drawing support shared by edges and polylines: width adjustment and
//! line codes (stipple patterns).

use crate::renderer::{
    shader_builder::{FragmentShaderComponent, ProgramBuilder},
    types::VariableType,
};

/// Widens thin lines so they cover at least one pixel, and compensates
/// diagonal lines for the pixels lost to rasterization.
pub const ADJUST_WIDTH: &str = r#"
void adjustWidth(inout float width, vec2 d2) {
  width = max(width, 1.0);
  vec2 d2A = abs(d2);
  float major = max(d2A.x, d2A.y);
  if (width < 4.5 && major > 0.0001)
    width *= length(d2A) / major;
}
"#;

const COMPUTE_LINE_CODE: &str = r#"
float computeLineCode() {
  return u_lineCode;
}
"#;

// Line code textures hold 16 patterns, 32 pixels each. A negative s
// coordinate marks a solid line.
const COMPUTE_LINE_CODE_TEXTURE_COORDS: &str = r#"
vec2 computeLineCodeTextureCoords(vec2 windowDir, vec4 windowPos, float adjust) {
  float lineCode = computeLineCode();
  if (0.0 == lineCode)
    return vec2(-1.0, 0.0);

  v_lnInfo.w = 1.0;
  vec2 absDir = abs(windowDir);
  float pixels = absDir.x > absDir.y ? windowPos.x : windowPos.y;
  pixels += lineCodeDist + adjust;
  return vec2(pixels / 32.0, (lineCode + 0.5) / 16.0);
}
"#;

const APPLY_LINE_CODE: &str = r#"
  if (v_lnInfo.w > 0.5) {
    vec4 texColor = TEXTURE(u_lineCodeTexture, v_texc);
    if (texColor.a < 0.5)
      discard;
  }
  return baseColor;
"#;

/// Adds line-code stippling. `args` are the window direction, window
/// position and pattern offset expressions passed to the texture-coordinate
/// computation at the end of the vertex shader.
pub fn add_line_code(builder: &mut ProgramBuilder, args: &str) {
    builder.vert.add_uniform("u_lineCode", VariableType::Float);
    builder.vert.add_global("lineCodeEyePos", VariableType::Vec4, None);
    builder
        .vert
        .add_global("lineCodeDist", VariableType::Float, Some("0.0"));
    builder.add_varying("v_lnInfo", VariableType::Vec4);
    builder.vert.add_function(COMPUTE_LINE_CODE);
    builder.vert.add_function(COMPUTE_LINE_CODE_TEXTURE_COORDS);
    builder.add_function_computed_varying(
        "v_texc",
        VariableType::Vec2,
        &format!("computeLineCodeTextureCoords({args})"),
    );

    builder.frag.add_define("TEXTURE", "texture2D");
    builder
        .frag
        .add_uniform("u_lineCodeTexture", VariableType::Sampler2D);
    builder
        .frag
        .set(FragmentShaderComponent::FinalizeBaseColor, APPLY_LINE_CODE);
}
