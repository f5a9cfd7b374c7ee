//! Vertex look-up table decoding, transform matrices and line weight.

use crate::renderer::{
    geometry::{DataType, MeshGeometry, VertexArrayBinding},
    shader_builder::VertexShaderBuilder,
    types::VariableType,
};

/// Two bytes (low, high) to an unsigned 16-bit value.
pub const DECODE_UINT16: &str = r#"
float decodeUInt16(vec2 v) {
  return dot(v, vec2(1.0, 256.0));
}
"#;

/// Three bytes (low to high) to an unsigned 24-bit value.
pub const DECODE_UINT32: &str = r#"
float decodeUInt32(vec3 v) {
  return dot(v, vec3(1.0, 256.0, 65536.0));
}
"#;

/// Texture coordinates of the first texel of entry `srcIndex` in a table
/// storing `mult` texels per entry.
pub const COMPUTE_LUT_COORDS: &str = r#"
vec2 computeLUTCoords(float srcIndex, vec2 dimensions, vec2 center, float mult) {
  float baseIndex = srcIndex * mult;
  float y = floor(baseIndex / dimensions.x);
  float x = baseIndex - y * dimensions.x;
  return vec2(x / dimensions.x, y / dimensions.y) + center;
}
"#;

pub const UNQUANTIZE_POSITION: &str = r#"
vec4 unquantizePosition(vec3 pos, vec3 origin, vec3 scale) {
  return vec4(origin + scale * pos, 1.0);
}
"#;

const DECODE_VERTEX_POSITION: &str = r#"
vec4 decodeVertexPosition(float vertIndex) {
  vec2 tc = computeLUTCoords(vertIndex, u_vertParams.xy, g_vert_center, u_vertParams.z);
  vec4 enc1 = floor(TEXTURE(u_vertLUT, tc) * 255.0 + 0.5);
  tc.x += g_vert_stepX;
  vec4 enc2 = floor(TEXTURE(u_vertLUT, tc) * 255.0 + 0.5);
  vec3 qpos = vec3(decodeUInt16(enc1.xy), decodeUInt16(enc1.zw), decodeUInt16(enc2.xy));
  return unquantizePosition(qpos, u_qOrigin, u_qScale);
}
"#;

const COMPUTE_VERTEX_POSITION: &str = r#"
vec4 computeVertexPosition() {
  return decodeVertexPosition(g_vertexLUTIndex);
}
"#;

const INIT_VERTEX_TABLE: &str = r#"
  g_vert_stepX = 1.0 / u_vertParams.x;
  g_vert_center = vec2(0.5) / u_vertParams.xy;
  g_vertexLUTIndex = decodeUInt32(a_pos);
"#;

// Rows are a row-major 3x4 transform; mat4 takes columns.
const INIT_INSTANCE_MATRIX: &str = r#"
  g_instancedRtcMatrix = mat4(
    a_instanceMatrixRow0.x, a_instanceMatrixRow1.x, a_instanceMatrixRow2.x, 0.0,
    a_instanceMatrixRow0.y, a_instanceMatrixRow1.y, a_instanceMatrixRow2.y, 0.0,
    a_instanceMatrixRow0.z, a_instanceMatrixRow1.z, a_instanceMatrixRow2.z, 0.0,
    a_instanceMatrixRow0.w + u_instanceOrigin.x,
    a_instanceMatrixRow1.w + u_instanceOrigin.y,
    a_instanceMatrixRow2.w + u_instanceOrigin.z,
    1.0);
"#;

const INIT_INSTANCE_NORMAL_MATRIX: &str = r#"
  g_instancedNormalMatrix = mat3(
    a_instanceMatrixRow0.x, a_instanceMatrixRow1.x, a_instanceMatrixRow2.x,
    a_instanceMatrixRow0.y, a_instanceMatrixRow1.y, a_instanceMatrixRow2.y,
    a_instanceMatrixRow0.z, a_instanceMatrixRow1.z, a_instanceMatrixRow2.z);
"#;

const COMPUTE_LINE_WEIGHT: &str = r#"
float computeLineWeight() {
  return u_lineWeight;
}
"#;

// ── Attribute binders ────────────────────────────────────────────────────

fn bind_vertex_indices(geom: &MeshGeometry) -> VertexArrayBinding<'_> {
    VertexArrayBinding {
        name: "a_pos",
        components: 3,
        data_type: DataType::UnsignedByte,
        normalized: false,
        stride: 0,
        offset: 0,
        divisor: 0,
        bytes: bytemuck::cast_slice(&geom.vertex_indices),
    }
}

fn instance_row<'a>(geom: &'a MeshGeometry, name: &'static str, row: u32) -> VertexArrayBinding<'a> {
    let Some(instances) = geom.instances.as_deref() else {
        panic!("{name} requires geometry with instance transforms");
    };
    VertexArrayBinding {
        name,
        components: 4,
        data_type: DataType::Float,
        normalized: false,
        stride: 12 * 4,
        offset: row * 4 * 4,
        divisor: 1,
        bytes: bytemuck::cast_slice(instances),
    }
}

fn bind_instance_row0(geom: &MeshGeometry) -> VertexArrayBinding<'_> {
    instance_row(geom, "a_instanceMatrixRow0", 0)
}

fn bind_instance_row1(geom: &MeshGeometry) -> VertexArrayBinding<'_> {
    instance_row(geom, "a_instanceMatrixRow1", 1)
}

fn bind_instance_row2(geom: &MeshGeometry) -> VertexArrayBinding<'_> {
    instance_row(geom, "a_instanceMatrixRow2", 2)
}

// ── Fragments ────────────────────────────────────────────────────────────

/// Helpers for reading 8-bit-per-channel look-up tables.
pub fn add_lut_decoding(vert: &mut VertexShaderBuilder) {
    vert.add_define("TEXTURE", "texture2D");
    vert.add_function(DECODE_UINT16);
    vert.add_function(DECODE_UINT32);
    vert.add_function(COMPUTE_LUT_COORDS);
    vert.add_function(UNQUANTIZE_POSITION);
}

/// Vertex positions come from a quantized look-up table indexed by `a_pos`.
/// Instanced builders also receive the per-instance transform rows.
pub fn add_vertex_table(vert: &mut VertexShaderBuilder) {
    vert.add_uniform("u_vertLUT", VariableType::Sampler2D);
    vert.add_uniform("u_vertParams", VariableType::Vec4);
    vert.add_uniform("u_qOrigin", VariableType::Vec3);
    vert.add_uniform("u_qScale", VariableType::Vec3);
    vert.add_attribute("a_pos", VariableType::Vec3, bind_vertex_indices);

    vert.add_global("g_vert_stepX", VariableType::Float, None);
    vert.add_global("g_vert_center", VariableType::Vec2, None);
    vert.add_global("g_vertexLUTIndex", VariableType::Float, None);

    add_lut_decoding(vert);
    vert.add_function(DECODE_VERTEX_POSITION);
    vert.add_function(COMPUTE_VERTEX_POSITION);
    vert.add_initializer(INIT_VERTEX_TABLE);

    if vert.is_instanced() {
        vert.add_uniform("u_instanceOrigin", VariableType::Vec3);
        vert.add_attribute("a_instanceMatrixRow0", VariableType::Vec4, bind_instance_row0);
        vert.add_attribute("a_instanceMatrixRow1", VariableType::Vec4, bind_instance_row1);
        vert.add_attribute("a_instanceMatrixRow2", VariableType::Vec4, bind_instance_row2);
        vert.add_global("g_instancedRtcMatrix", VariableType::Mat4, None);
        vert.add_initializer(INIT_INSTANCE_MATRIX);
    }
}

pub fn add_model_view_matrix(vert: &mut VertexShaderBuilder) {
    vert.add_uniform("u_mv", VariableType::Mat4);
    if vert.is_instanced() {
        vert.add_define("MAT_MV", "(u_mv * g_instancedRtcMatrix)");
    } else {
        vert.add_define("MAT_MV", "u_mv");
    }
}

pub fn add_projection_matrix(vert: &mut VertexShaderBuilder) {
    vert.add_uniform("u_proj", VariableType::Mat4);
    vert.add_define("MAT_PROJ", "u_proj");
}

pub fn add_model_view_projection_matrix(vert: &mut VertexShaderBuilder) {
    vert.add_uniform("u_mvp", VariableType::Mat4);
    if vert.is_instanced() {
        vert.add_define("MAT_MVP", "(u_mvp * g_instancedRtcMatrix)");
    } else {
        vert.add_define("MAT_MVP", "u_mvp");
    }
}

pub fn add_normal_matrix(vert: &mut VertexShaderBuilder) {
    vert.add_uniform("u_nmx", VariableType::Mat3);
    if vert.is_instanced() {
        vert.add_global("g_instancedNormalMatrix", VariableType::Mat3, None);
        vert.add_initializer(INIT_INSTANCE_NORMAL_MATRIX);
        vert.add_define("MAT_NORM", "(u_nmx * g_instancedNormalMatrix)");
    } else {
        vert.add_define("MAT_NORM", "u_nmx");
    }
}

pub fn add_line_weight(vert: &mut VertexShaderBuilder) {
    vert.add_uniform("u_lineWeight", VariableType::Float);
    vert.add_function(COMPUTE_LINE_WEIGHT);
}
