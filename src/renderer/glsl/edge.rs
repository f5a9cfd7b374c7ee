//! Edge and silhouette programs.
//!
//! Edges are drawn as camera-facing quads, four corners per segment. Every
//! vertex knows the opposite endpoint of its segment (through the packed
//! `a_endPointAndQuadIndices` attribute) and which corner it is, and offsets
//! itself perpendicular to the projected segment so the quad keeps a constant
//! pixel width regardless of distance.
//!
//! Silhouettes are edges that are only kept where the two faces sharing the
//! edge point in different directions relative to the eye. Non-silhouette
//! vertices are discarded early in the vertex shader.

use crate::renderer::{
    geometry::{DataType, MeshGeometry, VertexArrayBinding},
    glsl::{
        animation::add_animation,
        color::add_color,
        common::add_shader_flags,
        fragment::add_white_on_white_reversal,
        polyline::{ADJUST_WIDTH, add_line_code},
        surface::add_oct_decode_normal,
        vertex::{add_line_weight, add_model_view_matrix, add_normal_matrix, add_projection_matrix},
        viewport::{add_model_to_window_coordinates, add_viewport},
    },
    shader_builder::{ProgramBuilder, ShaderBuilderFlags, VertexShaderComponent},
    technique_flags::{IsAnimated, IsInstanced},
    types::VariableType,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    Plain,
    Silhouette,
}

const DECODE_END_POINT_AND_QUAD_INDICES: &str = r#"
  g_otherIndex = decodeUInt32(a_endPointAndQuadIndices.xyz);
  g_otherPos = decodeVertexPosition(g_otherIndex);
  g_quadIndex = a_endPointAndQuadIndices.w;
"#;

const ANIMATE_END_POINT: &str = r#"
  g_otherPos.xyz += computeAnimationDisplacement(g_otherIndex, u_animDispParams.x, u_animDispParams.y, u_animDispParams.z, u_qAnimDispOrigin, u_qAnimDispScale);
"#;

// Orthographic: discard unless the view-space normals straddle the view plane.
// Perspective: discard unless the faces disagree about the eye direction at
// both endpoints.
const CHECK_FOR_SILHOUETTE_DISCARD: &str = r#"
  vec3 n0 = MAT_NORM * octDecodeNormal(a_normals.xy);
  vec3 n1 = MAT_NORM * octDecodeNormal(a_normals.zw);

  if (0.0 == MAT_PROJ[2].w)
    return n0.z * n1.z > 0.0;

  vec3 toEye = normalize((MAT_MV * rawPos).xyz);
  if (dot(n0, toEye) * dot(n1, toEye) > 0.0)
    return true;

  toEye = normalize((MAT_MV * g_otherPos).xyz);
  return dot(n0, toEye) * dot(n1, toEye) > 0.0;
"#;

// Corners 0 and 3 sit on the negative side of the segment; corners 2 and 3
// belong to the far endpoint and carry the segment length for the line code.
const COMPUTE_POSITION: &str = r#"
  v_lnInfo = vec4(0.0);
  vec4 pos = MAT_MVP * rawPos;
  vec4 other = g_otherPos;
  float weight = computeLineWeight();

  g_windowPos = modelToWindowCoordinates(rawPos, other);
  if (g_windowPos.w == 0.0)
    return g_windowPos;

  vec4 projOther = modelToWindowCoordinates(other, rawPos);
  g_windowDir = projOther.xy - g_windowPos.xy;
  adjustWidth(weight, g_windowDir);
  g_windowDir = normalize(g_windowDir);

  vec2 perp = vec2(-g_windowDir.y, g_windowDir.x);
  float perpDist = 0.5 * weight;
  if (g_quadIndex == 0.0 || g_quadIndex == 3.0)
    perpDist = -perpDist;

  float alongDist = g_quadIndex >= 2.0 ? distance(rawPos, other) : 0.0;

  pos.x += perp.x * perpDist * 2.0 * pos.w / u_viewport.z;
  pos.y += perp.y * perpDist * 2.0 * pos.w / u_viewport.w;

  lineCodeEyePos = 0.5 * (rawPos + other);
  lineCodeDist = alongDist;
  return pos;
"#;

const LINE_CODE_ARGS: &str = "g_windowDir, g_windowPos, 0.0";

// ── Attribute binders ────────────────────────────────────────────────────

fn bind_end_point_and_quad_indices(geom: &MeshGeometry) -> VertexArrayBinding<'_> {
    let Some(edge) = geom.as_edge() else {
        panic!("a_endPointAndQuadIndices requires edge geometry, got {}", geom.kind.label());
    };
    VertexArrayBinding {
        name: "a_endPointAndQuadIndices",
        components: 4,
        data_type: DataType::UnsignedByte,
        normalized: false,
        stride: 0,
        offset: 0,
        divisor: 0,
        bytes: bytemuck::cast_slice(&edge.end_point_and_quad_indices),
    }
}

fn bind_normal_pairs(geom: &MeshGeometry) -> VertexArrayBinding<'_> {
    let Some(silhouette) = geom.as_silhouette() else {
        panic!("a_normals requires silhouette geometry, got {}", geom.kind.label());
    };
    VertexArrayBinding {
        name: "a_normals",
        components: 4,
        data_type: DataType::UnsignedByte,
        normalized: false,
        stride: 0,
        offset: 0,
        divisor: 0,
        bytes: bytemuck::cast_slice(&silhouette.normal_pairs),
    }
}

// ── Builders ─────────────────────────────────────────────────────────────

fn create_base(kind: EdgeKind, instanced: IsInstanced, animated: IsAnimated) -> ProgramBuilder {
    let flags = match instanced {
        IsInstanced::Yes => ShaderBuilderFlags::InstancedVertexTable,
        IsInstanced::No => ShaderBuilderFlags::VertexTable,
    };
    let mut builder = ProgramBuilder::new(flags);

    let vert = &mut builder.vert;
    vert.add_global("g_otherPos", VariableType::Vec4, None);
    vert.add_global("g_quadIndex", VariableType::Float, None);
    vert.add_global("g_windowPos", VariableType::Vec4, None);
    vert.add_global("g_windowDir", VariableType::Vec2, None);
    vert.add_global("g_otherIndex", VariableType::Float, None);

    vert.add_initializer(DECODE_END_POINT_AND_QUAD_INDICES);
    if animated == IsAnimated::Yes {
        add_animation(vert);
        vert.add_initializer(ANIMATE_END_POINT);
    }

    vert.add_global("lineCodeEyePos", VariableType::Vec4, None);
    vert.add_global("lineCodeDist", VariableType::Float, Some("0.0"));

    add_model_to_window_coordinates(vert);
    add_projection_matrix(vert);
    add_line_code(&mut builder, LINE_CODE_ARGS);
    builder
        .vert
        .set(VertexShaderComponent::ComputePosition, COMPUTE_POSITION);
    builder.add_varying("v_lnInfo", VariableType::Vec4);

    let vert = &mut builder.vert;
    vert.add_function(ADJUST_WIDTH);
    add_viewport(vert);
    add_model_view_matrix(vert);
    vert.add_attribute(
        "a_endPointAndQuadIndices",
        VariableType::Vec4,
        bind_end_point_and_quad_indices,
    );
    add_line_weight(vert);

    if kind == EdgeKind::Silhouette {
        add_normal_matrix(vert);
        add_oct_decode_normal(vert);
        vert.set(
            VertexShaderComponent::CheckForEarlyDiscard,
            CHECK_FOR_SILHOUETTE_DISCARD,
        );
        vert.add_attribute("a_normals", VariableType::Vec4, bind_normal_pairs);
    }

    builder
}

/// Assembles the program for one edge variant. Pure: identical arguments
/// yield identical sources.
pub fn create_edge_builder(
    kind: EdgeKind,
    instanced: IsInstanced,
    animated: IsAnimated,
) -> ProgramBuilder {
    let mut builder = create_base(kind, instanced, animated);
    add_shader_flags(&mut builder);
    add_color(&mut builder);
    add_white_on_white_reversal(&mut builder.frag);
    builder
}
