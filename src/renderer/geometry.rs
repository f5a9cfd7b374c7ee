//! Geometry handed to attribute binders at draw time.
//!
//! Only the buffers the edge techniques read are modelled: packed vertex
//! indices into the vertex look-up table, the packed edge endpoint table, the
//! silhouette normal pairs, and optional per-instance transforms.

/// Component type of a vertex array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    UnsignedByte,
    Float,
}

/// Describes how one attribute reads from a geometry buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexArrayBinding<'a> {
    pub name: &'static str,
    pub components: u32,
    pub data_type: DataType,
    pub normalized: bool,
    pub stride: u32,
    pub offset: u32,
    /// 0 for per-vertex data, 1 for per-instance data.
    pub divisor: u32,
    pub bytes: &'a [u8],
}

/// Per-segment data for edges: the opposite endpoint's 24-bit vertex index in
/// `xyz` and the quad corner (0..=3) in `w`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeData {
    pub end_point_and_quad_indices: Vec<[u8; 4]>,
}

/// Edge data plus the oct-encoded normals of the two faces sharing the edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SilhouetteData {
    pub edge: EdgeData,
    pub normal_pairs: Vec<[u8; 4]>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GeometryKind {
    Surface,
    Edge(EdgeData),
    Silhouette(SilhouetteData),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshGeometry {
    /// 24-bit index into the vertex look-up table, one per vertex.
    pub vertex_indices: Vec<[u8; 3]>,
    /// Row-major 3x4 transforms, one per instance.
    pub instances: Option<Vec<[f32; 12]>>,
    pub kind: GeometryKind,
}

impl GeometryKind {
    pub fn label(&self) -> &'static str {
        match self {
            GeometryKind::Surface => "surface",
            GeometryKind::Edge(_) => "edge",
            GeometryKind::Silhouette(_) => "silhouette",
        }
    }
}

impl MeshGeometry {
    pub fn surface(vertex_indices: Vec<[u8; 3]>) -> Self {
        Self {
            vertex_indices,
            instances: None,
            kind: GeometryKind::Surface,
        }
    }

    pub fn edges(vertex_indices: Vec<[u8; 3]>, end_point_and_quad_indices: Vec<[u8; 4]>) -> Self {
        Self {
            vertex_indices,
            instances: None,
            kind: GeometryKind::Edge(EdgeData {
                end_point_and_quad_indices,
            }),
        }
    }

    pub fn silhouettes(
        vertex_indices: Vec<[u8; 3]>,
        end_point_and_quad_indices: Vec<[u8; 4]>,
        normal_pairs: Vec<[u8; 4]>,
    ) -> Self {
        Self {
            vertex_indices,
            instances: None,
            kind: GeometryKind::Silhouette(SilhouetteData {
                edge: EdgeData {
                    end_point_and_quad_indices,
                },
                normal_pairs,
            }),
        }
    }

    pub fn with_instances(mut self, transforms: Vec<[f32; 12]>) -> Self {
        self.instances = Some(transforms);
        self
    }

    /// Silhouettes are edges too.
    pub fn as_edge(&self) -> Option<&EdgeData> {
        match &self.kind {
            GeometryKind::Edge(edge) => Some(edge),
            GeometryKind::Silhouette(silhouette) => Some(&silhouette.edge),
            GeometryKind::Surface => None,
        }
    }

    pub fn as_silhouette(&self) -> Option<&SilhouetteData> {
        match &self.kind {
            GeometryKind::Silhouette(silhouette) => Some(silhouette),
            _ => None,
        }
    }
}
