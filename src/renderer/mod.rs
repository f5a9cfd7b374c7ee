//! Shader variant keys and the edge program assembler.
//!
//! This module is organized into several submodules:
//! - `types`: Core type definitions (VariableType, RenderPass)
//! - `technique_flags`: The variant key selecting a shader program for a draw
//! - `geometry`: Geometry buffers read by attribute binders
//! - `shader_builder`: Vertex/fragment builders and program assembly
//! - `glsl`: Reusable GLSL fragments and the edge/silhouette assembler
//! - `program_cache`: Lazily built programs, one per edge variant
//! - `capabilities`: Context limits and extension support
//! - `system`: Render-system options and entry point
//! - `validation`: GLSL validation using naga
//!
//! The main entry points are:
//! - `create_edge_builder`: Assemble the program for one edge variant
//! - `RenderSystem`: Resolve a program from a draw's `TechniqueFlags`

pub mod capabilities;
pub mod geometry;
pub mod glsl;
pub mod program_cache;
pub mod shader_builder;
pub mod system;
pub mod technique_flags;
pub mod types;
pub mod validation;

pub use capabilities::{Capabilities, ContextInfo};
pub use geometry::{MeshGeometry, VertexArrayBinding};
pub use glsl::edge::{EdgeKind, create_edge_builder};
pub use program_cache::{EdgeProgramCache, EdgeVariant, ProgramCacheOptions};
pub use shader_builder::{ProgramBuilder, ShaderProgramSource};
pub use system::{RenderSystem, RenderSystemOptions};
pub use technique_flags::{
    ClipDef, ClippingType, DrawTarget, FeatureMode, IsAnimated, IsClassified, IsInstanced,
    IsShadowable, TechniqueFlags,
};
pub use types::{RenderPass, VariableType};
pub use validation::{GlslShaderStage, validate_glsl_functions};
