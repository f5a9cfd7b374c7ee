pub mod renderer;

pub use renderer::{
    EdgeKind, IsAnimated, IsInstanced, RenderSystem, RenderSystemOptions, TechniqueFlags,
    create_edge_builder,
};
