//! Core type definitions shared by the variant key and the shader builders.

/// GLSL value type for shader declarations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableType {
    Boolean,
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
    Sampler2D,
}

impl VariableType {
    /// Returns the GLSL type name for this value type.
    pub fn glsl(self) -> &'static str {
        match self {
            VariableType::Boolean => "bool",
            VariableType::Int => "int",
            VariableType::Float => "float",
            VariableType::Vec2 => "vec2",
            VariableType::Vec3 => "vec3",
            VariableType::Vec4 => "vec4",
            VariableType::Mat3 => "mat3",
            VariableType::Mat4 => "mat4",
            VariableType::Sampler2D => "sampler2D",
        }
    }
}

/// A named stage of a frame. Determines which subset of state applies to the
/// draws issued within it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderPass {
    #[default]
    None,
    Background,
    OpaqueLinear,
    OpaquePlanar,
    OpaqueGeneral,
    Classification,
    Translucent,
    HiddenEdge,
    Hilite,
    WorldOverlay,
    ViewOverlay,
    SkyBox,
    BackgroundMap,
    HiliteClassification,
    ClassificationByIndex,
    HilitePlanarClassification,
    PlanarClassification,
    VolumeClassifiedRealityData,
}

impl RenderPass {
    pub const ALL: [RenderPass; 18] = [
        RenderPass::None,
        RenderPass::Background,
        RenderPass::OpaqueLinear,
        RenderPass::OpaquePlanar,
        RenderPass::OpaqueGeneral,
        RenderPass::Classification,
        RenderPass::Translucent,
        RenderPass::HiddenEdge,
        RenderPass::Hilite,
        RenderPass::WorldOverlay,
        RenderPass::ViewOverlay,
        RenderPass::SkyBox,
        RenderPass::BackgroundMap,
        RenderPass::HiliteClassification,
        RenderPass::ClassificationByIndex,
        RenderPass::HilitePlanarClassification,
        RenderPass::PlanarClassification,
        RenderPass::VolumeClassifiedRealityData,
    ];

    /// True for the passes that highlight selected or hovered elements.
    pub fn is_hilite(self) -> bool {
        matches!(
            self,
            RenderPass::Hilite
                | RenderPass::HiliteClassification
                | RenderPass::HilitePlanarClassification
        )
    }

    /// Name used for the `kRenderPass_*` constants injected into shaders.
    pub fn glsl_name(self) -> &'static str {
        match self {
            RenderPass::None => "None",
            RenderPass::Background => "Background",
            RenderPass::OpaqueLinear => "OpaqueLinear",
            RenderPass::OpaquePlanar => "OpaquePlanar",
            RenderPass::OpaqueGeneral => "OpaqueGeneral",
            RenderPass::Classification => "Classification",
            RenderPass::Translucent => "Translucent",
            RenderPass::HiddenEdge => "HiddenEdge",
            RenderPass::Hilite => "Hilite",
            RenderPass::WorldOverlay => "WorldOverlay",
            RenderPass::ViewOverlay => "ViewOverlay",
            RenderPass::SkyBox => "SkyBox",
            RenderPass::BackgroundMap => "BackgroundMap",
            RenderPass::HiliteClassification => "HiliteClassification",
            RenderPass::ClassificationByIndex => "ClassificationByIndex",
            RenderPass::HilitePlanarClassification => "HilitePlanarClassification",
            RenderPass::PlanarClassification => "PlanarClassification",
            RenderPass::VolumeClassifiedRealityData => "VolumeClassifiedRealityData",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hilite_family_reports_hilite() {
        let hilite: Vec<RenderPass> = RenderPass::ALL
            .iter()
            .copied()
            .filter(|p| p.is_hilite())
            .collect();
        assert_eq!(
            hilite,
            vec![
                RenderPass::Hilite,
                RenderPass::HiliteClassification,
                RenderPass::HilitePlanarClassification
            ]
        );
    }

    #[test]
    fn all_passes_are_listed_in_discriminant_order() {
        for (i, pass) in RenderPass::ALL.iter().enumerate() {
            assert_eq!(*pass as usize, i, "{pass:?} out of order");
        }
    }
}
