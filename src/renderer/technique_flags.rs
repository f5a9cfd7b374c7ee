//! Shader-variant key.
//!
//! [`TechniqueFlags`] captures the orthogonal axes that decide which compiled
//! program a draw call uses. A render-pass driver keeps one instance per frame
//! and reconfigures it in place with [`TechniqueFlags::init`],
//! [`TechniqueFlags::reset`] or [`TechniqueFlags::init_for_hilite`] before each
//! draw. Equality and hashing over the axes form the program cache key.

use crate::renderer::types::RenderPass;

/// What type of clip volume is active for a draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClippingType {
    #[default]
    None,
    Mask,
    Planes,
}

/// Clip volume descriptor. Plain value; copied wherever it is stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClipDef {
    pub clip_type: ClippingType,
    pub number_of_planes: u32,
}

impl ClipDef {
    /// Plane count is only kept for [`ClippingType::Planes`].
    pub fn new(clip_type: ClippingType, number_of_planes: u32) -> Self {
        let number_of_planes = match clip_type {
            ClippingType::Planes => number_of_planes,
            ClippingType::None | ClippingType::Mask => 0,
        };
        Self {
            clip_type,
            number_of_planes,
        }
    }

    pub fn for_mask() -> Self {
        Self::new(ClippingType::Mask, 0)
    }

    pub fn for_planes(number_of_planes: u32) -> Self {
        Self::new(ClippingType::Planes, number_of_planes)
    }

    pub fn is_none(&self) -> bool {
        self.clip_type == ClippingType::None
    }
}

/// How a technique handles the feature table and symbology overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FeatureMode {
    /// No features.
    #[default]
    None,
    /// Feature table only.
    Pick,
    /// Feature table with symbology overrides.
    Overrides,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IsInstanced {
    #[default]
    No,
    Yes,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IsAnimated {
    #[default]
    No,
    Yes,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IsClassified {
    #[default]
    No,
    Yes,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IsShadowable {
    #[default]
    No,
    Yes,
}

impl From<bool> for IsInstanced {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl From<IsInstanced> for bool {
    fn from(value: IsInstanced) -> Self {
        value == IsInstanced::Yes
    }
}

impl From<bool> for IsAnimated {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl From<IsAnimated> for bool {
    fn from(value: IsAnimated) -> Self {
        value == IsAnimated::Yes
    }
}

impl From<bool> for IsClassified {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl From<IsClassified> for bool {
    fn from(value: IsClassified) -> Self {
        value == IsClassified::Yes
    }
}

impl From<bool> for IsShadowable {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl From<IsShadowable> for bool {
    fn from(value: IsShadowable) -> Self {
        value == IsShadowable::Yes
    }
}

/// Snapshot of the render-target state that [`TechniqueFlags::init`] reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawTarget {
    pub clip: ClipDef,
    /// True when the active draw carries a feature-override table.
    pub has_overrides: bool,
    pub current_batch_id: u32,
}

impl DrawTarget {
    fn feature_mode(&self) -> FeatureMode {
        if self.has_overrides {
            FeatureMode::Overrides
        } else if self.current_batch_id != 0 {
            FeatureMode::Pick
        } else {
            FeatureMode::None
        }
    }
}

/// Flags used to select the shader program used by a rendering technique.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TechniqueFlags {
    pub clip: ClipDef,
    pub feature_mode: FeatureMode,
    pub is_translucent: bool,
    pub is_animated: IsAnimated,
    pub is_instanced: IsInstanced,
    pub is_classified: IsClassified,
    pub is_shadowable: IsShadowable,
    is_hilite: bool,
}

impl TechniqueFlags {
    pub fn new(translucent: bool) -> Self {
        Self {
            is_translucent: translucent,
            ..Self::default()
        }
    }

    /// Opaque, no clip, no features, every axis off.
    pub fn defaults() -> Self {
        Self::new(false)
    }

    pub fn has_clip(&self) -> bool {
        !self.clip.is_none()
    }

    pub fn has_features(&self) -> bool {
        self.feature_mode != FeatureMode::None
    }

    pub fn is_hilite(&self) -> bool {
        self.is_hilite
    }

    /// Configure every axis from the render target and the active pass.
    pub fn init(
        &mut self,
        target: &DrawTarget,
        pass: RenderPass,
        instanced: IsInstanced,
        animated: IsAnimated,
        classified: IsClassified,
        shadowable: IsShadowable,
    ) {
        if pass.is_hilite() {
            let classified = if classified == IsClassified::Yes
                && pass == RenderPass::HilitePlanarClassification
            {
                IsClassified::Yes
            } else {
                IsClassified::No
            };
            self.init_for_hilite(target.clip, instanced, classified);
            return;
        }

        self.is_hilite = false;
        self.is_translucent = pass == RenderPass::Translucent;
        self.clip = target.clip;
        // Shadow maps and animation displacement share a texture unit.
        self.is_animated = match shadowable {
            IsShadowable::Yes => IsAnimated::No,
            IsShadowable::No => animated,
        };
        self.is_instanced = instanced;
        self.is_classified = classified;
        self.is_shadowable = shadowable;
        self.feature_mode = target.feature_mode();
    }

    /// Reset to a feature-mode-only baseline.
    pub fn reset(&mut self, mode: FeatureMode, instanced: IsInstanced, shadowable: IsShadowable) {
        self.is_hilite = false;
        self.feature_mode = mode;
        self.is_translucent = false;
        self.is_animated = IsAnimated::No;
        self.is_classified = IsClassified::No;
        self.is_instanced = instanced;
        self.is_shadowable = shadowable;
        self.clip = ClipDef::default();
    }

    pub fn init_for_hilite(&mut self, clip: ClipDef, instanced: IsInstanced, classified: IsClassified) {
        self.feature_mode = match classified {
            IsClassified::Yes => FeatureMode::None,
            IsClassified::No => FeatureMode::Overrides,
        };
        self.is_hilite = true;
        self.is_translucent = false;
        self.is_animated = IsAnimated::No;
        self.is_shadowable = IsShadowable::No;
        self.is_instanced = instanced;
        self.is_classified = classified;
        self.clip = clip;
    }

    /// A shadowable key is never animated; `init` enforces this, and callers
    /// toggling the axis directly must too.
    pub fn set_animated(&mut self, animated: bool) {
        debug_assert!(
            !(animated && self.is_shadowable == IsShadowable::Yes),
            "shadowable techniques cannot be animated"
        );
        self.is_animated = animated.into();
    }

    pub fn set_instanced(&mut self, instanced: bool) {
        self.is_instanced = instanced.into();
    }

    pub fn set_classified(&mut self, classified: bool) {
        self.is_classified = classified.into();
    }

    /// Human-readable summary of the active axes, in a fixed order.
    pub fn build_description(&self) -> String {
        let mut parts = vec![if self.is_translucent { "Translucent" } else { "Opaque" }];
        if self.is_instanced == IsInstanced::Yes {
            parts.push("instanced");
        }
        if self.is_animated == IsAnimated::Yes {
            parts.push("animated");
        }
        if self.is_hilite {
            parts.push("hilite");
        }
        if self.is_classified == IsClassified::Yes {
            parts.push("classified");
        }
        if self.has_clip() {
            parts.push("clip");
        }
        if self.is_shadowable == IsShadowable::Yes {
            parts.push("shadowable");
        }
        match self.feature_mode {
            FeatureMode::None => {}
            FeatureMode::Pick => parts.push("pick"),
            FeatureMode::Overrides => parts.push("overrides"),
        }
        parts.join("; ")
    }
}
