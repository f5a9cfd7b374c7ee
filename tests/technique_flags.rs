use edge_technique::renderer::{
    ClipDef, DrawTarget, FeatureMode, IsAnimated, IsClassified, IsInstanced, IsShadowable,
    RenderPass, TechniqueFlags,
};
use proptest::prelude::*;

fn plain_target() -> DrawTarget {
    DrawTarget {
        clip: ClipDef::default(),
        has_overrides: false,
        current_batch_id: 0,
    }
}

#[test]
fn translucent_shadowable_draw_drops_animation() {
    let mut flags = TechniqueFlags::defaults();
    flags.init(
        &plain_target(),
        RenderPass::Translucent,
        IsInstanced::No,
        IsAnimated::Yes,
        IsClassified::No,
        IsShadowable::Yes,
    );

    assert!(flags.is_translucent);
    assert_eq!(flags.is_animated, IsAnimated::No);
    assert_eq!(flags.is_instanced, IsInstanced::No);
    assert_eq!(flags.is_shadowable, IsShadowable::Yes);
    assert_eq!(flags.feature_mode, FeatureMode::None);
    assert!(!flags.is_hilite());
    assert_eq!(flags.build_description(), "Translucent; shadowable");
}

#[test]
fn description_lists_active_axes_in_order() {
    let mut flags = TechniqueFlags::defaults();
    flags.set_instanced(true);
    flags.clip = ClipDef::for_planes(3);
    flags.feature_mode = FeatureMode::Pick;
    assert_eq!(flags.build_description(), "Opaque; instanced; clip; pick");
}

#[test]
fn hilite_token_sits_between_animated_and_classified() {
    let mut flags = TechniqueFlags::defaults();
    flags.init(
        &DrawTarget {
            clip: ClipDef::for_mask(),
            has_overrides: true,
            current_batch_id: 7,
        },
        RenderPass::HilitePlanarClassification,
        IsInstanced::Yes,
        IsAnimated::Yes,
        IsClassified::Yes,
        IsShadowable::No,
    );
    assert_eq!(
        flags.build_description(),
        "Opaque; instanced; hilite; classified; clip"
    );
}

#[test]
fn init_copies_clip_by_value() {
    let mut target = plain_target();
    target.clip = ClipDef::for_mask();

    let mut flags = TechniqueFlags::defaults();
    flags.init(
        &target,
        RenderPass::OpaqueGeneral,
        IsInstanced::No,
        IsAnimated::No,
        IsClassified::No,
        IsShadowable::No,
    );
    flags.reset(FeatureMode::None, IsInstanced::No, IsShadowable::No);

    assert!(!flags.has_clip());
    assert_eq!(target.clip, ClipDef::for_mask());
}

#[test]
fn batch_id_without_overrides_selects_pick() {
    let target = DrawTarget {
        clip: ClipDef::default(),
        has_overrides: false,
        current_batch_id: 42,
    };
    let mut flags = TechniqueFlags::defaults();
    flags.init(
        &target,
        RenderPass::OpaquePlanar,
        IsInstanced::No,
        IsAnimated::No,
        IsClassified::No,
        IsShadowable::No,
    );
    assert_eq!(flags.feature_mode, FeatureMode::Pick);
    assert!(flags.has_features());
}

fn pass_strategy() -> impl Strategy<Value = RenderPass> {
    prop::sample::select(RenderPass::ALL.to_vec())
}

fn clip_strategy() -> impl Strategy<Value = ClipDef> {
    prop_oneof![
        Just(ClipDef::default()),
        Just(ClipDef::for_mask()),
        (1u32..8).prop_map(ClipDef::for_planes),
    ]
}

fn feature_mode_strategy() -> impl Strategy<Value = FeatureMode> {
    prop_oneof![
        Just(FeatureMode::None),
        Just(FeatureMode::Pick),
        Just(FeatureMode::Overrides),
    ]
}

proptest! {
    #[test]
    fn init_matches_derivation_table(
        pass in pass_strategy(),
        clip in clip_strategy(),
        has_overrides in any::<bool>(),
        batch_id in 0u32..4,
        instanced in any::<bool>(),
        animated in any::<bool>(),
        classified in any::<bool>(),
        shadowable in any::<bool>(),
    ) {
        let target = DrawTarget { clip, has_overrides, current_batch_id: batch_id };
        let mut flags = TechniqueFlags::defaults();
        flags.init(
            &target,
            pass,
            instanced.into(),
            animated.into(),
            classified.into(),
            shadowable.into(),
        );

        prop_assert_eq!(flags.clip, clip);
        prop_assert_eq!(bool::from(flags.is_instanced), instanced);

        if pass.is_hilite() {
            let keep_classified = classified && pass == RenderPass::HilitePlanarClassification;
            prop_assert!(flags.is_hilite());
            prop_assert!(!flags.is_translucent);
            prop_assert_eq!(flags.is_animated, IsAnimated::No);
            prop_assert_eq!(bool::from(flags.is_classified), keep_classified);
            let expected = if keep_classified { FeatureMode::None } else { FeatureMode::Overrides };
            prop_assert_eq!(flags.feature_mode, expected);
        } else {
            prop_assert!(!flags.is_hilite());
            prop_assert_eq!(flags.is_translucent, pass == RenderPass::Translucent);
            prop_assert_eq!(bool::from(flags.is_animated), animated && !shadowable);
            prop_assert_eq!(bool::from(flags.is_classified), classified);
            prop_assert_eq!(bool::from(flags.is_shadowable), shadowable);
            let expected = if has_overrides {
                FeatureMode::Overrides
            } else if batch_id != 0 {
                FeatureMode::Pick
            } else {
                FeatureMode::None
            };
            prop_assert_eq!(flags.feature_mode, expected);
        }
    }

    #[test]
    fn reset_clears_everything_but_mode_and_instancing(
        mode in feature_mode_strategy(),
        instanced in any::<bool>(),
        shadowable in any::<bool>(),
        start_translucent in any::<bool>(),
    ) {
        let mut flags = TechniqueFlags::new(start_translucent);
        flags.clip = ClipDef::for_planes(4);
        flags.set_animated(true);
        flags.set_classified(true);

        flags.reset(mode, instanced.into(), shadowable.into());

        prop_assert!(!flags.has_clip());
        prop_assert_eq!(flags.is_animated, IsAnimated::No);
        prop_assert_eq!(flags.is_classified, IsClassified::No);
        prop_assert!(!flags.is_translucent);
        prop_assert_eq!(flags.feature_mode, mode);
        prop_assert_eq!(bool::from(flags.is_instanced), instanced);
        prop_assert_eq!(bool::from(flags.is_shadowable), shadowable);
    }

    #[test]
    fn hilite_always_drops_translucency_and_animation(
        clip in clip_strategy(),
        instanced in any::<bool>(),
        classified in any::<bool>(),
    ) {
        let mut flags = TechniqueFlags::new(true);
        flags.set_animated(true);
        flags.init_for_hilite(clip, instanced.into(), classified.into());

        prop_assert!(flags.is_hilite());
        prop_assert!(!flags.is_translucent);
        prop_assert_eq!(flags.is_animated, IsAnimated::No);
        prop_assert_eq!(flags.feature_mode == FeatureMode::None, classified);
    }

    #[test]
    fn description_tokens_follow_fixed_order(
        translucent in any::<bool>(),
        instanced in any::<bool>(),
        animated in any::<bool>(),
        classified in any::<bool>(),
        shadowable in any::<bool>(),
        hilite in any::<bool>(),
        clip in clip_strategy(),
        mode in feature_mode_strategy(),
    ) {
        let shadowable = shadowable && !animated;
        let mut flags = TechniqueFlags::new(translucent);
        flags.set_instanced(instanced);
        flags.set_animated(animated);
        flags.set_classified(classified);
        flags.is_shadowable = shadowable.into();
        flags.clip = clip;
        flags.feature_mode = mode;
        if hilite {
            flags.init_for_hilite(clip, instanced.into(), classified.into());
        }

        let mut expected = vec![if translucent && !hilite { "Translucent" } else { "Opaque" }];
        if instanced {
            expected.push("instanced");
        }
        if animated && !hilite {
            expected.push("animated");
        }
        if hilite {
            expected.push("hilite");
        }
        if classified {
            expected.push("classified");
        }
        if !clip.is_none() {
            expected.push("clip");
        }
        if shadowable && !hilite {
            expected.push("shadowable");
        }
        let mode = match (hilite, classified) {
            (true, true) => FeatureMode::None,
            (true, false) => FeatureMode::Overrides,
            (false, _) => mode,
        };
        match mode {
            FeatureMode::None => {}
            FeatureMode::Pick => expected.push("pick"),
            FeatureMode::Overrides => expected.push("overrides"),
        }

        let description = flags.build_description();
        let tokens: Vec<&str> = description.split("; ").collect();
        prop_assert_eq!(tokens, expected);
    }
}
