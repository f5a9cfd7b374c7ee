use edge_technique::renderer::{
    EdgeKind, EdgeProgramCache, EdgeVariant, IsAnimated, IsInstanced, MeshGeometry,
    ProgramCacheOptions, TechniqueFlags, create_edge_builder,
};

fn build(kind: EdgeKind, instanced: IsInstanced, animated: IsAnimated) -> String {
    let source = create_edge_builder(kind, instanced, animated).build();
    format!("{}\n{}", source.vertex, source.fragment)
}

#[test]
fn identical_parameters_produce_identical_programs() {
    for variant in EdgeVariant::all() {
        let a = create_edge_builder(variant.kind, variant.instanced, variant.animated).build();
        let b = create_edge_builder(variant.kind, variant.instanced, variant.animated).build();
        assert!(a.same_source(&b), "{} is not deterministic", variant.slug());
    }
}

#[test]
fn variants_produce_distinct_programs() {
    let sources: Vec<String> = EdgeVariant::all()
        .iter()
        .map(|v| build(v.kind, v.instanced, v.animated))
        .collect();
    for (i, a) in sources.iter().enumerate() {
        for b in &sources[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn only_silhouettes_decode_normals_and_discard_early() {
    for instanced in [IsInstanced::No, IsInstanced::Yes] {
        for animated in [IsAnimated::No, IsAnimated::Yes] {
            let silhouette = build(EdgeKind::Silhouette, instanced, animated);
            assert!(silhouette.contains("vec3 octDecodeNormal(vec2 e)"));
            assert!(silhouette.contains("bool checkForEarlyDiscard(vec4 rawPos)"));
            assert!(silhouette.contains("attribute vec4 a_normals;"));

            let plain = build(EdgeKind::Plain, instanced, animated);
            assert!(!plain.contains("octDecodeNormal"));
            assert!(!plain.contains("checkForEarlyDiscard"));
            assert!(!plain.contains("a_normals"));
        }
    }
}

#[test]
fn only_animated_programs_displace_the_opposite_endpoint() {
    for kind in [EdgeKind::Plain, EdgeKind::Silhouette] {
        for instanced in [IsInstanced::No, IsInstanced::Yes] {
            let animated = build(kind, instanced, IsAnimated::Yes);
            assert!(animated.contains("g_otherPos.xyz += computeAnimationDisplacement("));
            assert!(animated.contains("uniform sampler2D u_animDispTexture;"));

            let still = build(kind, instanced, IsAnimated::No);
            assert!(!still.contains("computeAnimationDisplacement"));
        }
    }
}

#[test]
fn instanced_programs_read_instance_transforms() {
    let source = create_edge_builder(EdgeKind::Plain, IsInstanced::Yes, IsAnimated::No).build();
    for row in ["a_instanceMatrixRow0", "a_instanceMatrixRow1", "a_instanceMatrixRow2"] {
        assert!(source.attribute(row).is_some(), "missing {row}");
    }
    assert!(source.vertex.contains("#define MAT_MVP (u_mvp * g_instancedRtcMatrix)"));

    let plain = create_edge_builder(EdgeKind::Plain, IsInstanced::No, IsAnimated::No).build();
    assert!(plain.attribute("a_instanceMatrixRow0").is_none());
}

#[test]
fn edge_geometry_binds_every_attribute() {
    let geometry = MeshGeometry::edges(
        vec![[0, 0, 0], [1, 0, 0], [0, 0, 0], [1, 0, 0]],
        vec![[1, 0, 0, 0], [0, 0, 0, 1], [1, 0, 0, 2], [0, 0, 0, 3]],
    );
    let source = create_edge_builder(EdgeKind::Plain, IsInstanced::No, IsAnimated::No).build();
    let bindings = source.bind_attributes(&geometry);
    assert_eq!(bindings.len(), source.attributes.len());

    let end_points = bindings
        .iter()
        .find(|b| b.name == "a_endPointAndQuadIndices")
        .expect("end point binding");
    assert_eq!(end_points.components, 4);
    assert_eq!(end_points.bytes.len(), 16);
}

#[test]
fn instanced_silhouettes_bind_with_transforms() {
    let identity = [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let geometry = MeshGeometry::silhouettes(vec![[0; 3]], vec![[0; 4]], vec![[128; 4]])
        .with_instances(vec![identity, identity]);
    let source =
        create_edge_builder(EdgeKind::Silhouette, IsInstanced::Yes, IsAnimated::No).build();
    let bindings = source.bind_attributes(&geometry);

    let row1 = bindings
        .iter()
        .find(|b| b.name == "a_instanceMatrixRow1")
        .expect("row 1 binding");
    assert_eq!(row1.divisor, 1);
    assert_eq!(row1.offset, 16);
    assert!(bindings.iter().any(|b| b.name == "a_normals"));
}

#[test]
#[should_panic(expected = "a_normals requires silhouette geometry")]
fn silhouette_program_rejects_plain_edges() {
    let geometry = MeshGeometry::edges(vec![[0; 3]], vec![[0; 4]]);
    let source =
        create_edge_builder(EdgeKind::Silhouette, IsInstanced::No, IsAnimated::No).build();
    source.bind_attributes(&geometry);
}

#[test]
#[should_panic(expected = "requires edge geometry, got surface")]
fn edge_program_rejects_surfaces() {
    let source = create_edge_builder(EdgeKind::Plain, IsInstanced::No, IsAnimated::No).build();
    source.bind_attributes(&MeshGeometry::surface(vec![[0; 3]]));
}

#[test]
fn cache_keys_on_variant_axes_only() {
    let mut cache = EdgeProgramCache::new(ProgramCacheOptions::default());

    let mut translucent = TechniqueFlags::new(true);
    translucent.set_instanced(true);
    let mut opaque = TechniqueFlags::defaults();
    opaque.set_instanced(true);
    opaque.set_classified(true);

    let a = cache
        .get_for_flags(EdgeKind::Plain, &translucent)
        .expect("build")
        .clone();
    let b = cache
        .get_for_flags(EdgeKind::Plain, &opaque)
        .expect("cached")
        .clone();
    assert!(a.same_source(&b));
    assert_eq!(cache.len(), 1);

    cache
        .get_for_flags(EdgeKind::Silhouette, &opaque)
        .expect("build silhouette");
    assert_eq!(cache.len(), 2);
}

#[test]
fn cache_dumps_sources_when_configured() {
    let dir = std::env::temp_dir().join(format!("edge-technique-dump-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut cache = EdgeProgramCache::new(ProgramCacheOptions {
        debug_dump_glsl_dir: Some(dir.clone()),
    });
    let variant = EdgeVariant::new(EdgeKind::Silhouette, IsInstanced::Yes, IsAnimated::Yes);
    let vertex = cache.get_or_build(variant).expect("build").vertex.clone();

    let dumped = std::fs::read_to_string(dir.join("silhouette.instanced.animated.vert.glsl"))
        .expect("vertex dump");
    assert_eq!(dumped, vertex);
    assert!(dir.join("silhouette.instanced.animated.frag.glsl").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
