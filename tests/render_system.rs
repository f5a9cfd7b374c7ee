use edge_technique::renderer::{
    Capabilities, ContextInfo, EdgeKind, RenderSystem, RenderSystemOptions, TechniqueFlags,
    capabilities::{DepthType, INSTANCED_ARRAYS_EXTENSION, RenderType},
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn context(extensions: &[&str]) -> ContextInfo {
    ContextInfo {
        max_texture_size: 8192,
        max_color_attachments: 4,
        max_draw_buffers: 4,
        max_fragment_texture_units: 16,
        max_vertex_texture_units: 16,
        max_vertex_attribs: 16,
        extensions: extensions.iter().map(|e| e.to_string()).collect(),
    }
}

#[test]
fn capabilities_start_empty() {
    let caps = Capabilities::default();
    assert_eq!(caps.max_texture_size, 0);
    assert_eq!(caps.max_color_attachments, 0);
    assert_eq!(caps.max_draw_buffers, 0);
    assert_eq!(caps.max_fragment_texture_units, 0);
    assert_eq!(caps.max_vertex_texture_units, 0);
    assert_eq!(caps.max_vertex_attribs, 0);
    assert_eq!(caps.max_render_type, RenderType::TextureUnsignedByte);
    assert_eq!(caps.max_depth_type, DepthType::RenderBufferUnsignedShort16);
    assert!(!caps.supports_instancing());
    assert_eq!(caps.extensions().count(), 0);
}

#[test]
fn instancing_requires_request_and_support() {
    init_logger();
    for requested in [false, true] {
        for supported in [false, true] {
            let extensions: &[&str] = if supported { &[INSTANCED_ARRAYS_EXTENSION] } else { &[] };
            let options = RenderSystemOptions {
                enable_instancing: requested,
                ..RenderSystemOptions::default()
            };
            let system = RenderSystem::new(options, &context(extensions)).expect("system");
            assert_eq!(
                system.enable_instancing(),
                requested && supported,
                "requested={requested} supported={supported}"
            );
        }
    }
}

#[test]
fn disabled_extension_turns_instancing_off() {
    init_logger();
    let options = RenderSystemOptions::from_json_str(
        r#"{ "disabledExtensions": ["ANGLE_instanced_arrays"] }"#,
    )
    .expect("options");
    let system =
        RenderSystem::new(options, &context(&[INSTANCED_ARRAYS_EXTENSION])).expect("system");
    assert!(!system.capabilities().supports_instancing());
    assert!(!system.enable_instancing());
}

#[test]
fn options_load_from_file() {
    let path = std::env::temp_dir().join(format!(
        "edge-technique-options-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{ "enableInstancing": false }"#).expect("write options");
    let options = RenderSystemOptions::load_from_path(&path).expect("load");
    let _ = std::fs::remove_file(&path);

    assert!(!options.enable_instancing);
    assert!(options.disabled_extensions.is_empty());
    assert!(options.debug_dump_glsl_dir.is_none());
}

#[test]
fn missing_options_file_is_an_error() {
    let err = RenderSystemOptions::load_from_path("/nonexistent/edge-technique.json")
        .expect_err("missing file");
    assert!(format!("{err:#}").contains("failed to read render system options"));
}

#[test]
fn zero_texture_size_context_is_rejected() {
    let err = RenderSystem::new(RenderSystemOptions::default(), &ContextInfo::default())
        .expect_err("empty context");
    assert!(format!("{err:#}").contains("failed to initialize render system capabilities"));
}

#[test]
fn system_resolves_programs_from_flags() {
    init_logger();
    let mut system = RenderSystem::new(
        RenderSystemOptions::default(),
        &context(&[INSTANCED_ARRAYS_EXTENSION]),
    )
    .expect("system");

    let mut flags = TechniqueFlags::defaults();
    flags.set_instanced(system.enable_instancing());
    let vertex = system
        .edge_program(EdgeKind::Silhouette, &flags)
        .expect("program")
        .vertex
        .clone();
    assert!(vertex.contains("a_instanceMatrixRow0"));
    assert!(vertex.contains("octDecodeNormal"));

    system
        .edge_program(EdgeKind::Silhouette, &flags)
        .expect("cached program");
    assert_eq!(system.edge_program_count(), 1);
}

#[test]
fn instanced_keys_fall_back_without_instancing_support() {
    init_logger();
    let mut system =
        RenderSystem::new(RenderSystemOptions::default(), &context(&[])).expect("system");
    assert!(!system.enable_instancing());

    let mut flags = TechniqueFlags::defaults();
    flags.set_instanced(true);
    let source = system
        .edge_program(EdgeKind::Plain, &flags)
        .expect("program")
        .clone();
    assert!(source.attribute("a_instanceMatrixRow0").is_none());
    assert!(!source.vertex.contains("g_instancedRtcMatrix"));
}
