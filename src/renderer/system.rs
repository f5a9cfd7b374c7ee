//! Render-system options and the entry point that ties capabilities to the
//! edge program cache.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::renderer::{
    capabilities::{Capabilities, ContextInfo, INSTANCED_ARRAYS_EXTENSION},
    glsl::edge::EdgeKind,
    program_cache::{EdgeProgramCache, ProgramCacheOptions},
    shader_builder::ShaderProgramSource,
    technique_flags::{IsInstanced, TechniqueFlags},
};

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSystemOptions {
    /// Extensions to treat as unsupported even if the context reports them.
    #[serde(default)]
    pub disabled_extensions: Vec<String>,
    #[serde(default = "default_true")]
    pub enable_instancing: bool,
    /// Write every newly assembled program to this directory.
    #[serde(default)]
    pub debug_dump_glsl_dir: Option<PathBuf>,
}

impl Default for RenderSystemOptions {
    fn default() -> Self {
        Self {
            disabled_extensions: Vec::new(),
            enable_instancing: true,
            debug_dump_glsl_dir: None,
        }
    }
}

impl RenderSystemOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid render system options")
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read render system options {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("while loading {}", path.display()))
    }
}

#[derive(Debug)]
pub struct RenderSystem {
    options: RenderSystemOptions,
    capabilities: Capabilities,
    edge_programs: EdgeProgramCache,
}

impl RenderSystem {
    pub fn new(options: RenderSystemOptions, ctx: &ContextInfo) -> Result<Self> {
        let mut capabilities = Capabilities::default();
        capabilities
            .init(ctx, &options.disabled_extensions)
            .context("failed to initialize render system capabilities")?;
        Ok(Self::with_capabilities(options, capabilities))
    }

    pub fn with_capabilities(options: RenderSystemOptions, capabilities: Capabilities) -> Self {
        if options.enable_instancing && !capabilities.supports_instancing() {
            log::warn!(
                "instancing requested but {INSTANCED_ARRAYS_EXTENSION} is unavailable; drawing instances individually"
            );
        }
        let edge_programs = EdgeProgramCache::new(ProgramCacheOptions {
            debug_dump_glsl_dir: options.debug_dump_glsl_dir.clone(),
        });
        Self {
            options,
            capabilities,
            edge_programs,
        }
    }

    pub fn options(&self) -> &RenderSystemOptions {
        &self.options
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Instancing is used only when both requested and supported.
    pub fn enable_instancing(&self) -> bool {
        self.options.enable_instancing && self.capabilities.supports_instancing()
    }

    /// Program for a draw. Instanced keys fall back to the non-instanced
    /// program when instancing is disabled or unsupported.
    pub fn edge_program(
        &mut self,
        kind: EdgeKind,
        flags: &TechniqueFlags,
    ) -> Result<&ShaderProgramSource> {
        let mut flags = *flags;
        if flags.is_instanced == IsInstanced::Yes && !self.enable_instancing() {
            log::warn!(
                "instanced draw requested without instancing support; using the non-instanced {kind:?} program"
            );
            flags.is_instanced = IsInstanced::No;
        }
        self.edge_programs.get_for_flags(kind, &flags)
    }

    pub fn edge_program_count(&self) -> usize {
        self.edge_programs.len()
    }
}
