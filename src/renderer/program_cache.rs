//! Lazily assembled edge programs, memoized per variant.
//!
//! The assembler is pure, so a program built once for an [`EdgeVariant`] is
//! reused for the lifetime of the cache. Callers usually come in through
//! [`EdgeProgramCache::get_for_flags`], which derives the variant from the
//! draw's [`TechniqueFlags`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::renderer::{
    glsl::edge::{EdgeKind, create_edge_builder},
    shader_builder::ShaderProgramSource,
    technique_flags::{IsAnimated, IsInstanced, TechniqueFlags},
};

/// The axes an edge program depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeVariant {
    pub kind: EdgeKind,
    pub instanced: IsInstanced,
    pub animated: IsAnimated,
}

impl EdgeVariant {
    pub fn new(kind: EdgeKind, instanced: IsInstanced, animated: IsAnimated) -> Self {
        Self {
            kind,
            instanced,
            animated,
        }
    }

    pub fn from_flags(kind: EdgeKind, flags: &TechniqueFlags) -> Self {
        Self::new(kind, flags.is_instanced, flags.is_animated)
    }

    /// Every variant, in a fixed order.
    pub fn all() -> Vec<EdgeVariant> {
        let mut variants = Vec::with_capacity(8);
        for kind in [EdgeKind::Plain, EdgeKind::Silhouette] {
            for instanced in [IsInstanced::No, IsInstanced::Yes] {
                for animated in [IsAnimated::No, IsAnimated::Yes] {
                    variants.push(Self::new(kind, instanced, animated));
                }
            }
        }
        variants
    }

    /// File-name friendly identifier, e.g. `silhouette.instanced.animated`.
    pub fn slug(&self) -> String {
        let mut slug = String::from(match self.kind {
            EdgeKind::Plain => "edge",
            EdgeKind::Silhouette => "silhouette",
        });
        if self.instanced == IsInstanced::Yes {
            slug.push_str(".instanced");
        }
        if self.animated == IsAnimated::Yes {
            slug.push_str(".animated");
        }
        slug
    }

    pub fn build(&self) -> ShaderProgramSource {
        create_edge_builder(self.kind, self.instanced, self.animated).build()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProgramCacheOptions {
    /// When set, every newly built program is written to
    /// `<dir>/<slug>.vert.glsl` and `<dir>/<slug>.frag.glsl`.
    pub debug_dump_glsl_dir: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct EdgeProgramCache {
    options: ProgramCacheOptions,
    programs: HashMap<EdgeVariant, ShaderProgramSource>,
}

impl EdgeProgramCache {
    pub fn new(options: ProgramCacheOptions) -> Self {
        Self {
            options,
            programs: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn contains(&self, variant: &EdgeVariant) -> bool {
        self.programs.contains_key(variant)
    }

    /// Returns the program for `variant`, building it on first request.
    pub fn get_or_build(&mut self, variant: EdgeVariant) -> Result<&ShaderProgramSource> {
        if !self.programs.contains_key(&variant) {
            let program = variant.build();
            log::debug!(
                "built edge program {} ({} vertex bytes, {} fragment bytes)",
                variant.slug(),
                program.vertex.len(),
                program.fragment.len()
            );
            if let Some(dir) = &self.options.debug_dump_glsl_dir {
                dump_program(dir, &variant, &program)?;
            }
            self.programs.insert(variant, program);
        } else {
            log::trace!("edge program cache hit: {}", variant.slug());
        }
        self.programs
            .get(&variant)
            .with_context(|| format!("edge program {} missing after build", variant.slug()))
    }

    /// Selects the variant from the draw's technique flags.
    pub fn get_for_flags(
        &mut self,
        kind: EdgeKind,
        flags: &TechniqueFlags,
    ) -> Result<&ShaderProgramSource> {
        let variant = EdgeVariant::from_flags(kind, flags);
        if !self.contains(&variant) {
            log::debug!(
                "edge program {} requested for technique [{}]",
                variant.slug(),
                flags.build_description()
            );
        }
        self.get_or_build(variant)
    }

    /// Builds every variant up front.
    pub fn prewarm(&mut self) -> Result<()> {
        for variant in EdgeVariant::all() {
            self.get_or_build(variant)?;
        }
        Ok(())
    }
}

fn dump_program(dir: &Path, variant: &EdgeVariant, program: &ShaderProgramSource) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create GLSL dump dir {}", dir.display()))?;
    let slug = variant.slug();
    for (ext, source) in [("vert", &program.vertex), ("frag", &program.fragment)] {
        let path = dir.join(format!("{slug}.{ext}.glsl"));
        std::fs::write(&path, source)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
