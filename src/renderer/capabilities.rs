//! What the rendering context can do.
//!
//! The edge techniques only depend on one capability, hardware instancing,
//! but the limits and format support are recorded alongside it so a render
//! system can report them.

use std::collections::BTreeSet;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

pub const INSTANCED_ARRAYS_EXTENSION: &str = "ANGLE_instanced_arrays";

/// Best color attachment type the context can render to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenderType {
    #[default]
    TextureUnsignedByte,
    TextureHalfFloat,
    TextureFloat,
}

/// Best depth attachment type the context supports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DepthType {
    #[default]
    RenderBufferUnsignedShort16,
    TextureUnsignedInt24Stencil8,
    TextureUnsignedInt32,
}

/// Raw limits and extension names reported by a context.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextInfo {
    pub max_texture_size: u32,
    pub max_color_attachments: u32,
    pub max_draw_buffers: u32,
    pub max_fragment_texture_units: u32,
    pub max_vertex_texture_units: u32,
    pub max_vertex_attribs: u32,
    pub extensions: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Capabilities {
    pub max_texture_size: u32,
    pub max_color_attachments: u32,
    pub max_draw_buffers: u32,
    pub max_fragment_texture_units: u32,
    pub max_vertex_texture_units: u32,
    pub max_vertex_attribs: u32,
    pub max_render_type: RenderType,
    pub max_depth_type: DepthType,
    extensions: BTreeSet<String>,
}

impl Capabilities {
    /// Capabilities with only the given extensions available.
    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Records `ctx`, ignoring any extension named in `disabled`.
    pub fn init(&mut self, ctx: &ContextInfo, disabled: &[String]) -> Result<()> {
        if ctx.max_texture_size == 0 {
            bail!("context reports a maximum texture size of 0");
        }

        self.max_texture_size = ctx.max_texture_size;
        self.max_color_attachments = ctx.max_color_attachments;
        self.max_draw_buffers = ctx.max_draw_buffers;
        self.max_fragment_texture_units = ctx.max_fragment_texture_units;
        self.max_vertex_texture_units = ctx.max_vertex_texture_units;
        self.max_vertex_attribs = ctx.max_vertex_attribs;

        self.extensions = ctx
            .extensions
            .iter()
            .filter(|name| !disabled.contains(name))
            .cloned()
            .collect();

        self.max_render_type = if self.query_extension("OES_texture_float")
            || self.query_extension("EXT_color_buffer_float")
        {
            RenderType::TextureFloat
        } else if self.query_extension("OES_texture_half_float") {
            RenderType::TextureHalfFloat
        } else {
            RenderType::TextureUnsignedByte
        };
        self.max_depth_type = if self.query_extension("WEBGL_depth_texture") {
            DepthType::TextureUnsignedInt24Stencil8
        } else {
            DepthType::RenderBufferUnsignedShort16
        };

        log::debug!(
            "capabilities: max texture {}, {} extension(s), render {:?}, depth {:?}",
            self.max_texture_size,
            self.extensions.len(),
            self.max_render_type,
            self.max_depth_type
        );
        Ok(())
    }

    pub fn query_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    pub fn supports_instancing(&self) -> bool {
        self.query_extension(INSTANCED_ARRAYS_EXTENSION)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}
