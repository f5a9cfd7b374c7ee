//! Reusable GLSL fragments and the program assemblers built from them.
//!
//! Each `add_*` function wires one fragment (uniforms, globals, functions and
//! component bodies) into a builder. Fragments deduplicate their declarations,
//! so adding the same fragment twice is harmless.

pub mod animation;
pub mod color;
pub mod common;
pub mod edge;
pub mod fragment;
pub mod polyline;
pub mod surface;
pub mod vertex;
pub mod viewport;
