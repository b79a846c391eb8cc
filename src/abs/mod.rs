//! This module contains the graphics-facing pieces of the crate: the graphics context
//! capability, shader and program objects and uniform uploads.

#[cfg(feature = "inspector")]
pub mod app;
pub mod context;
pub mod shader;
pub mod uniform;

#[cfg(feature = "inspector")]
pub use app::*;
pub use context::*;
pub use shader::*;
pub use uniform::*;
