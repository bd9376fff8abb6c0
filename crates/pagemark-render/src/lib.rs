//! Pagemark Render Library
//!
//! Renderer abstraction and backend-agnostic frame composition for the
//! Pagemark layout editor. Backends consume the composed [`DisplayList`].

mod display;
mod glyph;
mod renderer;

pub use display::{DisplayList, DrawItem, compose};
pub use glyph::{FALLBACK_GLYPH, Glyph, GlyphProvider, StaticGlyphProvider};
pub use renderer::{GridStyle, RenderContext, RenderResult, Renderer, RendererError};
