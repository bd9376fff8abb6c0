//! Icon glyph resolution.

use std::collections::HashMap;

/// A resolved icon glyph: a character in an icon font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(pub char);

/// Placeholder drawn when an icon name cannot be resolved. The element is
/// still rendered; a missing glyph never drops it from the frame.
pub const FALLBACK_GLYPH: Glyph = Glyph('\u{25A1}'); // white square

/// Maps icon names to glyphs. Backends supply their icon font's table.
pub trait GlyphProvider {
    /// Resolve an icon name, or `None` if unknown.
    fn glyph(&self, name: &str) -> Option<Glyph>;

    /// Resolve with fallback; never fails.
    fn glyph_or_fallback(&self, name: &str) -> Glyph {
        self.glyph(name).unwrap_or_else(|| {
            log::warn!("unknown icon name {name:?}, using fallback glyph");
            FALLBACK_GLYPH
        })
    }
}

/// A provider backed by a fixed name table.
#[derive(Debug, Default)]
pub struct StaticGlyphProvider {
    glyphs: HashMap<String, Glyph>,
}

impl StaticGlyphProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, glyph: char) {
        self.glyphs.insert(name.into(), Glyph(glyph));
    }
}

impl GlyphProvider for StaticGlyphProvider {
    fn glyph(&self, name: &str) -> Option<Glyph> {
        self.glyphs.get(name).copied()
    }
}
