//! Font resolution and measurement.
//!
//! A render pass resolves its font once, from a priority-ordered list of
//! font files, and passes the result explicitly to the renderer and canvases.
//! When no candidate loads, the pass falls back to built-in Helvetica, which
//! cannot draw CJK text.

use crate::layout::TextMeasure;
use crate::types::{CardError, Result};
use printpdf::{BuiltinFont, ParsedFont};
use std::fmt;
use std::path::PathBuf;

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em (from the AFM).
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {..~
];

/// Width of a character the font has no metrics for (CJK glyphs are about 1 em)
const FALLBACK_WIDTH: u16 = 1000;

/// The font chosen for a render pass
#[derive(Clone)]
pub enum ResolvedFont {
    Embedded {
        name: String,
        font: Box<ParsedFont>,
        units_per_em: f32,
    },
    Builtin(BuiltinFont),
}

impl fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedFont::Embedded { name, .. } => f.debug_tuple("Embedded").field(name).finish(),
            ResolvedFont::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
        }
    }
}

impl Default for ResolvedFont {
    fn default() -> Self {
        ResolvedFont::Builtin(BuiltinFont::Helvetica)
    }
}

impl ResolvedFont {
    /// Parse TrueType/OpenType bytes.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let mut warnings = Vec::new();
        let font = ParsedFont::from_bytes(bytes, 0, &mut warnings)
            .ok_or_else(|| CardError::FontUnavailable(format!("{name}: failed to parse font")))?;

        let units_per_em = match font.font_metrics.units_per_em {
            0 => 1000.0,
            upem => upem as f32,
        };

        Ok(ResolvedFont::Embedded {
            name,
            font: Box::new(font),
            units_per_em,
        })
    }

    pub fn name(&self) -> String {
        match self {
            ResolvedFont::Embedded { name, .. } => name.clone(),
            ResolvedFont::Builtin(builtin) => format!("{builtin:?}"),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, ResolvedFont::Builtin(_))
    }
}

impl TextMeasure for ResolvedFont {
    fn char_width(&self, ch: char, size: f32) -> f32 {
        match self {
            ResolvedFont::Embedded {
                font, units_per_em, ..
            } => match font.lookup_glyph_index(ch as u32) {
                // Glyph 0 is .notdef, drawn as a box about 1 em wide
                Some(glyph_id) if glyph_id != 0 => {
                    font.get_horizontal_advance(glyph_id) as f32 / units_per_em * size
                }
                _ => FALLBACK_WIDTH as f32 / 1000.0 * size,
            },
            ResolvedFont::Builtin(_) => builtin_width(ch) as f32 / 1000.0 * size,
        }
    }
}

fn builtin_width(ch: char) -> u16 {
    let code = ch as usize;
    if (0x20..=0x7E).contains(&code) {
        HELVETICA_WIDTHS[code - 0x20]
    } else {
        FALLBACK_WIDTH
    }
}

/// Raw bytes of one font candidate
#[derive(Debug, Clone)]
pub struct FontSource {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Read the candidate files that exist, keeping their priority order.
pub async fn read_font_sources(candidates: &[PathBuf]) -> Vec<FontSource> {
    let mut sources = Vec::with_capacity(candidates.len());
    for path in candidates {
        match tokio::fs::read(path).await {
            Ok(bytes) => sources.push(FontSource {
                name: path.display().to_string(),
                bytes,
            }),
            Err(e) => log::warn!(
                "Skipping font candidate: {}",
                CardError::FontUnavailable(format!("{}: {e}", path.display()))
            ),
        }
    }
    sources
}

/// First source that parses, or Helvetica when none does.
pub fn resolve_font_from(sources: &[FontSource]) -> ResolvedFont {
    for source in sources {
        match ResolvedFont::from_bytes(source.name.clone(), &source.bytes) {
            Ok(font) => {
                log::info!("Using font {}", source.name);
                return font;
            }
            Err(e) => log::warn!("Skipping font candidate: {e}"),
        }
    }

    if !sources.is_empty() {
        log::warn!("No font candidate could be loaded, falling back to Helvetica");
    }
    ResolvedFont::default()
}

/// Read and parse the candidates in order; fall back to Helvetica.
pub async fn resolve_font(candidates: &[PathBuf]) -> ResolvedFont {
    let sources = read_font_sources(candidates).await;
    if sources.is_empty() && !candidates.is_empty() {
        log::warn!("No font candidate could be read, falling back to Helvetica");
    }
    resolve_font_from(&sources)
}
